//! Interpretation of execution results.
//!
//! The execution service reports its verdict as prose with two embedded
//! integers, e.g. `"8/10"` or `"8 out of 10 passed"`. All knowledge of that
//! format lives in [`parse`]; everything else works on [`ExecutionSummary`].

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Why a result text could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultParseError {
    /// Fewer than two integers in the text.
    #[error("expected passed and total counts, found {found} number(s)")]
    MissingCounts { found: usize },

    /// Total test count of zero.
    #[error("total test count is zero")]
    ZeroTotal,

    /// A count does not fit in 64 bits.
    #[error("count out of range: {0}")]
    Overflow(String),
}

/// Classification of a parsed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every test passed.
    Success,
    /// No test passed.
    Failure,
    /// Some tests passed.
    Partial,
}

/// Pass/total counts extracted from a result text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub passed: u64,
    pub total: u64,
    /// `round(100 * passed / total)`, halves rounded up.
    pub percentage: u64,
    pub outcome: Outcome,
}

impl ExecutionSummary {
    /// Build a summary from raw counts.
    pub fn from_counts(passed: u64, total: u64) -> Result<Self, ResultParseError> {
        if total == 0 {
            return Err(ResultParseError::ZeroTotal);
        }

        let percentage = rounded_percentage(passed, total);
        let outcome = match percentage {
            100 => Outcome::Success,
            0 => Outcome::Failure,
            _ => Outcome::Partial,
        };

        Ok(Self {
            passed,
            total,
            percentage,
            outcome,
        })
    }
}

fn rounded_percentage(passed: u64, total: u64) -> u64 {
    let passed = u128::from(passed);
    let total = u128::from(total);
    // (200p + t) / 2t == floor(100p/t + 1/2)
    let pct = (200 * passed + total) / (2 * total);
    u64::try_from(pct).unwrap_or(u64::MAX)
}

fn numbers() -> &'static Regex {
    static NUMBERS: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only.
    NUMBERS.get_or_init(|| Regex::new(r"[0-9]+").expect("static pattern is valid"))
}

/// Extract `passed` and `total` from a result text.
///
/// The first two ASCII decimal integers are taken as passed and total, in that
/// order. Any further numbers are ignored.
pub fn parse(text: &str) -> Result<ExecutionSummary, ResultParseError> {
    let counts: Vec<&str> = numbers().find_iter(text).map(|m| m.as_str()).collect();

    let [passed, total, ..] = counts.as_slice() else {
        return Err(ResultParseError::MissingCounts {
            found: counts.len(),
        });
    };

    let passed: u64 = passed
        .parse()
        .map_err(|_| ResultParseError::Overflow(passed.to_string()))?;
    let total: u64 = total
        .parse()
        .map_err(|_| ResultParseError::Overflow(total.to_string()))?;

    ExecutionSummary::from_counts(passed, total)
}

/// Icon shown next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Check,
    Error,
    Warning,
    Unknown,
}

/// Color family used for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKind {
    Success,
    Error,
    Warning,
    Neutral,
}

/// Display values derived from a result text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub icon: IconKind,
    pub color: ColorKind,
    /// Percentage of passed tests, if the text could be parsed.
    pub percentage: Option<u64>,
    /// Value for a progress indicator; only set for partial results.
    pub progress: Option<u64>,
    /// Parsed counts, if any.
    pub summary: Option<ExecutionSummary>,
}

impl Presentation {
    /// Neutral presentation for text that carries no counts.
    pub fn unknown() -> Self {
        Self {
            icon: IconKind::Unknown,
            color: ColorKind::Neutral,
            percentage: None,
            progress: None,
            summary: None,
        }
    }

    pub fn from_summary(summary: ExecutionSummary) -> Self {
        let (icon, color, progress) = match summary.outcome {
            Outcome::Success => (IconKind::Check, ColorKind::Success, None),
            Outcome::Failure => (IconKind::Error, ColorKind::Error, None),
            Outcome::Partial => (IconKind::Warning, ColorKind::Warning, Some(summary.percentage)),
        };

        Self {
            icon,
            color,
            percentage: Some(summary.percentage),
            progress,
            summary: Some(summary),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.summary.map(|s| s.outcome)
    }
}

/// Map a result text to display values. Never fails: text that does not
/// parse yields [`Presentation::unknown`].
pub fn present(text: &str) -> Presentation {
    match parse(text) {
        Ok(summary) => Presentation::from_summary(summary),
        Err(_) => Presentation::unknown(),
    }
}
