//! Localized UI labels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::result::ExecutionSummary;

/// Supported label languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Ru,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language '{0}' (expected 'en' or 'ru')")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// The other language.
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Ru => &RU,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Label table for one language.
#[derive(Debug)]
pub struct Labels {
    pub task_name: &'static str,
    pub description: &'static str,
    pub input: &'static str,
    pub output: &'static str,
    pub examples: &'static str,
    pub code_editor: &'static str,
    pub run_code: &'static str,
    pub result: &'static str,
    pub running: &'static str,
    summary_template: &'static str,
}

impl Labels {
    /// Sentence describing a parsed result, e.g. "8 of 10 tests passed (80%).".
    pub fn summary(&self, summary: &ExecutionSummary) -> String {
        self.summary_template
            .replace("{passed}", &summary.passed.to_string())
            .replace("{total}", &summary.total.to_string())
            .replace("{pct}", &summary.percentage.to_string())
    }
}

static EN: Labels = Labels {
    task_name: "Task Name",
    description: "Description",
    input: "Input",
    output: "Output",
    examples: "Examples",
    code_editor: "Code Editor",
    run_code: "Run Code",
    result: "Result",
    running: "Running...",
    summary_template: "{passed} of {total} tests passed ({pct}%).",
};

static RU: Labels = Labels {
    task_name: "Название задания",
    description: "Описание",
    input: "Ввод",
    output: "Вывод",
    examples: "Примеры",
    code_editor: "Редактор кода",
    run_code: "Запустить код",
    result: "Результат",
    running: "Выполняется...",
    summary_template: "{passed} из {total} тестов пройдено ({pct}%).",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::parse;

    #[test]
    fn test_parse_language() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" RU ".parse::<Language>().unwrap(), Language::Ru);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::En.toggle(), Language::Ru);
        assert_eq!(Language::Ru.toggle(), Language::En);
    }

    #[test]
    fn test_summary_sentence() {
        let summary = parse("8/10").unwrap();
        assert_eq!(
            Language::En.labels().summary(&summary),
            "8 of 10 tests passed (80%)."
        );
        assert_eq!(
            Language::Ru.labels().summary(&summary),
            "8 из 10 тестов пройдено (80%)."
        );
    }
}
