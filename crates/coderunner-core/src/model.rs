//! Task catalogue and execution payload types.

use serde::{Deserialize, Serialize};

/// A selectable task as returned by the listing endpoint.
///
/// The service has answered both `[{"name": "..."}]` and `["..."]` over time,
/// so either shape decodes into this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SummaryWire")]
pub struct TaskSummary {
    /// Unique task name.
    pub name: String,
}

impl TaskSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryWire {
    Named { name: String },
    Bare(String),
}

impl From<SummaryWire> for TaskSummary {
    fn from(wire: SummaryWire) -> Self {
        match wire {
            SummaryWire::Named { name } | SummaryWire::Bare(name) => Self { name },
        }
    }
}

/// A worked example attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

/// Full description of a task, fetched when the task is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Problem statement.
    pub description: String,

    /// Expected input format.
    pub input: String,

    /// Expected output format.
    pub output: String,

    /// Worked examples shown to the user.
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// Body of an execution request. The task name travels in the URL path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
}

/// Body returned by the execution endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Free-form result text, e.g. "8/10".
    pub result: String,
}
