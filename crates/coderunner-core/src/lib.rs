//! CodeRunner Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Terminal rendering
//! - Runtime specifics
//!
//! All types here describe the task catalogue, the view state driven by
//! user actions, and the interpretation of execution results.

pub mod i18n;
pub mod model;
pub mod result;
pub mod view;

// Re-export commonly used types
pub use i18n::{Labels, Language, UnknownLanguage};
pub use model::{Example, ExecutionRequest, ExecutionResponse, TaskDetail, TaskSummary};
pub use result::{
    parse, present, ColorKind, ExecutionSummary, IconKind, Outcome, Presentation,
    ResultParseError,
};
pub use view::{Action, Effect, ViewState, EXECUTION_FAILED};
