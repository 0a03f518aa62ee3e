//! View state and the reducer that drives it.
//!
//! Every change to what the client shows goes through [`ViewState::reduce`]:
//! user actions and network completions are both [`Action`]s, and any work
//! the outside world must do comes back as an [`Effect`]. The reducer itself
//! performs no I/O.

use crate::model::{ExecutionRequest, TaskDetail, TaskSummary};

/// Result text shown when a submission fails for any reason.
pub const EXECUTION_FAILED: &str = "Error executing code";

/// Everything the client renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Tasks available for selection.
    pub tasks: Vec<TaskSummary>,

    /// Name of the selected task.
    pub selected_task: Option<String>,

    /// Detail of the selected task, once fetched.
    pub detail: Option<TaskDetail>,

    /// Code buffer, stored verbatim.
    pub code: String,

    /// Whether a submission is in flight.
    pub is_loading: bool,

    /// Raw result text of the last submission.
    pub result: String,

    /// Non-blocking notice (e.g. the task list could not be loaded).
    pub notice: Option<String>,
}

/// Something that happened: a user action or a request completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Client started (or the user asked to reload the task list).
    Init,

    /// Task list request completed.
    TasksLoaded(Result<Vec<TaskSummary>, String>),

    /// User picked a task.
    SelectTask(String),

    /// Detail request for `name` completed.
    DetailLoaded {
        name: String,
        result: Result<TaskDetail, String>,
    },

    /// User replaced the code buffer.
    EditCode(String),

    /// User asked to run the code.
    Submit,

    /// Execution request completed.
    ExecutionFinished(Result<String, String>),
}

/// Work the reducer asks the outside world to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the task list.
    LoadTasks,

    /// Fetch the detail of a task.
    FetchDetail(String),

    /// Send code for execution against a task.
    Execute {
        task: String,
        request: ExecutionRequest,
    },
}

impl Effect {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::LoadTasks => "load_tasks",
            Effect::FetchDetail(_) => "fetch_detail",
            Effect::Execute { .. } => "execute",
        }
    }
}

impl ViewState {
    /// Whether a submission would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.is_loading
            && !self.code.is_empty()
            && self.selected_task.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Apply an action, returning the next state and any effect to perform.
    pub fn reduce(mut self, action: Action) -> (Self, Option<Effect>) {
        let effect = match action {
            Action::Init => Some(Effect::LoadTasks),

            Action::TasksLoaded(Ok(tasks)) => {
                self.tasks = tasks;
                self.notice = None;
                None
            }
            Action::TasksLoaded(Err(error)) => {
                self.tasks.clear();
                self.notice = Some(format!("Could not load tasks: {}", error));
                None
            }

            Action::SelectTask(name) => {
                if self.is_loading || name.is_empty() {
                    None
                } else {
                    self.selected_task = Some(name.clone());
                    self.detail = None;
                    Some(Effect::FetchDetail(name))
                }
            }

            Action::DetailLoaded { name, result } => {
                // Only the response for the current selection is applied.
                if self.selected_task.as_deref() == Some(name.as_str()) {
                    self.detail = result.ok();
                }
                None
            }

            Action::EditCode(code) => {
                self.code = code;
                None
            }

            Action::Submit => {
                if !self.can_submit() {
                    None
                } else {
                    self.is_loading = true;
                    self.result.clear();
                    self.selected_task.clone().map(|task| Effect::Execute {
                        task,
                        request: ExecutionRequest {
                            code: self.code.clone(),
                        },
                    })
                }
            }

            Action::ExecutionFinished(outcome) => {
                if self.is_loading {
                    self.result = match outcome {
                        Ok(text) => text,
                        Err(_) => EXECUTION_FAILED.to_string(),
                    };
                    self.is_loading = false;
                }
                None
            }
        };

        (self, effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Example;

    fn ready() -> ViewState {
        let (state, _) = ViewState::default().reduce(Action::TasksLoaded(Ok(vec![
            TaskSummary::new("sum-two"),
            TaskSummary::new("reverse"),
        ])));
        let (state, _) = state.reduce(Action::SelectTask("sum-two".to_string()));
        let (state, _) = state.reduce(Action::EditCode("print(1)".to_string()));
        state
    }

    fn detail(description: &str) -> TaskDetail {
        TaskDetail {
            description: description.to_string(),
            input: "two integers".to_string(),
            output: "their sum".to_string(),
            examples: vec![Example {
                input: "1 2".to_string(),
                output: "3".to_string(),
            }],
        }
    }

    #[test]
    fn test_init_loads_tasks() {
        let (_, effect) = ViewState::default().reduce(Action::Init);
        assert_eq!(effect, Some(Effect::LoadTasks));
    }

    #[test]
    fn test_task_list_failure_is_not_blocking() {
        let (state, effect) =
            ViewState::default().reduce(Action::TasksLoaded(Err("connection refused".into())));
        assert!(effect.is_none());
        assert!(state.tasks.is_empty());
        assert!(state.notice.is_some());

        // Code can still be edited.
        let (state, _) = state.reduce(Action::EditCode("x = 1".into()));
        assert_eq!(state.code, "x = 1");
    }

    #[test]
    fn test_select_fetches_detail_and_clears_old_one() {
        let state = ViewState {
            detail: Some(detail("old")),
            ..ViewState::default()
        };
        let (state, effect) = state.reduce(Action::SelectTask("reverse".into()));
        assert_eq!(state.selected_task.as_deref(), Some("reverse"));
        assert!(state.detail.is_none());
        assert_eq!(effect, Some(Effect::FetchDetail("reverse".into())));
    }

    #[test]
    fn test_select_empty_name_ignored() {
        let (state, effect) = ViewState::default().reduce(Action::SelectTask(String::new()));
        assert!(effect.is_none());
        assert!(state.selected_task.is_none());
    }

    #[test]
    fn test_detail_applied_for_current_selection() {
        let (state, _) = ready().reduce(Action::DetailLoaded {
            name: "sum-two".into(),
            result: Ok(detail("Add two numbers")),
        });
        assert_eq!(state.detail.unwrap().description, "Add two numbers");
    }

    #[test]
    fn test_stale_detail_discarded() {
        let (state, _) = ready().reduce(Action::SelectTask("reverse".into()));
        // Response for the earlier selection arrives late.
        let (state, _) = state.reduce(Action::DetailLoaded {
            name: "sum-two".into(),
            result: Ok(detail("Add two numbers")),
        });
        assert!(state.detail.is_none());

        let (state, _) = state.reduce(Action::DetailLoaded {
            name: "reverse".into(),
            result: Ok(detail("Reverse a number")),
        });
        assert_eq!(state.detail.unwrap().description, "Reverse a number");
    }

    #[test]
    fn test_detail_failure_clears_silently() {
        let state = ViewState {
            detail: Some(detail("old")),
            ..ready()
        };
        let (state, _) = state.reduce(Action::DetailLoaded {
            name: "sum-two".into(),
            result: Err("not found".into()),
        });
        assert!(state.detail.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_edit_code_verbatim() {
        let code = "def f():\n\treturn 1\n\n";
        let (state, _) = ViewState::default().reduce(Action::EditCode(code.into()));
        assert_eq!(state.code, code);
    }

    #[test]
    fn test_submit_requires_code() {
        let (state, _) = ready().reduce(Action::EditCode(String::new()));
        assert!(!state.can_submit());
        let (state, effect) = state.reduce(Action::Submit);
        assert!(effect.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_submit_requires_selection() {
        let (state, _) = ViewState::default().reduce(Action::EditCode("print(1)".into()));
        assert!(!state.can_submit());
        let (state, effect) = state.reduce(Action::Submit);
        assert!(effect.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_submit_blocked_while_loading() {
        let (state, first) = ready().reduce(Action::Submit);
        assert!(first.is_some());
        assert!(!state.can_submit());

        let (state, second) = state.reduce(Action::Submit);
        assert!(second.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_submit_clears_result_and_executes() {
        let state = ViewState {
            result: "3/5".into(),
            ..ready()
        };
        let (state, effect) = state.reduce(Action::Submit);
        assert!(state.is_loading);
        assert!(state.result.is_empty());
        assert_eq!(
            effect,
            Some(Effect::Execute {
                task: "sum-two".into(),
                request: ExecutionRequest {
                    code: "print(1)".into()
                },
            })
        );
    }

    #[test]
    fn test_execution_success_stores_result() {
        let (state, _) = ready().reduce(Action::Submit);
        let (state, _) = state.reduce(Action::ExecutionFinished(Ok("5/5".into())));
        assert_eq!(state.result, "5/5");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_execution_failure_stores_literal() {
        let (state, _) = ready().reduce(Action::Submit);
        let (state, _) = state.reduce(Action::ExecutionFinished(Err("HTTP 500".into())));
        assert_eq!(state.result, EXECUTION_FAILED);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_selection_locked_while_loading() {
        let (state, _) = ready().reduce(Action::Submit);
        let (state, effect) = state.reduce(Action::SelectTask("reverse".into()));
        assert!(effect.is_none());
        assert_eq!(state.selected_task.as_deref(), Some("sum-two"));
    }

    #[test]
    fn test_completion_without_submission_ignored() {
        let (state, _) = ready().reduce(Action::ExecutionFinished(Ok("1/1".into())));
        assert!(state.result.is_empty());
    }
}
