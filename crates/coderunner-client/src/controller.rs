//! Execution view controller.
//!
//! Connects the pure [`ViewState`] reducer to a [`TaskGateway`]: effects the
//! reducer emits are performed against the gateway and their completions are
//! fed back as actions. Gateway errors stop here and become string
//! completions; they never reach the caller.

use tracing::{debug, info, warn};

use coderunner_core::{Action, Effect, ViewState};

use crate::gateway::TaskGateway;

/// Perform one effect against the gateway and return its completion action.
pub async fn perform<G: TaskGateway + ?Sized>(gateway: &G, effect: Effect) -> Action {
    debug!(effect = effect.kind(), "Performing effect");

    match effect {
        Effect::LoadTasks => match gateway.list_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "Loaded tasks");
                Action::TasksLoaded(Ok(tasks))
            }
            Err(e) => {
                warn!(error = %e, "Failed to load tasks");
                Action::TasksLoaded(Err(e.to_string()))
            }
        },
        Effect::FetchDetail(name) => {
            let result = gateway.get_task_detail(&name).await.map_err(|e| {
                warn!(task = %name, error = %e, "Failed to fetch task detail");
                e.to_string()
            });
            Action::DetailLoaded { name, result }
        }
        Effect::Execute { task, request } => {
            let result = gateway.execute_task(&task, &request.code).await;
            match &result {
                Ok(text) => info!(task = %task, result = %text, "Execution finished"),
                Err(e) => warn!(task = %task, error = %e, "Execution failed"),
            }
            Action::ExecutionFinished(result.map_err(|e| e.to_string()))
        }
    }
}

/// Drives a [`ViewState`] against a gateway, one request at a time.
pub struct Controller<G> {
    state: ViewState,
    gateway: G,
}

impl<G: TaskGateway> Controller<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            state: ViewState::default(),
            gateway,
        }
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Apply an action and run any resulting effects to completion.
    pub async fn dispatch(&mut self, action: Action) {
        let mut next = Some(action);

        while let Some(action) = next.take() {
            let (state, effect) = std::mem::take(&mut self.state).reduce(action);
            self.state = state;

            if let Some(effect) = effect {
                next = Some(perform(&self.gateway, effect).await);
            }
        }
    }

    /// Load the task list.
    pub async fn init(&mut self) {
        self.dispatch(Action::Init).await;
    }

    pub async fn select_task(&mut self, name: impl Into<String>) {
        self.dispatch(Action::SelectTask(name.into())).await;
    }

    /// Select a task without fetching its detail.
    pub fn select_task_without_detail(&mut self, name: impl Into<String>) {
        let (state, _) = std::mem::take(&mut self.state).reduce(Action::SelectTask(name.into()));
        self.state = state;
    }

    pub async fn edit_code(&mut self, code: impl Into<String>) {
        self.dispatch(Action::EditCode(code.into())).await;
    }

    pub async fn submit(&mut self) {
        self.dispatch(Action::Submit).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use coderunner_core::{Example, TaskDetail, TaskSummary, EXECUTION_FAILED};

    use super::*;
    use crate::error::ClientError;

    /// In-memory gateway that counts detail and execution requests.
    #[derive(Default)]
    struct FakeGateway {
        fail_list: bool,
        fail_execute: bool,
        details: AtomicUsize,
        executions: AtomicUsize,
    }

    #[async_trait]
    impl TaskGateway for FakeGateway {
        async fn list_tasks(&self) -> Result<Vec<TaskSummary>, ClientError> {
            if self.fail_list {
                return Err(ClientError::Network("connection refused".into()));
            }
            Ok(vec![TaskSummary::new("sum-two")])
        }

        async fn get_task_detail(&self, name: &str) -> Result<TaskDetail, ClientError> {
            self.details.fetch_add(1, Ordering::SeqCst);
            if name != "sum-two" {
                return Err(ClientError::NotFound(name.to_string()));
            }
            Ok(TaskDetail {
                description: "Add two numbers".into(),
                input: "a b".into(),
                output: "a + b".into(),
                examples: vec![Example {
                    input: "1 2".into(),
                    output: "3".into(),
                }],
            })
        }

        async fn execute_task(&self, _name: &str, _code: &str) -> Result<String, ClientError> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            if self.fail_execute {
                return Err(ClientError::Execution {
                    status: 500,
                    body: None,
                });
            }
            Ok("5/5".into())
        }
    }

    #[tokio::test]
    async fn test_full_flow() {
        let mut controller = Controller::new(FakeGateway::default());
        controller.init().await;
        assert_eq!(controller.state().tasks, vec![TaskSummary::new("sum-two")]);

        controller.select_task("sum-two").await;
        assert_eq!(
            controller.state().detail.as_ref().map(|d| d.examples.len()),
            Some(1)
        );

        controller.edit_code("print(sum(map(int, input().split())))").await;
        controller.submit().await;

        assert_eq!(controller.state().result, "5/5");
        assert!(!controller.state().is_loading);
    }

    #[tokio::test]
    async fn test_list_failure_leaves_list_empty() {
        let mut controller = Controller::new(FakeGateway {
            fail_list: true,
            ..FakeGateway::default()
        });
        controller.init().await;
        assert!(controller.state().tasks.is_empty());
        assert!(controller.state().notice.is_some());
    }

    #[tokio::test]
    async fn test_unknown_task_shows_no_detail() {
        let mut controller = Controller::new(FakeGateway::default());
        controller.select_task("missing").await;
        assert_eq!(controller.state().selected_task.as_deref(), Some("missing"));
        assert!(controller.state().detail.is_none());
    }

    #[tokio::test]
    async fn test_execution_error_shows_literal() {
        let mut controller = Controller::new(FakeGateway {
            fail_execute: true,
            ..FakeGateway::default()
        });
        controller.select_task("sum-two").await;
        controller.edit_code("print(1)").await;
        controller.submit().await;

        assert_eq!(controller.state().result, EXECUTION_FAILED);
        assert!(!controller.state().is_loading);
    }

    #[tokio::test]
    async fn test_guarded_submit_issues_no_request() {
        let mut controller = Controller::new(FakeGateway::default());

        // No task selected.
        controller.edit_code("print(1)").await;
        controller.submit().await;

        // Task selected, code empty.
        controller.select_task("sum-two").await;
        controller.edit_code("").await;
        controller.submit().await;

        assert_eq!(controller.gateway.executions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_without_detail_sends_only_execution() {
        let mut controller = Controller::new(FakeGateway::default());
        controller.select_task_without_detail("sum-two");
        assert_eq!(controller.state().selected_task.as_deref(), Some("sum-two"));

        controller.edit_code("print(1)").await;
        controller.submit().await;

        assert_eq!(controller.state().result, "5/5");
        assert_eq!(controller.gateway.details.load(Ordering::SeqCst), 0);
        assert_eq!(controller.gateway.executions.load(Ordering::SeqCst), 1);
    }
}
