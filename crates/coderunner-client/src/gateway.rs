//! The seam between the view controller and the task service.

use async_trait::async_trait;

use coderunner_core::{TaskDetail, TaskSummary};

use crate::error::ClientError;
use crate::http::HttpClient;

/// Operations the client needs from the task service.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// List selectable tasks.
    async fn list_tasks(&self) -> Result<Vec<TaskSummary>, ClientError>;

    /// Fetch the detail of a task.
    async fn get_task_detail(&self, name: &str) -> Result<TaskDetail, ClientError>;

    /// Run `code` against a task, returning the raw result text.
    async fn execute_task(&self, name: &str, code: &str) -> Result<String, ClientError>;
}

#[async_trait]
impl TaskGateway for HttpClient {
    async fn list_tasks(&self) -> Result<Vec<TaskSummary>, ClientError> {
        HttpClient::list_tasks(self).await
    }

    async fn get_task_detail(&self, name: &str) -> Result<TaskDetail, ClientError> {
        HttpClient::get_task_detail(self, name).await
    }

    async fn execute_task(&self, name: &str, code: &str) -> Result<String, ClientError> {
        HttpClient::execute_task(self, name, code).await
    }
}
