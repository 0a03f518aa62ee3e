//! HTTP client for the task REST endpoints.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use coderunner_core::{ExecutionRequest, ExecutionResponse, TaskDetail, TaskSummary};

use crate::error::ClientError;

/// Base URL of the task endpoints when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/tasks";

/// HTTP client for the task REST API.
///
/// Every call is a fresh request: no retries, no caching, transport default
/// timeouts.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client rooted at `base_url`
    /// (e.g. "http://localhost:8000/api/v1/tasks").
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidInput(format!("base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidInput(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            inner: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check whether the service reports itself healthy.
    ///
    /// The health route is a sibling of the task collection
    /// (`/api/v1/tasks` checks `/api/v1/healthcheck`). A service that does
    /// not expose it answers 404, which is reported as unhealthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = self.health_url()?;
        debug!(url = %url, "Checking health");

        let response = self.inner.get(url).send().await?;
        Ok(response.status().is_success())
    }

    /// List all task names.
    pub async fn list_tasks(&self) -> Result<Vec<TaskSummary>, ClientError> {
        let url = self.endpoint(&["names"])?;
        self.get_json(url).await
    }

    /// Get the detail of a single task.
    pub async fn get_task_detail(&self, name: &str) -> Result<TaskDetail, ClientError> {
        require_name(name)?;
        let url = self.endpoint(&[name])?;
        debug!(url = %url, "GET request");

        let response = self.inner.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(task = %name, "Task unknown to service");
            return Err(ClientError::NotFound(format!("task '{}'", name)));
        }
        if !status.is_success() {
            return Err(ClientError::Network(format!("HTTP {} for task '{}'", status, name)));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Submit code against a task and return the raw result text.
    pub async fn execute_task(&self, name: &str, code: &str) -> Result<String, ClientError> {
        require_name(name)?;
        let url = self.endpoint(&["send_task", name])?;
        debug!(url = %url, bytes = code.len(), "POST request");

        let body = ExecutionRequest {
            code: code.to_string(),
        };
        let response = self.inner.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            warn!(task = %name, status = %status, "Execution request failed");
            return Err(ClientError::Execution {
                status: status.as_u16(),
                body,
            });
        }

        let response: ExecutionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(response.result)
    }

    /// Get JSON from an endpoint.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(url = %url, "GET request");

        let response = self.inner.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                url.path()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn health_url(&self) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidInput(format!("base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .pop()
            .push("healthcheck");
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidInput(format!("base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn require_name(name: &str) -> Result<(), ClientError> {
    if name.is_empty() {
        return Err(ClientError::InvalidInput("task name is empty".to_string()));
    }
    Ok(())
}
