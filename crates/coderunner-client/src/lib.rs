//! Client library for the CodeRunner task service.
//!
//! Provides the HTTP gateway for the task REST API and a headless driver
//! that runs the view reducer against it.

pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;

pub use controller::{perform, Controller};
pub use error::ClientError;
pub use gateway::TaskGateway;
pub use http::{HttpClient, DEFAULT_BASE_URL};
