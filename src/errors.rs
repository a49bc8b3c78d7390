use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::api::helpers;

/// Failures raised while serving a relay request.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Invalid request body: {reason}")]
    InvalidRequestBody { status: StatusCode, reason: String },

    #[error("Agent invocation failed: {0}")]
    AgentInvocation(String),

    #[error("Agent did not respond within {0} seconds")]
    AgentTimeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SummarizerError {
    /// HTTP status reported to the caller.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            SummarizerError::InvalidRequestBody { status, .. } => *status,
            SummarizerError::AgentInvocation(_) => StatusCode::BAD_GATEWAY,
            SummarizerError::AgentTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SummarizerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to callers. Agent and internal failures
    /// never expose their underlying text.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            SummarizerError::InvalidRequestBody { reason, .. } => reason.clone(),
            SummarizerError::AgentInvocation(_) => "summarization agent failed".to_string(),
            SummarizerError::AgentTimeout(_) => "summarization agent timed out".to_string(),
            SummarizerError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl From<AgentError> for SummarizerError {
    fn from(error: AgentError) -> Self {
        SummarizerError::AgentInvocation(error.to_string())
    }
}

impl From<tokio::task::JoinError> for SummarizerError {
    fn from(error: tokio::task::JoinError) -> Self {
        SummarizerError::Internal(format!("agent worker failed: {error}"))
    }
}

impl IntoResponse for SummarizerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        }
        helpers::err_response(status, &self.public_message())
    }
}

/// Failures reported by an [`Agent`](crate::agent::Agent) implementation.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent state is missing required key '{0}'")]
    MissingInput(&'static str),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to access OpenAI API: {0}")]
    Upstream(String),

    #[error("Model returned no text")]
    EmptyOutput,

    #[error("Agent failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for AgentError {
    fn from(error: reqwest::Error) -> Self {
        AgentError::Http(error.to_string())
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(error: anyhow::Error) -> Self {
        AgentError::Failed(error.to_string())
    }
}

/// Failures surfaced to the user of the upload client. The `Display` text is
/// exactly what the client prints.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unsupported file type for {0}: expected a .json file")]
    UnsupportedFileType(String),

    #[error("Error reading uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error parsing uploaded file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.to_string())
    }
}

/// Invalid or missing configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: {reason}")]
    Missing { name: &'static str, reason: String },

    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
