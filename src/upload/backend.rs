//! HTTP client for the relay's summarize endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::errors::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/summarize";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// What the client could make of a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// The body was not JSON, or held neither summary field as a string.
    Unrecognized,
}

/// Picks the summary text out of a response payload.
///
/// Precedence: `summary` when it is a string, then `summaries` when it is a
/// string. Anything else is [`SummaryOutcome::Unrecognized`].
#[must_use]
pub fn extract_summary(payload: &Value) -> SummaryOutcome {
    ["summary", "summaries"]
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str))
        .map_or(SummaryOutcome::Unrecognized, |s| {
            SummaryOutcome::Summary(s.to_string())
        })
}

pub struct BackendClient {
    http: Client,
    url: Url,
}

impl BackendClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Posts `data` as the JSON body and interprets the reply. No retries.
    pub async fn summarize(&self, data: &Value) -> Result<SummaryOutcome, ClientError> {
        info!(url = %self.url, "Sending dataset to backend");

        let response = self.http.post(self.url.clone()).json(data).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Backend returned an error");
            return Err(ClientError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str::<Value>(&body)
            .map_or(SummaryOutcome::Unrecognized, |payload| {
                extract_summary(&payload)
            }))
    }
}
