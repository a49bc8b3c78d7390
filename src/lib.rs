//! Host Dataset Summarizer - relays Censys-style host datasets to an LLM
//! summarization agent.
//!
//! The crate ships two programs:
//! 1. `summarizer-api`, a relay service exposing `GET /` and `POST /summarize`
//! 2. `summarizer-upload`, a terminal client that previews a JSON file and
//!    posts it to the relay
//!
//! # Architecture
//!
//! The system uses:
//! - axum on a Tokio runtime for the relay endpoints
//! - a bounded blocking worker pool for the synchronous agent call
//! - reqwest for the `OpenAI` Responses API and for the upload client
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use host_summarizer::api::{RelayState, build_router};
//! use host_summarizer::clients::LlmClient;
//! use host_summarizer::core::config::AgentConfig;
//! use host_summarizer::worker::AgentPool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     host_summarizer::setup_logging();
//!
//!     let agent = LlmClient::from_config(&AgentConfig::from_env()?);
//!     let pool = AgentPool::new(Arc::new(agent), 4, Duration::from_secs(300));
//!     let app = build_router(RelayState::new(pool), None);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod spinner;
pub mod upload;
pub mod utils;
pub mod worker;

pub use errors::{AgentError, ClientError, ConfigError, SummarizerError};

/// Configure structured JSON logging on stderr.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless.
///
/// # Example
///
/// ```
/// host_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    setup_logging_with_default("info");
}

/// Same as [`setup_logging`], but `default_directive` applies when `RUST_LOG`
/// is unset. The upload client passes `"off"` so logs stay opt-in.
pub fn setup_logging_with_default(default_directive: &str) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
