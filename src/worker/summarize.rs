use serde_json::{Map, Value};
use tracing::{error, info};

use super::pool::AgentPool;
use crate::core::models::{SUMMARY_KEY, initial_state};
use crate::errors::SummarizerError;

/// Generate a summary for one request document.
///
/// Wraps the document as `{ "host_data": document }`, hands it to the agent
/// pool and returns the `summary` string from the final state unchanged.
pub async fn summarize_document(
    pool: &AgentPool,
    document: Map<String, Value>,
) -> Result<String, SummarizerError> {
    let field_count = document.len();
    let final_state = pool.invoke(initial_state(document)).await?;

    match final_state.get(SUMMARY_KEY) {
        Some(Value::String(summary)) => {
            info!(
                field_count,
                summary_chars = summary.chars().count(),
                "Agent produced summary"
            );
            Ok(summary.clone())
        }
        Some(other) => {
            error!("Agent returned a non-string summary: {}", type_name(other));
            Err(SummarizerError::AgentInvocation(format!(
                "'{SUMMARY_KEY}' is a {}, expected a string",
                type_name(other)
            )))
        }
        None => {
            error!("Agent result is missing '{}'", SUMMARY_KEY);
            Err(SummarizerError::AgentInvocation(format!(
                "agent result is missing '{SUMMARY_KEY}'"
            )))
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
