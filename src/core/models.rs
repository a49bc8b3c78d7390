use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the request document is handed to the agent.
pub const HOST_DATA_KEY: &str = "host_data";

/// Key the agent writes its result under.
pub const SUMMARY_KEY: &str = "summary";

pub const LIVENESS_MESSAGE: &str = "Host JSON Summarizer API is running.";

/// Per-request mapping passed to and returned from the agent.
pub type AgentState = Map<String, Value>;

/// Wraps a request document as a fresh agent state.
#[must_use]
pub fn initial_state(host_data: Map<String, Value>) -> AgentState {
    let mut state = AgentState::new();
    state.insert(HOST_DATA_KEY.to_string(), Value::Object(host_data));
    state
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
