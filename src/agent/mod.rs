//! Summarization agent seam.
//!
//! The relay only knows that an agent takes a state mapping containing
//! `host_data` and returns a mapping containing `summary`. Implementations are
//! synchronous and may block; the worker pool keeps them off the request
//! dispatch threads.

use crate::core::models::AgentState;
use crate::errors::AgentError;

pub trait Agent: Send + Sync + 'static {
    /// Runs the agent to completion on the current thread.
    fn invoke(&self, state: AgentState) -> Result<AgentState, AgentError>;
}

impl<F> Agent for F
where
    F: Fn(AgentState) -> Result<AgentState, AgentError> + Send + Sync + 'static,
{
    fn invoke(&self, state: AgentState) -> Result<AgentState, AgentError> {
        self(state)
    }
}
