use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::core::models::AgentState;
use crate::errors::SummarizerError;

/// Runs agent invocations on blocking worker threads, at most `workers` at a
/// time.
///
/// A permit travels with the blocking task and is released only when the
/// agent returns, so calls abandoned on timeout still hold their slot.
#[derive(Clone)]
pub struct AgentPool {
    agent: Arc<dyn Agent>,
    permits: Arc<Semaphore>,
    workers: usize,
    timeout: Duration,
}

impl AgentPool {
    pub fn new(agent: Arc<dyn Agent>, workers: usize, timeout: Duration) -> Self {
        let workers = workers.max(1);
        Self {
            agent,
            permits: Arc::new(Semaphore::new(workers)),
            workers,
            timeout,
        }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Slots not currently held by an agent call.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Invokes the agent with `state`, waiting for a free worker first. The
    /// timeout covers both the wait and the call.
    pub async fn invoke(&self, state: AgentState) -> Result<AgentState, SummarizerError> {
        match tokio::time::timeout(self.timeout, self.run(state)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Agent invocation timed out"
                );
                Err(SummarizerError::AgentTimeout(self.timeout.as_secs()))
            }
        }
    }

    async fn run(&self, state: AgentState) -> Result<AgentState, SummarizerError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| SummarizerError::Internal(format!("worker pool closed: {e}")))?;
        debug!(available = self.available(), "Acquired agent worker");

        let agent = Arc::clone(&self.agent);
        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            agent.invoke(state)
        })
        .await?;

        Ok(result?)
    }
}
