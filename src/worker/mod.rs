//! Agent worker pool and summary extraction

pub mod pool;
pub mod summarize;

pub use pool::AgentPool;
pub use summarize::summarize_document;
