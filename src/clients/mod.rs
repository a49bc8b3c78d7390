//! Client modules for external API interactions

pub mod llm_client;

pub use llm_client::LlmClient;
