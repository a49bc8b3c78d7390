//! Upload client: load a local JSON dataset, preview it, send it to the
//! relay and show the summary.

pub mod backend;
pub mod document;
pub mod render;

pub use backend::{BackendClient, SummaryOutcome, extract_summary};
pub use document::{LoadedDocument, preview};
