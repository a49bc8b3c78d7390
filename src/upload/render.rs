//! Terminal text for each step of an upload.

use super::backend::SummaryOutcome;
use super::document::{LoadedDocument, PREVIEW_CHARS};

pub const UNRECOGNIZED_PLACEHOLDER: &str =
    "The backend returned a response this client does not recognize.";

#[must_use]
pub fn loaded(document: &LoadedDocument) -> String {
    format!(
        "File {} loaded successfully\nFile size: {:.2} KB\n\nPreview JSON content (first {} chars):\n{}\n",
        document.name,
        document.size_kb(),
        PREVIEW_CHARS,
        document.preview()
    )
}

#[must_use]
pub fn outcome(outcome: &SummaryOutcome) -> String {
    match outcome {
        SummaryOutcome::Summary(summary) => format!("Dataset Summary\n\n{summary}\n"),
        SummaryOutcome::Unrecognized => format!("{UNRECOGNIZED_PLACEHOLDER}\n"),
    }
}
