//! Decoded copy together with where it came from.

use super::{Language, Paragraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decoded result of retrieving one piece of copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedCopy {
    /// Selector key the copy was requested with
    pub selector: String,

    /// Language the copy was requested in
    pub language: Language,

    /// Decoded paragraphs, never empty
    pub paragraphs: Vec<Paragraph>,

    /// When the raw text was received
    pub fetched_at: DateTime<Utc>,

    /// True when retrieval failed and the error sentinel was decoded instead
    pub fallback: bool,
}

impl LocalizedCopy {
    /// Create copy from already-decoded paragraphs.
    pub fn new(selector: impl Into<String>, language: Language, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            selector: selector.into(),
            language,
            paragraphs,
            fetched_at: Utc::now(),
            fallback: false,
        }
    }

    /// Mark this copy as sentinel fallback content.
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Plain text of all paragraphs, separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
