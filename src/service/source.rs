//! Sources of raw markup text.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::Language;

/// Something that can produce the raw markup for a selector in a language.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Retrieve the raw markup text for `selector` in `language`.
    async fn fetch_text(&self, selector: &str, language: &Language) -> Result<String>;
}

#[async_trait]
impl<T: TextSource + ?Sized> TextSource for Arc<T> {
    async fn fetch_text(&self, selector: &str, language: &Language) -> Result<String> {
        (**self).fetch_text(selector, language).await
    }
}

/// In-memory text source, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTextSource {
    texts: HashMap<(String, Language), String>,
}

impl StaticTextSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text for a selector and language.
    pub fn with_text(
        mut self,
        selector: impl Into<String>,
        language: Language,
        text: impl Into<String>,
    ) -> Self {
        self.insert(selector, language, text);
        self
    }

    /// Add or replace a text.
    pub fn insert(&mut self, selector: impl Into<String>, language: Language, text: impl Into<String>) {
        self.texts.insert((selector.into(), language), text.into());
    }

    /// Number of stored texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check if no texts are stored.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[async_trait]
impl TextSource for StaticTextSource {
    async fn fetch_text(&self, selector: &str, language: &Language) -> Result<String> {
        self.texts
            .get(&(selector.to_string(), language.clone()))
            .cloned()
            .ok_or_else(|| Error::Other(format!("no text for {} in {}", selector, language)))
    }
}
