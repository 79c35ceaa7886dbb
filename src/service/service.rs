//! Caching text service that never fails the render.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

use super::{ServiceConfig, TextSource, DEFAULT_ERROR_SENTINEL};
use crate::model::{Language, LocalizedCopy};
use crate::parser::decode;
use crate::preload::{LoadTicket, Preloader};

type CacheKey = (String, Language);

/// A cache slot plus the preloader ticket announced when it was created.
///
/// The ticket belongs to the slot, not to a fetch attempt: a cancelled
/// fetch that is retried completes the same ticket, and a slot dropped
/// with its fetch unfinished completes it on drop.
struct CacheEntry {
    cell: OnceCell<LocalizedCopy>,
    ticket: Mutex<Option<(Arc<Preloader>, LoadTicket)>>,
}

impl CacheEntry {
    fn new(preloader: Option<&(Arc<Preloader>, String)>) -> Self {
        let ticket = preloader.map(|(preloader, bucket)| {
            (Arc::clone(preloader), preloader.expect(bucket.as_str()))
        });
        Self {
            cell: OnceCell::new(),
            ticket: Mutex::new(ticket),
        }
    }

    fn complete(&self) {
        let ticket = self
            .ticket
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some((preloader, ticket)) = ticket {
            preloader.complete(&ticket);
        }
    }
}

impl Drop for CacheEntry {
    fn drop(&mut self) {
        self.complete();
    }
}

/// Retrieves, decodes and caches copy from a [`TextSource`].
///
/// Concurrent requests for the same selector and language share a single
/// fetch. When the source fails, the error sentinel is decoded in its place
/// and the result is flagged as fallback, so callers always get renderable
/// paragraphs.
pub struct TextService<S> {
    source: S,
    error_sentinel: String,
    default_language: Language,
    cache: Mutex<HashMap<CacheKey, Arc<CacheEntry>>>,
    preloader: Option<(Arc<Preloader>, String)>,
}

impl<S: TextSource> TextService<S> {
    /// Create a service over a source with the default sentinel.
    pub fn new(source: S) -> Self {
        Self {
            source,
            error_sentinel: DEFAULT_ERROR_SENTINEL.to_string(),
            default_language: Language::default(),
            cache: Mutex::new(HashMap::new()),
            preloader: None,
        }
    }

    /// Create a service taking sentinel and default language from `config`.
    pub fn with_config(source: S, config: &ServiceConfig) -> Self {
        Self::new(source)
            .with_error_sentinel(config.error_sentinel.clone())
            .with_default_language(config.default_language.clone())
    }

    /// Set the text decoded when retrieval fails.
    pub fn with_error_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.error_sentinel = sentinel.into();
        self
    }

    /// Set the language used by [`TextService::get_default`].
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Report every cache entry to a preloader bucket.
    ///
    /// Each selector and language pair counts as one expected load, however
    /// many times its fetch is cancelled and restarted.
    pub fn with_preloader(mut self, preloader: Arc<Preloader>, bucket: impl Into<String>) -> Self {
        self.preloader = Some((preloader, bucket.into()));
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get decoded copy for a selector in a language.
    pub async fn get(&self, selector: &str, language: &Language) -> LocalizedCopy {
        let entry = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache
                .entry((selector.to_string(), language.clone()))
                .or_insert_with(|| Arc::new(CacheEntry::new(self.preloader.as_ref())))
                .clone()
        };

        if let Some(copy) = entry.cell.get() {
            log::debug!("cache hit for {} ({})", selector, language);
            return copy.clone();
        }

        let copy = entry
            .cell
            .get_or_init(|| self.load(selector, language))
            .await
            .clone();
        entry.complete();
        copy
    }

    /// Get decoded copy in the default language.
    pub async fn get_default(&self, selector: &str) -> LocalizedCopy {
        let language = self.default_language.clone();
        self.get(selector, &language).await
    }

    /// Drop cached copy for a selector in every language.
    pub fn invalidate(&self, selector: &str) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.retain(|(cached, _), _| cached != selector);
    }

    /// Drop all cached copy.
    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached entries, including in-flight ones.
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn load(&self, selector: &str, language: &Language) -> LocalizedCopy {
        match self.source.fetch_text(selector, language).await {
            Ok(raw) => LocalizedCopy::new(selector, language.clone(), decode(&raw)),
            Err(err) => {
                log::warn!(
                    "failed to load {} ({}): {}; using sentinel text",
                    selector,
                    language,
                    err
                );
                LocalizedCopy::new(selector, language.clone(), decode(&self.error_sentinel))
                    .as_fallback()
            }
        }
    }
}
