//! Integration tests for cached text retrieval.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use copydeck::model::{Language, Paragraph, SubParagraph};
use copydeck::{Error, PreloadEvent, Preloader, Result, StaticTextSource, TextService, TextSource};

/// Source that counts fetches and answers after a short delay.
struct CountingSource {
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            delay: Duration::from_millis(20),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn slow() -> Self {
        Self {
            delay: Duration::from_millis(200),
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSource for CountingSource {
    async fn fetch_text(&self, selector: &str, language: &Language) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(Error::Status {
                status: 503,
                url: format!("http://copy.test/text?selector={}", selector),
            });
        }
        Ok(format!("{}[[br]]{}", selector, language))
    }
}

fn lang(tag: &str) -> Language {
    Language::parse(tag).unwrap()
}

#[tokio::test]
async fn test_concurrent_requests_share_one_fetch() {
    let source = Arc::new(CountingSource::new());
    let service = TextService::new(Arc::clone(&source));
    let en = lang("en");

    let (a, b, c) = tokio::join!(
        service.get("home", &en),
        service.get("home", &en),
        service.get("home", &en),
    );

    assert_eq!(source.calls(), 1);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(
        a.paragraphs,
        vec![Paragraph::from_elements(vec![
            SubParagraph::span("home"),
            SubParagraph::line_break(),
            SubParagraph::span("en"),
        ])]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_spawned_requests_share_one_fetch() {
    let source = Arc::new(CountingSource::new());
    let service = Arc::new(TextService::new(Arc::clone(&source)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.get("about", &lang("de")).await })
        })
        .collect();

    for handle in handles {
        let copy = handle.await.unwrap();
        assert!(!copy.fallback);
        assert_eq!(copy.language, lang("de"));
    }
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_distinct_keys_fetch_separately() {
    let source = Arc::new(CountingSource::new());
    let service = TextService::new(Arc::clone(&source));

    service.get("home", &lang("en")).await;
    service.get("home", &lang("fr")).await;
    service.get("about", &lang("en")).await;
    service.get("home", &lang("en")).await;

    assert_eq!(source.calls(), 3);
    assert_eq!(service.cached_len(), 3);
}

#[tokio::test]
async fn test_failure_falls_back_to_sentinel() {
    let source = Arc::new(CountingSource::failing());
    let service = TextService::new(Arc::clone(&source));

    let copy = service.get("home", &lang("en")).await;
    assert!(copy.fallback);
    assert_eq!(copy.paragraphs, vec![Paragraph::with_text("error")]);

    // fallbacks are cached until invalidated
    service.get("home", &lang("en")).await;
    assert_eq!(source.calls(), 1);

    service.invalidate("home");
    service.get("home", &lang("en")).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_sentinel_is_decoded_as_markup() {
    let service = TextService::new(StaticTextSource::new())
        .with_error_sentinel("Sorry[[br]]try [[,later]]");

    let copy = service.get("missing", &lang("en")).await;
    assert!(copy.fallback);
    assert_eq!(copy.plain_text(), "Sorry\ntry later");
}

#[tokio::test]
async fn test_preloader_tracks_service_loads() {
    let preloader = Arc::new(Preloader::new());
    let events = preloader.subscribe();
    let source = Arc::new(CountingSource::new());
    let service = TextService::new(Arc::clone(&source)).with_preloader(Arc::clone(&preloader), "landing");

    let en = lang("en");
    tokio::join!(
        service.get("hero", &en),
        service.get("hero", &en),
        service.get("footer", &en),
    );

    let progress = preloader.progress("landing");
    assert_eq!(progress.expected, 2);
    assert_eq!(progress.loaded, 2);
    assert!(preloader.is_ready("landing"));

    let ready = events
        .try_iter()
        .filter(|e| matches!(e, PreloadEvent::Ready { .. }))
        .count();
    assert_eq!(ready, 1);
}

#[tokio::test]
async fn test_preloader_counts_failed_loads() {
    let preloader = Arc::new(Preloader::new());
    let service = TextService::new(CountingSource::failing()).with_preloader(Arc::clone(&preloader), "page");

    service.get("a", &lang("en")).await;

    assert!(preloader.is_ready("page"));
    assert_eq!(preloader.progress("page").loaded, 1);
}

#[tokio::test]
async fn test_cancelled_load_is_counted_once() {
    let preloader = Arc::new(Preloader::new());
    let source = Arc::new(CountingSource::slow());
    let service = TextService::new(Arc::clone(&source)).with_preloader(Arc::clone(&preloader), "landing");
    let en = lang("en");

    let timed_out = tokio::time::timeout(Duration::from_millis(20), service.get("hero", &en)).await;
    assert!(timed_out.is_err());
    assert_eq!(preloader.progress("landing").expected, 1);
    assert_eq!(preloader.progress("landing").loaded, 0);

    let copy = service.get("hero", &en).await;
    assert!(!copy.fallback);
    assert_eq!(source.calls(), 2);

    let progress = preloader.progress("landing");
    assert_eq!(progress.expected, 1);
    assert_eq!(progress.loaded, 1);
    assert!(preloader.is_ready("landing"));
}

#[tokio::test]
async fn test_invalidated_pending_load_releases_bucket() {
    let preloader = Arc::new(Preloader::new());
    let service = TextService::new(CountingSource::slow()).with_preloader(Arc::clone(&preloader), "page");
    let en = lang("en");

    let timed_out = tokio::time::timeout(Duration::from_millis(20), service.get("hero", &en)).await;
    assert!(timed_out.is_err());
    assert!(!preloader.is_ready("page"));

    service.invalidate("hero");
    assert!(preloader.is_ready("page"));
    assert_eq!(service.cached_len(), 0);
}
