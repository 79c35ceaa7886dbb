//! Aggregation of concurrent loads into per-bucket readiness.
//!
//! Each logical bucket (a page, a section, ...) counts how many loads it
//! expects and how many have finished. A load is announced with
//! [`Preloader::expect`], which hands out a [`LoadTicket`], and finished
//! with [`Preloader::complete`]. A ticket counts at most once, so a load
//! observed by several subscribers still advances the bucket by one.
//!
//! ```
//! use copydeck::preload::Preloader;
//!
//! let preloader = Preloader::new();
//! let ticket = preloader.expect("home");
//! assert!(!preloader.is_ready("home"));
//!
//! preloader.complete(&ticket);
//! preloader.complete(&ticket);
//! assert_eq!(preloader.progress("home").loaded, 1);
//! assert!(preloader.is_ready("home"));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Proof that a load was announced to a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    id: u64,
    bucket: String,
}

impl LoadTicket {
    /// Bucket this ticket belongs to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Loading progress of one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Loads announced
    pub expected: usize,
    /// Loads finished
    pub loaded: usize,
}

impl Progress {
    /// True once every announced load has finished.
    pub fn is_ready(&self) -> bool {
        self.loaded >= self.expected
    }

    /// Finished fraction in `0.0..=1.0`; an empty bucket counts as done.
    pub fn fraction(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            (self.loaded as f64 / self.expected as f64).min(1.0)
        }
    }
}

/// Events broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadEvent {
    /// A load was announced.
    Expected {
        /// Bucket name
        bucket: String,
        /// Progress after the announcement
        progress: Progress,
    },

    /// A load finished.
    Loaded {
        /// Bucket name
        bucket: String,
        /// Progress after the completion
        progress: Progress,
    },

    /// Every announced load of the bucket has finished.
    Ready {
        /// Bucket name
        bucket: String,
    },
}

#[derive(Debug, Default)]
struct Bucket {
    progress: Progress,
    outstanding: HashSet<u64>,
}

/// Tracks expected and finished loads per bucket.
#[derive(Debug, Default)]
pub struct Preloader {
    buckets: Mutex<HashMap<String, Bucket>>,
    subscribers: Mutex<Vec<Sender<PreloadEvent>>>,
    next_ticket: AtomicU64,
}

impl Preloader {
    /// Create a preloader with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce one more load for `bucket`.
    pub fn expect(&self, bucket: &str) -> LoadTicket {
        let id = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let progress = {
            let mut buckets = self.lock_buckets();
            let entry = buckets.entry(bucket.to_string()).or_default();
            entry.outstanding.insert(id);
            entry.progress.expected += 1;
            entry.progress
        };

        log::debug!(
            "preload {}: expecting {} ({} loaded)",
            bucket,
            progress.expected,
            progress.loaded
        );
        self.publish(PreloadEvent::Expected {
            bucket: bucket.to_string(),
            progress,
        });

        LoadTicket {
            id,
            bucket: bucket.to_string(),
        }
    }

    /// Mark the load behind `ticket` as finished.
    ///
    /// Returns false when the ticket was already completed or its bucket
    /// has been reset since it was issued.
    pub fn complete(&self, ticket: &LoadTicket) -> bool {
        let progress = {
            let mut buckets = self.lock_buckets();
            let Some(entry) = buckets.get_mut(&ticket.bucket) else {
                return false;
            };
            if !entry.outstanding.remove(&ticket.id) {
                return false;
            }
            entry.progress.loaded += 1;
            entry.progress
        };

        log::debug!(
            "preload {}: {}/{} loaded",
            ticket.bucket,
            progress.loaded,
            progress.expected
        );
        self.publish(PreloadEvent::Loaded {
            bucket: ticket.bucket.clone(),
            progress,
        });
        if progress.is_ready() {
            self.publish(PreloadEvent::Ready {
                bucket: ticket.bucket.clone(),
            });
        }
        true
    }

    /// Progress of a bucket; unknown buckets report nothing expected.
    pub fn progress(&self, bucket: &str) -> Progress {
        self.lock_buckets()
            .get(bucket)
            .map(|b| b.progress)
            .unwrap_or_default()
    }

    /// True once every load announced for `bucket` has finished.
    pub fn is_ready(&self, bucket: &str) -> bool {
        self.progress(bucket).is_ready()
    }

    /// True when every known bucket is ready.
    pub fn is_all_ready(&self) -> bool {
        self.lock_buckets().values().all(|b| b.progress.is_ready())
    }

    /// Names of known buckets, sorted.
    pub fn buckets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_buckets().keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget a bucket. Tickets issued before the reset are ignored.
    pub fn reset(&self, bucket: &str) {
        self.lock_buckets().remove(bucket);
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> Receiver<PreloadEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn publish(&self, event: PreloadEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // dropped receivers disconnect their sender
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn lock_buckets(&self) -> std::sync::MutexGuard<'_, HashMap<String, Bucket>> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
