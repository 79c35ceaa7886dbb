//! Retrieval of raw copy from text services.
//!
//! A [`TextSource`] yields raw markup for a selector and language. The
//! [`TextService`] sits in front of a source, decodes what it returns,
//! caches the result and substitutes the error sentinel on failure.

#[cfg(feature = "http")]
mod client;
mod config;
#[allow(clippy::module_inception)]
mod service;
mod source;

#[cfg(feature = "http")]
pub use client::TextClient;
pub use config::{ServiceConfig, DEFAULT_ENDPOINT, DEFAULT_ERROR_SENTINEL};
pub use service::TextService;
pub use source::{StaticTextSource, TextSource};
