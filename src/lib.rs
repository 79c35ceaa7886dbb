//! # copydeck
//!
//! Decoder and renderer for site copy written in a small bracket markup.
//!
//! Copy is delivered by a text service as plain strings. `[[]]` separates
//! paragraphs; inside a paragraph, `[[tag,content]]` marks a line break
//! (`br`), a link to an asset (`a_asset`) or a bold+italic run (any other
//! tag, usually empty). This library decodes such strings into a typed
//! paragraph model and renders it to HTML, Markdown, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```
//! use copydeck::{decode, render};
//!
//! fn main() -> copydeck::Result<()> {
//!     let paragraphs = decode("Hello [[,world]][[br]]See [[a_asset,cv.pdf]]");
//!
//!     let options = render::RenderOptions::new().with_asset_base("/assets");
//!     let html = render::to_html(&paragraphs, &options)?;
//!     assert_eq!(
//!         html,
//!         "<p>Hello <strong><em>world</em></strong><br>See <a href=\"/assets/cv.pdf\">cv.pdf</a></p>"
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Total decoding**: every string decodes; unknown tags become emphasis
//! - **Multiple output formats**: HTML, Markdown, plain text, JSON
//! - **Text services**: cached retrieval with error-sentinel fallback
//!   (HTTP client behind the `http` feature)
//! - **Preloading**: per-bucket readiness over many concurrent loads
//! - **Parallel batch decoding**: uses Rayon for many texts

pub mod error;
pub mod model;
pub mod parser;
pub mod preload;
pub mod render;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Language, LocalizedCopy, Paragraph, SubParagraph, SubParagraphRoot};
pub use parser::{
    classify_fragment, decode, decode_all, decode_paragraph, decode_with_options, DecodeOptions,
};
pub use preload::{LoadTicket, PreloadEvent, Preloader, Progress};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, RenderOptions, RenderStats};
#[cfg(feature = "http")]
pub use service::TextClient;
pub use service::{ServiceConfig, StaticTextSource, TextService, TextSource};

use std::io::Read;
use std::path::Path;

/// Decode a file containing markup.
///
/// # Example
///
/// ```no_run
/// use copydeck::decode_file;
///
/// let paragraphs = decode_file("about.en.txt").unwrap();
/// println!("Paragraphs: {}", paragraphs.len());
/// ```
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Vec<Paragraph>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(decode(&raw))
}

/// Decode markup read from a reader.
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Vec<Paragraph>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    Ok(decode(&raw))
}

/// Convert markup to HTML with default options.
///
/// # Example
///
/// ```
/// let html = copydeck::to_html("One[[]]Two").unwrap();
/// assert_eq!(html, "<p>One</p>\n<p>Two</p>");
/// ```
pub fn to_html(raw: &str) -> Result<String> {
    render::to_html(&decode(raw), &RenderOptions::default())
}

/// Convert markup to Markdown with default options.
pub fn to_markdown(raw: &str) -> Result<String> {
    render::to_markdown(&decode(raw), &RenderOptions::default())
}

/// Convert markup to plain text with default options.
pub fn to_text(raw: &str) -> Result<String> {
    render::to_text(&decode(raw), &RenderOptions::default())
}

/// Convert markup to JSON.
pub fn to_json(raw: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&decode(raw), format)
}

/// Builder for decoding and rendering copy.
///
/// # Example
///
/// ```
/// use copydeck::{Copydeck, CleanupPreset};
///
/// let markdown = Copydeck::new()
///     .with_asset_base("https://cdn.example")
///     .with_trimmed_spans()
///     .with_cleanup(CleanupPreset::Standard)
///     .decode(" Read the [[a_asset,cv.pdf]] now ")
///     .to_markdown()?;
/// assert_eq!(markdown, "Read the [cv.pdf](https://cdn.example/cv.pdf) now");
/// # Ok::<(), copydeck::Error>(())
/// ```
pub struct Copydeck {
    decode_options: DecodeOptions,
    render_options: RenderOptions,
}

impl Copydeck {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            decode_options: DecodeOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Normalize input to Unicode NFC before decoding.
    pub fn with_unicode_normalization(mut self) -> Self {
        self.decode_options = self.decode_options.with_unicode_normalization(true);
        self
    }

    /// Trim whitespace around plain text runs.
    pub fn with_trimmed_spans(mut self) -> Self {
        self.decode_options = self.decode_options.with_trimmed_spans(true);
        self
    }

    /// Set the base URL for asset links.
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_asset_base(base);
        self
    }

    /// Open asset links in a new browsing context.
    pub fn with_target_blank(mut self) -> Self {
        self.render_options = self.render_options.with_target_blank(true);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Set render options wholesale.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Decode markup and return a result wrapper.
    pub fn decode(self, raw: &str) -> CopydeckResult {
        CopydeckResult {
            paragraphs: decode_with_options(raw, &self.decode_options),
            render_options: self.render_options,
        }
    }

    /// Decode a file and return a result wrapper.
    pub fn decode_file<P: AsRef<Path>>(self, path: P) -> Result<CopydeckResult> {
        let raw = std::fs::read_to_string(path)?;
        Ok(self.decode(&raw))
    }
}

impl Default for Copydeck {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded copy together with the options to render it.
pub struct CopydeckResult {
    /// The decoded paragraphs
    pub paragraphs: Vec<Paragraph>,
    /// Render options to use
    render_options: RenderOptions,
}

impl CopydeckResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.paragraphs, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.paragraphs, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.paragraphs, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.paragraphs, format)
    }

    /// Statistics over the decoded paragraphs.
    pub fn stats(&self) -> RenderStats {
        RenderStats::from_paragraphs(&self.paragraphs)
    }

    /// Get the paragraphs.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}
