//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering decoded copy.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base URL asset links are resolved against (e.g., "https://cdn.example/assets")
    pub asset_base_url: String,

    /// Escape HTML special characters in text content
    pub escape_html: bool,

    /// Open asset links in a new browsing context
    pub link_target_blank: bool,

    /// Omit paragraphs without fragments from the output
    pub skip_empty_paragraphs: bool,

    /// Text cleanup options (Markdown and plain text only)
    pub cleanup: Option<CleanupOptions>,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset base URL.
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.asset_base_url = base.into();
        self
    }

    /// Enable or disable HTML escaping.
    pub fn with_html_escaping(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Enable or disable `target="_blank"` on asset links.
    pub fn with_target_blank(mut self, blank: bool) -> Self {
        self.link_target_blank = blank;
        self
    }

    /// Enable or disable skipping of empty paragraphs.
    pub fn with_skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty_paragraphs = skip;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Resolve an asset-relative path against the base URL.
    ///
    /// Exactly one slash separates base and path; an empty base leaves the
    /// path as written.
    pub fn asset_url(&self, path: &str) -> String {
        if self.asset_base_url.is_empty() {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.asset_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_base_url: String::new(),
            escape_html: true,
            link_target_blank: false,
            skip_empty_paragraphs: false,
            cleanup: None,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_asset_base("https://cdn.example/assets/")
            .with_target_blank(true)
            .with_cleanup_preset(CleanupPreset::Standard);

        assert!(options.link_target_blank);
        assert!(options.escape_html);
        assert!(options.cleanup.is_some());
    }

    #[test]
    fn test_asset_url_joining() {
        let bare = RenderOptions::default();
        assert_eq!(bare.asset_url("img/a.png"), "img/a.png");

        let based = RenderOptions::new().with_asset_base("https://cdn.example/assets/");
        assert_eq!(
            based.asset_url("/img/a.png"),
            "https://cdn.example/assets/img/a.png"
        );
        assert_eq!(
            based.asset_url("img/a.png"),
            "https://cdn.example/assets/img/a.png"
        );
    }
}
