//! Decoding options.

/// Options applied around the core decoder.
///
/// The defaults leave decoding untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Normalize the raw text to Unicode NFC before decoding
    pub normalize_unicode: bool,

    /// Trim whitespace around plain text runs, dropping runs that become empty
    pub trim_spans: bool,
}

impl DecodeOptions {
    /// Create new decode options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable span trimming.
    pub fn with_trimmed_spans(mut self, trim: bool) -> Self {
        self.trim_spans = trim;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_options_builder() {
        let options = DecodeOptions::new()
            .with_unicode_normalization(true)
            .with_trimmed_spans(true);
        assert!(options.normalize_unicode);
        assert!(options.trim_spans);
        assert_eq!(DecodeOptions::default(), DecodeOptions::new());
    }
}
