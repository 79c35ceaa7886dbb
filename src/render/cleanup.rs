//! Text cleanup pipeline for rendered Markdown and plain text.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + whitespace collapsing + blank line limiting
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Collapse runs of spaces and tabs into a single space
    pub collapse_spaces: bool,

    /// Strip trailing whitespace from every line
    pub trim_line_ends: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            collapse_spaces: false,
            trim_line_ends: false,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            collapse_spaces: true,
            trim_line_ends: true,
            max_consecutive_newlines: 2,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    spaces_regex: Regex,
    line_end_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            spaces_regex: Regex::new(r"[ \t]{2,}(\S)").expect("static regex"),
            line_end_regex: Regex::new(r"(?m)[ \t]+$").expect("static regex"),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        // Markdown hard breaks are two trailing spaces and must survive.
        if self.options.trim_line_ends {
            result = self.trim_line_ends(&result);
        }

        if self.options.collapse_spaces {
            result = self.spaces_regex.replace_all(&result, " $1").into_owned();
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn trim_line_ends(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| {
                if line.ends_with("  ") && !line.trim().is_empty() {
                    format!("{}  ", line.trim_end())
                } else {
                    self.line_end_regex.replace_all(line, "").into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut out = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\n' {
                run += 1;
                if run > max {
                    continue;
                }
            } else {
                run = 0;
            }
            out.push(c);
        }
        out
    }
}
