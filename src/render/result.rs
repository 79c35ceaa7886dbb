//! Rendering result with statistics.

use crate::model::{Paragraph, SubParagraphRoot};
use serde::{Deserialize, Serialize};

/// Result of rendering copy, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, text)
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of paragraphs without fragments
    pub empty_paragraph_count: u32,

    /// Number of plain text runs
    pub span_count: u32,

    /// Number of line breaks
    pub line_break_count: u32,

    /// Number of asset links
    pub link_count: u32,

    /// Number of emphasis runs
    pub emphasis_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute statistics for decoded paragraphs.
    pub fn from_paragraphs(paragraphs: &[Paragraph]) -> Self {
        let mut stats = Self::new();
        for para in paragraphs {
            stats.add_paragraph(para);
            stats.count_text(&para.plain_text());
        }
        stats
    }

    /// Count a paragraph and its fragments.
    pub fn add_paragraph(&mut self, para: &Paragraph) {
        self.paragraph_count += 1;
        if para.is_empty() {
            self.empty_paragraph_count += 1;
        }
        for fragment in para {
            self.add_fragment(fragment.root());
        }
    }

    /// Count one fragment.
    pub fn add_fragment(&mut self, root: SubParagraphRoot) {
        match root {
            SubParagraphRoot::Span => self.span_count += 1,
            SubParagraphRoot::Br => self.line_break_count += 1,
            SubParagraphRoot::AAsset => self.link_count += 1,
            SubParagraphRoot::StrongEm => self.emphasis_count += 1,
        }
    }

    /// Total number of fragments of any kind.
    pub fn fragment_count(&self) -> u32 {
        self.span_count + self.line_break_count + self.link_count + self.emphasis_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.paragraph_count += other.paragraph_count;
        self.empty_paragraph_count += other.empty_paragraph_count;
        self.span_count += other.span_count;
        self.line_break_count += other.line_break_count;
        self.link_count += other.link_count;
        self.emphasis_count += other.emphasis_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
