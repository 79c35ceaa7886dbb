//! Paragraph and fragment-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A paragraph of decoded copy.
///
/// Elements are kept in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Fragments in the paragraph
    elements: Vec<SubParagraph>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from already-classified fragments.
    pub fn from_elements(elements: Vec<SubParagraph>) -> Self {
        Self { elements }
    }

    /// Create a paragraph holding a single plain text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::from_elements(vec![SubParagraph::span(text)])
    }

    /// Append a fragment.
    pub fn push(&mut self, element: SubParagraph) {
        self.elements.push(element);
    }

    /// Fragments in reading order.
    pub fn elements(&self) -> &[SubParagraph] {
        &self.elements
    }

    /// Iterate over fragments.
    pub fn iter(&self) -> std::slice::Iter<'_, SubParagraph> {
        self.elements.iter()
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the paragraph has no fragments.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume the paragraph, returning its fragments.
    pub fn into_elements(self) -> Vec<SubParagraph> {
        self.elements
    }

    /// Get plain text content of the paragraph.
    ///
    /// Line breaks become `\n`, asset links contribute their path.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|e| match e.root() {
                SubParagraphRoot::Br => "\n",
                _ => e.content(),
            })
            .collect()
    }

    /// Count fragments with the given root.
    pub fn count(&self, root: SubParagraphRoot) -> usize {
        self.elements.iter().filter(|e| e.root() == root).count()
    }
}

impl<'a> IntoIterator for &'a Paragraph {
    type Item = &'a SubParagraph;
    type IntoIter = std::slice::Iter<'a, SubParagraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Kind of a decoded fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubParagraphRoot {
    /// Plain text run
    #[serde(rename = "SPAN")]
    Span,
    /// Line break, never carries content
    #[serde(rename = "BR")]
    Br,
    /// Hyperlink to an asset-relative path
    #[serde(rename = "A_ASSET")]
    AAsset,
    /// Bold and italic emphasis run
    #[serde(rename = "STRONG_EM")]
    StrongEm,
}

impl SubParagraphRoot {
    /// Markup name of this root.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubParagraphRoot::Span => "SPAN",
            SubParagraphRoot::Br => "BR",
            SubParagraphRoot::AAsset => "A_ASSET",
            SubParagraphRoot::StrongEm => "STRONG_EM",
        }
    }
}

impl fmt::Display for SubParagraphRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified fragment of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSubParagraph")]
pub struct SubParagraph {
    root: SubParagraphRoot,
    content: String,
}

impl SubParagraph {
    /// Create a plain text run.
    pub fn span(content: impl Into<String>) -> Self {
        Self {
            root: SubParagraphRoot::Span,
            content: content.into(),
        }
    }

    /// Create a line break.
    pub fn line_break() -> Self {
        Self {
            root: SubParagraphRoot::Br,
            content: String::new(),
        }
    }

    /// Create an asset link pointing at `path`.
    pub fn asset_link(path: impl Into<String>) -> Self {
        Self {
            root: SubParagraphRoot::AAsset,
            content: path.into(),
        }
    }

    /// Create a bold+italic emphasis run.
    pub fn strong_em(content: impl Into<String>) -> Self {
        Self {
            root: SubParagraphRoot::StrongEm,
            content: content.into(),
        }
    }

    /// Fragment kind.
    pub fn root(&self) -> SubParagraphRoot {
        self.root
    }

    /// Fragment content; always empty for line breaks.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if this fragment is a line break.
    pub fn is_line_break(&self) -> bool {
        self.root == SubParagraphRoot::Br
    }
}

#[derive(Deserialize)]
struct RawSubParagraph {
    root: SubParagraphRoot,
    #[serde(default)]
    content: String,
}

impl TryFrom<RawSubParagraph> for SubParagraph {
    type Error = String;

    fn try_from(raw: RawSubParagraph) -> std::result::Result<Self, Self::Error> {
        if raw.root == SubParagraphRoot::Br && !raw.content.is_empty() {
            return Err(format!("BR fragment must be empty, got {:?}", raw.content));
        }
        Ok(Self {
            root: raw.root,
            content: raw.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let p = Paragraph::from_elements(vec![
            SubParagraph::span("Hello "),
            SubParagraph::strong_em("world"),
            SubParagraph::line_break(),
            SubParagraph::asset_link("cv.pdf"),
        ]);

        assert_eq!(p.plain_text(), "Hello world\ncv.pdf");
        assert_eq!(p.len(), 4);
        assert_eq!(p.count(SubParagraphRoot::Br), 1);
    }

    #[test]
    fn test_line_break_is_empty() {
        let br = SubParagraph::line_break();
        assert!(br.is_line_break());
        assert_eq!(br.content(), "");
    }

    #[test]
    fn test_root_serialization() {
        let json = serde_json::to_string(&SubParagraph::asset_link("img/a.png")).unwrap();
        assert_eq!(json, r#"{"root":"A_ASSET","content":"img/a.png"}"#);

        let json = serde_json::to_string(&SubParagraphRoot::StrongEm).unwrap();
        assert_eq!(json, "\"STRONG_EM\"");
    }

    #[test]
    fn test_deserialize_rejects_br_content() {
        let ok: SubParagraph = serde_json::from_str(r#"{"root":"BR"}"#).unwrap();
        assert!(ok.is_line_break());

        let bad = serde_json::from_str::<SubParagraph>(r#"{"root":"BR","content":"x"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_empty_paragraph() {
        let p = Paragraph::new();
        assert!(p.is_empty());
        assert_eq!(p.plain_text(), "");
    }
}
