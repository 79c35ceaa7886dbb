//! Delimiters of the bracket micro-markup and the token splitter.
//!
//! ```text
//! Intro text[[br]]More text[[]]Second paragraph with [[,emphasis]]
//! and a [[a_asset,docs/cv.pdf]] link.
//! ```
//!
//! `[[]]` separates paragraphs. Inside a paragraph, `[[` and `]]` each
//! split the text individually, so tokens alternate between literal text
//! (even index) and tags (odd index).

/// Separates two paragraphs.
pub const PARAGRAPH_DELIMITER: &str = "[[]]";

/// Opens a tag inside a paragraph.
pub const TAG_OPEN: &str = "[[";

/// Closes a tag inside a paragraph.
pub const TAG_CLOSE: &str = "]]";

/// Separates a tag name from its content.
pub const TAG_SEPARATOR: char = ',';

/// Tag name of a line break.
pub const TAG_LINE_BREAK: &str = "br";

/// Tag name of an asset link.
pub const TAG_ASSET_LINK: &str = "a_asset";

/// Split a paragraph on `[[` and `]]`.
///
/// Delimiters are matched leftmost first and never overlap, so `[[[` yields
/// a delimiter followed by a literal `[`. The iterator always yields at
/// least one token; adjacent delimiters yield empty tokens.
pub fn split_fragments(paragraph: &str) -> FragmentTokens<'_> {
    FragmentTokens {
        rest: Some(paragraph),
    }
}

/// Split a whole text on the paragraph delimiter.
pub fn split_paragraphs(text: &str) -> std::str::Split<'_, &'static str> {
    text.split(PARAGRAPH_DELIMITER)
}

/// Iterator over the fragment tokens of one paragraph.
#[derive(Debug, Clone)]
pub struct FragmentTokens<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for FragmentTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match find_delimiter(rest) {
            Some(at) => {
                self.rest = Some(&rest[at + 2..]);
                Some(&rest[..at])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl std::iter::FusedIterator for FragmentTokens<'_> {}

// Both delimiters are two ASCII bytes, so byte offsets are char boundaries.
fn find_delimiter(s: &str) -> Option<usize> {
    s.as_bytes()
        .windows(2)
        .position(|w| w == TAG_OPEN.as_bytes() || w == TAG_CLOSE.as_bytes())
}
