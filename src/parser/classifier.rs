//! Fragment classification.

use super::grammar::{TAG_ASSET_LINK, TAG_LINE_BREAK, TAG_SEPARATOR};
use crate::model::SubParagraph;

/// Classify one fragment token by its position in the paragraph split.
///
/// Even positions are literal text. Odd positions are tags: the text up to
/// the first comma names the tag and the rest is its content. Unknown tags,
/// including an empty name, are emphasis. Every input maps to a fragment.
pub fn classify_fragment(position: usize, raw: &str) -> SubParagraph {
    if position % 2 == 0 {
        return SubParagraph::span(raw);
    }

    let fragment = match raw.split_once(TAG_SEPARATOR) {
        // anything after the comma is dropped
        Some((TAG_LINE_BREAK, _)) => SubParagraph::line_break(),
        Some((TAG_ASSET_LINK, path)) => SubParagraph::asset_link(path),
        Some((_, content)) => SubParagraph::strong_em(content),
        None if raw == TAG_LINE_BREAK => SubParagraph::line_break(),
        None if raw == TAG_ASSET_LINK => SubParagraph::asset_link(""),
        None => SubParagraph::strong_em(raw),
    };

    log::trace!("classified tag {:?} as {}", raw, fragment.root());
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubParagraphRoot;

    #[test]
    fn test_even_positions_are_spans() {
        for (pos, raw) in [(0, "br"), (2, "a_asset,x"), (4, ",bold")] {
            let frag = classify_fragment(pos, raw);
            assert_eq!(frag.root(), SubParagraphRoot::Span);
            assert_eq!(frag.content(), raw);
        }
    }

    #[test]
    fn test_line_break() {
        assert_eq!(classify_fragment(1, "br"), SubParagraph::line_break());
        assert_eq!(classify_fragment(3, "br,ignored"), SubParagraph::line_break());
    }

    #[test]
    fn test_asset_link_keeps_inner_commas() {
        let frag = classify_fragment(1, "a_asset,img/a,b.png");
        assert_eq!(frag, SubParagraph::asset_link("img/a,b.png"));
    }

    #[test]
    fn test_asset_link_without_path() {
        assert_eq!(classify_fragment(1, "a_asset"), SubParagraph::asset_link(""));
        assert_eq!(classify_fragment(1, "a_asset,"), SubParagraph::asset_link(""));
    }

    #[test]
    fn test_emphasis_fallback() {
        assert_eq!(
            classify_fragment(1, ",bold text"),
            SubParagraph::strong_em("bold text")
        );
        assert_eq!(
            classify_fragment(1, "em,bold, still"),
            SubParagraph::strong_em("bold, still")
        );
        assert_eq!(classify_fragment(1, "bravo"), SubParagraph::strong_em("bravo"));
        assert_eq!(classify_fragment(1, "BR"), SubParagraph::strong_em("BR"));
    }
}
