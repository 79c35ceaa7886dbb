//! Property-based tests for markup decoding
//!
//! These tests check the decoder is total and structurally predictable:
//! - Every input decodes, and decoding the same input twice agrees
//! - There is one paragraph more than there are `[[]]` delimiters
//! - No fragment is ever empty except line breaks, which always are
//! - Well-formed tags land at the expected fragment kind

use copydeck::model::{SubParagraph, SubParagraphRoot};
use copydeck::{decode, decode_paragraph};
use proptest::prelude::*;

/// Generate literal text that contains no delimiter characters
fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .!?]{1,20}",
        "[a-z]{1,8}",
        // non-ASCII text
        "[àéîõü가나다 ]{1,10}",
    ]
}

/// Generate a well-formed tag together with the fragment it must decode to
fn tag_strategy() -> impl Strategy<Value = (String, SubParagraph)> {
    prop_oneof![
        Just(("br".to_string(), SubParagraph::line_break())),
        "[a-z0-9/._-]{1,16}".prop_map(|path| {
            (format!("a_asset,{}", path), SubParagraph::asset_link(path))
        }),
        "[a-zA-Z0-9 ]{1,16}".prop_map(|text| {
            (format!(",{}", text), SubParagraph::strong_em(text))
        }),
        ("[c-z][a-z]{0,5}", "[a-zA-Z ]{1,10}").prop_map(|(name, text)| {
            (format!("{},{}", name, text), SubParagraph::strong_em(text))
        }),
    ]
}

/// Generate a paragraph as alternating literal text and tags
fn paragraph_strategy() -> impl Strategy<Value = (String, Vec<SubParagraph>)> {
    prop::collection::vec((literal_strategy(), tag_strategy()), 0..6).prop_map(|parts| {
        let mut raw = String::new();
        let mut expected = Vec::new();
        for (text, (tag, fragment)) in parts {
            raw.push_str(&text);
            raw.push_str("[[");
            raw.push_str(&tag);
            raw.push_str("]]");
            expected.push(SubParagraph::span(text));
            expected.push(fragment);
        }
        (raw, expected)
    })
}

/// Arbitrary text biased towards delimiter characters
fn markup_noise_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("[[".to_string()),
            Just("]]".to_string()),
            Just("[[]]".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just(",".to_string()),
            Just("br".to_string()),
            Just("a_asset".to_string()),
            "[a-z ]{0,5}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_decode_is_total_and_deterministic(input in any::<String>()) {
        let first = decode(&input);
        let second = decode(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_paragraph_count(input in markup_noise_strategy()) {
        let paragraphs = decode(&input);
        prop_assert_eq!(paragraphs.len(), input.matches("[[]]").count() + 1);
    }

    #[test]
    fn test_fragment_content_invariants(input in markup_noise_strategy()) {
        for paragraph in decode(&input) {
            for fragment in paragraph.iter() {
                match fragment.root() {
                    SubParagraphRoot::Br => prop_assert!(fragment.content().is_empty()),
                    SubParagraphRoot::Span => prop_assert!(!fragment.content().is_empty()),
                    // a tag token is non-empty, but its content may be
                    SubParagraphRoot::AAsset | SubParagraphRoot::StrongEm => {}
                }
            }
        }
    }

    #[test]
    fn test_text_without_delimiters_is_one_span(text in literal_strategy()) {
        let paragraph = decode_paragraph(&text);
        prop_assert_eq!(paragraph.elements(), &[SubParagraph::span(text)][..]);
    }

    #[test]
    fn test_well_formed_paragraph((raw, expected) in paragraph_strategy()) {
        let paragraph = decode_paragraph(&raw);
        prop_assert_eq!(paragraph.elements(), expected.as_slice());
    }

    #[test]
    fn test_paragraphs_decode_independently(
        (a, expected_a) in paragraph_strategy(),
        (b, expected_b) in paragraph_strategy(),
    ) {
        let paragraphs = decode(&format!("{}[[]]{}", a, b));
        prop_assert_eq!(paragraphs.len(), 2);
        prop_assert_eq!(paragraphs[0].elements(), expected_a.as_slice());
        prop_assert_eq!(paragraphs[1].elements(), expected_b.as_slice());
    }
}
