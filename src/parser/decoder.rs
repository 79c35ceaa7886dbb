//! Paragraph and document decoding.

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::classifier::classify_fragment;
use super::grammar::{split_fragments, split_paragraphs};
use super::DecodeOptions;
use crate::model::{Paragraph, SubParagraph, SubParagraphRoot};

/// Decode a full text into paragraphs.
///
/// Always returns one more paragraph than there are `[[]]` delimiters in
/// `raw`, so the result is never empty.
pub fn decode(raw: &str) -> Vec<Paragraph> {
    let paragraphs: Vec<Paragraph> = split_paragraphs(raw).map(decode_paragraph).collect();
    log::debug!(
        "decoded {} paragraph(s) from {} bytes",
        paragraphs.len(),
        raw.len()
    );
    paragraphs
}

/// Decode one paragraph's worth of text.
///
/// Empty tokens are skipped whatever their parity, so boundary and adjacent
/// delimiters collapse and a tag with no text disappears entirely.
pub fn decode_paragraph(raw: &str) -> Paragraph {
    let elements = split_fragments(raw)
        .enumerate()
        .filter(|(_, token)| !token.is_empty())
        .map(|(position, token)| classify_fragment(position, token))
        .collect();
    Paragraph::from_elements(elements)
}

/// Decode with preprocessing and postprocessing options applied.
pub fn decode_with_options(raw: &str, options: &DecodeOptions) -> Vec<Paragraph> {
    let normalized;
    let input = if options.normalize_unicode {
        normalized = raw.nfc().collect::<String>();
        normalized.as_str()
    } else {
        raw
    };

    let paragraphs = decode(input);
    if !options.trim_spans {
        return paragraphs;
    }

    paragraphs.into_iter().map(trim_spans).collect()
}

/// Decode many texts in parallel, preserving input order.
pub fn decode_all<S>(inputs: &[S]) -> Vec<Vec<Paragraph>>
where
    S: AsRef<str> + Sync,
{
    inputs.par_iter().map(|s| decode(s.as_ref())).collect()
}

// Spans keep single spaces next to tags; only line edges are trimmed.
fn trim_spans(paragraph: Paragraph) -> Paragraph {
    let elements = paragraph.into_elements();
    let last = elements.len().saturating_sub(1);

    let trimmed = elements
        .iter()
        .enumerate()
        .filter_map(|(i, e)| {
            if e.root() != SubParagraphRoot::Span {
                return Some(e.clone());
            }
            let starts_line = i == 0 || elements[i - 1].is_line_break();
            let ends_line = i == last || elements[i + 1].is_line_break();

            let collapsed = collapse_whitespace(e.content());
            let mut text = collapsed.as_str();
            if starts_line {
                text = text.trim_start();
            }
            if ends_line {
                text = text.trim_end();
            }
            (!text.is_empty()).then(|| SubParagraph::span(text))
        })
        .collect();
    Paragraph::from_elements(trimmed)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
