//! Plain text rendering for decoded copy.

use crate::error::Result;
use crate::model::Paragraph;

use super::{CleanupPipeline, RenderOptions};

/// Convert paragraphs to plain text.
///
/// Paragraphs are separated by a blank line; empty paragraphs are dropped.
pub fn to_text(paragraphs: &[Paragraph], options: &RenderOptions) -> Result<String> {
    let mut output = paragraphs
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.plain_text())
        .collect::<Vec<_>>()
        .join("\n\n");

    // Apply cleanup if configured
    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone());
        output = pipeline.process(&output);
    }

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode;

    #[test]
    fn test_to_text() {
        let paragraphs = decode("Hello, [[,world]]![[br]]See [[a_asset,cv.pdf]][[]]Second paragraph.");
        let result = to_text(&paragraphs, &RenderOptions::default()).unwrap();

        assert_eq!(result, "Hello, world!\nSee cv.pdf\n\nSecond paragraph.");
    }

    #[test]
    fn test_to_text_empty() {
        let result = to_text(&decode(""), &RenderOptions::default()).unwrap();
        assert_eq!(result, "");
    }
}
