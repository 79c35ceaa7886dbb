//! Markdown rendering for decoded copy.

use crate::error::Result;
use crate::model::{Paragraph, SubParagraph, SubParagraphRoot};

use super::visitor::{DefaultVisitor, FragmentVisitor, VisitorAction};
use super::{CleanupPipeline, RenderOptions, RenderResult, RenderStats};

/// Convert paragraphs to Markdown.
pub fn to_markdown(paragraphs: &[Paragraph], options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(paragraphs)
}

/// Convert paragraphs to Markdown with statistics.
pub fn to_markdown_with_stats(
    paragraphs: &[Paragraph],
    options: &RenderOptions,
) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(paragraphs)
}

/// Markdown renderer.
///
/// Paragraphs are separated by a blank line. Empty paragraphs have no
/// Markdown representation and are dropped.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render paragraphs to Markdown.
    pub fn render(self, paragraphs: &[Paragraph]) -> Result<String> {
        self.render_with_visitor(paragraphs, &mut DefaultVisitor)
    }

    /// Render paragraphs to Markdown, consulting `visitor` for every element.
    pub fn render_with_visitor(
        mut self,
        paragraphs: &[Paragraph],
        visitor: &mut dyn FragmentVisitor,
    ) -> Result<String> {
        Ok(self.render_internal(paragraphs, visitor))
    }

    /// Render paragraphs to Markdown with statistics.
    pub fn render_with_stats(mut self, paragraphs: &[Paragraph]) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(paragraphs, &mut DefaultVisitor);
        Ok(RenderResult::new(content, self.stats))
    }

    fn render_internal(
        &mut self,
        paragraphs: &[Paragraph],
        visitor: &mut dyn FragmentVisitor,
    ) -> String {
        let mut blocks = Vec::with_capacity(paragraphs.len());

        for (index, para) in paragraphs.iter().enumerate() {
            if para.is_empty() {
                continue;
            }

            match visitor.visit_paragraph(para, index) {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(custom) => {
                    blocks.push(custom);
                    continue;
                }
                VisitorAction::Continue => {}
            }

            if self.options.collect_stats {
                self.stats.add_paragraph(para);
                self.stats.count_text(&para.plain_text());
            }

            let mut block = String::new();
            for fragment in para {
                match visitor.visit_fragment(fragment) {
                    VisitorAction::Skip => {}
                    VisitorAction::Replace(custom) => block.push_str(&custom),
                    VisitorAction::Continue => self.render_fragment(&mut block, fragment),
                }
            }
            blocks.push(block);
        }

        let mut output = blocks.join("\n\n");

        if let Some(ref cleanup_options) = self.options.cleanup {
            let pipeline = CleanupPipeline::new(cleanup_options.clone());
            output = pipeline.process(&output);
        }

        output.trim().to_string()
    }

    fn render_fragment(&self, output: &mut String, fragment: &SubParagraph) {
        let content = fragment.content();
        match fragment.root() {
            SubParagraphRoot::Span => {
                let at_line_start = output.is_empty() || output.ends_with('\n');
                let escaped = escape_markdown(content);
                for (i, line) in escaped.split('\n').enumerate() {
                    if i > 0 {
                        output.push('\n');
                    }
                    if i > 0 || at_line_start {
                        push_line_start_escaped(output, line);
                    } else {
                        output.push_str(line);
                    }
                }
            }
            SubParagraphRoot::Br => output.push_str("  \n"),
            SubParagraphRoot::AAsset => {
                let url = self.options.asset_url(content);
                output.push('[');
                output.push_str(&escape_markdown(content));
                output.push_str("](");
                output.push_str(&url.replace(' ', "%20").replace(')', "%29"));
                output.push(')');
            }
            SubParagraphRoot::StrongEm => {
                // delimiters must hug the text to open and close emphasis
                let inner = content.trim();
                if inner.is_empty() {
                    // `******` would read as a thematic break
                    output.push_str(content);
                    return;
                }
                let lead = &content[..content.len() - content.trim_start().len()];
                let trail = &content[content.trim_end().len()..];
                output.push_str(lead);
                output.push_str("***");
                output.push_str(&escape_markdown(inner));
                output.push_str("***");
                output.push_str(trail);
            }
        }
    }
}

/// Escape characters that Markdown would interpret as inline syntax.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a marker that would open a heading, list item or setext
/// underline when `line` starts a Markdown line.
fn push_line_start_escaped(output: &mut String, line: &str) {
    let rest = line.trim_start_matches(' ');
    output.push_str(&line[..line.len() - rest.len()]);

    let starts_block = match rest.as_bytes() {
        [b'#' | b'=', ..] => true,
        [b'-' | b'+'] | [b'-' | b'+', b' ' | b'\t', ..] => true,
        _ => false,
    };
    if starts_block {
        output.push('\\');
        output.push_str(rest);
        return;
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let after = &rest[digits..];
    let ordered = (1..=9).contains(&digits)
        && (after.starts_with(". ")
            || after.starts_with(") ")
            || after == "."
            || after == ")");
    if ordered {
        output.push_str(&rest[..digits]);
        output.push('\\');
        output.push_str(after);
    } else {
        output.push_str(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode;
    use crate::render::CleanupPreset;

    #[test]
    fn test_to_markdown_fragments() {
        let paragraphs = decode("Hi[[br]]see [[a_asset,docs/cv.pdf]] and [[,this]][[]]Bye");
        let options = RenderOptions::new().with_asset_base("/assets");
        let md = to_markdown(&paragraphs, &options).unwrap();

        assert_eq!(
            md,
            "Hi  \nsee [docs/cv.pdf](/assets/docs/cv.pdf) and ***this***\n\nBye"
        );
    }

    #[test]
    fn test_to_markdown_escapes() {
        let paragraphs = decode("2*3 = [[,snake_case]]");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "2\\*3 = ***snake\\_case***");
    }

    #[test]
    fn test_to_markdown_drops_empty_paragraphs() {
        let paragraphs = decode("[[]]A[[]][[]]B");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "A\n\nB");
    }

    #[test]
    fn test_to_markdown_empty_emphasis() {
        let paragraphs = decode("x[[,]]y");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "xy");
    }

    #[test]
    fn test_to_markdown_with_cleanup() {
        let paragraphs = decode("lots    of   space[[br]]next");
        let options = RenderOptions::new().with_cleanup_preset(CleanupPreset::Standard);
        let md = to_markdown(&paragraphs, &options).unwrap();
        assert_eq!(md, "lots of space  \nnext");
    }

    #[test]
    fn test_to_markdown_emphasis_whitespace_outside_delimiters() {
        let paragraphs = decode("a[[, bold ]]b");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "a ***bold*** b");

        let paragraphs = decode("a[[,  ]]b");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "a  b");
    }

    #[test]
    fn test_to_markdown_escapes_block_markers_at_line_start() {
        let paragraphs = decode("# Title[[br]]- item[[br]]1. first[[br]]+ plus[[]]mid # - 1. text");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(
            md,
            "\\# Title  \n\\- item  \n1\\. first  \n\\+ plus\n\nmid # - 1. text"
        );
    }

    #[test]
    fn test_to_markdown_block_markers_inside_span_lines() {
        let paragraphs = decode("intro\n## not a heading");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "intro\n\\## not a heading");
    }

    #[test]
    fn test_to_markdown_link_url_encoding() {
        let paragraphs = decode("[[a_asset,my file (1).pdf]]");
        let md = to_markdown(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(md, "[my file (1).pdf](my%20file%20(1%29.pdf)");
    }
}
