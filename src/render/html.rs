//! HTML rendering for decoded copy.

use crate::error::Result;
use crate::model::{Paragraph, SubParagraph, SubParagraphRoot};

use super::visitor::{DefaultVisitor, FragmentVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, RenderStats};

/// Convert paragraphs to HTML.
pub fn to_html(paragraphs: &[Paragraph], options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(paragraphs)
}

/// Convert paragraphs to HTML with statistics.
pub fn to_html_with_stats(paragraphs: &[Paragraph], options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(paragraphs)
}

/// HTML renderer.
///
/// Each paragraph becomes a `<p>` element on its own line.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render paragraphs to HTML.
    pub fn render(self, paragraphs: &[Paragraph]) -> Result<String> {
        self.render_with_visitor(paragraphs, &mut DefaultVisitor)
    }

    /// Render paragraphs to HTML, consulting `visitor` for every element.
    pub fn render_with_visitor(
        mut self,
        paragraphs: &[Paragraph],
        visitor: &mut dyn FragmentVisitor,
    ) -> Result<String> {
        Ok(self.render_internal(paragraphs, visitor))
    }

    /// Render paragraphs to HTML with statistics.
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
        let mut output = String::new();

        for (index, para) in paragraphs.iter().enumerate() {
            if self.options.skip_empty_paragraphs && para.is_empty() {
                continue;
            }

            match visitor.visit_paragraph(para, index) {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(custom) => {
                    output.push_str(&custom);
                    output.push('\n');
                    continue;
                }
                VisitorAction::Continue => {}
            }

            if self.options.collect_stats {
                self.stats.add_paragraph(para);
                self.stats.count_text(&para.plain_text());
            }

            output.push_str("<p>");
            for fragment in para {
                match visitor.visit_fragment(fragment) {
                    VisitorAction::Skip => {}
                    VisitorAction::Replace(custom) => output.push_str(&custom),
                    VisitorAction::Continue => self.render_fragment(&mut output, fragment),
                }
            }
            output.push_str("</p>\n");
        }

        output.trim_end().to_string()
    }

    fn render_fragment(&self, output: &mut String, fragment: &SubParagraph) {
        match fragment.root() {
            SubParagraphRoot::Span => self.push_text(output, fragment.content()),
            SubParagraphRoot::Br => output.push_str("<br>"),
            SubParagraphRoot::AAsset => {
                let url = self.options.asset_url(fragment.content());
                output.push_str("<a href=\"");
                output.push_str(&html_escape::encode_double_quoted_attribute(&url));
                output.push('"');
                if self.options.link_target_blank {
                    output.push_str(" target=\"_blank\" rel=\"noopener\"");
                }
                output.push('>');
                self.push_text(output, fragment.content());
                output.push_str("</a>");
            }
            SubParagraphRoot::StrongEm => {
                output.push_str("<strong><em>");
                self.push_text(output, fragment.content());
                output.push_str("</em></strong>");
            }
        }
    }

    fn push_text(&self, output: &mut String, text: &str) {
        if self.options.escape_html {
            output.push_str(&html_escape::encode_text(text));
        } else {
            output.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode;
    use crate::render::visitor::StripLinksVisitor;

    #[test]
    fn test_to_html_fragments() {
        let paragraphs = decode("Hi[[br]]see [[a_asset,docs/cv.pdf]] and [[,this]][[]]Bye");
        let options = RenderOptions::new().with_asset_base("https://cdn.example/");
        let html = to_html(&paragraphs, &options).unwrap();

        assert_eq!(
            html,
            "<p>Hi<br>see <a href=\"https://cdn.example/docs/cv.pdf\">docs/cv.pdf</a> and \
             <strong><em>this</em></strong></p>\n<p>Bye</p>"
        );
    }

    #[test]
    fn test_to_html_escapes_text() {
        let paragraphs = decode("1 < 2 & [[,\"q\" <b>]]");
        let html = to_html(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(
            html,
            "<p>1 &lt; 2 &amp; <strong><em>\"q\" &lt;b&gt;</em></strong></p>"
        );
    }

    #[test]
    fn test_to_html_escapes_attribute() {
        let paragraphs = decode("[[a_asset,a\"b.png]]");
        let html = to_html(&paragraphs, &RenderOptions::default()).unwrap();
        assert!(html.contains("href=\"a&quot;b.png\""));
    }

    #[test]
    fn test_to_html_target_blank() {
        let paragraphs = decode("[[a_asset,x.png]]");
        let options = RenderOptions::new().with_target_blank(true);
        let html = to_html(&paragraphs, &options).unwrap();
        assert!(html.contains("target=\"_blank\" rel=\"noopener\""));
    }

    #[test]
    fn test_to_html_empty_paragraphs() {
        let paragraphs = decode("[[]]Text");
        let html = to_html(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<p></p>\n<p>Text</p>");

        let options = RenderOptions::new().with_skip_empty(true);
        let html = to_html(&paragraphs, &options).unwrap();
        assert_eq!(html, "<p>Text</p>");
    }

    #[test]
    fn test_to_html_with_visitor() {
        let paragraphs = decode("Get [[a_asset,cv.pdf]]");
        let html = HtmlRenderer::new(RenderOptions::default())
            .render_with_visitor(&paragraphs, &mut StripLinksVisitor)
            .unwrap();
        assert_eq!(html, "<p>Get cv.pdf</p>");
    }

    #[test]
    fn test_to_html_with_stats() {
        let paragraphs = decode("One[[br]]two[[]]three");
        let result = to_html_with_stats(&paragraphs, &RenderOptions::default()).unwrap();
        assert_eq!(result.stats.paragraph_count, 2);
        assert_eq!(result.stats.line_break_count, 1);
        assert_eq!(result.stats.word_count, 3);
    }
}
