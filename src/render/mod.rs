//! Rendering module for converting decoded copy to various output formats.

mod cleanup;
mod html;
mod json;
mod markdown;
mod options;
mod result;
mod text;
pub mod visitor;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use html::{to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{escape_markdown, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
pub use text::to_text;
pub use visitor::{CompositeVisitor, DefaultVisitor, FragmentVisitor, VisitorAction};
