//! Model types for decoded copy.
//!
//! The paragraph model is what the decoder produces and every renderer
//! consumes. It carries no presentation details of its own.

mod copy;
mod language;
mod paragraph;

pub use copy::LocalizedCopy;
pub use language::Language;
pub use paragraph::{Paragraph, SubParagraph, SubParagraphRoot};
