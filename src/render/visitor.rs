//! Visitor pattern for customizing copy rendering.
//!
//! The visitor pattern allows users to customize how paragraphs and
//! fragments are rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use copydeck::render::visitor::{FragmentVisitor, VisitorAction};
//! use copydeck::model::{SubParagraph, SubParagraphRoot};
//!
//! struct ShoutingVisitor;
//!
//! impl FragmentVisitor for ShoutingVisitor {
//!     fn visit_fragment(&mut self, fragment: &SubParagraph) -> VisitorAction {
//!         match fragment.root() {
//!             SubParagraphRoot::StrongEm => {
//!                 VisitorAction::Replace(fragment.content().to_uppercase())
//!             }
//!             _ => VisitorAction::Continue,
//!         }
//!     }
//! }
//! ```

use crate::model::{Paragraph, SubParagraph, SubParagraphRoot};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output, emitted verbatim.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting decoded copy during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait FragmentVisitor: Send + Sync {
    /// Called before rendering a paragraph.
    ///
    /// # Arguments
    /// * `para` - The paragraph about to be rendered
    /// * `index` - 0-indexed position of the paragraph
    fn visit_paragraph(&mut self, para: &Paragraph, index: usize) -> VisitorAction {
        let _ = (para, index);
        VisitorAction::Continue
    }

    /// Called before rendering a single fragment.
    fn visit_fragment(&mut self, fragment: &SubParagraph) -> VisitorAction {
        let _ = fragment;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl FragmentVisitor for DefaultVisitor {}

/// Visitor that renders asset links as their bare path text.
#[derive(Debug, Clone, Default)]
pub struct StripLinksVisitor;

impl FragmentVisitor for StripLinksVisitor {
    fn visit_fragment(&mut self, fragment: &SubParagraph) -> VisitorAction {
        match fragment.root() {
            SubParagraphRoot::AAsset => VisitorAction::Replace(fragment.content().to_string()),
            _ => VisitorAction::Continue,
        }
    }
}

/// Visitor that drops paragraphs without any fragments.
#[derive(Debug, Clone, Default)]
pub struct SkipEmptyParagraphsVisitor;

impl FragmentVisitor for SkipEmptyParagraphsVisitor {
    fn visit_paragraph(&mut self, para: &Paragraph, _index: usize) -> VisitorAction {
        if para.is_empty() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn FragmentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: FragmentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentVisitor for CompositeVisitor {
    fn visit_paragraph(&mut self, para: &Paragraph, index: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_paragraph(para, index);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn visit_fragment(&mut self, fragment: &SubParagraph) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_fragment(fragment);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}
