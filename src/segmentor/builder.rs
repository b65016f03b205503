use std::sync::Arc;

use crate::error::WindowingError;
use crate::segmentor::runtime::Segmentor;
use crate::segmentor::traits::OverlapExpander;
use crate::speech::SpeechSet;
use crate::windowing::{HeapExpander, RescanExpander};

/// Overlap-expansion strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionKind {
    /// Fixed-point rescan over every stream per merge step. Fine for the
    /// handful of streams a transcript comparison usually carries.
    #[default]
    Rescan,
    /// Min-heap of per-stream cursors; identical merge semantics with
    /// logarithmic advancement per step.
    Heap,
}

pub struct SegmentorBuilder {
    expansion_kind: ExpansionKind,
    expander: Option<Box<dyn OverlapExpander>>,
}

impl SegmentorBuilder {
    pub fn new() -> Self {
        Self {
            expansion_kind: ExpansionKind::default(),
            expander: None,
        }
    }

    pub fn with_expansion_kind(mut self, expansion_kind: ExpansionKind) -> Self {
        self.expansion_kind = expansion_kind;
        self
    }

    /// Overrides the expander outright; takes precedence over
    /// [`ExpansionKind`].
    pub fn with_expander(mut self, expander: Box<dyn OverlapExpander>) -> Self {
        self.expander = Some(expander);
        self
    }

    /// Builds a segmentor seeded on `references`/`hypothesis`; it is
    /// immediately iterable. Fails if the reference collection has no
    /// segments.
    pub fn build(
        self,
        references: Arc<SpeechSet>,
        hypothesis: Arc<SpeechSet>,
    ) -> Result<Segmentor, WindowingError> {
        let expander = self.expander.unwrap_or_else(|| match self.expansion_kind {
            ExpansionKind::Rescan => Box::new(RescanExpander),
            ExpansionKind::Heap => Box::new(HeapExpander),
        });
        Segmentor::from_parts(expander, references, hypothesis)
    }
}

impl Default for SegmentorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
