//! Scroll-spy
//!
//! Two halves, mirroring how a browser splits the work:
//!
//! ```text
//! IntersectionObserver   geometry -> batches of IntersectionEntry (host side)
//!     ↓
//! ScrollSpy              batch -> current section id (state machine)
//!     ↓
//! ActiveLinkResolver     id -> link presentation
//! ```
//!
//! The activation zone is a thin strip just below the header: the viewport
//! with `header + padding` cut from the top and a fraction of its height cut
//! from the bottom.

use encore_core::TieBreak;
use encore_dom::{Document, NodeId, Viewport};
use rustc_hash::FxHashMap;

/// One change in a target's intersection state
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Viewport-relative top edge of the target when observed
    pub top: f64,
}

/// Computes intersection batches for a fixed set of targets
#[derive(Clone, Debug)]
pub struct IntersectionObserver {
    targets: Vec<NodeId>,
    /// Pixels cut from the top of the viewport
    margin_top: f64,
    /// Fraction of the viewport height cut from the bottom
    margin_bottom_ratio: f64,
    /// Last reported state; empty until the first batch
    previous: FxHashMap<NodeId, bool>,
}

impl IntersectionObserver {
    pub fn new(targets: Vec<NodeId>, margin_top: f64, margin_bottom_ratio: f64) -> Self {
        Self {
            targets,
            margin_top,
            margin_bottom_ratio,
            previous: FxHashMap::default(),
        }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Activation band `(top, bottom)` in viewport coordinates
    pub fn band(&self, viewport: Viewport) -> (f64, f64) {
        let top = self.margin_top;
        let bottom = viewport.inner_height * (1.0 - self.margin_bottom_ratio);
        (top, bottom)
    }

    /// Entries for targets whose state changed since the last call.
    ///
    /// The first call reports every target, the way hosts deliver an initial
    /// notification as soon as a target is observed. Targets that left the
    /// document are dropped.
    pub fn take_records(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        let (band_top, band_bottom) = self.band(doc.viewport());
        self.targets.retain(|&t| doc.contains(t));

        let mut entries = Vec::new();
        for &target in &self.targets {
            let Some(rect) = doc.bounding_client_rect(target) else {
                continue;
            };
            // Edge-adjacent counts as intersecting (threshold 0)
            let is_intersecting = band_bottom >= band_top
                && rect.top <= band_bottom
                && rect.bottom() >= band_top;

            if self.previous.get(&target) != Some(&is_intersecting) {
                self.previous.insert(target, is_intersecting);
                entries.push(IntersectionEntry {
                    target,
                    is_intersecting,
                    top: rect.top,
                });
            }
        }
        entries
    }
}

/// Tracks the section currently in the activation zone
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    /// Observed sections and their ids, in document order
    sections: Vec<(NodeId, String)>,
    current_id: Option<String>,
    tie_break: TieBreak,
}

impl ScrollSpy {
    pub fn new(sections: Vec<(NodeId, String)>, tie_break: TieBreak) -> Self {
        Self {
            sections,
            current_id: None,
            tie_break,
        }
    }

    pub fn sections(&self) -> &[(NodeId, String)] {
        &self.sections
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    fn section_id(&self, node: NodeId) -> Option<&str> {
        self.sections
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, id)| id.as_str())
    }

    /// Process one batch and return the id to activate, if any.
    ///
    /// Sections leaving the zone do not clear the current id; it only ever
    /// moves to another section.
    pub fn observe_batch(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        let intersecting = entries
            .iter()
            .filter(|e| e.is_intersecting)
            .filter_map(|e| self.section_id(e.target).map(|id| (id, e.top)));

        let winner = match self.tie_break {
            TieBreak::LastEntry => intersecting.last(),
            TieBreak::Topmost => intersecting.min_by(|a, b| a.1.total_cmp(&b.1)),
        }
        .map(|(id, _)| id.to_string());

        if let Some(id) = winner {
            if self.current_id.as_deref() != Some(id.as_str()) {
                tracing::debug!(section = %id, "scroll-spy moved");
            }
            self.current_id = Some(id);
        }
        self.current_id.as_deref()
    }
}
