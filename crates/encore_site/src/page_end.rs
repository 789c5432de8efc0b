//! Page-end detection
//!
//! Once the viewport reaches the bottom of the document the last section is
//! too short to win the scroll-spy, so the navigation is cleared instead.

use encore_dom::{Document, Viewport};

/// Viewport bottom within `tolerance` px of the document bottom
pub fn at_page_end(viewport: Viewport, scroll_height: f64, tolerance: f64) -> bool {
    viewport.bottom() >= scroll_height - tolerance
}

#[derive(Clone, Copy, Debug)]
pub struct PageEndDetector {
    tolerance: f64,
}

impl PageEndDetector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn check(&self, doc: &Document) -> bool {
        at_page_end(doc.viewport(), doc.scroll_height(), self.tolerance)
    }
}
