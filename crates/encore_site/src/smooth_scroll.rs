//! In-page anchor scrolling that clears the fixed header

use encore_dom::{Document, NodeId};

/// Computes scroll destinations for navigation link activations
#[derive(Clone, Copy, Debug)]
pub struct SmoothScrollController {
    /// Space kept between the header and the target
    padding: f64,
}

impl SmoothScrollController {
    pub fn new(padding: f64) -> Self {
        Self { padding }
    }

    /// Element a fragment `href` points at. `#` alone and unknown ids resolve to nothing.
    pub fn resolve_target(doc: &Document, href: &str) -> Option<NodeId> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        doc.get_element_by_id(id)
    }

    /// Window offset that places `target` just below a header of `header_height` px
    pub fn destination(&self, doc: &Document, target: NodeId, header_height: f64) -> Option<f64> {
        let rect = doc.bounding_client_rect(target)?;
        Some(doc.scroll_y() + rect.top - (header_height + self.padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_dom::element;

    #[test]
    fn test_destination_compensates_for_header() {
        let mut doc = Document::new();
        doc.set_viewport_size(1280.0, 800.0);
        doc.set_scroll_height(4000.0);
        let root = doc.root();
        doc.mount(root, element("section").id("news").top(1700.0).height(900.0));
        doc.set_scroll_y(300.0);

        let controller = SmoothScrollController::new(8.0);
        let target = SmoothScrollController::resolve_target(&doc, "#news").unwrap();
        // 300 + (1700 - 300) - (72 + 8)
        assert_eq!(controller.destination(&doc, target, 72.0), Some(1620.0));
    }

    #[test]
    fn test_unresolvable_targets() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.mount(root, element("section").id("news"));

        assert!(SmoothScrollController::resolve_target(&doc, "#").is_none());
        assert!(SmoothScrollController::resolve_target(&doc, "#missing").is_none());
        assert!(SmoothScrollController::resolve_target(&doc, "news").is_none());
        assert!(SmoothScrollController::resolve_target(&doc, "#news").is_some());
    }
}
