//! Header offset tracking
//!
//! Publishes the rendered header height so anchored scrolling clears the
//! fixed header, and marks the header once the window is scrolled.

use encore_core::NavigationConfig;
use encore_dom::{Document, DomPatch, NodeId, Query};

use crate::markup::{HEADER_HEIGHT_VAR, HEADER_SCROLLED, SCROLL_PADDING_TOP};

/// Measures the header and publishes its height
#[derive(Clone, Debug)]
pub struct HeaderOffsetTracker {
    header: Option<NodeId>,
    root: NodeId,
    padding: f64,
    scrolled_threshold: f64,
}

impl HeaderOffsetTracker {
    pub fn new(doc: &Document, config: &NavigationConfig) -> Self {
        let header = doc.query_first(doc.root(), &Query::tag("header"));
        if header.is_none() {
            tracing::debug!("no header, offset tracking disabled");
        }
        Self {
            header,
            root: doc.root(),
            padding: config.scroll_padding,
            scrolled_threshold: config.scrolled_threshold,
        }
    }

    pub fn header(&self) -> Option<NodeId> {
        self.header
    }

    /// Rendered header height, 0 without a header
    pub fn height(&self, doc: &Document) -> f64 {
        self.header
            .and_then(|h| doc.bounding_client_rect(h))
            .map_or(0.0, |rect| rect.height)
    }

    /// Publish the current header height
    pub fn offset_patches(&self, doc: &Document) -> Vec<DomPatch> {
        if self.header.is_none() {
            return Vec::new();
        }
        offset_view(self.root, self.height(doc), self.padding).to_vec()
    }

    /// Toggle the scrolled marker for the current window offset
    pub fn scrolled_patches(&self, doc: &Document) -> Vec<DomPatch> {
        let Some(header) = self.header else {
            return Vec::new();
        };
        vec![DomPatch::set_class(
            header,
            HEADER_SCROLLED,
            doc.scroll_y() > self.scrolled_threshold,
        )]
    }
}

/// Layout variable and scroll padding for a header of `height` px
pub fn offset_view(root: NodeId, height: f64, padding: f64) -> [DomPatch; 2] {
    [
        DomPatch::set_style(root, HEADER_HEIGHT_VAR, format!("{height}px")),
        DomPatch::set_style(
            root,
            SCROLL_PADDING_TOP,
            format!("{}px", height.ceil() + padding),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_dom::element;

    fn doc_with_header(height: f64) -> Document {
        let mut doc = Document::new();
        doc.set_viewport_size(1280.0, 800.0);
        doc.set_scroll_height(4000.0);
        let root = doc.root();
        doc.mount(root, element("header").fixed().height(height));
        doc
    }

    #[test]
    fn test_offset_is_published() {
        let mut doc = doc_with_header(72.4);
        let tracker = HeaderOffsetTracker::new(&doc, &NavigationConfig::default());

        let patches = tracker.offset_patches(&doc);
        doc.apply(patches);

        let root = doc.element(doc.root()).unwrap();
        assert_eq!(root.style(HEADER_HEIGHT_VAR), Some("72.4px"));
        assert_eq!(root.style(SCROLL_PADDING_TOP), Some("81px"));
    }

    #[test]
    fn test_whole_pixel_height_has_no_fraction() {
        let root = Document::new().root();
        let [height, padding] = offset_view(root, 72.0, 8.0);
        assert_eq!(height, DomPatch::set_style(root, HEADER_HEIGHT_VAR, "72px"));
        assert_eq!(padding, DomPatch::set_style(root, SCROLL_PADDING_TOP, "80px"));
    }

    #[test]
    fn test_missing_header_is_noop() {
        let doc = Document::new();
        let tracker = HeaderOffsetTracker::new(&doc, &NavigationConfig::default());
        assert_eq!(tracker.height(&doc), 0.0);
        assert!(tracker.offset_patches(&doc).is_empty());
        assert!(tracker.scrolled_patches(&doc).is_empty());
    }

    #[test]
    fn test_scrolled_marker() {
        let mut doc = doc_with_header(72.0);
        let tracker = HeaderOffsetTracker::new(&doc, &NavigationConfig::default());
        let header = tracker.header().unwrap();

        doc.set_scroll_y(1.0);
        doc.apply(tracker.scrolled_patches(&doc));
        assert!(!doc.element(header).unwrap().has_class(HEADER_SCROLLED));

        doc.set_scroll_y(2.0);
        doc.apply(tracker.scrolled_patches(&doc));
        assert!(doc.element(header).unwrap().has_class(HEADER_SCROLLED));
    }
}
