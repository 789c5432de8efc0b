//! Horizontal music list controls
//!
//! When the music list is wider than its container, prev/next buttons are
//! injected right after it. Each button pages the list by a fraction of its
//! visible width, and is disabled while the list sits at that end.
//!
//! Controls are torn down and rebuilt on every resize, so they exist if and
//! only if the list currently overflows.

use encore_core::MusicConfig;
use encore_dom::{Document, DomPatch, Element, NodeId, Query, ScrollMetrics};

use crate::markup::{
    CONTAINER, MUSIC_BUTTON, MUSIC_BUTTON_NEXT, MUSIC_BUTTON_PREV, MUSIC_CONTROLS, MUSIC_ITEM,
    MUSIC_LIST, MUSIC_SECTION, MUSIC_SINGLE,
};

/// Paging direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Prev,
    Next,
}

/// Injected control nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicControls {
    pub wrapper: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
}

/// Owns the music list's controls for the lifetime of the page
#[derive(Clone, Debug)]
pub struct HorizontalListController {
    container: Option<NodeId>,
    list: Option<NodeId>,
    item_count: usize,
    controls: Option<MusicControls>,
    config: MusicConfig,
}

impl HorizontalListController {
    pub fn new(doc: &Document, config: &MusicConfig) -> Self {
        let section = doc.get_element_by_id(MUSIC_SECTION);
        let find = |class: &str| section.and_then(|s| doc.query_first(s, &Query::class_name(class)));
        let container = find(CONTAINER);
        let list = find(MUSIC_LIST);
        let item_count = list.map_or(0, |l| doc.query_all(l, &Query::class_name(MUSIC_ITEM)).len());

        if section.is_none() {
            tracing::debug!("no music section, list controls disabled");
        }
        Self {
            container,
            list,
            item_count,
            controls: None,
            config: config.clone(),
        }
    }

    pub fn list(&self) -> Option<NodeId> {
        self.list
    }

    pub fn controls(&self) -> Option<MusicControls> {
        self.controls
    }

    /// Single-item lists get a layout marker on the section container
    pub fn marker_patches(&self) -> Vec<DomPatch> {
        match self.container {
            Some(container) if self.item_count == 1 => {
                vec![DomPatch::set_class(container, MUSIC_SINGLE, true)]
            }
            _ => Vec::new(),
        }
    }

    /// Remove existing controls and inject fresh ones if the list overflows
    pub fn rebuild(&mut self, doc: &mut Document) -> Option<MusicControls> {
        let (Some(container), Some(list)) = (self.container, self.list) else {
            return None;
        };

        if let Some(existing) = doc.query_first(container, &Query::class_name(MUSIC_CONTROLS)) {
            doc.remove(existing);
        }
        self.controls = None;

        let metrics = doc.element(list)?.scroll;
        if !metrics.overflows(self.config.overflow_tolerance) {
            return None;
        }

        let mut wrapper = Element::new("div");
        wrapper.set_class_name(MUSIC_CONTROLS);
        let wrapper = doc.create_element(wrapper);
        let prev = doc.create_element(button(MUSIC_BUTTON_PREV, "‹"));
        let next = doc.create_element(button(MUSIC_BUTTON_NEXT, "›"));
        doc.append_child(wrapper, prev);
        doc.append_child(wrapper, next);
        doc.insert_after(list, wrapper);

        let controls = MusicControls { wrapper, prev, next };
        self.controls = Some(controls);
        tracing::debug!(
            scroll_width = metrics.scroll_width,
            client_width = metrics.client_width,
            "music controls injected"
        );
        Some(controls)
    }

    /// Signed scroll distance for one activation
    pub fn scroll_delta(&self, doc: &Document, direction: ScrollDirection) -> Option<f64> {
        let metrics = doc.element(self.list?)?.scroll;
        let step = (metrics.client_width * self.config.scroll_step).round();
        Some(match direction {
            ScrollDirection::Prev => -step,
            ScrollDirection::Next => step,
        })
    }

    /// Disabled state for the list's current offset
    pub fn disabled_patches(&self, doc: &Document) -> Vec<DomPatch> {
        let (Some(controls), Some(list)) = (self.controls, self.list) else {
            return Vec::new();
        };
        let Some(el) = doc.element(list) else {
            return Vec::new();
        };
        disabled_view(el.scroll, &controls, self.config.edge_tolerance).to_vec()
    }
}

fn button(modifier: &str, glyph: &str) -> Element {
    let mut el = Element::new("button");
    el.set_attr("type", "button");
    el.set_class_name(&format!("{MUSIC_BUTTON} {modifier}"));
    el.text = glyph.to_string();
    el
}

/// Which ends of the list are reached, within `tolerance` px
pub fn disabled_view(metrics: ScrollMetrics, controls: &MusicControls, tolerance: f64) -> [DomPatch; 2] {
    let max = metrics.max_scroll_left();
    [
        DomPatch::SetDisabled {
            node: controls.prev,
            disabled: metrics.scroll_left <= tolerance,
        },
        DomPatch::SetDisabled {
            node: controls.next,
            disabled: metrics.scroll_left >= max - tolerance,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_dom::element;

    fn music_doc(items: usize, scroll_width: f64, client_width: f64) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        doc.mount(
            root,
            element("section").id("music").child(
                element("div").class("container").child(
                    element("ul")
                        .class("music-list")
                        .scrollable(scroll_width, client_width)
                        .children((0..items).map(|_| element("li").class("music-item"))),
                ),
            ),
        );
        doc
    }

    fn disabled(doc: &Document, node: NodeId) -> bool {
        doc.element(node).unwrap().disabled
    }

    #[test]
    fn test_no_controls_without_overflow() {
        let mut doc = music_doc(3, 901.0, 900.0);
        let mut ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        assert!(ctl.rebuild(&mut doc).is_none());
        let root = doc.root();
        assert!(doc.query_first(root, &Query::class_name(MUSIC_CONTROLS)).is_none());
    }

    #[test]
    fn test_controls_markup() {
        let mut doc = music_doc(6, 2400.0, 1000.0);
        let mut ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        let controls = ctl.rebuild(&mut doc).unwrap();

        let list = ctl.list().unwrap();
        let container = doc.parent(list).unwrap();
        assert_eq!(doc.children(container), &[list, controls.wrapper]);
        assert_eq!(doc.children(controls.wrapper), &[controls.prev, controls.next]);

        let prev = doc.element(controls.prev).unwrap();
        assert_eq!(prev.attr("type"), Some("button"));
        assert!(prev.has_class(MUSIC_BUTTON) && prev.has_class(MUSIC_BUTTON_PREV));
        assert_eq!(prev.text, "‹");
        assert_eq!(doc.element(controls.next).unwrap().text, "›");
    }

    #[test]
    fn test_rebuild_replaces_and_tears_down() {
        let mut doc = music_doc(6, 2400.0, 1000.0);
        let mut ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        let first = ctl.rebuild(&mut doc).unwrap();
        let second = ctl.rebuild(&mut doc).unwrap();

        assert!(!doc.contains(first.wrapper));
        assert!(doc.contains(second.wrapper));
        let root = doc.root();
        assert_eq!(doc.query_all(root, &Query::class_name(MUSIC_CONTROLS)).len(), 1);

        // Widen the viewport until everything fits
        let list = ctl.list().unwrap();
        doc.element_mut(list).unwrap().scroll.client_width = 2400.0;
        assert!(ctl.rebuild(&mut doc).is_none());
        assert!(!doc.contains(second.wrapper));
        assert!(ctl.controls().is_none());
    }

    #[test]
    fn test_disabled_states() {
        let mut doc = music_doc(6, 2400.0, 1000.0);
        let mut ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        let controls = ctl.rebuild(&mut doc).unwrap();
        let list = ctl.list().unwrap();

        doc.apply(ctl.disabled_patches(&doc));
        assert!(disabled(&doc, controls.prev));
        assert!(!disabled(&doc, controls.next));

        doc.set_scroll_left(list, 800.0);
        doc.apply(ctl.disabled_patches(&doc));
        assert!(!disabled(&doc, controls.prev));
        assert!(!disabled(&doc, controls.next));

        doc.set_scroll_left(list, 1400.0);
        doc.apply(ctl.disabled_patches(&doc));
        assert!(!disabled(&doc, controls.prev));
        assert!(disabled(&doc, controls.next));
    }

    #[test]
    fn test_edge_tolerance() {
        let controls = MusicControls {
            wrapper: NodeId::default(),
            prev: NodeId::default(),
            next: NodeId::default(),
        };
        let metrics = ScrollMetrics {
            scroll_left: 1398.0,
            scroll_width: 2400.0,
            client_width: 1000.0,
        };
        let [_, next] = disabled_view(metrics, &controls, 2.0);
        assert!(matches!(next, DomPatch::SetDisabled { disabled: true, .. }));

        let near_start = ScrollMetrics {
            scroll_left: 2.0,
            ..metrics
        };
        let [prev, _] = disabled_view(near_start, &controls, 2.0);
        assert!(matches!(prev, DomPatch::SetDisabled { disabled: true, .. }));
    }

    #[test]
    fn test_scroll_delta_is_rounded() {
        let doc = music_doc(6, 2400.0, 1001.0);
        let ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        assert_eq!(ctl.scroll_delta(&doc, ScrollDirection::Next), Some(801.0));
        assert_eq!(ctl.scroll_delta(&doc, ScrollDirection::Prev), Some(-801.0));
    }

    #[test]
    fn test_single_item_marker() {
        let doc = music_doc(1, 300.0, 1000.0);
        let ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        let patches = ctl.marker_patches();
        assert_eq!(patches.len(), 1);
        assert!(matches!(&patches[0], DomPatch::SetClass { class, on: true, .. } if class == MUSIC_SINGLE));

        let doc = music_doc(2, 300.0, 1000.0);
        let ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        assert!(ctl.marker_patches().is_empty());
    }

    #[test]
    fn test_missing_section() {
        let mut doc = Document::new();
        let mut ctl = HorizontalListController::new(&doc, &MusicConfig::default());
        assert!(ctl.rebuild(&mut doc).is_none());
        assert!(ctl.disabled_patches(&doc).is_empty());
        assert!(ctl.marker_patches().is_empty());
    }
}
