//! Declarative document construction
//!
//! Hosts and tests describe a subtree with [`ElementSpec`] and mount it in one
//! call, the same way the page markup would be written:
//!
//! ```rust
//! use encore_dom::{element, Document};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let news = doc.mount(
//!     root,
//!     element("section").id("news").child(
//!         element("ul")
//!             .class("news-list")
//!             .children((0..4).map(|_| element("li").class("news-item"))),
//!     ),
//! );
//! assert_eq!(doc.descendants(news).len(), 5);
//! ```

use crate::document::{Document, NodeId};
use crate::element::{Element, LayoutBox, Position, ScrollMetrics};

/// Description of an element subtree
#[derive(Clone, Debug)]
pub struct ElementSpec {
    element: Element,
    children: Vec<ElementSpec>,
}

/// Start describing an element
pub fn element(tag: &str) -> ElementSpec {
    ElementSpec {
        element: Element::new(tag),
        children: Vec::new(),
    }
}

impl ElementSpec {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.element.toggle_class(c, true);
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.element.set_style(property, value);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.text = text.to_string();
        self
    }

    /// Initial form field value
    pub fn value(mut self, value: &str) -> Self {
        self.element.value = value.to_string();
        self
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn layout(mut self, layout: LayoutBox) -> Self {
        self.element.layout = layout;
        self
    }

    /// Document-relative top edge
    pub fn top(mut self, top: f64) -> Self {
        self.element.layout.top = top;
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.element.layout.height = height;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.element.layout.width = width;
        self
    }

    /// Pin the element to the viewport
    pub fn fixed(mut self) -> Self {
        self.element.layout.position = Position::Fixed;
        self
    }

    /// Make the element a horizontal scroll container
    pub fn scrollable(mut self, scroll_width: f64, client_width: f64) -> Self {
        self.element.scroll = ScrollMetrics {
            scroll_left: 0.0,
            scroll_width,
            client_width,
        };
        self
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Document {
    /// Build `spec` and append it under `parent`, returning the subtree root
    pub fn mount(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let ElementSpec { element, children } = spec;
        let node = self.create_element(element);
        self.append_child(parent, node);
        for child in children {
            self.mount(node, child);
        }
        node
    }
}
