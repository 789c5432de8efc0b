//! Document tree, viewport, and geometry

use slotmap::{new_key_type, SlotMap};

use crate::element::{Element, Position};
use crate::query::Query;

new_key_type! {
    pub struct NodeId;
}

/// Visible area of the window
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset of the window
    pub scroll_y: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Viewport {
    /// Bottom edge of the viewport in document coordinates
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.inner_height
    }
}

/// Element box relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Clone, Debug)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An element tree plus the window state around it
#[derive(Clone, Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    viewport: Viewport,
    /// Total height of the document content
    scroll_height: f64,
    /// Last navigation requested by the page
    location: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the `html` element
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            element: Element::new("html"),
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            root,
            viewport: Viewport::default(),
            scroll_height: 0.0,
            location: None,
        }
    }

    /// The document element
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node).map(|n| &mut n.element)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.nodes.insert(Node {
            element,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    /// Ignored when `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent)
            || !self.contains(child)
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `node` directly after `reference` among its siblings
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if !self.contains(node) || node == reference || self.is_inclusive_ancestor(node, parent) {
            return;
        }
        self.detach(node);
        let Some(p) = self.nodes.get_mut(parent) else {
            return;
        };
        let index = p
            .children
            .iter()
            .position(|&c| c == reference)
            .map_or(p.children.len(), |i| i + 1);
        p.children.insert(index, node);
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    /// Remove a node and all its descendants
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.contains(node) {
            return;
        }
        self.detach(node);
        for descendant in self.descendants(node) {
            self.nodes.remove(descendant);
        }
        self.nodes.remove(node);
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// True if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First descendant of `scope` matching `query`
    pub fn query_first(&self, scope: NodeId, query: &Query) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.element(n).is_some_and(|el| query.matches(el)))
    }

    /// All descendants of `scope` matching `query`, in document order
    pub fn query_all(&self, scope: NodeId, query: &Query) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|el| query.matches(el)))
            .collect()
    }

    /// Element with the given id anywhere in the document
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_first(self.root, &Query::new().id(id))
    }

    // =========================================================================
    // Window & geometry
    // =========================================================================

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the viewport, re-clamping the scroll offset
    pub fn set_viewport_size(&mut self, inner_width: f64, inner_height: f64) {
        self.viewport.inner_width = inner_width;
        self.viewport.inner_height = inner_height;
        self.set_scroll_y(self.viewport.scroll_y);
    }

    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn set_scroll_height(&mut self, height: f64) {
        self.scroll_height = height;
        self.set_scroll_y(self.viewport.scroll_y);
    }

    /// Largest reachable window scroll offset
    pub fn max_scroll_y(&self) -> f64 {
        (self.scroll_height - self.viewport.inner_height).max(0.0)
    }

    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    /// Move the window, clamped to the scrollable range. Returns the applied offset.
    pub fn set_scroll_y(&mut self, y: f64) -> f64 {
        let clamped = y.clamp(0.0, self.max_scroll_y());
        self.viewport.scroll_y = clamped;
        clamped
    }

    /// Move a scroll container, clamped to its range. Returns the applied offset.
    pub fn set_scroll_left(&mut self, node: NodeId, x: f64) -> Option<f64> {
        let el = self.element_mut(node)?;
        let clamped = x.clamp(0.0, el.scroll.max_scroll_left());
        el.scroll.scroll_left = clamped;
        Some(clamped)
    }

    /// Box of `node` relative to the viewport
    pub fn bounding_client_rect(&self, node: NodeId) -> Option<ClientRect> {
        let layout = self.element(node)?.layout;
        let top = match layout.position {
            Position::Flow => layout.top - self.viewport.scroll_y,
            Position::Fixed => layout.top,
        };
        Some(ClientRect {
            top,
            width: layout.width,
            height: layout.height,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Last navigation target, if the page navigated
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn navigate(&mut self, href: impl Into<String>) {
        let href = href.into();
        tracing::debug!(%href, "navigate");
        self.location = Some(href);
    }
}
