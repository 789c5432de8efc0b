//! View patches
//!
//! Components never mutate presentation directly. They compute the desired
//! presentation as a list of [`DomPatch`] values (a pure function of their
//! state), and the page applies the list with [`Document::apply`].
//!
//! ```text
//! Component state
//!     ↓ view(state) -> Vec<DomPatch>      (pure, unit-testable)
//! Document::apply(patches)                (imperative step)
//! ```

use crate::document::{Document, NodeId};

/// One presentation change
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomPatch {
    /// Add (`on`) or remove a class
    SetClass {
        node: NodeId,
        class: String,
        on: bool,
    },
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttr {
        node: NodeId,
        name: String,
    },
    /// Set an inline style property (custom properties included)
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
    RemoveStyle {
        node: NodeId,
        property: String,
    },
    SetText {
        node: NodeId,
        text: String,
    },
    SetDisabled {
        node: NodeId,
        disabled: bool,
    },
    /// Point the window at a new location
    Navigate {
        href: String,
    },
}

impl DomPatch {
    pub fn set_class(node: NodeId, class: &str, on: bool) -> Self {
        DomPatch::SetClass {
            node,
            class: class.to_string(),
            on,
        }
    }

    pub fn set_attr(node: NodeId, name: &str, value: &str) -> Self {
        DomPatch::SetAttr {
            node,
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn remove_attr(node: NodeId, name: &str) -> Self {
        DomPatch::RemoveAttr {
            node,
            name: name.to_string(),
        }
    }

    pub fn set_style(node: NodeId, property: &str, value: impl Into<String>) -> Self {
        DomPatch::SetStyle {
            node,
            property: property.to_string(),
            value: value.into(),
        }
    }

    pub fn remove_style(node: NodeId, property: &str) -> Self {
        DomPatch::RemoveStyle {
            node,
            property: property.to_string(),
        }
    }

    /// Show (`true`) or hide an element through its inline `display`
    pub fn display(node: NodeId, shown: bool) -> Self {
        if shown {
            Self::remove_style(node, "display")
        } else {
            Self::set_style(node, "display", "none")
        }
    }

    /// Node this patch targets, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            DomPatch::SetClass { node, .. }
            | DomPatch::SetAttr { node, .. }
            | DomPatch::RemoveAttr { node, .. }
            | DomPatch::SetStyle { node, .. }
            | DomPatch::RemoveStyle { node, .. }
            | DomPatch::SetText { node, .. }
            | DomPatch::SetDisabled { node, .. } => Some(*node),
            DomPatch::Navigate { .. } => None,
        }
    }
}

impl Document {
    /// Apply patches in order. Patches aimed at nodes that no longer exist are
    /// skipped. Returns how many patches were applied.
    pub fn apply(&mut self, patches: impl IntoIterator<Item = DomPatch>) -> usize {
        let mut applied = 0;
        for patch in patches {
            if self.apply_one(patch) {
                applied += 1;
            }
        }
        applied
    }

    fn apply_one(&mut self, patch: DomPatch) -> bool {
        if let DomPatch::Navigate { href } = patch {
            self.navigate(href);
            return true;
        }
        let Some(el) = patch.node().and_then(|node| self.element_mut(node)) else {
            tracing::trace!(?patch, "patch target missing");
            return false;
        };
        match patch {
            DomPatch::SetClass { class, on, .. } => {
                el.toggle_class(&class, on);
            }
            DomPatch::SetAttr { name, value, .. } => el.set_attr(name, value),
            DomPatch::RemoveAttr { name, .. } => {
                el.remove_attr(&name);
            }
            DomPatch::SetStyle {
                property, value, ..
            } => el.set_style(property, value),
            DomPatch::RemoveStyle { property, .. } => {
                el.remove_style(&property);
            }
            DomPatch::SetText { text, .. } => el.text = text,
            DomPatch::SetDisabled { disabled, .. } => el.disabled = disabled,
            DomPatch::Navigate { .. } => {}
        }
        true
    }
}
