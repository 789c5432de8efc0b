//! Active navigation link resolution
//!
//! Given a section id, decides which navigation link is marked active. At most
//! one link is ever active, and the call-to-action link never is: resolving
//! the call-to-action id clears every link instead.

use encore_dom::{Document, DomPatch, NodeId, Query};

use crate::markup::{ARIA_CURRENT, NAV_ACTIVE};

/// A navigation link pointing at an in-page fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub node: NodeId,
    /// Raw `href`, e.g. `#music`
    pub href: String,
}

impl NavLink {
    /// Section id the link targets
    pub fn target(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }
}

/// Toggles active state across the fixed set of navigation links
#[derive(Clone, Debug)]
pub struct ActiveLinkResolver {
    links: Vec<NavLink>,
    call_to_action: String,
}

impl ActiveLinkResolver {
    /// Collect `header nav a[href^="#"]`
    pub fn new(doc: &Document, call_to_action: &str) -> Self {
        let links = doc
            .query_first(doc.root(), &Query::tag("header"))
            .and_then(|header| doc.query_first(header, &Query::tag("nav")))
            .map(|nav| {
                doc.query_all(nav, &Query::tag("a").attr_prefix("href", "#"))
                    .into_iter()
                    .filter_map(|node| {
                        let href = doc.element(node)?.attr("href")?.to_string();
                        Some(NavLink { node, href })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self::from_links(links, call_to_action)
    }

    pub fn from_links(links: Vec<NavLink>, call_to_action: &str) -> Self {
        Self {
            links,
            call_to_action: call_to_action.to_string(),
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn call_to_action(&self) -> &str {
        &self.call_to_action
    }

    /// Presentation for section `id`. `None` changes nothing.
    pub fn resolve(&self, id: Option<&str>) -> Vec<DomPatch> {
        let Some(id) = id else {
            return Vec::new();
        };
        let active = if id == self.call_to_action {
            None
        } else {
            let href = format!("#{id}");
            // Duplicate hrefs: only the first link lights up
            self.links.iter().find(|link| link.href == href).map(|l| l.node)
        };
        self.links
            .iter()
            .flat_map(|link| link_view(link.node, Some(link.node) == active))
            .collect()
    }

    /// Currently active link, read back from the document
    pub fn active_link<'a>(&'a self, doc: &Document) -> Option<&'a NavLink> {
        self.links.iter().find(|link| {
            doc.element(link.node)
                .is_some_and(|el| el.has_class(NAV_ACTIVE))
        })
    }
}

fn link_view(node: NodeId, active: bool) -> [DomPatch; 2] {
    let current = if active {
        DomPatch::set_attr(node, ARIA_CURRENT, "page")
    } else {
        DomPatch::remove_attr(node, ARIA_CURRENT)
    };
    [DomPatch::set_class(node, NAV_ACTIVE, active), current]
}
