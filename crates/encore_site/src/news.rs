//! Paginated reveal of news items
//!
//! ```text
//! total <= page_size      trigger hidden, every item shown
//! total >  page_size      first page shown, rest hidden
//!     │ trigger activation
//!     ▼
//! shown = min(shown + page_size, total)
//!     │ shown == total
//!     ▼
//! exhausted               trigger hidden for good
//! ```

use encore_dom::{Document, DomPatch, NodeId, Query};

use crate::markup::{CONTAINER, NEWS_ACTIONS, NEWS_ITEM, NEWS_LIST, NEWS_LOAD_MORE, NEWS_SECTION, NEWS_SINGLE};

/// "Load more" controller for the news list
#[derive(Clone, Debug)]
pub struct PaginatedReveal {
    container: Option<NodeId>,
    items: Vec<NodeId>,
    trigger: Option<NodeId>,
    actions: Option<NodeId>,
    page_size: usize,
    shown: usize,
}

impl PaginatedReveal {
    pub fn new(doc: &Document, page_size: usize) -> Self {
        let section = doc.get_element_by_id(NEWS_SECTION);
        let find = |class: &str| section.and_then(|s| doc.query_first(s, &Query::class_name(class)));
        let container = find(CONTAINER);
        let actions = find(NEWS_ACTIONS);
        let items = find(NEWS_LIST)
            .map(|list| doc.query_all(list, &Query::class_name(NEWS_ITEM)))
            .unwrap_or_default();
        let trigger = doc.get_element_by_id(NEWS_LOAD_MORE);

        let shown = items.len();
        Self {
            container,
            items,
            trigger,
            actions,
            page_size: page_size.max(1),
            shown,
        }
    }

    pub fn trigger(&self) -> Option<NodeId> {
        self.trigger
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Whether trigger activations still reveal anything
    pub fn is_paging(&self) -> bool {
        self.trigger.is_some() && self.actions.is_some() && self.shown < self.items.len()
    }

    /// Single-item lists get a layout marker on the section container
    pub fn marker_patches(&self) -> Vec<DomPatch> {
        match self.container {
            Some(container) if self.items.len() == 1 => {
                vec![DomPatch::set_class(container, NEWS_SINGLE, true)]
            }
            _ => Vec::new(),
        }
    }

    /// Initial visibility. Returns nothing when paging cannot be set up.
    pub fn init_patches(&mut self) -> Vec<DomPatch> {
        let Some(actions) = self.actions else {
            tracing::debug!("no news actions, paging disabled");
            return Vec::new();
        };
        if self.items.is_empty() || self.trigger.is_none() {
            tracing::debug!(items = self.items.len(), "news paging disabled");
            return Vec::new();
        }

        if self.items.len() <= self.page_size {
            self.shown = self.items.len();
            return vec![DomPatch::display(actions, false)];
        }

        self.shown = self.page_size;
        reveal_view(&self.items, 0, self.shown, false)
    }

    /// One trigger activation. A no-op once every item is shown.
    pub fn reveal_next(&mut self) -> Vec<DomPatch> {
        if !self.is_paging() {
            return Vec::new();
        }
        let from = self.shown;
        self.shown = (self.shown + self.page_size).min(self.items.len());
        tracing::debug!(shown = self.shown, total = self.items.len(), "news page revealed");

        let mut patches = reveal_view(&self.items, from, self.shown, true);
        if let (Some(actions), true) = (self.actions, self.shown >= self.items.len()) {
            patches.push(DomPatch::display(actions, false));
        }
        patches
    }
}

/// Visibility of `items`: `[..shown]` visible, the rest hidden. With
/// `changed_only` just the items in `[from, shown)` are touched.
pub fn reveal_view(items: &[NodeId], from: usize, shown: usize, changed_only: bool) -> Vec<DomPatch> {
    items
        .iter()
        .enumerate()
        .filter(|(idx, _)| !changed_only || (from..shown).contains(idx))
        .map(|(idx, &item)| DomPatch::display(item, idx < shown))
        .collect()
}
