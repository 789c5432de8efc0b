//! Explicit listener subscriptions
//!
//! Instead of opaque callbacks attached to host objects, every listener a page
//! registers is a [`Subscription`] value stored in a [`Subscriptions`] registry.
//! Tests can list them, inspect them, and remove them.
//!
//! The registry is generic over the node key type `N` (so this crate does not
//! depend on the document model) and over the listener tag `L`, which the
//! dispatcher matches on to decide which component handles an event.
//!
//! Dispatch order is registration order, for every (target, event type) pair.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::events::{event_name, EventType};

new_key_type! {
    /// Handle returned by [`Subscriptions::subscribe`]
    pub struct SubscriptionId;
}

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget<N> {
    /// The window (scroll, resize, document-ready)
    Window,
    /// A specific node
    Node(N),
}

/// A single listener registration
#[derive(Clone, Debug)]
pub struct Subscription<N, L> {
    /// Object the listener is attached to
    pub target: EventTarget<N>,
    /// Event type the listener reacts to
    pub event_type: EventType,
    /// Which handler runs
    pub listener: L,
    /// Passive listeners never prevent default behavior
    pub passive: bool,
}

/// Ordered registry of subscriptions
#[derive(Clone, Debug)]
pub struct Subscriptions<N, L> {
    entries: SlotMap<SubscriptionId, Subscription<N, L>>,
    /// Registration order (slot keys can be reused, so order is tracked separately)
    order: Vec<SubscriptionId>,
}

impl<N, L> Default for Subscriptions<N, L> {
    fn default() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
}

impl<N, L> Subscriptions<N, L>
where
    N: Copy + PartialEq + std::fmt::Debug,
    L: Clone,
{
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning a handle that can remove it later
    pub fn subscribe(
        &mut self,
        target: EventTarget<N>,
        event_type: EventType,
        listener: L,
        passive: bool,
    ) -> SubscriptionId {
        let id = self.entries.insert(Subscription {
            target,
            event_type,
            listener,
            passive,
        });
        self.order.push(id);
        tracing::trace!(?target, event = event_name(event_type), "subscribed");
        id
    }

    /// Remove a listener. Returns false if the handle was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.entries.remove(id).is_none() {
            return false;
        }
        self.order.retain(|&existing| existing != id);
        true
    }

    /// Remove every listener attached to `target`, returning how many were removed
    pub fn unsubscribe_target(&mut self, target: EventTarget<N>) -> usize {
        let doomed: Vec<SubscriptionId> = self
            .iter()
            .filter(|(_, sub)| sub.target == target)
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            self.unsubscribe(*id);
        }
        doomed.len()
    }

    /// Look up a subscription
    pub fn get(&self, id: SubscriptionId) -> Option<&Subscription<N, L>> {
        self.entries.get(id)
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate subscriptions in registration order
    pub fn iter(&self) -> impl Iterator<Item = (SubscriptionId, &Subscription<N, L>)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.entries.get(id).map(|sub| (id, sub)))
    }

    /// Listeners for a (target, event type) pair, in dispatch order
    pub fn listeners(&self, target: EventTarget<N>, event_type: EventType) -> SmallVec<[L; 4]> {
        self.iter()
            .filter(|(_, sub)| sub.target == target && sub.event_type == event_type)
            .map(|(_, sub)| sub.listener.clone())
            .collect()
    }

    /// Check if any listener is attached for a (target, event type) pair
    pub fn has_listener(&self, target: EventTarget<N>, event_type: EventType) -> bool {
        self.iter()
            .any(|(_, sub)| sub.target == target && sub.event_type == event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Tag {
        A,
        B,
        C,
    }

    #[test]
    fn test_dispatch_order_is_registration_order() {
        let mut subs: Subscriptions<u32, Tag> = Subscriptions::new();
        subs.subscribe(EventTarget::Window, event_types::SCROLL, Tag::B, true);
        subs.subscribe(EventTarget::Window, event_types::RESIZE, Tag::C, false);
        subs.subscribe(EventTarget::Window, event_types::SCROLL, Tag::A, true);

        let scroll = subs.listeners(EventTarget::Window, event_types::SCROLL);
        assert_eq!(scroll.as_slice(), &[Tag::B, Tag::A]);
    }

    #[test]
    fn test_unsubscribe_keeps_order_after_slot_reuse() {
        let mut subs: Subscriptions<u32, Tag> = Subscriptions::new();
        let first = subs.subscribe(EventTarget::Window, event_types::SCROLL, Tag::A, true);
        subs.subscribe(EventTarget::Window, event_types::SCROLL, Tag::B, true);

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));

        // Reuses the freed slot but must dispatch last
        subs.subscribe(EventTarget::Window, event_types::SCROLL, Tag::C, true);
        let scroll = subs.listeners(EventTarget::Window, event_types::SCROLL);
        assert_eq!(scroll.as_slice(), &[Tag::B, Tag::C]);
    }

    #[test]
    fn test_unsubscribe_target() {
        let mut subs: Subscriptions<u32, Tag> = Subscriptions::new();
        subs.subscribe(EventTarget::Node(7), event_types::CLICK, Tag::A, false);
        subs.subscribe(EventTarget::Node(7), event_types::LIST_SCROLL, Tag::B, true);
        subs.subscribe(EventTarget::Node(8), event_types::CLICK, Tag::C, false);

        assert_eq!(subs.unsubscribe_target(EventTarget::Node(7)), 2);
        assert_eq!(subs.len(), 1);
        assert!(!subs.has_listener(EventTarget::Node(7), event_types::CLICK));
        assert!(subs.has_listener(EventTarget::Node(8), event_types::CLICK));
    }

    #[test]
    fn test_subscription_is_inspectable() {
        let mut subs: Subscriptions<u32, Tag> = Subscriptions::new();
        let id = subs.subscribe(EventTarget::Node(3), event_types::INPUT, Tag::A, false);

        let sub = subs.get(id).unwrap();
        assert_eq!(sub.target, EventTarget::Node(3));
        assert_eq!(sub.event_type, event_types::INPUT);
        assert!(!sub.passive);
    }
}
