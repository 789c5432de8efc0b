//! Page: routes host events to the site components
//!
//! Owns the document and one instance of every component for the lifetime of
//! the page view. Listeners are explicit [`Subscription`]s in a registry, so
//! what the page reacts to can be listed and inspected.
//!
//! # Architecture
//!
//! ```text
//! Host events (scroll, resize, click, submit, input, intersections, frames)
//!     ↓
//! Page (subscription lookup, bubbling, dispatch in registration order)
//!     ↓
//! Component views (Vec<DomPatch>)
//!     ↓
//! Document::apply
//! ```
//!
//! # Example
//!
//! ```
//! use encore_core::SiteConfig;
//! use encore_dom::{element, Document};
//! use encore_site::Page;
//!
//! let mut doc = Document::new();
//! doc.set_viewport_size(1280.0, 800.0);
//! doc.set_scroll_height(2000.0);
//! let root = doc.root();
//! doc.mount(root, element("header").fixed().height(64.0));
//!
//! let mut page = Page::new(doc, SiteConfig::default()).unwrap();
//! page.on_document_ready();
//! page.scroll_window_to(400.0, encore_animation::ScrollBehavior::Instant);
//! assert!(page.snapshot().header_scrolled);
//! ```
//!
//! [`Subscription`]: encore_core::Subscription

use std::path::Path;

use encore_animation::{ScrollAnimation, ScrollBehavior, SpringConfig};
use encore_core::{event_name, event_types, EventTarget, EventType, SiteConfig, Subscriptions};
use encore_dom::{Document, DomPatch, NodeId, Query};
use rustc_hash::FxHashMap;

use crate::contact::{ContactForm, SubmitOutcome};
use crate::dates::LocaleDateFormatter;
use crate::header::HeaderOffsetTracker;
use crate::music::{HorizontalListController, ScrollDirection};
use crate::nav::ActiveLinkResolver;
use crate::news::PaginatedReveal;
use crate::page_end::PageEndDetector;
use crate::scroll_spy::{IntersectionEntry, IntersectionObserver, ScrollSpy};
use crate::smooth_scroll::SmoothScrollController;

/// Which component handles a subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    HeaderScrolled,
    HeaderOffset,
    PageEnd,
    SmoothScroll,
    ScrollSpy,
    MusicResize,
    MusicPrev,
    MusicNext,
    MusicDisabled,
    NewsLoadMore,
    ContactInput,
    ContactSubmit,
}

impl Listener {
    /// Passive listeners never prevent default behavior
    pub fn is_passive(self) -> bool {
        matches!(
            self,
            Listener::HeaderScrolled | Listener::PageEnd | Listener::MusicDisabled
        )
    }
}

/// What a click or submit did beyond patching the document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// A listener suppressed the host's default action
    pub default_prevented: bool,
    /// Navigation requested by a listener
    pub navigated_to: Option<String>,
}

struct Event<'a> {
    event_type: EventType,
    target: EventTarget<NodeId>,
    entries: &'a [IntersectionEntry],
}

/// A live page view
pub struct Page {
    doc: Document,
    config: SiteConfig,
    subscriptions: Subscriptions<NodeId, Listener>,

    header: HeaderOffsetTracker,
    resolver: ActiveLinkResolver,
    smooth_scroll: SmoothScrollController,
    page_end: PageEndDetector,
    music: HorizontalListController,
    news: PaginatedReveal,
    dates: LocaleDateFormatter,
    // Set up on document-ready
    observer: Option<IntersectionObserver>,
    spy: Option<ScrollSpy>,
    contact: Option<ContactForm>,

    window_scroll: Option<ScrollAnimation>,
    list_scrolls: FxHashMap<NodeId, ScrollAnimation>,
    intersections_dirty: bool,
    ready: bool,
}

impl Page {
    /// Wrap a document. Fails only on invalid configuration.
    pub fn new(doc: Document, config: SiteConfig) -> encore_core::Result<Self> {
        config.validate()?;
        let tz = config.news.display_timezone()?;

        let header = HeaderOffsetTracker::new(&doc, &config.navigation);
        let resolver = ActiveLinkResolver::new(&doc, &config.navigation.call_to_action);
        let music = HorizontalListController::new(&doc, &config.music);
        let news = PaginatedReveal::new(&doc, config.news.page_size);

        Ok(Self {
            header,
            resolver,
            smooth_scroll: SmoothScrollController::new(config.navigation.scroll_padding),
            page_end: PageEndDetector::new(config.navigation.page_end_tolerance),
            music,
            news,
            dates: LocaleDateFormatter::new(tz),
            observer: None,
            spy: None,
            contact: None,
            window_scroll: None,
            list_scrolls: FxHashMap::default(),
            intersections_dirty: false,
            ready: false,
            subscriptions: Subscriptions::new(),
            config,
            doc,
        })
    }

    /// Wrap a document using configuration read from a TOML file
    pub fn load(doc: Document, config_path: impl AsRef<Path>) -> encore_core::Result<Self> {
        Self::new(doc, SiteConfig::load(config_path)?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for hosts that change layout (content loads, fonts)
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn subscriptions(&self) -> &Subscriptions<NodeId, Listener> {
        &self.subscriptions
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn resolver(&self) -> &ActiveLinkResolver {
        &self.resolver
    }

    pub fn header(&self) -> &HeaderOffsetTracker {
        &self.header
    }

    pub fn music(&self) -> &HorizontalListController {
        &self.music
    }

    pub fn news(&self) -> &PaginatedReveal {
        &self.news
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn scroll_spy(&self) -> Option<&ScrollSpy> {
        self.spy.as_ref()
    }

    /// Whether any smooth scroll is still in flight
    pub fn is_animating(&self) -> bool {
        self.window_scroll.is_some() || !self.list_scrolls.is_empty()
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize every component and register its listeners. Runs once.
    pub fn on_document_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        tracing::debug!(event = event_name(event_types::DOCUMENT_READY), "page init");

        // Header and page end
        self.apply(self.header.offset_patches(&self.doc));
        self.apply(self.header.scrolled_patches(&self.doc));
        self.clear_nav_at_page_end();
        self.listen(EventTarget::Window, event_types::SCROLL, Listener::HeaderScrolled);
        self.listen(EventTarget::Window, event_types::RESIZE, Listener::HeaderOffset);
        self.listen(EventTarget::Window, event_types::SCROLL, Listener::PageEnd);

        // Smooth scroll
        let links: Vec<NodeId> = self.resolver.links().iter().map(|l| l.node).collect();
        for link in links {
            self.listen(EventTarget::Node(link), event_types::CLICK, Listener::SmoothScroll);
        }

        self.setup_scroll_spy();

        // Music
        self.apply(self.music.marker_patches());
        self.rebuild_music();
        self.listen(EventTarget::Window, event_types::RESIZE, Listener::MusicResize);

        // News
        self.apply(self.news.marker_patches());
        let init = self.news.init_patches();
        self.apply(init);
        if let (Some(trigger), true) = (self.news.trigger(), self.news.is_paging()) {
            self.listen(EventTarget::Node(trigger), event_types::CLICK, Listener::NewsLoadMore);
        }

        // Contact
        self.contact = ContactForm::setup(&mut self.doc, &self.config.contact.recipient);
        if let Some(contact) = &self.contact {
            let fields: Vec<NodeId> = contact.fields().collect();
            let form = contact.form();
            for field in fields {
                self.listen(EventTarget::Node(field), event_types::INPUT, Listener::ContactInput);
            }
            self.listen(EventTarget::Node(form), event_types::SUBMIT, Listener::ContactSubmit);
        }

        // Dates
        self.apply(self.dates.patches(&self.doc));

        tracing::debug!(subscriptions = self.subscriptions.len(), "page ready");
    }

    /// `main section[id]`, observed just below the header measured now
    fn setup_scroll_spy(&mut self) {
        let sections: Vec<(NodeId, String)> = self
            .doc
            .query_first(self.doc.root(), &Query::tag("main"))
            .map(|main| self.doc.query_all(main, &Query::tag("section").has_attr("id")))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| Some((node, self.doc.element(node)?.id()?.to_string())))
            .collect();
        if sections.is_empty() {
            tracing::debug!("no sections, scroll-spy disabled");
            return;
        }

        let nav = &self.config.navigation;
        let margin_top = self.header.height(&self.doc) + nav.scroll_padding;
        let targets = sections.iter().map(|(node, _)| *node).collect();
        self.observer = Some(IntersectionObserver::new(targets, margin_top, nav.spy_bottom_margin));
        self.spy = Some(ScrollSpy::new(sections, nav.tie_break));
        self.listen(EventTarget::Window, event_types::INTERSECTION, Listener::ScrollSpy);
        // Observing delivers an initial batch
        self.intersections_dirty = true;
    }

    fn listen(&mut self, target: EventTarget<NodeId>, event_type: EventType, listener: Listener) {
        self.subscriptions
            .subscribe(target, event_type, listener, listener.is_passive());
    }

    fn apply(&mut self, patches: impl IntoIterator<Item = DomPatch>) {
        self.doc.apply(patches);
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// The window scrolled
    pub fn on_scroll(&mut self) {
        // Intersections settle before scroll listeners so page-end clearing wins
        self.flush_intersections();
        self.dispatch_window(event_types::SCROLL, &[]);
    }

    /// The viewport changed size
    ///
    /// A resize that clamps the window offset also scrolls the window.
    pub fn on_resize(&mut self, inner_width: f64, inner_height: f64) {
        let before = self.doc.scroll_y();
        self.doc.set_viewport_size(inner_width, inner_height);
        self.dispatch_window(event_types::RESIZE, &[]);
        self.intersections_dirty = true;
        if self.doc.scroll_y() != before {
            self.on_scroll();
        }
    }

    /// A node was activated. The event bubbles to the root.
    pub fn on_click(&mut self, node: NodeId) -> EventOutcome {
        self.dispatch_bubbling(node, event_types::CLICK)
    }

    /// A form field was edited to `value`
    pub fn on_input(&mut self, node: NodeId, value: &str) {
        match self.doc.element_mut(node) {
            Some(el) => el.value = value.to_string(),
            None => return,
        }
        self.dispatch_bubbling(node, event_types::INPUT);
    }

    /// A form was submitted
    pub fn on_submit(&mut self, form: NodeId) -> EventOutcome {
        self.dispatch_bubbling(form, event_types::SUBMIT)
    }

    /// A horizontal scroll container scrolled
    pub fn on_list_scroll(&mut self, list: NodeId) {
        let event = Event {
            event_type: event_types::LIST_SCROLL,
            target: EventTarget::Node(list),
            entries: &[],
        };
        self.dispatch(&event, &mut EventOutcome::default());
    }

    /// Deliver an intersection batch computed by the host
    pub fn deliver_intersections(&mut self, entries: &[IntersectionEntry]) {
        if entries.is_empty() {
            return;
        }
        self.dispatch_window(event_types::INTERSECTION, entries);
    }

    /// Compute pending intersection changes and deliver them. Returns the batch size.
    pub fn flush_intersections(&mut self) -> usize {
        self.intersections_dirty = false;
        let Some(observer) = self.observer.as_mut() else {
            return 0;
        };
        let entries = observer.take_records(&self.doc);
        self.deliver_intersections(&entries);
        entries.len()
    }

    /// Advance smooth scrolls by `dt` seconds. Every tick that moves an
    /// offset emits the matching scroll event. Returns true while anything
    /// is still animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        if let Some(mut anim) = self.window_scroll.take() {
            let y = anim.tick(dt);
            if !anim.is_finished() {
                self.window_scroll = Some(anim);
            }
            if self.doc.scroll_y() != y {
                self.doc.set_scroll_y(y);
                self.on_scroll();
            }
        }

        let lists: Vec<NodeId> = self.list_scrolls.keys().copied().collect();
        for list in lists {
            let Some(anim) = self.list_scrolls.get_mut(&list) else {
                continue;
            };
            let x = anim.tick(dt);
            if anim.is_finished() {
                self.list_scrolls.remove(&list);
            }
            let before = self.doc.element(list).map(|el| el.scroll.scroll_left);
            if before.is_some_and(|left| left != x) {
                self.doc.set_scroll_left(list, x);
                self.on_list_scroll(list);
            }
        }

        if self.intersections_dirty {
            self.flush_intersections();
        }
        self.is_animating()
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scroll the window to `y`, clamped to the document
    pub fn scroll_window_to(&mut self, y: f64, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Instant => {
                self.window_scroll = None;
                let before = self.doc.scroll_y();
                if self.doc.set_scroll_y(y) != before {
                    self.on_scroll();
                }
            }
            ScrollBehavior::Smooth => match self.window_scroll.as_mut() {
                Some(anim) => anim.retarget(y),
                None => {
                    self.window_scroll = Some(ScrollAnimation::new(
                        SpringConfig::smooth_scroll(),
                        self.doc.scroll_y(),
                        y,
                        0.0,
                        self.doc.max_scroll_y(),
                    ));
                }
            },
        }
    }

    /// Scroll a list to `x`, clamped to its range
    pub fn scroll_list_to(&mut self, list: NodeId, x: f64, behavior: ScrollBehavior) {
        let Some(metrics) = self.doc.element(list).map(|el| el.scroll) else {
            return;
        };
        match behavior {
            ScrollBehavior::Instant => {
                self.list_scrolls.remove(&list);
                if self.doc.set_scroll_left(list, x) != Some(metrics.scroll_left) {
                    self.on_list_scroll(list);
                }
            }
            ScrollBehavior::Smooth => {
                self.list_scrolls
                    .entry(list)
                    .and_modify(|anim| anim.retarget(x))
                    .or_insert_with(|| {
                        ScrollAnimation::new(
                            SpringConfig::snappy(),
                            metrics.scroll_left,
                            x,
                            0.0,
                            metrics.max_scroll_left(),
                        )
                    });
            }
        }
    }

    /// Scroll a list by `dx`, relative to an in-flight destination if any
    pub fn scroll_list_by(&mut self, list: NodeId, dx: f64, behavior: ScrollBehavior) {
        let base = match self.list_scrolls.get(&list) {
            Some(anim) => anim.target(),
            None => match self.doc.element(list) {
                Some(el) => el.scroll.scroll_left,
                None => return,
            },
        };
        self.scroll_list_to(list, base + dx, behavior);
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch_window(&mut self, event_type: EventType, entries: &[IntersectionEntry]) {
        let event = Event {
            event_type,
            target: EventTarget::Window,
            entries,
        };
        self.dispatch(&event, &mut EventOutcome::default());
    }

    /// Dispatch at `node`, then each ancestor up to the root
    fn dispatch_bubbling(&mut self, node: NodeId, event_type: EventType) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let mut current = Some(node);
        while let Some(n) = current {
            // Listeners may remove nodes; capture the parent first
            let parent = self.doc.parent(n);
            let event = Event {
                event_type,
                target: EventTarget::Node(n),
                entries: &[],
            };
            self.dispatch(&event, &mut outcome);
            current = parent;
        }
        outcome
    }

    fn dispatch(&mut self, event: &Event<'_>, outcome: &mut EventOutcome) {
        let listeners = self.subscriptions.listeners(event.target, event.event_type);
        if listeners.is_empty() {
            return;
        }
        tracing::trace!(
            event = event_name(event.event_type),
            target = ?event.target,
            listeners = listeners.len(),
            "dispatch"
        );
        for listener in listeners {
            self.handle(listener, event, outcome);
        }
    }

    fn handle(&mut self, listener: Listener, event: &Event<'_>, outcome: &mut EventOutcome) {
        let node = match event.target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        };

        match listener {
            Listener::HeaderScrolled => self.apply(self.header.scrolled_patches(&self.doc)),
            Listener::HeaderOffset => self.apply(self.header.offset_patches(&self.doc)),
            Listener::PageEnd => self.clear_nav_at_page_end(),
            Listener::SmoothScroll => {
                if let Some(link) = node {
                    self.scroll_to_anchor(link, outcome);
                }
            }
            Listener::ScrollSpy => {
                let Some(spy) = self.spy.as_mut() else {
                    return;
                };
                let id = spy.observe_batch(event.entries).map(str::to_string);
                if let Some(id) = &id {
                    tracing::trace!(%id, "scroll-spy");
                }
                self.apply(self.resolver.resolve(id.as_deref()));
                self.clear_nav_at_page_end();
            }
            Listener::MusicResize => self.rebuild_music(),
            Listener::MusicPrev => self.page_music(ScrollDirection::Prev),
            Listener::MusicNext => self.page_music(ScrollDirection::Next),
            Listener::MusicDisabled => self.apply(self.music.disabled_patches(&self.doc)),
            Listener::NewsLoadMore => {
                let patches = self.news.reveal_next();
                self.apply(patches);
                if !self.news.is_paging() {
                    if let Some(trigger) = self.news.trigger() {
                        self.subscriptions.unsubscribe_target(EventTarget::Node(trigger));
                        tracing::debug!("news exhausted, load-more detached");
                    }
                }
            }
            Listener::ContactInput => {
                if let Some(contact) = &self.contact {
                    let patches = contact.clear_error();
                    self.apply(patches);
                }
            }
            Listener::ContactSubmit => {
                let Some(contact) = &self.contact else {
                    return;
                };
                let (result, patches) = contact.submit(&self.doc);
                if result.is_intercepted() {
                    outcome.default_prevented = true;
                }
                self.apply(patches);
                if let SubmitOutcome::Accepted(href) = result {
                    outcome.navigated_to = Some(href);
                }
            }
        }
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    fn clear_nav_at_page_end(&mut self) {
        if self.page_end.check(&self.doc) {
            tracing::trace!("page end, navigation cleared");
            let cta = self.resolver.call_to_action().to_string();
            self.apply(self.resolver.resolve(Some(&cta)));
        }
    }

    fn scroll_to_anchor(&mut self, link: NodeId, outcome: &mut EventOutcome) {
        let Some(href) = self.doc.element(link).and_then(|el| el.attr("href")) else {
            return;
        };
        let Some(target) = SmoothScrollController::resolve_target(&self.doc, href) else {
            return;
        };
        outcome.default_prevented = true;

        // Layout may have shifted since the last resize
        self.apply(self.header.offset_patches(&self.doc));
        let header_height = self.header.height(&self.doc);
        if let Some(y) = self.smooth_scroll.destination(&self.doc, target, header_height) {
            tracing::debug!(y, "anchor scroll");
            self.scroll_window_to(y, ScrollBehavior::Smooth);
        }
    }

    fn rebuild_music(&mut self) {
        if let Some(old) = self.music.controls() {
            self.subscriptions.unsubscribe_target(EventTarget::Node(old.prev));
            self.subscriptions.unsubscribe_target(EventTarget::Node(old.next));
        }
        if let Some(list) = self.music.list() {
            self.subscriptions.unsubscribe_target(EventTarget::Node(list));
        }

        let Some(controls) = self.music.rebuild(&mut self.doc) else {
            return;
        };
        self.listen(EventTarget::Node(controls.prev), event_types::CLICK, Listener::MusicPrev);
        self.listen(EventTarget::Node(controls.next), event_types::CLICK, Listener::MusicNext);
        if let Some(list) = self.music.list() {
            self.listen(EventTarget::Node(list), event_types::LIST_SCROLL, Listener::MusicDisabled);
        }
        self.apply(self.music.disabled_patches(&self.doc));
    }

    fn page_music(&mut self, direction: ScrollDirection) {
        let (Some(list), Some(delta)) = (
            self.music.list(),
            self.music.scroll_delta(&self.doc, direction),
        ) else {
            return;
        };
        self.scroll_list_by(list, delta, ScrollBehavior::Smooth);
    }
}
