//! Encore Site
//!
//! The interactive behavior of a single-page band site, built on the
//! [`encore_dom`] document model:
//!
//! - **Header**: publishes its height for anchored scrolling, marks itself when scrolled
//! - **Navigation**: scroll-spy active link, smooth anchor scrolling, cleared at page end
//! - **Music**: prev/next controls for an overflowing horizontal list
//! - **News**: paged "load more" reveal and venue-local date labels
//! - **Contact**: form validation with a `mailto:` handoff
//!
//! Components compute [`DomPatch`](encore_dom::DomPatch) lists; the [`Page`]
//! owns the document, registers listeners as explicit subscriptions, and
//! applies the patches as host events arrive.
//!
//! # Example
//!
//! ```rust
//! use encore_core::SiteConfig;
//! use encore_site::{demo::demo_document, Page};
//!
//! let mut page = Page::new(demo_document(), SiteConfig::default()).unwrap();
//! page.on_document_ready();
//!
//! let more = page.news().trigger().unwrap();
//! page.on_click(more);
//! assert_eq!(page.snapshot().news_shown, 6);
//! ```

pub mod contact;
pub mod dates;
pub mod demo;
pub mod error;
pub mod header;
pub mod markup;
pub mod music;
pub mod nav;
pub mod news;
pub mod page;
pub mod page_end;
pub mod scroll_spy;
pub mod smooth_scroll;
pub mod snapshot;

pub use contact::{
    is_valid_email, mailto_uri, validate, ContactFields, ContactForm, SubmitOutcome, ValidContact,
};
pub use dates::{format_display_date, format_news_date, parse_iso_date, LocaleDateFormatter};
pub use error::{DateError, ValidationError};
pub use header::HeaderOffsetTracker;
pub use music::{HorizontalListController, MusicControls, ScrollDirection};
pub use nav::{ActiveLinkResolver, NavLink};
pub use news::PaginatedReveal;
pub use page::{EventOutcome, Listener, Page};
pub use page_end::{at_page_end, PageEndDetector};
pub use scroll_spy::{IntersectionEntry, IntersectionObserver, ScrollSpy};
pub use smooth_scroll::SmoothScrollController;
pub use snapshot::{MusicControlsSnapshot, PageSnapshot};
