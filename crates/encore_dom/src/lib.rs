//! Encore Document Model
//!
//! A small, host-independent model of the parts of a web document the page
//! interactions read and write:
//!
//! - **Element tree**: tags, ids, class lists, attributes, inline style, text, form values
//! - **Geometry**: layout boxes, the viewport, and horizontal scroll containers
//! - **Queries**: descendant matching by tag, id, class, and attribute
//! - **View patches**: presentation changes computed as data, then applied in one step
//!
//! The host (a browser binding, the CLI demo, or a test) owns layout. It writes
//! measured geometry into the model; components only read it.
//!
//! # Example
//!
//! ```rust
//! use encore_dom::{element, Document, DomPatch, Query};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.mount(root, element("nav").child(element("a").attr("href", "#music")));
//!
//! let link = doc.query_first(root, &Query::tag("a").attr_prefix("href", "#")).unwrap();
//! doc.apply([DomPatch::set_class(link, "is-active", true)]);
//! assert!(doc.element(link).unwrap().has_class("is-active"));
//! ```

pub mod builder;
pub mod document;
pub mod element;
pub mod patch;
pub mod query;

pub use builder::{element, ElementSpec};
pub use document::{ClientRect, Document, NodeId, Viewport};
pub use element::{Element, LayoutBox, Position, ScrollMetrics};
pub use patch::DomPatch;
pub use query::{AttrMatch, Query};
