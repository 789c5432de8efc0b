//! Encore Core
//!
//! Foundational pieces shared by every Encore crate:
//!
//! - **Event Types**: the fixed set of host notifications a page reacts to
//! - **Subscriptions**: listener registrations as explicit, inspectable values
//! - **Configuration**: the tunable constants of a site, loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use encore_core::events::event_types;
//! use encore_core::subscription::{EventTarget, Subscriptions};
//!
//! let mut subs: Subscriptions<u32, &'static str> = Subscriptions::new();
//! let id = subs.subscribe(EventTarget::Window, event_types::SCROLL, "header", true);
//!
//! assert_eq!(subs.listeners(EventTarget::Window, event_types::SCROLL).as_slice(), &["header"]);
//! assert!(subs.unsubscribe(id));
//! assert!(subs.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod subscription;

pub use config::{
    ContactConfig, MusicConfig, NavigationConfig, NewsConfig, SiteConfig, TieBreak,
};
pub use error::{ConfigError, Result};
pub use events::{event_name, event_types, EventType};
pub use subscription::{EventTarget, Subscription, SubscriptionId, Subscriptions};
