//! Class names, ids and attributes shared with the site markup and stylesheet

/// Header class while the window is scrolled
pub const HEADER_SCROLLED: &str = "is-scrolled";
/// Custom property carrying the header height
pub const HEADER_HEIGHT_VAR: &str = "--header-h";
/// Document-level scroll padding property
pub const SCROLL_PADDING_TOP: &str = "scroll-padding-top";

/// Active navigation link class
pub const NAV_ACTIVE: &str = "is-active";
/// Accessibility attribute marking the current link
pub const ARIA_CURRENT: &str = "aria-current";

pub const MUSIC_SECTION: &str = "music";
pub const MUSIC_LIST: &str = "music-list";
pub const MUSIC_ITEM: &str = "music-item";
pub const MUSIC_SINGLE: &str = "has-single-music";
pub const MUSIC_CONTROLS: &str = "music-scroll-controls";
pub const MUSIC_BUTTON: &str = "music-scroll-btn";
pub const MUSIC_BUTTON_PREV: &str = "music-scroll-btn--prev";
pub const MUSIC_BUTTON_NEXT: &str = "music-scroll-btn--next";

pub const NEWS_SECTION: &str = "news";
pub const NEWS_LIST: &str = "news-list";
pub const NEWS_ITEM: &str = "news-item";
pub const NEWS_SINGLE: &str = "has-single-news";
pub const NEWS_ACTIONS: &str = "news-actions";
pub const NEWS_LOAD_MORE: &str = "newsLoadMore";
pub const NEWS_DATE: &str = "news-date";

pub const CONTACT_FORM: &str = "contactForm";
pub const FORM_ERROR: &str = "form-error";
pub const HIDDEN: &str = "is-hidden";

/// Wrapper class of a section's content
pub const CONTAINER: &str = "container";
