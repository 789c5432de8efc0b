//! Host event types
//!
//! Every notification the host delivers to a page is one of these.
//! Handlers for the same event type run in registration order, and each
//! handler runs to completion before the next event is processed.

/// Numeric event type identifier
pub type EventType = u32;

/// Event type constants
pub mod event_types {
    use super::EventType;

    /// The document finished parsing; components initialize once
    pub const DOCUMENT_READY: EventType = 1;
    /// The window scrolled vertically
    pub const SCROLL: EventType = 2;
    /// The viewport changed size
    pub const RESIZE: EventType = 3;
    /// A node was activated (pointer click or keyboard activation)
    pub const CLICK: EventType = 4;
    /// A form was submitted
    pub const SUBMIT: EventType = 5;
    /// A form field was edited
    pub const INPUT: EventType = 6;
    /// The host delivered an intersection observation batch
    pub const INTERSECTION: EventType = 7;
    /// A horizontal scroll container scrolled
    pub const LIST_SCROLL: EventType = 8;
}

/// Human readable name of an event type, for logs
pub fn event_name(event_type: EventType) -> &'static str {
    use event_types::*;

    match event_type {
        DOCUMENT_READY => "document-ready",
        SCROLL => "scroll",
        RESIZE => "resize",
        CLICK => "click",
        SUBMIT => "submit",
        INPUT => "input",
        INTERSECTION => "intersection",
        LIST_SCROLL => "list-scroll",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(event_name(event_types::SCROLL), "scroll");
        assert_eq!(event_name(event_types::LIST_SCROLL), "list-scroll");
        assert_eq!(event_name(999), "unknown");
    }
}
