//! Element data

use indexmap::IndexMap;
use smallvec::SmallVec;

/// How an element is positioned relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Moves with the document when the window scrolls
    #[default]
    Flow,
    /// Pinned to the viewport (a sticky/fixed header)
    Fixed,
}

/// Measured box of an element
///
/// For [`Position::Flow`] elements `top` is relative to the document top; for
/// [`Position::Fixed`] elements it is relative to the viewport top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub position: Position,
}

/// Horizontal scroll state of a scroll container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current offset from the start edge
    pub scroll_left: f64,
    /// Total width of the content
    pub scroll_width: f64,
    /// Visible width of the container
    pub client_width: f64,
}

impl ScrollMetrics {
    /// Largest reachable offset
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// True if the content is wider than the container by more than `tolerance`
    pub fn overflows(&self, tolerance: f64) -> bool {
        self.scroll_width > self.client_width + tolerance
    }
}

/// A single element of the document
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    classes: SmallVec<[String; 4]>,
    attrs: IndexMap<String, String>,
    style: IndexMap<String, String>,
    /// Text content
    pub text: String,
    /// Current value of a form field
    pub value: String,
    /// Disabled state of a control
    pub disabled: bool,
    pub layout: LayoutBox,
    pub scroll: ScrollMetrics,
}

impl Element {
    /// Create an element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Add or remove a class. Returns true if the list changed.
    pub fn toggle_class(&mut self, class: &str, on: bool) -> bool {
        let present = self.has_class(class);
        match (present, on) {
            (false, true) => {
                self.classes.push(class.to_string());
                true
            }
            (true, false) => {
                self.classes.retain(|c| c != class);
                true
            }
            _ => false,
        }
    }

    /// Replace the class list from a space separated string
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // =========================================================================
    // Inline style
    // =========================================================================

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    pub fn remove_style(&mut self, property: &str) -> Option<String> {
        self.style.shift_remove(property)
    }

    /// False if the inline style hides the element
    pub fn is_displayed(&self) -> bool {
        self.style("display") != Some("none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class_is_idempotent() {
        let mut el = Element::new("A");
        assert_eq!(el.tag, "a");

        assert!(el.toggle_class("is-active", true));
        assert!(!el.toggle_class("is-active", true));
        assert_eq!(el.classes(), &["is-active".to_string()]);

        assert!(el.toggle_class("is-active", false));
        assert!(!el.toggle_class("is-active", false));
        assert!(el.classes().is_empty());
    }

    #[test]
    fn test_set_class_name() {
        let mut el = Element::new("p");
        el.set_class_name("form-error  is-hidden");
        assert!(el.has_class("form-error"));
        assert!(el.has_class("is-hidden"));
    }

    #[test]
    fn test_display_style() {
        let mut el = Element::new("li");
        assert!(el.is_displayed());
        el.set_style("display", "none");
        assert!(!el.is_displayed());
        el.remove_style("display");
        assert!(el.is_displayed());
    }

    #[test]
    fn test_scroll_metrics() {
        let metrics = ScrollMetrics {
            scroll_left: 0.0,
            scroll_width: 1000.0,
            client_width: 400.0,
        };
        assert_eq!(metrics.max_scroll_left(), 600.0);
        assert!(metrics.overflows(2.0));

        let snug = ScrollMetrics {
            scroll_width: 401.0,
            client_width: 400.0,
            ..Default::default()
        };
        assert!(!snug.overflows(2.0));
        assert_eq!(ScrollMetrics::default().max_scroll_left(), 0.0);
    }
}
