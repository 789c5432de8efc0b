//! Element matching
//!
//! Covers the selector shapes the page interactions need: `tag`, `#id`,
//! `.class`, `[attr]`, `[attr="v"]` and `[attr^="v"]`, combined.

use smallvec::SmallVec;

use crate::element::Element;

/// Attribute condition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Present(String),
    /// `[name="value"]`
    Equals(String, String),
    /// `[name^="prefix"]`
    Prefix(String, String),
}

impl AttrMatch {
    fn matches(&self, el: &Element) -> bool {
        match self {
            AttrMatch::Present(name) => el.has_attr(name),
            AttrMatch::Equals(name, value) => el.attr(name) == Some(value.as_str()),
            AttrMatch::Prefix(name, prefix) => {
                el.attr(name).is_some_and(|v| v.starts_with(prefix.as_str()))
            }
        }
    }
}

/// A compound element matcher; every condition must hold
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    attrs: SmallVec<[AttrMatch; 2]>,
}

impl Query {
    /// Match any element
    pub fn new() -> Self {
        Self::default()
    }

    /// Match elements with the given tag
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Default::default()
        }
    }

    /// Match elements with the given class
    pub fn class_name(class: &str) -> Self {
        Self::new().class(class)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn has_attr(mut self, name: &str) -> Self {
        self.attrs.push(AttrMatch::Present(name.to_string()));
        self
    }

    pub fn attr_eq(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push(AttrMatch::Equals(name.to_string(), value.to_string()));
        self
    }

    pub fn attr_prefix(mut self, name: &str, prefix: &str) -> Self {
        self.attrs
            .push(AttrMatch::Prefix(name.to_string(), prefix.to_string()));
        self
    }

    pub fn matches(&self, el: &Element) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != el.tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| el.id() != Some(id)) {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
    }
}
