//! Serializable summary of a page's visible state

use serde::Serialize;

use crate::markup::{HEADER_HEIGHT_VAR, HEADER_SCROLLED, HIDDEN};
use crate::page::Page;

/// Disabled state of the music controls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MusicControlsSnapshot {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// What a visitor would currently see
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    /// Section id of the active navigation link
    pub active_link: Option<String>,
    pub header_scrolled: bool,
    /// Published `--header-h` value
    pub header_offset: Option<String>,
    pub news_shown: usize,
    pub news_total: usize,
    pub news_trigger_visible: bool,
    pub music_controls: Option<MusicControlsSnapshot>,
    /// Visible form error text
    pub form_error: Option<String>,
    /// Last navigation, e.g. a `mailto:` handoff
    pub location: Option<String>,
}

impl Page {
    pub fn snapshot(&self) -> PageSnapshot {
        let doc = self.document();
        let displayed = |node| doc.element(node).is_some_and(|el| el.is_displayed());
        let disabled = |node| doc.element(node).is_some_and(|el| el.disabled);

        let news_trigger_visible = self.news().trigger().is_some_and(|trigger| {
            // Hidden through the trigger itself or any wrapper around it
            let mut current = Some(trigger);
            while let Some(node) = current {
                if !displayed(node) {
                    return false;
                }
                current = doc.parent(node);
            }
            true
        });

        let form_error = self.contact().and_then(|contact| {
            let slot = doc.element(contact.error_slot())?;
            (!slot.has_class(HIDDEN) && !slot.text.is_empty()).then(|| slot.text.clone())
        });

        PageSnapshot {
            scroll_y: doc.scroll_y(),
            active_link: self.resolver().active_link(doc).map(|l| l.target().to_string()),
            header_scrolled: self
                .header()
                .header()
                .and_then(|h| doc.element(h))
                .is_some_and(|el| el.has_class(HEADER_SCROLLED)),
            header_offset: doc
                .element(doc.root())
                .and_then(|html| html.style(HEADER_HEIGHT_VAR))
                .map(str::to_string),
            news_shown: self.news().shown(),
            news_total: self.news().total(),
            news_trigger_visible,
            music_controls: self.music().controls().map(|c| MusicControlsSnapshot {
                prev_disabled: disabled(c.prev),
                next_disabled: disabled(c.next),
            }),
            form_error,
            location: doc.location().map(str::to_string),
        }
    }
}
