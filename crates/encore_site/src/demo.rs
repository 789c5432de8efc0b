//! Bundled demo page
//!
//! A complete site document with laid-out sections, used by the CLI demo and
//! by tests that exercise the whole page.

use encore_dom::{element, Document, ElementSpec};

pub const DEMO_VIEWPORT: (f64, f64) = (1280.0, 800.0);
pub const DEMO_HEADER_HEIGHT: f64 = 72.0;
pub const DEMO_SCROLL_HEIGHT: f64 = 4000.0;

/// Section ids with their document top and height
pub const DEMO_SECTIONS: [(&str, f64, f64); 5] = [
    ("home", 0.0, 800.0),
    ("music", 800.0, 900.0),
    ("news", 1700.0, 1000.0),
    ("about", 2700.0, 700.0),
    ("contact", 3400.0, 600.0),
];

const RELEASES: [&str; 6] = [
    "Night Ferry",
    "Saltwater Hymns",
    "Low Tide (live)",
    "Harbour Lights",
    "Paper Boats",
    "North Sea Radio",
];

const NEWS: [(&str, &str); 7] = [
    ("2024-03-08", "Album release show at Paradiso"),
    ("2024-03-22", "Acoustic set at the Concertgebouw foyer"),
    ("2024-04-05", "Radio session on NPO 3FM"),
    ("2024-04-27", "King's Day afternoon stage"),
    ("2024-05-18", "Festival debut at Best Kept Secret"),
    ("2024-06-09", "Summer tour announced"),
    ("2024-09-14", "Studio diary: recording the new EP"),
];

pub fn demo_document() -> Document {
    let mut doc = Document::new();
    doc.set_viewport_size(DEMO_VIEWPORT.0, DEMO_VIEWPORT.1);
    doc.set_scroll_height(DEMO_SCROLL_HEIGHT);

    let root = doc.root();
    doc.mount(
        root,
        element("body")
            .child(header())
            .child(element("main").children(DEMO_SECTIONS.iter().map(|&(id, top, height)| {
                section(id, top, height)
            }))),
    );
    doc
}

fn header() -> ElementSpec {
    let links = DEMO_SECTIONS.iter().map(|&(id, _, _)| {
        let link = element("a").attr("href", &format!("#{id}")).text(id);
        if id == "contact" {
            link.class("nav-cta")
        } else {
            link
        }
    });
    element("header")
        .class("site-header")
        .fixed()
        .width(DEMO_VIEWPORT.0)
        .height(DEMO_HEADER_HEIGHT)
        .child(element("nav").children(links))
}

fn section(id: &str, top: f64, height: f64) -> ElementSpec {
    let base = element("section")
        .id(id)
        .top(top)
        .height(height)
        .width(DEMO_VIEWPORT.0);
    let content = match id {
        "music" => music(),
        "news" => news(),
        "contact" => contact(),
        _ => element("div").class("container").child(element("h2").text(id)),
    };
    base.child(content)
}

fn music() -> ElementSpec {
    element("div")
        .class("container")
        .child(element("h2").text("Music"))
        .child(
            element("ul")
                .class("music-list")
                .scrollable(2400.0, 1100.0)
                .children(
                    RELEASES
                        .iter()
                        .map(|title| element("li").class("music-item").text(title)),
                ),
        )
}

fn news() -> ElementSpec {
    element("div")
        .class("container")
        .child(element("h2").text("News"))
        .child(
            element("ul").class("news-list").children(NEWS.iter().map(|&(date, title)| {
                element("li")
                    .class("news-item")
                    .child(
                        element("time")
                            .class("news-date")
                            .attr("datetime", date)
                            .text(date),
                    )
                    .child(element("h3").text(title))
            })),
        )
        .child(
            element("div")
                .class("news-actions")
                .child(element("button").id("newsLoadMore").attr("type", "button").text("Load more")),
        )
}

fn contact() -> ElementSpec {
    element("div").class("container").child(
        element("form")
            .id("contactForm")
            .children([
                element("input").attr("name", "name").attr("type", "text"),
                element("input").attr("name", "email").attr("type", "email"),
                element("textarea").attr("name", "message"),
                element("button").attr("type", "submit").text("Send"),
            ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_dom::Query;

    #[test]
    fn test_demo_contract() {
        let doc = demo_document();
        let root = doc.root();
        assert_eq!(doc.max_scroll_y(), 3200.0);

        let nav = doc.query_first(root, &Query::tag("nav")).unwrap();
        assert_eq!(doc.query_all(nav, &Query::tag("a").attr_prefix("href", "#")).len(), 5);

        let main = doc.query_first(root, &Query::tag("main")).unwrap();
        assert_eq!(doc.query_all(main, &Query::tag("section").has_attr("id")).len(), 5);
        assert_eq!(doc.query_all(root, &Query::class_name("news-item")).len(), 7);
        assert_eq!(doc.query_all(root, &Query::class_name("music-item")).len(), 6);

        let music = doc.get_element_by_id("music").unwrap();
        assert_eq!(doc.bounding_client_rect(music).unwrap().top, 800.0);
    }
}
