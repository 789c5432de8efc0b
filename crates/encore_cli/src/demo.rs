//! Scripted demo session

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use encore_animation::ScrollBehavior;
use encore_core::SiteConfig;
use encore_dom::{NodeId, Query};
use encore_site::demo::demo_document;
use encore_site::{Page, PageSnapshot};

/// Frame length used to drive smooth scrolls
const FRAME: f64 = 1.0 / 60.0;
/// Upper bound on frames per animation
const MAX_FRAMES: usize = 600;

#[derive(Serialize)]
struct Step<'a> {
    step: &'a str,
    snapshot: PageSnapshot,
}

struct Session {
    page: Page,
    pretty: bool,
}

impl Session {
    fn emit(&self, step: &str) -> Result<()> {
        let step = Step {
            step,
            snapshot: self.page.snapshot(),
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&step)?
        } else {
            serde_json::to_string(&step)?
        };
        println!("{json}");
        Ok(())
    }

    fn settle(&mut self) {
        for _ in 0..MAX_FRAMES {
            if !self.page.tick(FRAME) {
                break;
            }
        }
    }

    fn field(&self, form: NodeId, name: &str) -> Result<NodeId> {
        self.page
            .document()
            .query_first(form, &Query::new().attr_eq("name", name))
            .with_context(|| format!("demo form has no '{}' field", name))
    }
}

pub fn run(config: SiteConfig, pretty: bool) -> Result<()> {
    let page = Page::new(demo_document(), config)?;
    let mut session = Session { page, pretty };

    session.page.on_document_ready();
    session.page.flush_intersections();
    info!(
        "Demo page ready with {} subscriptions",
        session.page.subscriptions().len()
    );
    session.emit("ready")?;

    // Follow every navigation link
    let links: Vec<(NodeId, String)> = session
        .page
        .resolver()
        .links()
        .iter()
        .map(|l| (l.node, l.target().to_string()))
        .collect();
    for (link, target) in links {
        session.page.on_click(link);
        session.settle();
        session.emit(&format!("nav:{target}"))?;
    }

    let bottom = session.page.document().max_scroll_y();
    session.page.scroll_window_to(bottom, ScrollBehavior::Instant);
    session.emit("page-end")?;

    // Page through the music list
    if let Some(controls) = session.page.music().controls() {
        for label in ["music:next", "music:next"] {
            session.page.on_click(controls.next);
            session.settle();
            session.emit(label)?;
        }
        session.page.on_click(controls.prev);
        session.settle();
        session.emit("music:prev")?;
    }

    // Reveal all news
    if let Some(trigger) = session.page.news().trigger() {
        while session.page.news().is_paging() {
            session.page.on_click(trigger);
            session.emit("news:load-more")?;
        }
    }

    // Contact form: one rejected and one accepted submission
    if let Some(form) = session.page.contact().map(|c| c.form()) {
        let name = session.field(form, "name")?;
        let email = session.field(form, "email")?;
        let message = session.field(form, "message")?;

        session.page.on_input(name, "Jo");
        session.page.on_input(email, "not-an-email");
        session.page.on_input(message, "hi");
        session.page.on_submit(form);
        session.emit("contact:rejected")?;

        session.page.on_input(email, "a@b.co");
        session.emit("contact:edited")?;
        let outcome = session.page.on_submit(form);
        if let Some(href) = outcome.navigated_to {
            info!("Handing off to mail client: {}", href);
        }
        session.emit("contact:accepted")?;
    }

    Ok(())
}
