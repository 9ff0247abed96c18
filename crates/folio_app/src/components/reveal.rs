//! Viewport-triggered reveals
//!
//! Wires the page's viewport effects into one [`ViewportObserverManager`]:
//!
//! - sections fade in on first intersection
//! - content blocks get `animate-fadeInUp`; the skills section also triggers
//!   the skill bars through [`AppMessage::SkillsRevealed`]
//! - section backgrounds activate while their section is on screen
//! - after the page is ready, `.fade-in` style elements get `animate` and the
//!   skills grid reveals in a stagger

use folio_core::{NodeId, Transform};
use folio_platform::{Event, InputEvent, WindowEvent};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::{AppMessage, Wake};
use crate::observer::ViewportObserverManager;

const CONTENT_SELECTOR: &str =
    ".about-content, .portfolio-item, .skill-item, .contact-content, #skills";
const CONTENT_CLASSES: [&str; 4] = ["about-content", "portfolio-item", "skill-item", "contact-content"];
const SCROLL_REVEAL_SELECTOR: &str = ".fade-in, .fade-in-left, .fade-in-right, .fade-in-up, .scale-in";
const ACTIVATION_SELECTOR: &str = ".about, .portfolio, .skills, .contact";

#[derive(Debug, Default)]
pub struct RevealEffects {
    observers: ViewportObserverManager,
    page_ready: bool,
}

impl RevealEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observers(&self) -> &ViewportObserverManager {
        &self.observers
    }

    fn observe_section_fade(&mut self, ctx: &mut PageContext<'_>) {
        let hidden = Transform::new().translate_y(30.0).to_string();
        for section in ctx.doc.query_selector_all("section") {
            ctx.doc.set_style(section, "opacity", "0");
            ctx.doc.set_style(section, "transform", hidden.as_str());
            ctx.doc.set_style(
                section,
                "transition",
                "opacity 0.8s ease-out, transform 0.8s ease-out",
            );
        }

        let options = ctx.config.observer.section_fade;
        self.observers
            .observe_reveal(ctx, "section", options, |ctx, section| {
                ctx.doc.set_style(section, "opacity", "1");
                ctx.doc
                    .set_style(section, "transform", Transform::new().translate_y(0.0).to_string());
            });
    }

    fn observe_content(&mut self, ctx: &mut PageContext<'_>) {
        let options = ctx.config.observer.reveal;
        self.observers
            .observe_reveal(ctx, CONTENT_SELECTOR, options, |ctx, node| {
                if CONTENT_CLASSES.iter().any(|class| ctx.doc.has_class(node, class)) {
                    ctx.doc.add_class(node, "animate-fadeInUp");
                }
                let is_skills = ctx
                    .doc
                    .get(node)
                    .is_some_and(|element| element.id() == Some("skills"));
                if is_skills {
                    tracing::debug!("skills section revealed");
                    ctx.publish(AppMessage::SkillsRevealed);
                }
            });
    }

    fn observe_after_load(&mut self, ctx: &mut PageContext<'_>) {
        let options = ctx.config.observer.scroll_reveal;
        self.observers
            .observe_reveal(ctx, SCROLL_REVEAL_SELECTOR, options, |ctx, node| {
                ctx.doc.add_class(node, "animate");
                if ctx.doc.has_class(node, "hero-title") {
                    highlight_title(ctx, node);
                }
            });

        let step = ctx.config.observer.stagger_step;
        let options = ctx.config.observer.stagger;
        self.observers
            .observe_stagger(ctx, ".skills-grid", ".stagger-item", step, options);
    }
}

fn highlight_title(ctx: &mut PageContext<'_>, title: NodeId) {
    if let Some(highlight) = ctx.doc.query_within(title, ".highlight").first().copied() {
        ctx.doc.add_class(highlight, "typing-text");
    }
}

impl Component for RevealEffects {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.observe_section_fade(ctx);
        self.observe_content(ctx);

        let options = ctx.config.observer.section_activation;
        self.observers
            .observe_section_activation(ctx, ACTIVATION_SELECTOR, options);

        self.observers.check(ctx);
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.observers.disconnect();
        self.page_ready = false;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        if matches!(
            event,
            Event::Input(InputEvent::Scroll { .. }) | Event::Window(WindowEvent::Resized { .. })
        ) {
            self.observers.check(ctx);
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        self.observers.on_wake(wake, ctx);
    }

    fn on_message(&mut self, message: &AppMessage, ctx: &mut PageContext<'_>) {
        if *message == AppMessage::PageReady && !self.page_ready {
            self.page_ready = true;
            self.observe_after_load(ctx);
            self.observers.check(ctx);
        }
    }
}
