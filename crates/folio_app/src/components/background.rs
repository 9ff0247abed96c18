//! Animated backgrounds
//!
//! Seeds every `.animated-bg` with looping ambient particles sized to the
//! device's performance tier, and reacts to the pointer inside
//! `section[class]` elements: a debounced parallax of the section's code
//! snippets, shapes and background hue, plus short-lived particles under
//! the pointer. Leaving a section puts everything back.

use folio_animation::{
    AmbientParticle, ParallaxStyle, PointerOffset, PointerParticle, TaskId, PARTICLE_PALETTE,
};
use folio_core::{Element, NodeId, RateLimiter};
use folio_platform::{Event, InputEvent, PerformanceTier, PointerEvent};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::Wake;

const SECTION_SELECTOR: &str = "section[class]";

fn styled(mut element: Element, declarations: Vec<(&'static str, String)>) -> Element {
    for (property, value) in declarations {
        element = element.with_style(property, value);
    }
    element
}

fn particle_container() -> Element {
    Element::new("div")
        .with_class("floating-particles")
        .with_style("position", "absolute")
        .with_style("top", "0")
        .with_style("left", "0")
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_style("pointer-events", "none")
        .with_style("z-index", "1")
}

#[derive(Debug)]
pub struct BackgroundEffects {
    containers: Vec<NodeId>,
    pointer_particles: Vec<NodeId>,
    parallax: Option<TaskId>,
    particle_gate: RateLimiter,
}

impl Default for BackgroundEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundEffects {
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            pointer_particles: Vec::new(),
            parallax: None,
            particle_gate: RateLimiter::new(100),
        }
    }

    /// Particle containers added to the page
    pub fn containers(&self) -> &[NodeId] {
        &self.containers
    }

    /// Pointer particles currently alive
    pub fn pointer_particles(&self) -> &[NodeId] {
        &self.pointer_particles
    }

    /// Build one particle set and give each animated background a copy
    fn seed_particles(&mut self, ctx: &mut PageContext<'_>) {
        let backgrounds = ctx.doc.query_selector_all(".animated-bg");
        let Some((&first, rest)) = backgrounds.split_first() else {
            tracing::debug!("no .animated-bg elements; skipping ambient particles");
            return;
        };

        let config = ctx.config;
        let background = &config.background;
        let budget = match ctx.env.performance_tier(background.low_performance_width) {
            PerformanceTier::Low => background.low,
            PerformanceTier::Standard => background.standard,
        };

        let template = ctx.doc.append(first, particle_container());
        for _ in 0..budget.count {
            let particle = AmbientParticle::random(&mut *ctx.rng, &PARTICLE_PALETTE);
            let element = styled(Element::new("div").with_class("particle"), particle.declarations());
            ctx.doc.append(template, element);
        }
        self.containers.push(template);

        for &target in rest {
            if let Some(copy) = ctx.doc.clone_subtree(template, target) {
                self.containers.push(copy);
            }
        }
        tracing::debug!(
            count = budget.count,
            backgrounds = self.containers.len(),
            "ambient particles created"
        );
    }

    fn section_at(ctx: &PageContext<'_>, target: NodeId) -> Option<NodeId> {
        ctx.closest(target, SECTION_SELECTOR)
    }

    fn pointer_moved(&mut self, x: f32, y: f32, target: NodeId, ctx: &mut PageContext<'_>) {
        let Some(section) = Self::section_at(ctx, target) else {
            return;
        };

        if let Some(pending) = self.parallax.take() {
            ctx.cancel(pending);
        }
        let debounce = ctx.config.background.parallax_debounce;
        self.parallax = Some(ctx.set_timeout(debounce, Wake::Parallax { section }));

        if self.particle_gate.allow(ctx.now()) {
            let body = ctx.doc.body();
            let element = styled(
                Element::new("div").with_class("mouse-particle"),
                PointerParticle { x, y }.declarations(),
            );
            let node = ctx.doc.append(body, element);
            self.pointer_particles.push(node);

            let lifetime = ctx.config.background.pointer_particle_lifetime;
            ctx.set_timeout(lifetime, Wake::RemoveParticle { node });
        }
    }

    fn pointer_left(&mut self, target: NodeId, ctx: &mut PageContext<'_>) {
        if Self::section_at(ctx, target) != Some(target) {
            return;
        }
        if let Some(pending) = self.parallax.take() {
            ctx.cancel(pending);
        }
        Self::reset_section(ctx, target);
    }

    fn update_section(ctx: &mut PageContext<'_>, section: NodeId) {
        if !ctx.doc.exists(section) {
            return;
        }
        let offset = ctx
            .env
            .normalized_pointer()
            .map_or(PointerOffset::NEUTRAL, |(x, y)| PointerOffset::new(x, y));

        if let Some(background) = ctx.doc.query_within(section, ".animated-bg").first().copied() {
            ParallaxStyle::background(offset).apply(ctx.doc, background);
        }
        for (index, node) in ctx.doc.query_within(section, ".code-element").into_iter().enumerate() {
            ParallaxStyle::code_element(offset, index).apply(ctx.doc, node);
        }
        for (index, node) in ctx.doc.query_within(section, ".geo-shape").into_iter().enumerate() {
            ParallaxStyle::geo_shape(offset, index).apply(ctx.doc, node);
        }
    }

    fn reset_section(ctx: &mut PageContext<'_>, section: NodeId) {
        let layers = [".animated-bg", ".code-element", ".geo-shape"];
        for selector in layers {
            for node in ctx.doc.query_within(section, selector) {
                ParallaxStyle::reset(ctx.doc, node);
            }
        }
    }
}

impl Component for BackgroundEffects {
    fn name(&self) -> &'static str {
        "background"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.particle_gate = RateLimiter::new(ctx.config.background.pointer_particle_gap);
        self.seed_particles(ctx);
    }

    fn detach(&mut self, ctx: &mut PageContext<'_>) {
        for node in self.containers.drain(..).chain(self.pointer_particles.drain(..)) {
            ctx.doc.remove(node);
        }
        self.parallax = None;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        match event {
            Event::Input(InputEvent::Pointer(PointerEvent::Moved { x, y, target })) => {
                self.pointer_moved(*x, *y, *target, ctx);
            }
            Event::Input(InputEvent::Pointer(PointerEvent::Left { target })) => {
                self.pointer_left(*target, ctx);
            }
            _ => {}
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::Parallax { section } => {
                self.parallax = None;
                Self::update_section(ctx, section);
            }
            Wake::RemoveParticle { node } => {
                self.pointer_particles.retain(|particle| *particle != node);
                ctx.doc.remove(node);
            }
            _ => {}
        }
    }
}
