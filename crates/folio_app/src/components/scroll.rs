//! Scroll coordinator
//!
//! The only scroll listener on the page. Each scroll event:
//!
//! 1. runs the scroll-spy, throttled to one update per `spy_interval`
//! 2. requests one animation frame unless one is already in flight
//!
//! The frame then recomputes every scroll-dependent visual from the
//! environment snapshot it runs with: navbar blend and hue, back-to-top
//! visibility, and the wave / hero parallax layers. Bursts of scroll events
//! inside one frame cost a single recomputation.

use folio_animation::{ScrollParallax, TaskId};
use folio_core::style::rgba;
use folio_core::{Filter, Throttle};
use folio_platform::{Event, InputEvent, PerformanceTier};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::Wake;

/// Visual band of the navbar for a scroll offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavbarBand {
    /// Fully transparent near the top
    Transparent,
    /// Blending in; progress is `scroll_y / solid_at`
    Blending(f32),
    /// Fully opaque
    Solid,
}

impl NavbarBand {
    pub fn for_offset(scroll_y: f32, blend_start: f32, solid_at: f32) -> Self {
        if scroll_y < blend_start {
            NavbarBand::Transparent
        } else if scroll_y < solid_at {
            NavbarBand::Blending(scroll_y / solid_at)
        } else {
            NavbarBand::Solid
        }
    }
}

/// Id of the section containing the scroll-spy probe
///
/// `sections` are `(id, top, height)` in document order; the last section
/// containing `probe` wins. Near the top of the page (`scroll_y < 100`) with
/// no match, `home` is returned.
pub fn current_section<'a>(
    sections: &'a [(String, f32, f32)],
    probe: f32,
    scroll_y: f32,
    home: &'a str,
) -> Option<&'a str> {
    let hit = sections
        .iter()
        .filter(|(_, top, height)| probe >= *top && probe < top + height)
        .last()
        .map(|(id, _, _)| id.as_str());

    match hit {
        Some(id) => Some(id),
        None if scroll_y < 100.0 => Some(home),
        None => None,
    }
}

#[derive(Debug)]
pub struct ScrollCoordinator {
    spy_gate: Throttle,
    frame: Option<TaskId>,
    parallax: ScrollParallax,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self {
            spy_gate: Throttle::new(100),
            frame: None,
            parallax: ScrollParallax::new(1.0),
        }
    }

    fn navbar_height(ctx: &PageContext<'_>) -> f32 {
        ctx.height_of(".navbar")
            .unwrap_or(ctx.config.scroll.fallback_navbar_height)
    }

    /// Mark the nav link of the section under the probe as active
    pub fn update_active_link(ctx: &mut PageContext<'_>) {
        let scroll_y = ctx.env.scroll_y;
        let probe = scroll_y + Self::navbar_height(ctx) + ctx.config.scroll.spy_offset;

        let sections: Vec<(String, f32, f32)> = ctx
            .doc
            .query_selector_all("section[id]")
            .into_iter()
            .filter_map(|node| {
                let element = ctx.doc.get(node)?;
                let layout = element.layout();
                Some((element.id()?.to_string(), layout.top(), layout.height))
            })
            .collect();

        let current = current_section(&sections, probe, scroll_y, &ctx.config.scroll.home_section)
            .map(|id| format!("#{}", id));

        for link in ctx.doc.query_selector_all(".nav-link") {
            let active = current.is_some() && ctx.doc.attr(link, "href") == current;
            ctx.doc.set_class(link, "active", active);
        }
        tracing::trace!(probe, current = ?current, "scroll-spy");
    }

    fn update_navbar(ctx: &mut PageContext<'_>) {
        let Some(navbar) = ctx.doc.query_selector(".navbar") else {
            return;
        };
        let scroll_y = ctx.env.scroll_y;
        let cfg = &ctx.config.scroll;
        let band = NavbarBand::for_offset(scroll_y, cfg.navbar_blend_start, cfg.navbar_solid_at);
        let max_hue = cfg.max_hue_shift;

        ctx.doc.remove_class(navbar, "scrolled");
        ctx.doc.remove_class(navbar, "scrolling");
        match band {
            NavbarBand::Transparent => {
                ctx.doc.set_style(navbar, "background", "transparent");
                ctx.doc.set_style(navbar, "backdrop-filter", Filter::Blur(0.0).to_string());
                ctx.doc.set_style(navbar, "border-bottom", "1px solid transparent");
            }
            NavbarBand::Blending(progress) => {
                let opacity = progress * 0.7;
                ctx.doc.add_class(navbar, "scrolling");
                ctx.doc.set_style(navbar, "background", rgba(10, 14, 39, opacity));
                ctx.doc.set_style(
                    navbar,
                    "backdrop-filter",
                    Filter::Blur(progress * 8.0).to_string(),
                );
                ctx.doc.set_style(
                    navbar,
                    "border-bottom",
                    format!("1px solid {}", rgba(255, 71, 87, opacity * 0.1)),
                );
            }
            NavbarBand::Solid => {
                ctx.doc.add_class(navbar, "scrolled");
                ctx.doc.clear_style(navbar, "background");
                ctx.doc.clear_style(navbar, "backdrop-filter");
                ctx.doc.clear_style(navbar, "border-bottom");
            }
        }

        if scroll_y > 0.0 {
            let hue = (scroll_y * 0.1).min(max_hue);
            ctx.doc.set_style(navbar, "filter", Filter::HueRotate(hue).to_string());
        } else {
            ctx.doc.clear_style(navbar, "filter");
        }
    }

    fn update_back_to_top(ctx: &mut PageContext<'_>) {
        if let Some(button) = ctx.doc.element_by_id("back-to-top") {
            let visible = ctx.env.scroll_y > ctx.config.scroll.back_to_top_after;
            ctx.doc.set_class(button, "visible", visible);
        }
    }

    fn update_parallax(&self, ctx: &mut PageContext<'_>) {
        let scroll_y = ctx.env.scroll_y;

        for (index, wave) in ctx.doc.query_selector_all(".wave").into_iter().enumerate() {
            let transform = self.parallax.wave(scroll_y, index);
            ctx.doc.set_style(wave, "transform", transform.to_string());
        }

        let hero_height = ctx
            .height_of(".hero")
            .unwrap_or(ctx.env.viewport.height);
        if let Some(background) = ctx.doc.query_selector(".hero .animated-bg") {
            self.parallax
                .hero_background(scroll_y, hero_height)
                .apply(ctx.doc, background);
        }

        let particles = ctx.doc.query_selector_all(".hero .particle");
        for (index, particle) in particles.into_iter().enumerate() {
            let transform = self.parallax.hero_particle(scroll_y, index);
            ctx.doc.set_style(particle, "transform", transform.to_string());
        }
    }

    fn run_frame(&mut self, ctx: &mut PageContext<'_>) {
        self.frame = None;
        Self::update_navbar(ctx);
        Self::update_back_to_top(ctx);
        self.update_parallax(ctx);
    }
}

impl Component for ScrollCoordinator {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        let cfg = ctx.config;
        let budget = match ctx.env.performance_tier(cfg.background.low_performance_width) {
            PerformanceTier::Low => cfg.background.low,
            PerformanceTier::Standard => cfg.background.standard,
        };
        self.parallax = ScrollParallax::new(budget.speed);
        self.spy_gate = Throttle::new(cfg.scroll.spy_interval);
        self.frame = None;

        ctx.set_timeout(cfg.scroll.spy_refresh_delay, Wake::ScrollSpy);
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.frame = None;
        self.spy_gate.reset();
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        match event {
            Event::Input(InputEvent::Scroll { .. }) => {
                if self.spy_gate.try_acquire(ctx.now()) {
                    Self::update_active_link(ctx);
                }
                if self.frame.is_none() {
                    self.frame = Some(ctx.request_frame(Wake::ScrollFrame));
                }
            }
            Event::Input(InputEvent::Click { target }) => {
                if ctx.closest(*target, ".nav-link").is_some() {
                    ctx.set_timeout(ctx.config.scroll.spy_refresh_delay, Wake::ScrollSpy);
                }
            }
            _ => {}
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::ScrollFrame => self.run_frame(ctx),
            Wake::ScrollSpy => Self::update_active_link(ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<(String, f32, f32)> {
        vec![
            ("home".to_string(), 0.0, 500.0),
            ("about".to_string(), 500.0, 500.0),
        ]
    }

    #[test]
    fn test_probe_selects_about() {
        // 450 + 80 + 50 = 580 lies in about
        let sections = sections();
        assert_eq!(current_section(&sections, 580.0, 450.0, "home"), Some("about"));
    }

    #[test]
    fn test_home_fallback_near_top() {
        let sections = vec![("about".to_string(), 500.0, 500.0)];
        assert_eq!(current_section(&sections, 130.0, 0.0, "home"), Some("home"));
        assert_eq!(current_section(&sections, 1_500.0, 1_370.0, "home"), None);
    }

    #[test]
    fn test_overlapping_sections_last_wins() {
        let sections = vec![
            ("a".to_string(), 0.0, 1_000.0),
            ("b".to_string(), 400.0, 200.0),
        ];
        assert_eq!(current_section(&sections, 450.0, 320.0, "home"), Some("b"));
    }

    #[test]
    fn test_navbar_bands() {
        assert_eq!(NavbarBand::for_offset(0.0, 20.0, 100.0), NavbarBand::Transparent);
        assert_eq!(NavbarBand::for_offset(19.9, 20.0, 100.0), NavbarBand::Transparent);
        assert_eq!(NavbarBand::for_offset(50.0, 20.0, 100.0), NavbarBand::Blending(0.5));
        assert_eq!(NavbarBand::for_offset(100.0, 20.0, 100.0), NavbarBand::Solid);
    }
}
