//! Skill bar fill
//!
//! Bars are collected from `.skill-progress[data-level]` on attach and start
//! filling `start_delay` ms after the skills section is first revealed. The
//! fill advances one step per animation frame until every bar is full.

use folio_animation::{parse_level, SkillBarAnimator, SkillProgress};
use folio_core::style::percent;

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::{AppMessage, Wake};

#[derive(Debug, Default)]
pub struct SkillBars {
    animator: SkillBarAnimator,
    triggered: bool,
}

impl SkillBars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animator(&self) -> &SkillBarAnimator {
        &self.animator
    }

    fn frame(&mut self, ctx: &mut PageContext<'_>) {
        for (node, level) in self.animator.tick() {
            ctx.doc.set_style(node, "width", percent(level));
        }
        if !self.animator.is_complete() {
            ctx.request_frame(Wake::SkillsFrame);
        } else {
            tracing::debug!(bars = self.animator.bars().len(), "skill bars filled");
        }
    }
}

impl Component for SkillBars {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        let bars: Vec<SkillProgress> = ctx
            .doc
            .query_selector_all(".skill-progress")
            .into_iter()
            .map(|node| {
                let level = ctx
                    .doc
                    .attr(node, "data-level")
                    .map_or(0, |raw| parse_level(&raw));
                SkillProgress::new(node, level)
            })
            .collect();

        if bars.is_empty() {
            tracing::debug!("no skill bars on the page");
        }
        self.animator = SkillBarAnimator::new(bars);
        self.triggered = false;
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.animator = SkillBarAnimator::default();
        self.triggered = false;
    }

    fn on_message(&mut self, message: &AppMessage, ctx: &mut PageContext<'_>) {
        if *message != AppMessage::SkillsRevealed || self.triggered || self.animator.is_empty() {
            return;
        }
        self.triggered = true;
        let delay = ctx.config.skills.start_delay;
        ctx.set_timeout(delay, Wake::SkillsStart);
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::SkillsStart => {
                for bar in self.animator.bars() {
                    ctx.doc.set_style(bar.node, "width", "0%");
                }
                ctx.request_frame(Wake::SkillsFrame);
            }
            Wake::SkillsFrame => self.frame(ctx),
            _ => {}
        }
    }
}
