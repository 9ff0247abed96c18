//! Floating item drift
//!
//! Every `.floating-item` gets a staggered CSS animation delay and, after
//! its own start delay, jumps to a new random offset once per period.

use folio_animation::FloatingDrift;
use folio_core::NodeId;

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::Wake;

#[derive(Debug, Default)]
pub struct FloatingItems {
    items: Vec<(NodeId, FloatingDrift)>,
}

impl FloatingItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drifts(&self) -> impl Iterator<Item = &FloatingDrift> {
        self.items.iter().map(|(_, drift)| drift)
    }
}

impl Component for FloatingItems {
    fn name(&self) -> &'static str {
        "floating"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        let params = ctx.config.floating;
        self.items = ctx
            .doc
            .query_selector_all(".floating-item")
            .into_iter()
            .enumerate()
            .map(|(index, node)| (node, FloatingDrift::new(index, &params, &mut *ctx.rng)))
            .collect();

        for (node, drift) in &self.items {
            ctx.doc.set_style(*node, "animation-delay", drift.animation_delay());
            ctx.set_timeout(drift.start_delay, Wake::DriftStart { index: drift.index });
        }
    }

    fn detach(&mut self, ctx: &mut PageContext<'_>) {
        for (node, _) in self.items.drain(..) {
            ctx.doc.clear_style(node, "transform");
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::DriftStart { index } => {
                if let Some((_, drift)) = self.items.get(index) {
                    ctx.set_interval(drift.period, Wake::Drift { index });
                }
            }
            Wake::Drift { index } => {
                if let Some((node, drift)) = self.items.get(index) {
                    let offset = drift.next_offset(&mut *ctx.rng);
                    ctx.doc.set_style(*node, "transform", offset.to_string());
                }
            }
            _ => {}
        }
    }
}
