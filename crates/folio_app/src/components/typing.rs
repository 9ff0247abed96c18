//! Typing effect on `#typingText`

use folio_animation::{TaskId, TypingMachine};
use folio_core::NodeId;

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::Wake;

#[derive(Debug, Default)]
pub struct TypingEffect {
    target: Option<NodeId>,
    machine: Option<TypingMachine>,
    pending: Option<TaskId>,
}

impl TypingEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn machine(&self) -> Option<&TypingMachine> {
        self.machine.as_ref()
    }
}

impl Component for TypingEffect {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        let Some(target) = ctx.doc.element_by_id("typingText") else {
            tracing::debug!("no #typingText; typing effect inert");
            return;
        };
        let config = ctx.config;
        let typing = &config.typing;
        let Some(machine) = TypingMachine::new(&typing.phrases, typing.timings) else {
            tracing::warn!("typing effect has no non-empty phrases");
            return;
        };

        self.target = Some(target);
        self.machine = Some(machine);
        self.pending = Some(ctx.set_timeout(typing.timings.start_delay, Wake::TypingStep));
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.pending = None;
        self.machine = None;
        self.target = None;
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        if wake != Wake::TypingStep {
            return;
        }
        let (Some(target), Some(machine)) = (self.target, self.machine.as_mut()) else {
            return;
        };

        let step = machine.step();
        ctx.doc.set_text(target, step.text);
        self.pending = Some(ctx.set_timeout(step.next_in, Wake::TypingStep));
    }
}
