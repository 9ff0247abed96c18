//! Hover lift for `.btn` elements

use folio_core::Transform;
use folio_platform::{Event, InputEvent, PointerEvent};

use crate::component::Component;
use crate::context::PageContext;

#[derive(Debug, Default)]
pub struct ButtonLift;

impl ButtonLift {
    pub fn new() -> Self {
        Self
    }
}

impl Component for ButtonLift {
    fn name(&self) -> &'static str {
        "buttons"
    }

    fn attach(&mut self, _ctx: &mut PageContext<'_>) {}

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        let (target, lift) = match event {
            Event::Input(InputEvent::Pointer(PointerEvent::Entered { target })) => (*target, -2.0),
            Event::Input(InputEvent::Pointer(PointerEvent::Left { target })) => (*target, 0.0),
            _ => return,
        };
        if ctx.doc.has_class(target, "btn") {
            let transform = Transform::new().translate_y(lift);
            ctx.doc.set_style(target, "transform", transform.to_string());
        }
    }
}
