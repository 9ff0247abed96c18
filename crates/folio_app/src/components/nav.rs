//! Mobile navigation menu
//!
//! `#nav-toggle` opens and closes `#nav-menu`. While open, both carry
//! `active` and the body scroll is locked with `overflow: hidden`. Clicking
//! a `.nav-link`, clicking outside the menu, or widening the window past the
//! breakpoint closes it. Without both `#nav-toggle` and `#nav-menu` the
//! menu does nothing.

use folio_core::NodeId;
use folio_platform::{Event, InputEvent, WindowEvent};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::AppMessage;

#[derive(Debug, Default)]
pub struct MobileNav {
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    open: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, ctx: &mut PageContext<'_>, open: bool) {
        for node in [self.toggle, self.menu].into_iter().flatten() {
            ctx.doc.set_class(node, "active", open);
        }
        let body = ctx.doc.body();
        ctx.doc.set_style(body, "overflow", if open { "hidden" } else { "" });

        if self.open != open {
            self.open = open;
            tracing::debug!(open, "mobile nav toggled");
            ctx.publish(AppMessage::NavToggled { open });
        }
    }

    fn on_click(&mut self, target: NodeId, ctx: &mut PageContext<'_>) {
        let within = |node: Option<NodeId>| node.is_some_and(|node| ctx.doc.contains(node, target));

        if within(self.toggle) {
            let open = !self.open;
            self.set_open(ctx, open);
        } else if ctx.closest(target, ".nav-link").is_some() {
            self.set_open(ctx, false);
        } else if self.open && !within(self.menu) {
            self.set_open(ctx, false);
        }
    }
}

impl Component for MobileNav {
    fn name(&self) -> &'static str {
        "nav"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.open = false;
        let (Some(toggle), Some(menu)) = (
            ctx.doc.element_by_id("nav-toggle"),
            ctx.doc.element_by_id("nav-menu"),
        ) else {
            tracing::debug!("mobile nav markup incomplete; menu inert");
            return;
        };
        self.toggle = Some(toggle);
        self.menu = Some(menu);
    }

    fn detach(&mut self, ctx: &mut PageContext<'_>) {
        if self.open {
            self.set_open(ctx, false);
        }
        self.toggle = None;
        self.menu = None;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        if self.toggle.is_none() {
            return;
        }
        match event {
            Event::Input(InputEvent::Click { target }) => self.on_click(*target, ctx),
            Event::Window(WindowEvent::Resized { width, .. }) => {
                if self.open && *width > ctx.config.nav.close_breakpoint {
                    self.set_open(ctx, false);
                }
            }
            _ => {}
        }
    }
}
