//! In-page anchor scrolling
//!
//! Clicks on `a[href^="#"]` ask the host for a smooth scroll to the target
//! element, leaving room for the fixed navbar. `#back-to-top` scrolls to the
//! top of the page. A bare `#` does nothing.

use folio_core::NodeId;
use folio_platform::{Event, HostRequest, InputEvent};

use crate::component::Component;
use crate::context::PageContext;

#[derive(Debug, Default)]
pub struct AnchorScroller {
    back_to_top: Option<NodeId>,
}

impl AnchorScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll destination for an in-page `href`
    pub fn destination(ctx: &PageContext<'_>, href: &str) -> Option<f32> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let target = ctx.doc.element_by_id(id)?;
        let top = ctx.doc.layout(target)?.top();
        let navbar = ctx.height_of(".navbar").unwrap_or(0.0);
        Some((top - navbar).max(0.0))
    }
}

impl Component for AnchorScroller {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.back_to_top = ctx.doc.element_by_id("back-to-top");
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.back_to_top = None;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        let Event::Input(InputEvent::Click { target }) = event else {
            return;
        };

        if let Some(button) = self.back_to_top {
            if ctx.doc.contains(button, *target) {
                ctx.request_host(HostRequest::ScrollTo {
                    top: 0.0,
                    smooth: true,
                });
                return;
            }
        }

        let Some(anchor) = ctx.closest(*target, "a[href^=\"#\"]") else {
            return;
        };
        let href = ctx.doc.attr(anchor, "href").unwrap_or_default();
        match Self::destination(ctx, &href) {
            Some(top) => ctx.request_host(HostRequest::ScrollTo { top, smooth: true }),
            None => tracing::debug!(href = %href, "anchor has no scroll target"),
        }
    }
}
