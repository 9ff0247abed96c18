//! Portfolio category filter
//!
//! Clicking a `.filter-btn` makes it the only active button and shows the
//! `.portfolio-item`s whose `data-category` equals its `data-filter`.
//! The `all` filter shows everything.

use folio_core::NodeId;
use folio_platform::{Event, InputEvent};

use crate::component::Component;
use crate::context::PageContext;

/// Filter value that matches every item
pub const SHOW_ALL: &str = "all";

/// Whether an item of `category` is shown under `filter`
pub fn shows(filter: &str, category: Option<&str>) -> bool {
    filter == SHOW_ALL || category == Some(filter)
}

#[derive(Debug, Default)]
pub struct PortfolioFilter {
    buttons: Vec<NodeId>,
    items: Vec<NodeId>,
}

impl PortfolioFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `filter` to the portfolio items
    pub fn apply(&self, ctx: &mut PageContext<'_>, filter: &str) {
        let mut shown = 0;
        for &item in &self.items {
            let category = ctx.doc.attr(item, "data-category");
            if shows(filter, category.as_deref()) {
                ctx.doc.set_style(item, "display", "block");
                ctx.doc.add_class(item, "animate-fadeInUp");
                shown += 1;
            } else {
                ctx.doc.set_style(item, "display", "none");
                ctx.doc.remove_class(item, "animate-fadeInUp");
            }
        }
        tracing::debug!(filter, shown, total = self.items.len(), "portfolio filtered");
    }
}

impl Component for PortfolioFilter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.buttons = ctx.doc.query_selector_all(".filter-btn");
        self.items = ctx.doc.query_selector_all(".portfolio-item");
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.buttons.clear();
        self.items.clear();
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        let Event::Input(InputEvent::Click { target }) = event else {
            return;
        };
        let Some(button) = self
            .buttons
            .iter()
            .copied()
            .find(|button| ctx.doc.contains(*button, *target))
        else {
            return;
        };

        for &other in &self.buttons {
            ctx.doc.remove_class(other, "active");
        }
        ctx.doc.add_class(button, "active");

        let filter = ctx
            .doc
            .attr(button, "data-filter")
            .unwrap_or_else(|| SHOW_ALL.to_string());
        self.apply(ctx, &filter);
    }
}
