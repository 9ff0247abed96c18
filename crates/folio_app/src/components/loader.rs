//! Page loader
//!
//! On `load`, fills `#loadingBar` in random increments, fades `#pageLoader`
//! out, then announces [`AppMessage::PageReady`]. Pages without loader markup
//! are ready as soon as they load.

use folio_animation::{LoaderProgress, TaskId};
use folio_core::{style::percent, NodeId};
use folio_platform::{Event, LifecycleEvent};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::{AppMessage, Wake};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoaderState {
    /// Waiting for `load`
    Idle,
    Filling,
    FadingOut,
    Done,
}

#[derive(Debug)]
pub struct PageLoader {
    overlay: Option<NodeId>,
    bar: Option<NodeId>,
    progress: LoaderProgress,
    interval: Option<TaskId>,
    state: LoaderState,
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLoader {
    pub fn new() -> Self {
        Self {
            overlay: None,
            bar: None,
            progress: LoaderProgress::default(),
            interval: None,
            state: LoaderState::Idle,
        }
    }

    fn start(&mut self, ctx: &mut PageContext<'_>) {
        match (self.overlay, self.bar) {
            (Some(_), Some(_)) => {
                self.progress = LoaderProgress::new(ctx.config.loader.max_step);
                self.interval = Some(ctx.set_interval(ctx.config.loader.tick_interval, Wake::LoaderTick));
                self.state = LoaderState::Filling;
            }
            _ => {
                tracing::debug!("page loader markup missing; page ready immediately");
                self.finish(ctx);
            }
        }
    }

    fn finish(&mut self, ctx: &mut PageContext<'_>) {
        self.state = LoaderState::Done;
        tracing::info!(at = ctx.now(), "page ready");
        ctx.publish(AppMessage::PageReady);
    }
}

impl Component for PageLoader {
    fn name(&self) -> &'static str {
        "loader"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.overlay = ctx.doc.element_by_id("pageLoader");
        self.bar = ctx.doc.element_by_id("loadingBar");
        self.state = LoaderState::Idle;
    }

    fn detach(&mut self, _ctx: &mut PageContext<'_>) {
        self.interval = None;
        self.state = LoaderState::Idle;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        if matches!(event, Event::Lifecycle(LifecycleEvent::Load)) && self.state == LoaderState::Idle {
            self.start(ctx);
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::LoaderTick if self.state == LoaderState::Filling => {
                let tick = self.progress.tick(&mut *ctx.rng);
                if let Some(bar) = self.bar {
                    ctx.doc.set_style(bar, "width", percent(tick.width));
                }
                if tick.complete {
                    if let Some(interval) = self.interval.take() {
                        ctx.cancel(interval);
                    }
                    self.state = LoaderState::FadingOut;
                    ctx.set_timeout(ctx.config.loader.fade_delay, Wake::LoaderFade);
                }
            }
            Wake::LoaderFade => {
                if let Some(overlay) = self.overlay {
                    ctx.doc.add_class(overlay, "fade-out");
                }
                if let Some(bar) = self.bar {
                    ctx.doc.set_style(bar, "width", "0%");
                }
                ctx.set_timeout(ctx.config.loader.ready_delay, Wake::LoaderReady);
            }
            Wake::LoaderReady => self.finish(ctx),
            _ => {}
        }
    }
}
