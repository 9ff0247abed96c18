//! Per-dispatch page context
//!
//! Components see the page through a [`PageContext`]: the document, one
//! environment snapshot shared by everything handling the same dispatch, the
//! configuration, the page RNG, and scheduling and messaging handles scoped
//! to the calling component.

use folio_animation::{TaskId, TaskScheduler};
use folio_core::{Document, MessageBus, Millis, NodeId, Rect};
use folio_platform::{EnvSnapshot, HostRequest};
use rand::rngs::StdRng;

use crate::config::AppConfig;
use crate::messages::{AppMessage, Wake};

/// Index of a component within its page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentSlot(pub(crate) usize);

/// A scheduled wake-up and the component it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub owner: ComponentSlot,
    pub wake: Wake,
}

/// Page state shared by all components
pub(crate) struct PageState {
    pub doc: Document,
    pub config: AppConfig,
    pub scheduler: TaskScheduler<Scheduled>,
    pub bus: MessageBus<AppMessage>,
    pub rng: StdRng,
    pub host_requests: Vec<HostRequest>,
}

impl PageState {
    pub fn context(&mut self, env: EnvSnapshot, owner: ComponentSlot) -> PageContext<'_> {
        PageContext {
            doc: &mut self.doc,
            env,
            config: &self.config,
            rng: &mut self.rng,
            scheduler: &mut self.scheduler,
            bus: &mut self.bus,
            host_requests: &mut self.host_requests,
            owner,
        }
    }
}

/// What a component may touch while handling one dispatch
pub struct PageContext<'a> {
    pub doc: &'a mut Document,
    pub env: EnvSnapshot,
    pub config: &'a AppConfig,
    pub rng: &'a mut StdRng,
    scheduler: &'a mut TaskScheduler<Scheduled>,
    bus: &'a mut MessageBus<AppMessage>,
    host_requests: &'a mut Vec<HostRequest>,
    owner: ComponentSlot,
}

impl PageContext<'_> {
    /// Page time of this dispatch
    pub fn now(&self) -> Millis {
        self.env.now
    }

    /// The visible part of the document
    pub fn viewport(&self) -> Rect {
        self.env.viewport_rect()
    }

    pub fn owner(&self) -> ComponentSlot {
        self.owner
    }

    pub fn set_timeout(&mut self, delay: Millis, wake: Wake) -> TaskId {
        let owner = self.owner;
        self.scheduler
            .set_timeout(self.env.now, delay, Scheduled { owner, wake })
    }

    pub fn set_interval(&mut self, period: Millis, wake: Wake) -> TaskId {
        let owner = self.owner;
        self.scheduler
            .set_interval(self.env.now, period, Scheduled { owner, wake })
    }

    pub fn request_frame(&mut self, wake: Wake) -> TaskId {
        let owner = self.owner;
        self.scheduler.request_frame(Scheduled { owner, wake })
    }

    /// Cancel one of this component's tasks
    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }

    pub fn is_pending(&self, task: TaskId) -> bool {
        self.scheduler.is_pending(task)
    }

    /// Cancel every task this component owns
    pub fn cancel_all(&mut self) -> usize {
        let owner = self.owner;
        self.scheduler.cancel_where(|task| task.owner == owner)
    }

    pub fn publish(&mut self, message: AppMessage) {
        self.bus.publish(message);
    }

    /// Ask the host to do something the page cannot do itself
    pub fn request_host(&mut self, request: HostRequest) {
        self.host_requests.push(request);
    }

    /// Height of the element matched by `selector`, if it exists and has one
    pub fn height_of(&self, selector: &str) -> Option<f32> {
        self.doc
            .query_selector(selector)
            .and_then(|node| self.doc.layout(node))
            .map(|rect| rect.height)
            .filter(|height| *height > 0.0)
    }

    /// Nearest inclusive ancestor of `node` matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        self.doc.closest(node, selector)
    }
}
