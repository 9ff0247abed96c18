//! Portfolio page orchestrator
//!
//! [`PortfolioApp`] owns the document, the components and the page clock.
//! The host pushes events in with [`dispatch`](PortfolioApp::dispatch) and
//! moves time forward with [`advance`](PortfolioApp::advance); everything
//! the components scheduled runs in due order on the virtual clock.

use folio_core::{Clock, Document, Millis, VirtualClock};
use folio_platform::{
    ControlFlow, EnvSnapshot, Environment, Event, EventLoop, HostRequest, LifecycleEvent,
    PlatformError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::component::Component;
use crate::components::default_components;
use crate::config::AppConfig;
use crate::context::{ComponentSlot, PageState, Scheduled};
use crate::messages::AppMessage;
use crate::page::PageFixture;
use crate::transport::{SimulatedTransport, SubmissionTransport};

/// Upper bound on bus messages drained after one dispatch
const MAX_MESSAGES_PER_DISPATCH: usize = 1024;

struct Mounted {
    component: Box<dyn Component>,
    attached: bool,
}

/// The interactive layer of one portfolio page
pub struct PortfolioApp {
    state: PageState,
    components: Vec<Mounted>,
    env: Environment,
    clock: VirtualClock,
    /// Time of the next animation frame, once a frame has been requested
    frame_due: Option<Millis>,
    attached: bool,
}

impl std::fmt::Debug for PortfolioApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioApp")
            .field("now", &self.clock.now())
            .field("components", &self.component_names())
            .field("attached", &self.attached)
            .field("pending_tasks", &self.state.scheduler.len())
            .finish()
    }
}

impl PortfolioApp {
    /// A page with the default configuration and every component
    pub fn new(doc: Document, env: Environment) -> Self {
        Self::with_config(doc, env, AppConfig::default())
    }

    /// A page with every component; the contact form uses a simulated
    /// transport configured from `config.form`
    pub fn with_config(doc: Document, env: Environment, config: AppConfig) -> Self {
        let transport = SimulatedTransport::new(config.form.submit_latency, config.form.failure_rate);
        Self::with_transport(doc, env, config, Box::new(transport))
    }

    /// A page with every component, submitting through `transport`
    pub fn with_transport(
        doc: Document,
        env: Environment,
        config: AppConfig,
        transport: Box<dyn SubmissionTransport>,
    ) -> Self {
        let mut app = Self::empty(doc, env, config);
        for component in default_components(transport) {
            app.add_component(component);
        }
        app
    }

    /// A page with no components
    pub fn empty(doc: Document, env: Environment, config: AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: PageState {
                doc,
                config,
                scheduler: Default::default(),
                bus: Default::default(),
                rng,
                host_requests: Vec::new(),
            },
            components: Vec::new(),
            env,
            clock: VirtualClock::new(),
            frame_due: None,
            attached: false,
        }
    }

    /// Build the page described by a fixture
    pub fn from_fixture(fixture: &PageFixture, config: AppConfig) -> Self {
        Self::with_config(fixture.build_document(), fixture.environment(), config)
    }

    /// Add a component; it attaches immediately if the page already has
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        self.components.push(Mounted {
            component,
            attached: false,
        });
        if self.attached {
            let index = self.components.len() - 1;
            let snapshot = self.snapshot();
            self.attach_one(index, snapshot);
            self.drain_messages(snapshot);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &Document {
        &self.state.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.state.doc
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components
            .iter()
            .map(|mounted| mounted.component.name())
            .collect()
    }

    /// Timers and frame requests still outstanding
    pub fn pending_tasks(&self) -> usize {
        self.state.scheduler.len()
    }

    /// Host requests made since the last call
    pub fn take_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.state.host_requests)
    }

    // =========================================================================
    // Driving the page
    // =========================================================================

    fn snapshot(&self) -> EnvSnapshot {
        self.env.snapshot(self.clock.now())
    }

    /// Deliver one host event at the current time
    pub fn dispatch(&mut self, event: Event) {
        self.env.apply(&event);
        let snapshot = self.snapshot();
        tracing::trace!(kind = event.kind(), at = snapshot.now, "dispatch");

        match event {
            Event::Lifecycle(LifecycleEvent::DomContentLoaded) => self.attach_all(snapshot),
            Event::Lifecycle(LifecycleEvent::Unload) => self.detach_all(snapshot),
            Event::Frame => self.run_frame(snapshot),
            _ => {
                for (index, mounted) in self.components.iter_mut().enumerate() {
                    if mounted.attached {
                        let mut ctx = self.state.context(snapshot, ComponentSlot(index));
                        mounted.component.handle_event(&event, &mut ctx);
                    }
                }
            }
        }
        self.drain_messages(snapshot);
    }

    /// Move the clock forward by `ms`, running everything that falls due
    pub fn advance(&mut self, ms: Millis) {
        let target = self.clock.now().saturating_add(ms);
        self.advance_to(target);
    }

    /// Run timers and frames up to and including `target`
    ///
    /// Timers fire in due order. Pending frame requests run together on the
    /// next `frame_interval` boundary; a timer due at the same instant runs
    /// first.
    pub fn advance_to(&mut self, target: Millis) {
        loop {
            if self.frame_due.is_none() && self.state.scheduler.has_frame_requests() {
                self.frame_due = Some(self.next_frame_boundary());
            }
            let timer = self.state.scheduler.next_due().filter(|due| *due <= target);
            let frame = self.frame_due.filter(|due| *due <= target);

            match (timer, frame) {
                (None, None) => break,
                (Some(due), Some(frame)) if frame < due => self.run_frame_at(frame),
                (None, Some(frame)) => self.run_frame_at(frame),
                (Some(due), _) => {
                    self.clock.set(due);
                    self.run_due_timer();
                }
            }
        }
        self.clock.set(target);
    }

    /// Advance until no timers or frames remain, or `limit` ms have passed
    ///
    /// Returns true if the page went idle. Pages with endless effects such
    /// as the typing loop never do.
    pub fn run_until_idle(&mut self, limit: Millis) -> bool {
        let deadline = self.clock.now().saturating_add(limit);
        while !self.state.scheduler.is_empty() {
            let next = match (self.state.scheduler.next_due(), self.frame_due) {
                (Some(timer), Some(frame)) => timer.min(frame),
                (Some(timer), None) => timer,
                (None, _) => self.frame_due.unwrap_or_else(|| self.next_frame_boundary()),
            };
            if next > deadline {
                self.clock.set(deadline);
                return false;
            }
            self.advance_to(next);
        }
        true
    }

    /// Drive the page from an event source
    ///
    /// Time is advanced to each event's timestamp before it is dispatched.
    /// Host requests are handed to `on_request` after every event.
    pub fn run<L, F>(&mut self, event_loop: L, mut on_request: F) -> Result<(), PlatformError>
    where
        L: EventLoop,
        F: FnMut(&mut Self, HostRequest),
    {
        event_loop.run(|event, at| {
            self.advance_to(at);
            let unload = matches!(event, Event::Lifecycle(LifecycleEvent::Unload));
            self.dispatch(event);
            for request in self.take_host_requests() {
                on_request(self, request);
            }
            if unload {
                ControlFlow::Exit
            } else {
                ControlFlow::Continue
            }
        })
    }

    fn next_frame_boundary(&self) -> Millis {
        let interval = self.state.config.frame_interval.max(1);
        (self.clock.now() / interval + 1) * interval
    }

    fn attach_one(&mut self, index: usize, snapshot: EnvSnapshot) {
        let Some(mounted) = self.components.get_mut(index) else {
            return;
        };
        let mut ctx = self.state.context(snapshot, ComponentSlot(index));
        mounted.component.attach(&mut ctx);
        mounted.attached = true;
        tracing::debug!(component = mounted.component.name(), "attached");
    }

    fn attach_all(&mut self, snapshot: EnvSnapshot) {
        if self.attached {
            tracing::debug!("page already attached");
            return;
        }
        self.attached = true;
        for index in 0..self.components.len() {
            self.attach_one(index, snapshot);
        }
        tracing::info!(components = self.components.len(), "page attached");
    }

    fn detach_all(&mut self, snapshot: EnvSnapshot) {
        if !self.attached {
            return;
        }
        for (index, mounted) in self.components.iter_mut().enumerate() {
            if !mounted.attached {
                continue;
            }
            let mut ctx = self.state.context(snapshot, ComponentSlot(index));
            mounted.component.detach(&mut ctx);
            let cancelled = ctx.cancel_all();
            mounted.attached = false;
            tracing::debug!(component = mounted.component.name(), cancelled, "detached");
        }
        self.attached = false;
        self.frame_due = None;
        tracing::info!("page detached");
    }

    fn run_due_timer(&mut self) {
        let now = self.clock.now();
        let Some((_, Scheduled { owner, wake })) = self.state.scheduler.pop_due(now) else {
            return;
        };
        let snapshot = self.snapshot();
        if let Some(mounted) = self.components.get_mut(owner.0) {
            if mounted.attached {
                let mut ctx = self.state.context(snapshot, owner);
                mounted.component.on_wake(wake, &mut ctx);
            }
        }
        self.drain_messages(snapshot);
    }

    fn run_frame_at(&mut self, at: Millis) {
        self.clock.set(at);
        let snapshot = self.snapshot();
        self.run_frame(snapshot);
        self.drain_messages(snapshot);
    }

    fn run_frame(&mut self, snapshot: EnvSnapshot) {
        self.frame_due = None;
        for (_, Scheduled { owner, wake }) in self.state.scheduler.take_frame_requests() {
            let Some(mounted) = self.components.get_mut(owner.0) else {
                continue;
            };
            if mounted.attached {
                let mut ctx = self.state.context(snapshot, owner);
                mounted.component.on_wake(wake, &mut ctx);
            }
        }
    }

    fn drain_messages(&mut self, snapshot: EnvSnapshot) {
        let mut delivered = 0;
        while let Some(message) = self.state.bus.next() {
            delivered += 1;
            if delivered > MAX_MESSAGES_PER_DISPATCH {
                tracing::warn!("message storm; dropping {} queued messages", self.state.bus.len() + 1);
                self.state.bus.clear();
                return;
            }
            self.deliver(&message, snapshot);
        }
    }

    fn deliver(&mut self, message: &AppMessage, snapshot: EnvSnapshot) {
        tracing::debug!(?message, "bus");
        for (index, mounted) in self.components.iter_mut().enumerate() {
            if mounted.attached {
                let mut ctx = self.state.context(snapshot, ComponentSlot(index));
                mounted.component.on_message(message, &mut ctx);
            }
        }
    }
}
