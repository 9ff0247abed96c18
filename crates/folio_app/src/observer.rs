//! Viewport observer manager
//!
//! Owns the intersection observers behind the page's viewport effects and
//! turns their visibility changes into callbacks:
//!
//! - [`observe_reveal`](ViewportObserverManager::observe_reveal) - one-shot:
//!   fires on first entry, then stops watching the element
//! - [`observe_visibility`](ViewportObserverManager::observe_visibility) -
//!   continuous: fires on every entry and exit
//! - [`observe_stagger`](ViewportObserverManager::observe_stagger) - one
//!   sentinel reveals its whole group with increasing delays
//! - [`observe_section_activation`](ViewportObserverManager::observe_section_activation) -
//!   continuous activation of a section's animated background
//!
//! Observers are checked explicitly with [`check`](ViewportObserverManager::check),
//! which the owning component calls after attaching and whenever the
//! viewport moves.

use folio_core::{IntersectionObserver, Millis, NodeId, ObserverOptions, Transform};

use crate::context::PageContext;
use crate::messages::Wake;

/// Class a staggered item receives when its turn comes
pub const STAGGER_CLASS: &str = "animate";

type EnterCallback = Box<dyn FnMut(&mut PageContext<'_>, NodeId)>;
type ChangeCallback = Box<dyn FnMut(&mut PageContext<'_>, NodeId, bool)>;

enum Effect {
    Reveal(EnterCallback),
    Visibility(ChangeCallback),
    Stagger {
        container_selector: String,
        item_selector: String,
        step: Millis,
    },
}

struct Registration {
    label: String,
    observer: IntersectionObserver,
    effect: Effect,
}

/// Registry of viewport-triggered effects
#[derive(Default)]
pub struct ViewportObserverManager {
    registrations: Vec<Registration>,
}

impl std::fmt::Debug for ViewportObserverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserverManager")
            .field("registrations", &self.registrations.len())
            .field("observed", &self.observed_count())
            .finish()
    }
}

impl ViewportObserverManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &mut self,
        ctx: &PageContext<'_>,
        selector: &str,
        options: ObserverOptions,
        effect: Effect,
    ) -> usize {
        let targets = ctx.doc.query_selector_all(selector);
        if targets.is_empty() {
            tracing::debug!("no elements match {:?}; nothing to observe", selector);
            return 0;
        }

        let mut observer = IntersectionObserver::new(options);
        for target in &targets {
            observer.observe(*target);
        }
        self.registrations.push(Registration {
            label: selector.to_string(),
            observer,
            effect,
        });
        targets.len()
    }

    /// Call `on_enter` the first time each matching element becomes visible
    ///
    /// Returns the number of elements observed.
    pub fn observe_reveal<F>(
        &mut self,
        ctx: &PageContext<'_>,
        selector: &str,
        options: ObserverOptions,
        on_enter: F,
    ) -> usize
    where
        F: FnMut(&mut PageContext<'_>, NodeId) + 'static,
    {
        self.register(ctx, selector, options, Effect::Reveal(Box::new(on_enter)))
    }

    /// Call `on_change` every time a matching element enters or leaves
    pub fn observe_visibility<F>(
        &mut self,
        ctx: &PageContext<'_>,
        selector: &str,
        options: ObserverOptions,
        on_change: F,
    ) -> usize
    where
        F: FnMut(&mut PageContext<'_>, NodeId, bool) + 'static,
    {
        self.register(ctx, selector, options, Effect::Visibility(Box::new(on_change)))
    }

    /// Watch the first `item_selector` element; when it appears, reveal every
    /// item in its `container_selector` ancestor, item `i` after `i * step` ms
    pub fn observe_stagger(
        &mut self,
        ctx: &PageContext<'_>,
        container_selector: &str,
        item_selector: &str,
        step: Millis,
        options: ObserverOptions,
    ) -> bool {
        let Some(sentinel) = ctx.doc.query_selector(item_selector) else {
            tracing::debug!("no stagger items match {:?}", item_selector);
            return false;
        };

        let mut observer = IntersectionObserver::new(options);
        observer.observe(sentinel);
        self.registrations.push(Registration {
            label: format!("{} {}", container_selector, item_selector),
            observer,
            effect: Effect::Stagger {
                container_selector: container_selector.to_string(),
                item_selector: item_selector.to_string(),
                step,
            },
        });
        true
    }

    /// Toggle the animated background of matching sections as they enter
    /// and leave: full opacity plus a `{section}-active` class while visible
    pub fn observe_section_activation(
        &mut self,
        ctx: &PageContext<'_>,
        selector: &str,
        options: ObserverOptions,
    ) -> usize {
        self.observe_visibility(ctx, selector, options, |ctx, section, visible| {
            let Some(background) = ctx.doc.query_within(section, ".animated-bg").first().copied()
            else {
                return;
            };
            let qualified = ctx
                .doc
                .get(section)
                .and_then(|element| element.first_class())
                .map(|class| format!("{}-active", class));

            if visible {
                ctx.doc.set_style(background, "opacity", "1");
                ctx.doc
                    .set_style(background, "transform", Transform::new().scale(1.0).to_string());
            } else {
                ctx.doc.set_style(background, "opacity", "0.7");
            }
            if let Some(class) = qualified {
                ctx.doc.set_class(background, &class, visible);
            }
        })
    }

    /// Test every observer against the current viewport and run the effects
    /// of whatever changed
    pub fn check(&mut self, ctx: &mut PageContext<'_>) {
        let viewport = ctx.viewport();

        for registration in &mut self.registrations {
            let entries = registration.observer.check(ctx.doc, viewport);
            for entry in entries {
                match &mut registration.effect {
                    Effect::Reveal(on_enter) => {
                        if entry.is_intersecting {
                            registration.observer.unobserve(entry.target);
                            on_enter(ctx, entry.target);
                        }
                    }
                    Effect::Visibility(on_change) => {
                        on_change(ctx, entry.target, entry.is_intersecting);
                    }
                    Effect::Stagger {
                        container_selector,
                        item_selector,
                        step,
                    } => {
                        if !entry.is_intersecting {
                            continue;
                        }
                        registration.observer.unobserve(entry.target);
                        match ctx.doc.closest(entry.target, container_selector) {
                            Some(container) => {
                                let items = ctx.doc.query_within(container, item_selector);
                                tracing::debug!(items = items.len(), "stagger triggered");
                                for (index, node) in items.into_iter().enumerate() {
                                    ctx.set_timeout(
                                        *step * index as Millis,
                                        Wake::StaggerReveal { node },
                                    );
                                }
                            }
                            None => tracing::debug!(
                                "stagger sentinel has no {:?} ancestor",
                                container_selector
                            ),
                        }
                    }
                }
            }
        }

        // Drop one-shot registrations with nothing left to watch
        self.registrations.retain(|registration| {
            let spent = registration.observer.is_empty();
            if spent {
                tracing::trace!("observer for {:?} finished", registration.label);
            }
            !spent
        });
    }

    /// Run a wake-up scheduled by a stagger
    pub fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        if let Wake::StaggerReveal { node } = wake {
            ctx.doc.add_class(node, STAGGER_CLASS);
        }
    }

    pub fn observed_count(&self) -> usize {
        self.registrations
            .iter()
            .map(|registration| registration.observer.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Stop watching everything
    pub fn disconnect(&mut self) {
        self.registrations.clear();
    }
}
