//! Folio page layer
//!
//! The interactive behaviour of a single-page portfolio, run against an
//! in-memory document on a virtual clock.
//!
//! # Example
//!
//! ```ignore
//! use folio_app::prelude::*;
//!
//! let fixture = PageFixture::load("demos/portfolio.json")?;
//! let mut app = PortfolioApp::from_fixture(&fixture, AppConfig::default().with_seed(7));
//!
//! app.dispatch(Event::Lifecycle(LifecycleEvent::DomContentLoaded));
//! app.dispatch(Event::Lifecycle(LifecycleEvent::Load));
//! app.advance(2_000);
//!
//! app.dispatch(Event::Input(InputEvent::Scroll { y: 450.0 }));
//! app.advance(100);
//! ```
//!
//! # Components
//!
//! | Component | Effect |
//! |-----------|--------|
//! | [`PageLoader`] | progress bar, fade-out, "page ready" |
//! | [`RevealEffects`] | viewport reveals, section activation, skills stagger |
//! | [`ScrollCoordinator`] | navbar bands, back-to-top, scroll-spy, scroll parallax |
//! | [`TypingEffect`] | phrase-cycling typing text |
//! | [`SkillBars`] | skill level fill |
//! | [`BackgroundEffects`] | ambient and pointer particles, pointer parallax |
//! | [`MobileNav`] | mobile menu with body scroll lock |
//! | [`ContactForm`] | validation and simulated submission |
//! | [`PortfolioFilter`] | category filter |
//! | [`AnchorScroller`] | smooth in-page anchors, back-to-top |
//! | [`FloatingItems`] | random drift of floating items |
//! | [`ButtonLift`] | hover lift on buttons |
//!
//! Components share nothing but the document and the [`MessageBus`](folio_core::MessageBus);
//! a component whose markup is missing stays inert.

mod app;
mod component;
pub mod components;
mod config;
mod context;
pub mod contracts;
mod error;
mod messages;
pub mod observer;
mod page;
pub mod transport;
pub mod validation;

pub use app::PortfolioApp;
pub use component::Component;
pub use components::{
    default_components, AnchorScroller, BackgroundEffects, ButtonLift, ContactForm,
    FloatingItems, MobileNav, PageLoader, PortfolioFilter, RevealEffects, ScrollCoordinator,
    SkillBars, TypingEffect,
};
pub use config::{
    AppConfig, BackgroundConfig, FormConfig, LoaderConfig, NavConfig, ObserverConfig,
    ScrollConfig, SkillsConfig, TypingConfig,
};
pub use context::{ComponentSlot, PageContext, Scheduled};
pub use contracts::{check_markup, inert_components, ContractReport, MarkupContract};
pub use error::{AppError, Result};
pub use messages::{AppMessage, Wake};
pub use page::{LayoutSpec, NodeSpec, PageFixture};
pub use transport::{ContactSubmission, SimulatedTransport, SubmissionError, SubmissionTransport};
pub use validation::{FieldKind, ValidationError};

// Re-export the lower layers for convenience
pub use folio_animation;
pub use folio_core;
pub use folio_platform;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::PortfolioApp;
    pub use crate::component::Component;
    pub use crate::config::AppConfig;
    pub use crate::context::PageContext;
    pub use crate::error::{AppError, Result};
    pub use crate::messages::{AppMessage, Wake};
    pub use crate::page::PageFixture;
    pub use crate::transport::{SimulatedTransport, SubmissionTransport};

    // Page model
    pub use folio_core::{Document, Element, Millis, NodeId, Rect};

    // Host events
    pub use folio_platform::prelude::*;
}
