//! The page's components
//!
//! Each module holds one self-contained effect. [`default_components`]
//! returns the full portfolio set in attach order.

mod anchors;
mod background;
mod buttons;
mod filter;
mod floating;
mod form;
mod loader;
mod nav;
mod reveal;
mod scroll;
mod skills;
mod typing;

pub use anchors::AnchorScroller;
pub use background::BackgroundEffects;
pub use buttons::ButtonLift;
pub use filter::{shows, PortfolioFilter, SHOW_ALL};
pub use floating::FloatingItems;
pub use form::{ContactForm, MessageKind, BLOCKED_MESSAGE, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use loader::PageLoader;
pub use nav::MobileNav;
pub use reveal::RevealEffects;
pub use scroll::{current_section, NavbarBand, ScrollCoordinator};
pub use skills::SkillBars;
pub use typing::TypingEffect;

use crate::component::Component;
use crate::transport::SubmissionTransport;

/// Every portfolio component, wired to `transport` for the contact form
pub fn default_components(transport: Box<dyn SubmissionTransport>) -> Vec<Box<dyn Component>> {
    vec![
        Box::new(PageLoader::new()),
        Box::new(MobileNav::new()),
        Box::new(ScrollCoordinator::new()),
        Box::new(AnchorScroller::new()),
        Box::new(RevealEffects::new()),
        Box::new(SkillBars::new()),
        Box::new(TypingEffect::new()),
        Box::new(PortfolioFilter::new()),
        Box::new(ContactForm::new(transport)),
        Box::new(BackgroundEffects::new()),
        Box::new(FloatingItems::new()),
        Box::new(ButtonLift::new()),
    ]
}
