//! Messages and wake-ups exchanged on a page
//!
//! [`AppMessage`]s travel over the page's message bus and reach every
//! attached component. [`Wake`]s are payloads of scheduled tasks and only
//! reach the component that scheduled them.

use folio_core::NodeId;

/// Cross-component notifications
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppMessage {
    /// The page loader finished and faded out
    PageReady,
    /// The skills section entered the viewport for the first time
    SkillsRevealed,
    /// The mobile menu opened or closed
    NavToggled { open: bool },
    /// A contact submission settled
    SubmissionSettled { success: bool },
}

/// Reasons a component asked to be woken
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    // Page loader
    LoaderTick,
    LoaderFade,
    LoaderReady,

    // Viewport observers
    StaggerReveal { node: NodeId },

    // Scroll coordinator
    ScrollFrame,
    ScrollSpy,

    // Typing effect
    TypingStep,

    // Skill bars
    SkillsStart,
    SkillsFrame,

    // Background
    Parallax { section: NodeId },
    RemoveParticle { node: NodeId },

    // Floating drift
    DriftStart { index: usize },
    Drift { index: usize },

    // Contact form
    SubmissionDue,
    MessageExpired { node: NodeId },
}
