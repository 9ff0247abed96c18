//! Folio Animation System
//!
//! Task scheduling and the small state machines behind the page's effects.
//!
//! # Features
//!
//! - **Task Scheduler**: Timeouts, intervals and animation-frame requests keyed by `TaskId`
//! - **Typing Machine**: Type / pause / delete / pause cycling through phrases
//! - **Skill Bars**: Monotone progress toward per-bar targets
//! - **Particles**: Ambient particle generation and pointer/scroll parallax math
//! - **Page Loader**: Randomised progress fill
//! - **Floating Drift**: Randomised wandering offsets
//!
//! Every machine is a plain value advanced by explicit `step`/`tick` calls;
//! none of them owns a timer. Whoever drives them decides when the next step
//! happens, which keeps them testable without real time.

pub mod drift;
pub mod loader;
pub mod particles;
pub mod scheduler;
pub mod skills;
pub mod typing;

pub use drift::{DriftParams, FloatingDrift};
pub use loader::{LoaderProgress, LoaderTick};
pub use particles::{
    AmbientParticle, ParallaxStyle, ParticleBudget, PointerOffset, PointerParticle,
    ScrollParallax, PARTICLE_PALETTE,
};
pub use scheduler::{TaskId, TaskKind, TaskScheduler};
pub use skills::{parse_level, SkillBarAnimator, SkillProgress};
pub use typing::{TypingMachine, TypingPhase, TypingStep, TypingTimings};
