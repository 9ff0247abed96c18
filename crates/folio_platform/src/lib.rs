//! Folio Host Abstraction Layer
//!
//! This crate defines what the hosting environment feeds into a page and
//! what it is asked to do in return.
//!
//! # Architecture
//!
//! - [`Event`] - everything a page reacts to: lifecycle, resize, input, frames
//! - [`Environment`] - the host's read-only signals (viewport, scroll, pointer)
//! - [`EnvSnapshot`] - an immutable copy of the environment taken once per dispatch
//! - [`HostRequest`] - side effects only the host can perform (scrolling the window)
//! - [`EventLoop`] - a source of timestamped events (browser bridge, scripted replay)
//!
//! # Example
//!
//! ```ignore
//! use folio_platform::prelude::*;
//!
//! event_loop.run(|event, at| {
//!     app.advance_to(at);
//!     app.dispatch(event);
//!     ControlFlow::Continue
//! })?;
//! ```

mod environment;
mod error;
mod event;
mod input;

// Re-export all public types
pub use environment::{EnvSnapshot, Environment, HostRequest, PerformanceTier, Viewport};
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
pub use input::{FieldEvent, InputEvent, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::environment::{
        EnvSnapshot, Environment, HostRequest, PerformanceTier, Viewport,
    };
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
    pub use crate::input::{FieldEvent, InputEvent, PointerEvent};
}
