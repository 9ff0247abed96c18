//! Event sources and page events

use folio_core::Millis;

use crate::error::PlatformError;
use crate::input::InputEvent;

/// A source of timestamped page events
///
/// Implementations drive a page by calling the handler once per event with
/// the time at which it occurred. Timestamps are non-decreasing.
pub trait EventLoop {
    /// Run until the source is exhausted or the handler returns `Exit`
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, Millis) -> ControlFlow;
}

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep delivering events
    #[default]
    Continue,
    /// Stop the event loop
    Exit,
}

/// Page events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Document lifecycle
    Lifecycle(LifecycleEvent),
    /// Viewport changes
    Window(WindowEvent),
    /// User input
    Input(InputEvent),
    /// Animation frame - run pending frame callbacks
    Frame,
}

/// Document lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Markup parsed; components attach here
    DomContentLoaded,
    /// All resources loaded; the page loader starts here
    Load,
    /// The page is being torn down; components detach here
    Unload,
}

/// Viewport events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport was resized
    Resized {
        /// New width in CSS pixels
        width: f32,
        /// New height in CSS pixels
        height: f32,
    },
}

impl Event {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Lifecycle(LifecycleEvent::DomContentLoaded) => "DOMContentLoaded",
            Event::Lifecycle(LifecycleEvent::Load) => "load",
            Event::Lifecycle(LifecycleEvent::Unload) => "unload",
            Event::Window(WindowEvent::Resized { .. }) => "resize",
            Event::Input(input) => input.kind(),
            Event::Frame => "frame",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(Event::Input(InputEvent::Scroll { y: 10.0 }).kind(), "scroll");
        assert_eq!(Event::Lifecycle(LifecycleEvent::Load).kind(), "load");
    }
}
