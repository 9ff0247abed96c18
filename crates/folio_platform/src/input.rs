//! Input event types for scrolling, pointer, clicks and form fields

use folio_core::NodeId;

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The window scrolled to an absolute vertical offset
    Scroll {
        /// New `scrollY`
        y: f32,
    },
    /// Pointer event
    Pointer(PointerEvent),
    /// Primary-button click on an element
    Click {
        /// Innermost element under the pointer
        target: NodeId,
    },
    /// Form field event
    Field(FieldEvent),
    /// Form submission
    Submit {
        /// The submitted form
        form: NodeId,
    },
}

impl InputEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Scroll { .. } => "scroll",
            InputEvent::Pointer(PointerEvent::Moved { .. }) => "mousemove",
            InputEvent::Pointer(PointerEvent::Entered { .. }) => "mouseenter",
            InputEvent::Pointer(PointerEvent::Left { .. }) => "mouseleave",
            InputEvent::Click { .. } => "click",
            InputEvent::Field(FieldEvent::Input { .. }) => "input",
            InputEvent::Field(FieldEvent::Blur { .. }) => "blur",
            InputEvent::Submit { .. } => "submit",
        }
    }
}

// ============================================================================
// Pointer Events
// ============================================================================

/// Pointer events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved
    Moved {
        /// X position in viewport coordinates
        x: f32,
        /// Y position in viewport coordinates
        y: f32,
        /// Innermost element under the pointer
        target: NodeId,
    },
    /// Pointer entered an element (does not bubble)
    Entered {
        target: NodeId,
    },
    /// Pointer left an element (does not bubble)
    Left {
        target: NodeId,
    },
}

// ============================================================================
// Form Field Events
// ============================================================================

/// Form field events
#[derive(Clone, Debug, PartialEq)]
pub enum FieldEvent {
    /// The user edited the field
    Input {
        target: NodeId,
        /// Full field value after the edit
        value: String,
    },
    /// The field lost focus
    Blur {
        target: NodeId,
    },
}
