//! Folio Core
//!
//! This crate provides the foundational primitives the Folio page layer is built on:
//!
//! - **Document Model**: An arena of elements with classes, attributes, inline style and layout
//! - **Selectors**: A CSS selector subset for querying the document
//! - **Clocks**: Real and virtual time sources so timer-driven effects are testable
//! - **Throttling**: Leading-edge throttles and rate limiters for high-frequency input
//! - **Viewport Observation**: Intersection tracking of elements against the scrolled viewport
//! - **Message Bus**: Explicit message passing between otherwise independent components
//!
//! # Example
//!
//! ```rust
//! use folio_core::dom::{Document, Element};
//! use folio_core::geometry::Rect;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let nav = doc.append(body, Element::new("nav").with_id("navbar").with_class("navbar"));
//! doc.append(
//!     body,
//!     Element::new("section")
//!         .with_id("home")
//!         .with_layout(Rect::new(0.0, 0.0, 1280.0, 500.0)),
//! );
//!
//! doc.add_class(nav, "scrolled");
//! assert!(doc.has_class(nav, "scrolled"));
//! assert_eq!(doc.query_selector_all("section[id]").len(), 1);
//! ```

pub mod bus;
pub mod clock;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod selector;
pub mod style;
pub mod throttle;

pub use bus::MessageBus;
pub use clock::{Clock, Millis, SystemClock, VirtualClock};
pub use dom::{Document, Element, NodeId, NodeSnapshot};
pub use error::{DomError, Result};
pub use geometry::{Margin, Rect};
pub use intersection::{IntersectionEntry, IntersectionObserver, ObserverOptions};
pub use selector::{AttrOp, AttrSelector, ComplexSelector, CompoundSelector, SelectorList};
pub use style::{Filter, Transform, TransformOp};
pub use throttle::{throttle, RateLimiter, Throttle, Throttled};
