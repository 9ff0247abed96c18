//! Host environment signals
//!
//! [`Environment`] is the mutable read model of what the host reports
//! (viewport size, scroll offset, pointer position, hardware hints). Pages
//! never read it piecemeal: every dispatch takes one [`EnvSnapshot`] so all
//! components handling the same event see the same values.

use folio_core::{Millis, Rect};
use serde::{Deserialize, Serialize};

use crate::event::{Event, WindowEvent};
use crate::input::{InputEvent, PointerEvent};

/// Viewport size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Coarse device classification used to scale down animation cost
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    #[default]
    Standard,
}

impl PerformanceTier {
    /// Classify a device: narrow viewports and hosts reporting fewer than
    /// four hardware threads are `Low`
    pub fn classify(viewport_width: f32, hardware_concurrency: Option<u32>, breakpoint: f32) -> Self {
        let narrow = viewport_width < breakpoint;
        let weak = matches!(hardware_concurrency, Some(threads) if threads < 4);
        if narrow || weak {
            PerformanceTier::Low
        } else {
            PerformanceTier::Standard
        }
    }
}

/// Side effects only the host can perform
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostRequest {
    /// Scroll the window to an absolute offset
    ScrollTo { top: f32, smooth: bool },
}

/// Host signals, updated as events arrive
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub viewport: Viewport,
    /// `navigator.hardwareConcurrency`, if the host reports it
    pub hardware_concurrency: Option<u32>,
    pub scroll_y: f32,
    /// Last pointer position in viewport coordinates
    pub pointer: Option<(f32, f32)>,
}

impl Environment {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn with_hardware_concurrency(mut self, threads: u32) -> Self {
        self.hardware_concurrency = Some(threads);
        self
    }

    /// Fold an incoming event into the environment
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Window(WindowEvent::Resized { width, height }) => {
                self.viewport = Viewport::new(*width, *height);
            }
            Event::Input(InputEvent::Scroll { y }) => {
                self.scroll_y = y.max(0.0);
            }
            Event::Input(InputEvent::Pointer(PointerEvent::Moved { x, y, .. })) => {
                self.pointer = Some((*x, *y));
            }
            _ => {}
        }
    }

    pub fn snapshot(&self, now: Millis) -> EnvSnapshot {
        EnvSnapshot {
            now,
            viewport: self.viewport,
            hardware_concurrency: self.hardware_concurrency,
            scroll_y: self.scroll_y,
            pointer: self.pointer,
        }
    }
}

/// Immutable view of the environment for one dispatch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvSnapshot {
    /// Page time of the dispatch
    pub now: Millis,
    pub viewport: Viewport,
    pub hardware_concurrency: Option<u32>,
    pub scroll_y: f32,
    pub pointer: Option<(f32, f32)>,
}

impl EnvSnapshot {
    /// The visible part of the document
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.viewport.width, self.viewport.height)
    }

    pub fn performance_tier(&self, breakpoint: f32) -> PerformanceTier {
        PerformanceTier::classify(self.viewport.width, self.hardware_concurrency, breakpoint)
    }

    /// Pointer position normalised to [-1, 1] on both axes, centre at 0
    pub fn normalized_pointer(&self) -> Option<(f32, f32)> {
        let (x, y) = self.pointer?;
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return None;
        }
        Some((
            (x / self.viewport.width - 0.5) * 2.0,
            (y / self.viewport.height - 0.5) * 2.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_tier() {
        assert_eq!(
            PerformanceTier::classify(600.0, Some(8), 768.0),
            PerformanceTier::Low
        );
        assert_eq!(
            PerformanceTier::classify(1280.0, Some(2), 768.0),
            PerformanceTier::Low
        );
        assert_eq!(
            PerformanceTier::classify(1280.0, None, 768.0),
            PerformanceTier::Standard
        );
    }

    #[test]
    fn test_apply_scroll_and_pointer() {
        let mut env = Environment::new(Viewport::new(1000.0, 500.0));
        env.apply(&Event::Input(InputEvent::Scroll { y: -20.0 }));
        assert_eq!(env.scroll_y, 0.0, "overscroll is clamped");

        env.apply(&Event::Input(InputEvent::Scroll { y: 450.0 }));
        let snap = env.snapshot(0);
        assert_eq!(snap.viewport_rect(), Rect::new(0.0, 450.0, 1000.0, 500.0));
    }

    #[test]
    fn test_normalized_pointer() {
        let mut env = Environment::new(Viewport::new(1000.0, 500.0));
        env.pointer = Some((1000.0, 125.0));
        assert_eq!(env.snapshot(0).normalized_pointer(), Some((1.0, -0.5)));
    }
}
