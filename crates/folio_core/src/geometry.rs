//! Layout geometry in document coordinates
//!
//! Element rectangles are stored in document space (the equivalent of
//! `offsetLeft`/`offsetTop`), so the viewport is simply a rectangle that
//! slides down the document as the page scrolls.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A full-width band starting at `top` (the common case for page sections)
    pub fn band(top: f32, height: f32) -> Self {
        Self::new(0.0, top, 0.0, height)
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Half-open vertical containment: `top <= y < bottom`
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top() && y < self.bottom()
    }

    /// Vertical overlap with another rectangle, in pixels (never negative)
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    /// Grow (positive margins) or shrink (negative margins) the rectangle
    pub fn expand(&self, margin: Margin) -> Rect {
        Rect {
            x: self.x - margin.left,
            y: self.y - margin.top,
            width: (self.width + margin.left + margin.right).max(0.0),
            height: (self.height + margin.top + margin.bottom).max(0.0),
        }
    }
}

/// Per-edge margin, matching the `rootMargin` shorthand of an intersection observer
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Margin applied to the bottom edge only (`0px 0px {px}px 0px`)
    pub fn bottom(px: f32) -> Self {
        Self {
            bottom: px,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_y_is_half_open() {
        let rect = Rect::band(500.0, 500.0);
        assert!(rect.contains_y(500.0));
        assert!(rect.contains_y(999.0));
        assert!(!rect.contains_y(1000.0));
        assert!(!rect.contains_y(499.0));
    }

    #[test]
    fn test_negative_bottom_margin_shrinks_root() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        let root = viewport.expand(Margin::bottom(-50.0));
        assert_eq!(root.top(), 0.0);
        assert_eq!(root.bottom(), 750.0);
    }

    #[test]
    fn test_vertical_overlap() {
        let a = Rect::band(0.0, 100.0);
        let b = Rect::band(80.0, 100.0);
        assert_eq!(a.vertical_overlap(&b), 20.0);
        assert_eq!(a.vertical_overlap(&Rect::band(200.0, 10.0)), 0.0);
    }
}
