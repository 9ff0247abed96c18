//! Inline style values
//!
//! Typed builders for the `transform` and `filter` values components write,
//! rendered to the CSS text a stylesheet expects.

use std::fmt;

use smallvec::SmallVec;

/// A single transform function
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    Translate(f32, f32),
    TranslateX(f32),
    TranslateY(f32),
    /// Degrees
    Rotate(f32),
    Scale(f32),
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Translate(x, y) => write!(f, "translate({}px, {}px)", x, y),
            TransformOp::TranslateX(x) => write!(f, "translateX({}px)", x),
            TransformOp::TranslateY(y) => write!(f, "translateY({}px)", y),
            TransformOp::Rotate(deg) => write!(f, "rotate({}deg)", deg),
            TransformOp::Scale(s) => write!(f, "scale({})", s),
        }
    }
}

/// An ordered list of transform functions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    ops: SmallVec<[TransformOp; 3]>,
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(mut self, x: f32, y: f32) -> Self {
        self.ops.push(TransformOp::Translate(x, y));
        self
    }

    pub fn translate_x(mut self, x: f32) -> Self {
        self.ops.push(TransformOp::TranslateX(x));
        self
    }

    pub fn translate_y(mut self, y: f32) -> Self {
        self.ops.push(TransformOp::TranslateY(y));
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.ops.push(TransformOp::Rotate(degrees));
        self
    }

    pub fn scale(mut self, factor: f32) -> Self {
        self.ops.push(TransformOp::Scale(factor));
        self
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// A filter function
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// Degrees
    HueRotate(f32),
    Brightness(f32),
    /// Pixels
    Blur(f32),
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::HueRotate(deg) => write!(f, "hue-rotate({}deg)", deg),
            Filter::Brightness(b) => write!(f, "brightness({})", b),
            Filter::Blur(px) => write!(f, "blur({}px)", px),
        }
    }
}

/// `{value}%`
pub fn percent(value: impl fmt::Display) -> String {
    format!("{}%", value)
}

/// `{value}px`
pub fn px(value: impl fmt::Display) -> String {
    format!("{}px", value)
}

/// `rgba(r, g, b, a)`
pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}
