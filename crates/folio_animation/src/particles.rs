//! Background particles and parallax
//!
//! Pure math for the decorative background: randomised ambient particles,
//! pointer-driven parallax on code snippets and geometric shapes, and
//! scroll-driven parallax on waves and the hero layer. Callers decide which
//! elements receive the resulting styles.

use folio_core::style::{percent, px};
use folio_core::{Document, Filter, NodeId, Transform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Accent colours ambient particles pick from
pub const PARTICLE_PALETTE: [&str; 2] = ["#ff4757", "#3742fa"];

/// How many particles to create and how fast layers move
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleBudget {
    /// Ambient particles per animated background
    pub count: usize,
    /// Multiplier applied to scroll parallax speeds
    pub speed: f32,
}

impl ParticleBudget {
    pub const LOW: Self = Self {
        count: 8,
        speed: 0.5,
    };
    pub const STANDARD: Self = Self {
        count: 15,
        speed: 1.0,
    };
}

impl Default for ParticleBudget {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A looping ambient particle
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
    /// Diameter in px, 2-6
    pub size: f32,
    /// 0.1-0.6
    pub opacity: f32,
    pub color: &'static str,
    /// Horizontal position, percent of the container
    pub left: f32,
    /// Vertical position, percent of the container
    pub top: f32,
    /// Seconds per rise-and-fade loop, 10-20
    pub duration: f32,
    /// Seconds before the first loop, 0-5
    pub delay: f32,
}

impl AmbientParticle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette: &[&'static str]) -> Self {
        let color = if palette.is_empty() {
            PARTICLE_PALETTE[0]
        } else {
            palette[rng.gen_range(0..palette.len())]
        };

        Self {
            size: rng.gen_range(2.0..6.0),
            opacity: rng.gen_range(0.1..0.6),
            color,
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            duration: rng.gen_range(10.0..20.0),
            delay: rng.gen_range(0.0..5.0),
        }
    }

    /// Inline style declarations for the particle element
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".into()),
            ("width", px(self.size)),
            ("height", px(self.size)),
            ("background", self.color.into()),
            ("border-radius", "50%".into()),
            ("opacity", self.opacity.to_string()),
            ("left", percent(self.left)),
            ("top", percent(self.top)),
            (
                "animation",
                format!("particleFloat {}s linear infinite", self.duration),
            ),
            ("animation-delay", format!("{}s", self.delay)),
        ]
    }
}

/// A short-lived particle spawned under the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerParticle {
    pub x: f32,
    pub y: f32,
}

impl PointerParticle {
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "fixed".into()),
            ("width", "6px".into()),
            ("height", "6px".into()),
            (
                "background",
                format!(
                    "linear-gradient(45deg, {}, {})",
                    PARTICLE_PALETTE[0], PARTICLE_PALETTE[1]
                ),
            ),
            ("border-radius", "50%".into()),
            ("pointer-events", "none".into()),
            ("z-index", "1000".into()),
            ("left", px(self.x)),
            ("top", px(self.y)),
            ("animation", "mouseParticleExplosion 0.8s ease-out forwards".into()),
        ]
    }
}

/// Pointer position normalised to roughly [-1, 1] on both axes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    pub const NEUTRAL: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inline styles one parallax layer receives
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxStyle {
    pub transform: Option<Transform>,
    pub filter: Option<Filter>,
    pub opacity: Option<f32>,
}

impl ParallaxStyle {
    /// Floating code snippet `index` within its section
    pub fn code_element(offset: PointerOffset, index: usize) -> Self {
        let speed = (index + 1) as f32 * 0.5;
        Self {
            transform: Some(
                Transform::new()
                    .translate(offset.x * speed * 10.0, offset.y * speed * 10.0)
                    .rotate(offset.x * 10.0),
            ),
            filter: Some(Filter::Brightness(1.0 + offset.x.abs() * 0.3)),
            opacity: None,
        }
    }

    /// Geometric shape `index` within its section
    pub fn geo_shape(offset: PointerOffset, index: usize) -> Self {
        let speed = (index + 1) as f32 * 0.3;
        Self {
            transform: Some(
                Transform::new()
                    .translate(offset.x * speed * 15.0, offset.y * speed * 15.0)
                    .rotate(offset.x * 20.0)
                    .scale(1.0 + offset.x.abs() * 0.1),
            ),
            filter: None,
            opacity: Some(0.1 + (offset.x + offset.y).abs() * 0.1),
        }
    }

    /// Hue shift of a section's animated background
    pub fn background(offset: PointerOffset) -> Self {
        let hue = offset.x.abs() * 180.0 + offset.y.abs() * 180.0;
        Self {
            filter: Some(Filter::HueRotate(hue * 0.1)),
            ..Default::default()
        }
    }

    /// Write the set properties onto `node`
    pub fn apply(&self, doc: &mut Document, node: NodeId) {
        if let Some(transform) = &self.transform {
            doc.set_style(node, "transform", transform.to_string());
        }
        if let Some(filter) = &self.filter {
            doc.set_style(node, "filter", filter.to_string());
        }
        if let Some(opacity) = self.opacity {
            doc.set_style(node, "opacity", opacity.to_string());
        }
    }

    /// Remove every property a parallax style can set
    pub fn reset(doc: &mut Document, node: NodeId) {
        doc.clear_style(node, "transform");
        doc.clear_style(node, "filter");
        doc.clear_style(node, "opacity");
    }
}

/// Scroll-driven layer offsets, scaled by the particle budget speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollParallax {
    pub speed: f32,
}

impl ScrollParallax {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Wave layer `index`
    pub fn wave(&self, scroll_y: f32, index: usize) -> Transform {
        let speed = (index + 1) as f32 * 0.1 * self.speed;
        Transform::new().translate_y(scroll_y * speed)
    }

    /// Hero background opacity and scale for the given scroll offset
    pub fn hero_background(&self, scroll_y: f32, hero_height: f32) -> ParallaxStyle {
        let progress = if hero_height > 0.0 {
            (scroll_y / hero_height).min(1.0)
        } else {
            1.0
        };
        ParallaxStyle {
            transform: Some(Transform::new().scale(1.0 + progress * 0.05)),
            filter: None,
            opacity: Some(1.0 - progress * 0.3),
        }
    }

    /// Hero particle `index`: slow rise plus a sideways sway
    pub fn hero_particle(&self, scroll_y: f32, index: usize) -> Transform {
        let speed = ((index % 3) + 1) as f32 * 0.5;
        let sway = (scroll_y * 0.01 + index as f32).sin() * 10.0;
        Transform::new()
            .translate_y(scroll_y * speed * 0.1)
            .translate_x(sway)
    }
}
