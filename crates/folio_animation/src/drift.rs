//! Floating item drift
//!
//! Decorative items wander to a random offset at a fixed, per-item period.
//! Items start one after another so they never move in lockstep.

use folio_core::{Millis, Transform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shared drift parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftParams {
    /// Delay between consecutive items starting, ms
    pub stagger: Millis,
    /// Minimum drift period, ms
    pub base_period: Millis,
    /// Random extra period, up to this many ms
    pub period_jitter: Millis,
    /// Maximum offset on each axis, px
    pub amplitude: f32,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            stagger: 500,
            base_period: 3000,
            period_jitter: 2000,
            amplitude: 25.0,
        }
    }
}

/// Drift schedule of one floating item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingDrift {
    pub index: usize,
    /// Delay before the first move
    pub start_delay: Millis,
    /// Time between moves
    pub period: Millis,
    amplitude: f32,
}

impl FloatingDrift {
    pub fn new<R: Rng + ?Sized>(index: usize, params: &DriftParams, rng: &mut R) -> Self {
        let jitter = if params.period_jitter == 0 {
            0
        } else {
            rng.gen_range(0..params.period_jitter)
        };

        Self {
            index,
            start_delay: params.stagger.saturating_mul(index as Millis),
            period: params.base_period.saturating_add(jitter).max(1),
            amplitude: params.amplitude.abs(),
        }
    }

    /// CSS `animation-delay` matching the start stagger
    pub fn animation_delay(&self) -> String {
        format!("{}s", self.start_delay as f64 / 1000.0)
    }

    /// Pick the next random offset
    pub fn next_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Transform {
        let mut axis = || (rng.gen::<f32>() - 0.5) * 2.0 * self.amplitude;
        let x = axis();
        let y = axis();
        Transform::new().translate(x, y)
    }
}
