//! Page loader progress
//!
//! Fills a fake progress bar by a random amount on every tick until it
//! reaches 100%.

use rand::Rng;

/// Outcome of one loader tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderTick {
    /// Bar width in percent
    pub width: f32,
    /// The bar reached 100% on this tick
    pub complete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderProgress {
    progress: f32,
    max_step: f32,
}

impl Default for LoaderProgress {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl LoaderProgress {
    /// Each tick adds a uniform random amount in `[0, max_step)`
    pub fn new(max_step: f32) -> Self {
        Self {
            progress: 0.0,
            max_step: max_step.max(0.0),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LoaderTick {
        if !self.is_complete() {
            self.progress = (self.progress + rng.gen::<f32>() * self.max_step).min(100.0);
        }
        LoaderTick {
            width: self.progress,
            complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_progress_caps_at_100() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut loader = LoaderProgress::default();
        let mut last = 0.0;
        let mut ticks = 0;

        loop {
            let tick = loader.tick(&mut rng);
            assert!(tick.width >= last);
            assert!(tick.width <= 100.0);
            last = tick.width;
            ticks += 1;
            if tick.complete {
                break;
            }
            assert!(ticks < 10_000, "loader never completed");
        }

        assert_eq!(loader.progress(), 100.0);
        assert!(loader.tick(&mut rng).complete);
    }

    #[test]
    fn test_zero_step_never_completes() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut loader = LoaderProgress::new(0.0);
        for _ in 0..10 {
            assert!(!loader.tick(&mut rng).complete);
        }
    }
}
