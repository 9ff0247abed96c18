//! Skill bar fill animation
//!
//! Each bar climbs from 0 to its target level in steps of `ceil(target / 50)`,
//! so every bar finishes in about fifty frames whatever its size.

use folio_core::NodeId;

/// Parse a `data-level` value
///
/// Leading whitespace and an optional sign are accepted, then as many digits
/// as are present; trailing garbage is ignored (`"85%"` is 85). Anything
/// without leading digits is 0. The result is clamped to `0..=100`.
pub fn parse_level(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }

    // Long digit runs saturate instead of failing
    digits[..end].parse::<u64>().map_or(100, |n| n.min(100) as u32)
}

/// One bar's progress toward its target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillProgress {
    pub node: NodeId,
    pub target: u32,
    pub current: u32,
}

impl SkillProgress {
    pub fn new(node: NodeId, target: u32) -> Self {
        Self {
            node,
            target: target.min(100),
            current: 0,
        }
    }

    /// Increment applied per tick
    pub fn step_size(&self) -> u32 {
        self.target.div_ceil(50)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    /// Advance one tick; returns the new level if it changed
    pub fn advance(&mut self) -> Option<u32> {
        if self.is_complete() {
            return None;
        }
        self.current = (self.current + self.step_size()).min(self.target);
        Some(self.current)
    }
}

/// Advances a set of bars together, one tick per animation frame
#[derive(Clone, Debug, Default)]
pub struct SkillBarAnimator {
    bars: Vec<SkillProgress>,
}

impl SkillBarAnimator {
    pub fn new(bars: Vec<SkillProgress>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[SkillProgress] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// True once every bar has reached its target
    pub fn is_complete(&self) -> bool {
        self.bars.iter().all(SkillProgress::is_complete)
    }

    /// Advance every unfinished bar and return the new levels
    pub fn tick(&mut self) -> Vec<(NodeId, u32)> {
        self.bars
            .iter_mut()
            .filter_map(|bar| bar.advance().map(|level| (bar.node, level)))
            .collect()
    }
}
