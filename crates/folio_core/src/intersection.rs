//! Viewport intersection tracking
//!
//! An [`IntersectionObserver`] keeps the last known visibility of each target
//! and, on every [`check`](IntersectionObserver::check), reports the targets
//! whose visibility changed. The first check after `observe` always reports,
//! mirroring the initial callback browsers deliver on registration.
//!
//! Visibility is computed on the vertical axis only: pages scroll vertically
//! and element widths are not part of the layout contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};
use crate::geometry::{Margin, Rect};

/// Threshold and root margin of an observer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible (0.0 - 1.0)
    pub threshold: f32,
    /// Adjustment applied to the viewport before testing
    pub root_margin: Margin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: Margin::default(),
        }
    }
}

impl ObserverOptions {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_root_margin(mut self, margin: Margin) -> Self {
        self.root_margin = margin;
        self
    }
}

/// A visibility change of one target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f32,
}

/// Fraction of `target` visible inside `root`
///
/// Zero-height targets count as fully visible while their top edge lies
/// inside the root.
pub fn intersection_ratio(target: Rect, root: Rect) -> f32 {
    if target.height <= 0.0 {
        return if root.contains_y(target.top()) { 1.0 } else { 0.0 };
    }
    (target.vertical_overlap(&root) / target.height).clamp(0.0, 1.0)
}

/// Tracks a set of elements against the viewport
#[derive(Clone, Debug, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    /// Target -> last reported intersecting state (`None` until first check)
    targets: IndexMap<NodeId, Option<bool>>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: IndexMap::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn observe(&mut self, target: NodeId) {
        self.targets.entry(target).or_insert(None);
    }

    pub fn unobserve(&mut self, target: NodeId) {
        self.targets.shift_remove(&target);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.targets.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Test every target against `viewport` and return the changes
    ///
    /// Targets that have been removed from the document are dropped.
    pub fn check(&mut self, doc: &Document, viewport: Rect) -> Vec<IntersectionEntry> {
        let root = viewport.expand(self.options.root_margin);
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        self.targets.retain(|target, last| {
            let Some(layout) = doc.layout(*target) else {
                return false;
            };
            let ratio = intersection_ratio(layout, root);
            let is_intersecting = ratio > 0.0 && ratio >= threshold;

            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: *target,
                    is_intersecting,
                    ratio,
                });
            }
            true
        });

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn doc_with(top: f32, height: f32) -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let node = doc.append(
            body,
            Element::new("div").with_layout(Rect::band(top, height)),
        );
        (doc, node)
    }

    #[test]
    fn test_initial_check_always_reports() {
        let (doc, node) = doc_with(2000.0, 100.0);
        let mut observer = IntersectionObserver::new(ObserverOptions::new(0.1));
        observer.observe(node);

        let entries = observer.check(&doc, Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // Unchanged visibility is not reported again
        assert!(observer
            .check(&doc, Rect::new(0.0, 10.0, 1280.0, 800.0))
            .is_empty());
    }

    #[test]
    fn test_threshold_and_root_margin() {
        let (doc, node) = doc_with(740.0, 100.0);
        let mut observer = IntersectionObserver::new(
            ObserverOptions::new(0.1).with_root_margin(Margin::bottom(-50.0)),
        );
        observer.observe(node);

        // Root ends at 750: only 10px (10%) visible, exactly at threshold
        let entries = observer.check(&doc, Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert!(entries[0].is_intersecting);

        // Scroll up a little: 5px visible, below threshold
        let entries = observer.check(&doc, Rect::new(0.0, -5.0, 1280.0, 800.0));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_removed_targets_are_dropped() {
        let (mut doc, node) = doc_with(0.0, 100.0);
        let mut observer = IntersectionObserver::new(ObserverOptions::default());
        observer.observe(node);
        doc.remove(node);

        assert!(observer
            .check(&doc, Rect::new(0.0, 0.0, 1280.0, 800.0))
            .is_empty());
        assert!(observer.is_empty());
    }
}
