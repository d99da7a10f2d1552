//! Visibility observation
//!
//! A headless stand-in for intersection observation. Elements are registered
//! with their bounds in document coordinates; each check projects them into
//! the viewport using the snapshot's scroll offset and reports the ones that
//! crossed the threshold for the first time. Reported elements are
//! unobserved, so each fires at most once.

use obscura_core::{InputSnapshot, Rect};
use smallvec::SmallVec;

/// Threshold and root margin for one observer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be inside the root (0.0 to 1.0)
    pub threshold: f32,
    /// Horizontal root margin in pixels (grows the viewport when positive)
    pub margin_x: f32,
    /// Vertical root margin in pixels
    pub margin_y: f32,
}

impl ObserverOptions {
    pub fn threshold(threshold: f32) -> Self {
        Self {
            threshold,
            margin_x: 0.0,
            margin_y: 0.0,
        }
    }

    pub fn with_margin(mut self, margin_x: f32, margin_y: f32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }
}

/// Fraction of `target` that lies inside `root`
///
/// Zero-area targets count as fully visible when they sit inside the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f32 {
    let area = target.size.area();
    if area <= 0.0 {
        return if root.contains(target.origin) { 1.0 } else { 0.0 };
    }
    target
        .intersection(root)
        .map(|overlap| (overlap.size.area() / area).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Fires once per element when it first becomes visible enough
#[derive(Clone, Debug)]
pub struct VisibilityObserver<K> {
    options: ObserverOptions,
    supported: bool,
    observed: Vec<(K, Rect)>,
}

impl<K: Copy + PartialEq> VisibilityObserver<K> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            supported: true,
            observed: Vec::new(),
        }
    }

    /// Observer for a host without intersection support
    ///
    /// Every observed element is reported on the next check regardless of
    /// position.
    pub fn unsupported(options: ObserverOptions) -> Self {
        Self {
            supported: false,
            ..Self::new(options)
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Start observing `key` at `document_rect`
    pub fn observe(&mut self, key: K, document_rect: Rect) {
        if let Some(entry) = self.observed.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = document_rect;
        } else {
            self.observed.push((key, document_rect));
        }
    }

    pub fn unobserve(&mut self, key: K) {
        self.observed.retain(|(k, _)| *k != key);
    }

    pub fn is_observing(&self, key: K) -> bool {
        self.observed.iter().any(|(k, _)| *k == key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Report (and unobserve) every element now visible, in observation order
    pub fn check(&mut self, input: &InputSnapshot) -> SmallVec<[K; 8]> {
        let root = input
            .viewport_rect()
            .outset(self.options.margin_x, self.options.margin_y);
        let threshold = self.options.threshold;
        let supported = self.supported;

        let mut fired = SmallVec::new();
        self.observed.retain(|(key, rect)| {
            let visible = !supported || {
                let in_viewport = rect.offset(0.0, -input.scroll_y);
                let ratio = intersection_ratio(&in_viewport, &root);
                // a zero threshold still requires some overlap
                if threshold <= 0.0 {
                    ratio > 0.0
                } else {
                    ratio >= threshold
                }
            };
            if visible {
                fired.push(*key);
            }
            !visible
        });

        if !fired.is_empty() {
            tracing::trace!(count = fired.len(), "elements became visible");
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obscura_core::Size;

    fn snapshot(scroll_y: f32) -> InputSnapshot {
        InputSnapshot {
            viewport: Size::new(1000.0, 800.0),
            document_height: 4000.0,
            scroll_y,
            ..Default::default()
        }
    }

    #[test]
    fn test_intersection_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 50.0, 100.0, 100.0), &root), 0.5);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 200.0, 10.0, 10.0), &root), 0.0);
        assert_eq!(intersection_ratio(&Rect::new(10.0, 10.0, 0.0, 0.0), &root), 1.0);
    }

    #[test]
    fn test_fires_once_when_threshold_crossed() {
        let mut observer = VisibilityObserver::new(ObserverOptions::threshold(0.5));
        observer.observe(7_usize, Rect::new(0.0, 1000.0, 200.0, 200.0));

        assert!(observer.check(&snapshot(0.0)).is_empty());
        // 100 of 200 px visible
        assert_eq!(observer.check(&snapshot(300.0)).as_slice(), &[7]);
        assert!(observer.check(&snapshot(600.0)).is_empty());
        assert!(!observer.is_observing(7));
    }

    #[test]
    fn test_root_margin_extends_viewport() {
        let options = ObserverOptions::threshold(0.01).with_margin(0.0, 50.0);
        let mut observer = VisibilityObserver::new(options);
        // starts 30 px below the fold
        observer.observe(1_usize, Rect::new(0.0, 830.0, 100.0, 100.0));
        assert_eq!(observer.check(&snapshot(0.0)).as_slice(), &[1]);

        let mut strict = VisibilityObserver::new(ObserverOptions::threshold(0.01));
        strict.observe(1_usize, Rect::new(0.0, 830.0, 100.0, 100.0));
        assert!(strict.check(&snapshot(0.0)).is_empty());
    }

    #[test]
    fn test_unsupported_reports_everything() {
        let mut observer = VisibilityObserver::unsupported(ObserverOptions::threshold(0.1));
        observer.observe(1_usize, Rect::new(0.0, 3000.0, 10.0, 10.0));
        observer.observe(2_usize, Rect::new(0.0, 3500.0, 10.0, 10.0));
        assert_eq!(observer.check(&snapshot(0.0)).as_slice(), &[1, 2]);
        assert_eq!(observer.observed_count(), 0);
    }
}
