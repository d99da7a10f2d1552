//! Shared input snapshot
//!
//! Pointer position, scroll offset and viewport dimensions are read by many
//! independent animations but written by exactly one place: the
//! [`InputTracker`]. Animations never reach for ambient globals; each frame
//! they are handed `&InputSnapshot`.

use crate::geometry::{Point, Rect, Size};

/// Keys the page reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a host key name (`KeyboardEvent.key` style) to a [`Key`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Read-only view of the host input state for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    /// Last known pointer position in viewport coordinates
    pub pointer: Point,
    /// Whether the pointer is currently inside the window
    pub pointer_inside: bool,
    /// Whether the primary button is held
    pub pointer_down: bool,
    /// Vertical page scroll offset
    pub scroll_y: f32,
    /// Viewport (window inner) size
    pub viewport: Size,
    /// Total scrollable document height
    pub document_height: f32,
    /// Monotonic frame counter, bumped once per host frame
    pub frame: u64,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            pointer: Point::ZERO,
            pointer_inside: true,
            pointer_down: false,
            scroll_y: 0.0,
            viewport: Size::ZERO,
            document_height: 0.0,
            frame: 0,
        }
    }
}

impl InputSnapshot {
    /// Viewport rectangle at the origin
    pub fn viewport_rect(&self) -> Rect {
        self.viewport.to_rect()
    }

    /// Largest scroll offset the document allows (never negative)
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}

/// The single writer of [`InputSnapshot`]
#[derive(Debug, Default)]
pub struct InputTracker {
    snapshot: InputSnapshot,
}

impl InputTracker {
    pub fn new(viewport: Size, document_height: f32) -> Self {
        Self {
            snapshot: InputSnapshot {
                viewport,
                document_height,
                ..Default::default()
            },
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.snapshot.pointer = position;
        self.snapshot.pointer_inside = true;
    }

    pub fn pointer_pressed(&mut self) {
        self.snapshot.pointer_down = true;
    }

    pub fn pointer_released(&mut self) {
        self.snapshot.pointer_down = false;
    }

    pub fn pointer_left_window(&mut self) {
        self.snapshot.pointer_inside = false;
    }

    pub fn pointer_entered_window(&mut self) {
        self.snapshot.pointer_inside = true;
    }

    pub fn scrolled(&mut self, scroll_y: f32) {
        self.snapshot.scroll_y = scroll_y.max(0.0);
    }

    pub fn resized(&mut self, viewport: Size) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.snapshot.viewport = viewport;
    }

    pub fn set_document_height(&mut self, height: f32) {
        self.snapshot.document_height = height.max(0.0);
    }

    /// Advance the frame counter and return the snapshot for this frame
    pub fn begin_frame(&mut self) -> &InputSnapshot {
        self.snapshot.frame += 1;
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_writes_snapshot() {
        let mut tracker = InputTracker::new(Size::new(1280.0, 720.0), 3000.0);
        tracker.pointer_moved(Point::new(40.0, 60.0));
        tracker.scrolled(250.0);

        let snap = tracker.snapshot();
        assert_eq!(snap.pointer, Point::new(40.0, 60.0));
        assert_eq!(snap.scroll_y, 250.0);
        assert_eq!(snap.max_scroll(), 2280.0);
    }

    #[test]
    fn test_pointer_window_presence() {
        let mut tracker = InputTracker::default();
        tracker.pointer_left_window();
        assert!(!tracker.snapshot().pointer_inside);
        tracker.pointer_moved(Point::new(1.0, 1.0));
        assert!(tracker.snapshot().pointer_inside);
    }

    #[test]
    fn test_begin_frame_counts() {
        let mut tracker = InputTracker::default();
        tracker.begin_frame();
        assert_eq!(tracker.begin_frame().frame, 2);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }

    #[test]
    fn test_short_document_has_no_scroll() {
        let tracker = InputTracker::new(Size::new(800.0, 900.0), 600.0);
        assert_eq!(tracker.snapshot().max_scroll(), 0.0);
    }
}
