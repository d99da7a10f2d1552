//! Fullscreen image viewer
//!
//! The gallery is collected from the grid once. The viewer only tracks which
//! entry is showing and whether it is open; keyboard and swipe input are
//! ignored while it is closed.

use obscura_core::Key;

/// One image in the gallery
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub title: String,
    pub category: String,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            category: category.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lightbox {
    images: Vec<GalleryImage>,
    current: usize,
    open: bool,
    touch_start_x: Option<f32>,
    swipe_threshold: f32,
}

impl Lightbox {
    pub fn new(images: Vec<GalleryImage>, swipe_threshold: f32) -> Self {
        Self {
            images,
            current: 0,
            open: false,
            touch_start_x: None,
            swipe_threshold,
        }
    }

    /// Open on the image with `src`, or the first image if it is unknown
    ///
    /// Does nothing for an empty gallery.
    pub fn open(&mut self, src: &str) {
        if self.images.is_empty() {
            tracing::debug!("lightbox has no images");
            return;
        }
        self.current = self.images.iter().position(|img| img.src == src).unwrap_or(0);
        self.open = true;
        tracing::debug!(index = self.current, "lightbox opened");
    }

    pub fn close(&mut self) {
        self.open = false;
        self.touch_start_x = None;
    }

    pub fn prev(&mut self) {
        let len = self.images.len();
        if len > 0 {
            self.current = (self.current + len - 1) % len;
        }
    }

    pub fn next(&mut self) {
        let len = self.images.len();
        if len > 0 {
            self.current = (self.current + 1) % len;
        }
    }

    /// Escape closes, arrows navigate; ignored while closed
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Other => return false,
        }
        true
    }

    /// Click on the dimmed area around the image
    pub fn backdrop_clicked(&mut self) {
        if self.open {
            self.close();
        }
    }

    pub fn touch_started(&mut self, x: f32) {
        if self.open {
            self.touch_start_x = Some(x);
        }
    }

    /// Finish a swipe; a leftward swipe shows the next image
    pub fn touch_ended(&mut self, x: f32) {
        let Some(start) = self.touch_start_x.take() else {
            return;
        };
        let diff = start - x;
        if diff.abs() > self.swipe_threshold {
            if diff > 0.0 {
                self.next();
            } else {
                self.prev();
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn locks_scroll(&self) -> bool {
        self.open
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.images.get(self.current)
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Lightbox {
        Lightbox::new(
            vec![
                GalleryImage::new("a.jpg", "Dunes", "Landscape"),
                GalleryImage::new("b.jpg", "Market", "Street"),
                GalleryImage::new("c.jpg", "Portrait I", "Portrait"),
            ],
            50.0,
        )
    }

    #[test]
    fn test_open_by_src_with_fallback() {
        let mut lightbox = gallery();
        lightbox.open("b.jpg");
        assert!(lightbox.is_open());
        assert_eq!(lightbox.current().unwrap().title, "Market");

        lightbox.close();
        lightbox.open("missing.jpg");
        assert_eq!(lightbox.current_index(), 0);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut lightbox = gallery();
        lightbox.open("a.jpg");
        lightbox.prev();
        assert_eq!(lightbox.current_index(), 2);
        lightbox.next();
        assert_eq!(lightbox.current_index(), 0);
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut lightbox = gallery();
        assert!(!lightbox.key_pressed(Key::ArrowRight));
        assert_eq!(lightbox.current_index(), 0);

        lightbox.open("a.jpg");
        assert!(lightbox.key_pressed(Key::ArrowRight));
        assert_eq!(lightbox.current_index(), 1);
        assert!(lightbox.key_pressed(Key::Escape));
        assert!(!lightbox.locks_scroll());
    }

    #[test]
    fn test_swipe_threshold() {
        let mut lightbox = gallery();
        lightbox.open("b.jpg");

        lightbox.touch_started(300.0);
        lightbox.touch_ended(260.0);
        assert_eq!(lightbox.current_index(), 1);

        lightbox.touch_started(300.0);
        lightbox.touch_ended(200.0);
        assert_eq!(lightbox.current_index(), 2);

        lightbox.touch_started(100.0);
        lightbox.touch_ended(200.0);
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn test_empty_gallery_stays_closed() {
        let mut lightbox = Lightbox::new(Vec::new(), 50.0);
        lightbox.open("a.jpg");
        assert!(!lightbox.is_open());
        lightbox.next();
        assert!(lightbox.current().is_none());
    }
}
