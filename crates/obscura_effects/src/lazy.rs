//! Deferred image loading

/// An image whose real source is held back until it nears the viewport
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LazyImage {
    /// Source currently set on the element
    pub src: Option<String>,
    /// Source waiting to be swapped in (`data-src`)
    pub pending_src: Option<String>,
    pub loaded: bool,
}

impl LazyImage {
    pub fn new(pending_src: impl Into<String>) -> Self {
        Self {
            src: None,
            pending_src: Some(pending_src.into()),
            loaded: false,
        }
    }

    /// Swap the pending source in without marking the image loaded
    pub fn swap_source(&mut self) {
        if let Some(src) = self.pending_src.take() {
            tracing::trace!(%src, "lazy image source swapped");
            self.src = Some(src);
        }
    }

    /// Swap the pending source in and mark the image loaded
    pub fn load(&mut self) {
        self.swap_source();
        self.loaded = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending_src.is_some()
    }
}

/// Swap every source in at once, for hosts without visibility observation
///
/// The images are not marked `loaded`.
pub fn load_all(images: &mut [LazyImage]) {
    for image in images.iter_mut() {
        image.swap_source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_swaps_source() {
        let mut image = LazyImage::new("photos/dunes.jpg");
        assert!(image.is_pending());
        image.load();
        assert_eq!(image.src.as_deref(), Some("photos/dunes.jpg"));
        assert!(image.loaded);
        assert!(!image.is_pending());

        // loading again keeps the source
        image.load();
        assert_eq!(image.src.as_deref(), Some("photos/dunes.jpg"));
    }

    #[test]
    fn test_load_all() {
        let mut images = vec![LazyImage::new("a.jpg"), LazyImage::new("b.jpg")];
        load_all(&mut images);
        assert_eq!(images[1].src.as_deref(), Some("b.jpg"));
        assert!(images.iter().all(|image| !image.loaded && !image.is_pending()));
    }
}
