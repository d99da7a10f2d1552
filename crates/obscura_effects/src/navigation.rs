//! Fullscreen navigation overlay

use obscura_core::Key;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationMenu {
    open: bool,
}

impl NavigationMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hamburger button; returns the new open state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!(open = self.open, "menu toggled");
        self.open
    }

    /// A link inside the overlay was followed
    pub fn link_clicked(&mut self) {
        self.open = false;
    }

    /// Returns true if the key closed the menu
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.open {
            self.open = false;
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Page scrolling is locked while the overlay is open
    pub fn locks_scroll(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_close() {
        let mut menu = NavigationMenu::new();
        assert!(menu.toggle());
        assert!(menu.locks_scroll());
        assert!(!menu.toggle());

        menu.toggle();
        menu.link_clicked();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_only_closes_open_menu() {
        let mut menu = NavigationMenu::new();
        assert!(!menu.key_pressed(Key::Escape));
        menu.toggle();
        assert!(!menu.key_pressed(Key::ArrowLeft));
        assert!(menu.key_pressed(Key::Escape));
        assert!(!menu.is_open());
    }
}
