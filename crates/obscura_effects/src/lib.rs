//! Obscura Effects
//!
//! The interactive layer of a photographer's portfolio page, driven headless
//! by the `obscura_animation` scheduler.
//!
//! # Features
//!
//! - **Custom Cursor**: a dot and a trailing ring pursuing the pointer
//! - **Hover Transforms**: 3D tilt on grid items and a magnetic submit button
//! - **Hover Distortion**: grayscale to color with contrast and zoom
//! - **Counters**: stats that count up once when scrolled into view
//! - **Scroll Effects**: progress bar, hero parallax, parallax layers and
//!   smooth anchor scrolling
//! - **Overlays**: fullscreen menu, lightbox with keyboard and swipe, toasts
//! - **Entrance**: loader, hero title delays, staggered grid, reveal flags and
//!   lazy images
//! - **PortfolioPage**: one owner that routes host events and runs frames

pub mod config;
pub mod counter;
pub mod cursor;
pub mod distortion;
pub mod entrance;
pub mod error;
pub mod form;
pub mod lazy;
pub mod lightbox;
pub mod logging;
pub mod navigation;
pub mod notification;
pub mod page;
pub mod scroll;
pub mod tilt;
pub mod visibility;

pub use config::{
    CursorConfig, EffectsConfig, ScrollConfig, TiltConfig, TimingConfig, TransitionSpeeds,
    VisibilityConfig,
};
pub use counter::{parse_count, Counter};
pub use cursor::{CursorVisual, CustomCursor};
pub use distortion::{DistortionFilter, HoverDistortion};
pub use entrance::{GridItemVisual, GridReveal, HeroTitle, Loader, RevealSet};
pub use error::{EffectError, Result};
pub use form::{ContactForm, Field, FieldState, Rejection, SubmitOutcome};
pub use lazy::LazyImage;
pub use lightbox::{GalleryImage, Lightbox};
pub use navigation::NavigationMenu;
pub use notification::{
    Notification, NotificationCenter, NotificationId, NotificationKind, NotificationPhase,
};
pub use page::{
    AnchorLayout, CounterLayout, GridItemLayout, LazyImageLayout, PageEvent, PageLayout,
    PortfolioPage,
};
pub use scroll::{HeroContent, HeroParallax, ParallaxLayer, SmoothScroller};
pub use tilt::{MagneticButton, TiltCard, TiltTransform};
pub use visibility::{ObserverOptions, VisibilityObserver};

pub mod prelude {
    pub use crate::config::EffectsConfig;
    pub use crate::error::{EffectError, Result};
    pub use crate::form::Field;
    pub use crate::page::{PageEvent, PageLayout, PortfolioPage};
    pub use obscura_core::{Key, Point, Rect, Size};
}
