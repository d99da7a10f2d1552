//! Scroll-linked effects
//!
//! Everything here is a pure function of the scroll offset except
//! [`SmoothScroller`], which animates the offset itself toward an anchor.

use std::sync::{Arc, OnceLock};

use obscura_animation::{Easing, FixedAnimation, SchedulerHandle};
use obscura_core::InputSnapshot;
use parking_lot::Mutex;
use regex::Regex;

use crate::error::Result;

/// Reading progress in percent, clamped to `[0, 100]`
///
/// A document that does not scroll reports 0.
pub fn scroll_progress(input: &InputSnapshot) -> f32 {
    let scrollable = input.document_height - input.viewport.height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (input.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Hero content transform for a given scroll offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroContent {
    pub translate_y: f32,
    pub opacity: f32,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            translate_y: 0.0,
            opacity: 1.0,
        }
    }
}

/// Hero drifts down and fades out while it is on screen
#[derive(Clone, Debug)]
pub struct HeroParallax {
    hero_height: f32,
    factor: f32,
    content: HeroContent,
}

impl HeroParallax {
    pub fn new(hero_height: f32, factor: f32) -> Self {
        Self {
            hero_height,
            factor,
            content: HeroContent::default(),
        }
    }

    /// Update for `scroll_y`; past the hero the last value is kept
    pub fn update(&mut self, scroll_y: f32) -> HeroContent {
        if scroll_y < self.hero_height {
            self.content = HeroContent {
                translate_y: scroll_y * self.factor,
                opacity: 1.0 - scroll_y / self.hero_height,
            };
        }
        self.content
    }

    pub fn content(&self) -> HeroContent {
        self.content
    }
}

fn leading_float() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid float pattern")
    })
}

/// Parse a `data-parallax` speed
///
/// Reads the leading number of the attribute. Missing, unparsable and zero
/// speeds all fall back to `default`.
pub fn parse_parallax_speed(attr: Option<&str>, default: f32) -> f32 {
    attr.and_then(|text| leading_float().find(text))
        .and_then(|m| m.as_str().trim().parse::<f32>().ok())
        .filter(|speed| *speed != 0.0 && speed.is_finite())
        .unwrap_or(default)
}

/// A layer that scrolls at its own speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    pub speed: f32,
    pub translate_y: f32,
}

impl ParallaxLayer {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            translate_y: 0.0,
        }
    }

    pub fn from_attr(attr: Option<&str>, default: f32) -> Self {
        Self::new(parse_parallax_speed(attr, default))
    }

    pub fn update(&mut self, scroll_y: f32) -> f32 {
        self.translate_y = -(scroll_y * self.speed);
        self.translate_y
    }
}

/// Scroll offset that puts an anchor just under the fixed header
///
/// `element_top` is in viewport coordinates. A bare `"#"` link has no target.
pub fn anchor_destination(
    href: &str,
    element_top: f32,
    scroll_y: f32,
    header_offset: f32,
) -> Option<f32> {
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    Some(element_top + scroll_y - header_offset)
}

/// Animates the page scroll offset
///
/// The host (or page) applies [`SmoothScroller::take_request`] each frame.
pub struct SmoothScroller {
    duration_ms: f64,
    request: Arc<Mutex<Option<f32>>>,
    anim: FixedAnimation,
}

impl SmoothScroller {
    pub fn new(handle: SchedulerHandle, duration_ms: f64) -> Self {
        Self {
            duration_ms,
            request: Arc::new(Mutex::new(None)),
            anim: FixedAnimation::new(handle),
        }
    }

    /// Scroll from the current offset to `destination`, clamped to the document
    pub fn scroll_to(&mut self, input: &InputSnapshot, destination: f32) -> Result<()> {
        let from = input.scroll_y;
        let to = destination.clamp(0.0, input.max_scroll());
        if (to - from).abs() < f32::EPSILON {
            self.anim.cancel();
            return Ok(());
        }

        tracing::debug!(from, to, "smooth scroll");
        let sink = Arc::clone(&self.request);
        self.anim.start(
            self.duration_ms,
            Easing::EaseInOutCubic,
            move |eased| *sink.lock() = Some(from + (to - from) * eased),
            || {},
        )?;
        Ok(())
    }

    /// The offset written since the last call, if any
    pub fn take_request(&self) -> Option<f32> {
        self.request.lock().take()
    }

    pub fn is_scrolling(&self) -> bool {
        self.anim.is_running()
    }
}
