//! Hover distortion on grid images
//!
//! Entering a grid item brings its image from grayscale into color with a
//! little extra contrast and zoom; leaving fades it back. A new hover
//! direction always cancels the one in flight.

use std::sync::Arc;

use obscura_animation::{Easing, FixedAnimation, SchedulerHandle};
use parking_lot::Mutex;

use crate::config::TimingConfig;
use crate::error::Result;

/// Filter and zoom applied to a grid image
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistortionFilter {
    /// Percent
    pub grayscale: f32,
    /// Percent
    pub contrast: f32,
    pub scale: f32,
}

impl DistortionFilter {
    /// Resting look: fully desaturated
    pub const REST: DistortionFilter = DistortionFilter {
        grayscale: 100.0,
        contrast: 100.0,
        scale: 1.0,
    };

    pub fn entering(eased: f32) -> Self {
        Self {
            grayscale: 100.0 - eased * 100.0,
            contrast: 100.0 + eased * 20.0,
            scale: 1.0 + eased * 0.05,
        }
    }

    pub fn leaving(eased: f32) -> Self {
        Self {
            grayscale: eased * 100.0,
            contrast: 100.0,
            scale: 1.0,
        }
    }

    /// CSS `filter` value
    pub fn filter_css(&self) -> String {
        format!("grayscale({}%) contrast({}%)", self.grayscale, self.contrast)
    }

    /// CSS `transform` value
    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }
}

impl Default for DistortionFilter {
    fn default() -> Self {
        Self::REST
    }
}

pub struct HoverDistortion {
    enter_ms: f64,
    leave_ms: f64,
    filter: Arc<Mutex<DistortionFilter>>,
    anim: FixedAnimation,
}

impl HoverDistortion {
    pub fn new(handle: SchedulerHandle, timing: &TimingConfig, duration_scale: f64) -> Self {
        Self {
            enter_ms: timing.distortion_enter_ms * duration_scale,
            leave_ms: timing.distortion_leave_ms * duration_scale,
            filter: Arc::new(Mutex::new(DistortionFilter::REST)),
            anim: FixedAnimation::new(handle),
        }
    }

    pub fn pointer_entered(&mut self) -> Result<()> {
        let sink = Arc::clone(&self.filter);
        self.anim.start(
            self.enter_ms,
            Easing::EaseOutQuart,
            move |eased| *sink.lock() = DistortionFilter::entering(eased),
            || {},
        )?;
        Ok(())
    }

    pub fn pointer_left(&mut self) -> Result<()> {
        let sink = Arc::clone(&self.filter);
        self.anim.start(
            self.leave_ms,
            Easing::EaseOutCubic,
            move |eased| *sink.lock() = DistortionFilter::leaving(eased),
            || {},
        )?;
        Ok(())
    }

    pub fn filter(&self) -> DistortionFilter {
        *self.filter.lock()
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_running()
    }
}
