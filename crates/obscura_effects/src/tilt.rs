//! Pointer-relative hover transforms
//!
//! Grid items tilt toward the pointer and the submit button drifts after it.
//! Both are a continuous pursuit whose target is computed from the pointer's
//! position relative to the element's on-screen bounds, and both fall back to
//! a rest value when the pointer leaves.

use std::sync::Arc;

use obscura_animation::{ContinuousAnimation, ContinuousSession, Interpolate, SchedulerHandle};
use obscura_core::{InputSnapshot, Point, Rect, Vec2};
use parking_lot::Mutex;

use crate::config::TiltConfig;
use crate::error::Result;

/// 3D hover transform of a grid item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltTransform {
    /// Degrees around the horizontal axis
    pub rotate_x: f32,
    /// Degrees around the vertical axis
    pub rotate_y: f32,
    pub scale: f32,
}

impl TiltTransform {
    pub const REST: TiltTransform = TiltTransform {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// CSS transform value
    pub fn css(&self, perspective: f32) -> String {
        format!(
            "perspective({perspective}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self::REST
    }
}

impl Interpolate for TiltTransform {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            rotate_x: Interpolate::lerp(&self.rotate_x, &other.rotate_x, t),
            rotate_y: Interpolate::lerp(&self.rotate_y, &other.rotate_y, t),
            scale: Interpolate::lerp(&self.scale, &other.scale, t),
        }
    }

    fn distance(&self, other: &Self) -> f32 {
        self.rotate_x
            .distance(&other.rotate_x)
            .max(self.rotate_y.distance(&other.rotate_y))
            .max(self.scale.distance(&other.scale))
    }
}

/// Tilt for `pointer` over `rect` (both in viewport coordinates)
pub fn tilt_for(rect: &Rect, pointer: Point, config: &TiltConfig) -> TiltTransform {
    let x = pointer.x - rect.x();
    let y = pointer.y - rect.y();
    let center_x = rect.width() / 2.0;
    let center_y = rect.height() / 2.0;
    TiltTransform {
        rotate_x: (y - center_y) / config.divisor,
        rotate_y: (center_x - x) / config.divisor,
        scale: config.hover_scale,
    }
}

/// Translation of a magnetic element toward `pointer`
pub fn magnetic_offset(rect: &Rect, pointer: Point, strength: f32) -> Vec2 {
    pointer.offset_from(rect.center()).scale(strength)
}

type Respond<T> = Arc<dyn Fn(&Rect, Point) -> T + Send + Sync>;

/// Pursues a pointer-derived target while hovered and `rest` otherwise
struct PointerFollow<T: Interpolate + Copy> {
    document_rect: Rect,
    rest: T,
    factor: f32,
    settle_epsilon: f32,
    respond: Respond<T>,
    value: Arc<Mutex<T>>,
    hovered: bool,
    anim: ContinuousAnimation,
}

impl<T: Interpolate + Copy> PointerFollow<T> {
    fn new(
        handle: SchedulerHandle,
        document_rect: Rect,
        rest: T,
        config: &TiltConfig,
        respond: Respond<T>,
    ) -> Self {
        Self {
            document_rect,
            rest,
            factor: config.factor,
            settle_epsilon: config.settle_epsilon,
            respond,
            value: Arc::new(Mutex::new(rest)),
            hovered: false,
            anim: ContinuousAnimation::new(handle),
        }
    }

    fn screen_rect(&self, input: &InputSnapshot) -> Rect {
        self.document_rect.offset(0.0, -input.scroll_y)
    }

    fn is_over(&self, input: &InputSnapshot) -> bool {
        input.pointer_inside && self.screen_rect(input).contains(input.pointer)
    }

    fn pointer_moved(&mut self, input: &InputSnapshot) -> Result<()> {
        let over = self.is_over(input);
        if over && (!self.hovered || !self.anim.is_running()) {
            self.hovered = true;
            self.follow_pointer()?;
        } else if !over && self.hovered {
            self.leave()?;
        }
        Ok(())
    }

    fn follow_pointer(&mut self) -> Result<()> {
        let session = self.session()?;
        let rect = self.document_rect;
        let respond = Arc::clone(&self.respond);
        let sink = Arc::clone(&self.value);
        self.anim.start(
            session,
            move |input: &InputSnapshot| respond(&rect.offset(0.0, -input.scroll_y), input.pointer),
            move |value| *sink.lock() = value,
        )?;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.hovered = false;
        let session = self.session()?;
        let rest = self.rest;
        let sink = Arc::clone(&self.value);
        self.anim
            .start(session, move |_: &InputSnapshot| rest, move |value| *sink.lock() = value)?;
        Ok(())
    }

    fn session(&self) -> Result<ContinuousSession<T>> {
        let current = *self.value.lock();
        Ok(ContinuousSession::new(current, self.factor)?.with_settle_epsilon(self.settle_epsilon)?)
    }

    fn value(&self) -> T {
        *self.value.lock()
    }
}

/// Tilting grid item
pub struct TiltCard {
    follow: PointerFollow<TiltTransform>,
    perspective: f32,
}

impl TiltCard {
    pub fn new(handle: SchedulerHandle, document_rect: Rect, config: &TiltConfig) -> Self {
        let tilt_config = config.clone();
        let respond: Respond<TiltTransform> =
            Arc::new(move |rect: &Rect, pointer: Point| tilt_for(rect, pointer, &tilt_config));
        Self {
            follow: PointerFollow::new(handle, document_rect, TiltTransform::REST, config, respond),
            perspective: config.perspective,
        }
    }

    /// Route a pointer move; entering, moving and leaving are derived from bounds
    pub fn pointer_moved(&mut self, input: &InputSnapshot) -> Result<()> {
        self.follow.pointer_moved(input)
    }

    /// Pointer left the element by other means (window exit)
    pub fn pointer_left(&mut self) -> Result<()> {
        if self.follow.hovered {
            self.follow.leave()?;
        }
        Ok(())
    }

    pub fn is_hovered(&self) -> bool {
        self.follow.hovered
    }

    pub fn transform(&self) -> TiltTransform {
        self.follow.value()
    }

    pub fn css(&self) -> String {
        self.transform().css(self.perspective)
    }
}

/// Button that drifts toward the pointer
pub struct MagneticButton {
    follow: PointerFollow<Vec2>,
}

impl MagneticButton {
    pub fn new(handle: SchedulerHandle, document_rect: Rect, config: &TiltConfig) -> Self {
        let strength = config.magnetic_strength;
        let respond: Respond<Vec2> =
            Arc::new(move |rect: &Rect, pointer: Point| magnetic_offset(rect, pointer, strength));
        Self {
            follow: PointerFollow::new(handle, document_rect, Vec2::ZERO, config, respond),
        }
    }

    pub fn pointer_moved(&mut self, input: &InputSnapshot) -> Result<()> {
        self.follow.pointer_moved(input)
    }

    pub fn pointer_left(&mut self) -> Result<()> {
        if self.follow.hovered {
            self.follow.leave()?;
        }
        Ok(())
    }

    pub fn is_hovered(&self) -> bool {
        self.follow.hovered
    }

    pub fn translation(&self) -> Vec2 {
        self.follow.value()
    }

    pub fn css(&self) -> String {
        let t = self.translation();
        format!("translate({}px, {}px)", t.x, t.y)
    }
}
