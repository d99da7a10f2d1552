//! Custom cursor
//!
//! Two dots chase the pointer with continuous pursuit: a small cursor with a
//! quick factor and a larger follower that lags behind. Hover, press and
//! window presence only toggle flags and opacity.

use std::sync::Arc;

use obscura_animation::{ContinuousAnimation, ContinuousSession, SchedulerHandle};
use obscura_core::{InputSnapshot, Point};
use parking_lot::Mutex;

use crate::config::CursorConfig;
use crate::error::Result;

/// What one cursor element should look like this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorVisual {
    pub position: Point,
    pub opacity: f32,
    pub hover: bool,
    pub active: bool,
}

impl CursorVisual {
    fn at_origin(opacity: f32) -> Self {
        Self {
            position: Point::ZERO,
            opacity,
            hover: false,
            active: false,
        }
    }
}

/// Pointer-following cursor and trailing ring
pub struct CustomCursor {
    config: CursorConfig,
    cursor: Arc<Mutex<CursorVisual>>,
    follower: Arc<Mutex<CursorVisual>>,
    cursor_anim: ContinuousAnimation,
    follower_anim: ContinuousAnimation,
}

impl CustomCursor {
    pub fn new(handle: SchedulerHandle, config: CursorConfig) -> Self {
        let follower_opacity = config.follower_opacity;
        Self {
            config,
            cursor: Arc::new(Mutex::new(CursorVisual::at_origin(1.0))),
            follower: Arc::new(Mutex::new(CursorVisual::at_origin(follower_opacity))),
            cursor_anim: ContinuousAnimation::new(handle.clone()),
            follower_anim: ContinuousAnimation::new(handle),
        }
    }

    /// Start both pursuits from wherever the dots currently are
    pub fn start(&mut self) -> Result<()> {
        Self::pursue(
            &mut self.cursor_anim,
            &self.cursor,
            self.config.cursor_factor,
            self.config.settle_epsilon,
        )?;
        Self::pursue(
            &mut self.follower_anim,
            &self.follower,
            self.config.follower_factor,
            self.config.settle_epsilon,
        )?;
        tracing::debug!(
            cursor_factor = self.config.cursor_factor,
            follower_factor = self.config.follower_factor,
            "custom cursor started"
        );
        Ok(())
    }

    fn pursue(
        anim: &mut ContinuousAnimation,
        visual: &Arc<Mutex<CursorVisual>>,
        factor: f32,
        settle_epsilon: Option<f32>,
    ) -> Result<()> {
        let mut session = ContinuousSession::new(visual.lock().position, factor)?;
        if let Some(epsilon) = settle_epsilon {
            session = session.with_settle_epsilon(epsilon)?;
        }
        let sink = Arc::clone(visual);
        anim.start(
            session,
            |input: &InputSnapshot| input.pointer,
            move |position| sink.lock().position = position,
        )?;
        Ok(())
    }

    /// The pointer moved; wakes any pursuit that settled
    pub fn pointer_moved(&mut self) -> Result<()> {
        if !self.cursor_anim.is_running() {
            Self::pursue(
                &mut self.cursor_anim,
                &self.cursor,
                self.config.cursor_factor,
                self.config.settle_epsilon,
            )?;
        }
        if !self.follower_anim.is_running() {
            Self::pursue(
                &mut self.follower_anim,
                &self.follower,
                self.config.follower_factor,
                self.config.settle_epsilon,
            )?;
        }
        Ok(())
    }

    /// Pointer is over an interactive element
    pub fn set_hover(&self, hover: bool) {
        self.cursor.lock().hover = hover;
        self.follower.lock().hover = hover;
    }

    pub fn pointer_down(&self) {
        self.cursor.lock().active = true;
    }

    pub fn pointer_up(&self) {
        self.cursor.lock().active = false;
    }

    pub fn window_left(&self) {
        self.cursor.lock().opacity = 0.0;
        self.follower.lock().opacity = 0.0;
    }

    pub fn window_entered(&self) {
        self.cursor.lock().opacity = 1.0;
        self.follower.lock().opacity = self.config.follower_opacity;
    }

    pub fn cursor(&self) -> CursorVisual {
        *self.cursor.lock()
    }

    pub fn follower(&self) -> CursorVisual {
        *self.follower.lock()
    }

    /// Stop both pursuits (page teardown)
    pub fn stop(&mut self) {
        self.cursor_anim.cancel();
        self.follower_anim.cancel();
    }
}
