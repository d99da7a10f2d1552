//! Interpolation sessions
//!
//! A session is the explicit state of one logical animation: the value it is
//! pursuing, how it progresses, and where it is in its lifecycle. Sessions
//! are plain data with no callbacks and no clock of their own, so they can be
//! stepped directly in tests or driven by the
//! [`AnimationScheduler`](crate::scheduler::AnimationScheduler).
//!
//! Two modes exist:
//!
//! - [`ContinuousSession`]: exponential smoothing toward a target that may
//!   move every tick (`current += (target - current) * factor`)
//! - [`FixedDurationSession`]: eased progress from 0 to 1 over a fixed time

use crate::easing::Easing;
use crate::error::{validate_duration, validate_epsilon, validate_factor, Result};
use crate::values::Interpolate;

/// Lifecycle of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not ticked yet
    Idle,
    /// Ticked at least once and still producing values
    Running,
    /// Finished on its own (duration elapsed or settled)
    Completed,
    /// Stopped from outside
    Cancelled,
}

impl SessionState {
    /// Whether the session still wants ticks
    pub fn is_live(&self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Running)
    }
}

// ============================================================================
// Continuous pursuit
// ============================================================================

/// Exponential smoothing toward a (possibly moving) target
#[derive(Clone, Debug)]
pub struct ContinuousSession<T: Interpolate> {
    current: T,
    factor: f32,
    settle_epsilon: Option<f32>,
    state: SessionState,
}

impl<T: Interpolate> ContinuousSession<T> {
    /// Create a session starting at `initial`
    ///
    /// `factor` must lie in (0, 1]: 1 snaps to the target on the first tick.
    pub fn new(initial: T, factor: f32) -> Result<Self> {
        Ok(Self {
            current: initial,
            factor: validate_factor(factor)?,
            settle_epsilon: None,
            state: SessionState::Idle,
        })
    }

    /// Stop once within `epsilon` of the target
    ///
    /// Without an epsilon the session runs until cancelled.
    pub fn with_settle_epsilon(mut self, epsilon: f32) -> Result<Self> {
        self.settle_epsilon = Some(validate_epsilon(epsilon)?);
        Ok(self)
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn settle_epsilon(&self) -> Option<f32> {
        self.settle_epsilon
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Advance one tick toward `target`
    ///
    /// Returns the new value, or `None` once the session is no longer live.
    pub fn step(&mut self, target: &T) -> Option<T> {
        if !self.state.is_live() {
            return None;
        }
        self.state = SessionState::Running;
        self.current = self.current.lerp(target, self.factor);

        if let Some(epsilon) = self.settle_epsilon {
            if self.current.approx_eq(target, epsilon) {
                self.current = target.clone();
                self.state = SessionState::Completed;
            }
        }

        Some(self.current.clone())
    }

    pub fn cancel(&mut self) {
        if self.state.is_live() {
            self.state = SessionState::Cancelled;
        }
    }
}

// ============================================================================
// Fixed duration
// ============================================================================

/// One tick of a fixed-duration session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    /// Linear progress, clamped to [0, 1]
    pub progress: f32,
    /// Progress after easing
    pub eased: f32,
    /// Set on the tick that reached progress 1
    pub finished: bool,
}

/// Eased progress over a fixed duration
#[derive(Clone, Debug)]
pub struct FixedDurationSession {
    duration_ms: f64,
    easing: Easing,
    start_time: Option<f64>,
    state: SessionState,
}

impl FixedDurationSession {
    pub fn new(duration_ms: f64, easing: Easing) -> Result<Self> {
        Ok(Self {
            duration_ms: validate_duration(duration_ms)?,
            easing,
            start_time: None,
            state: SessionState::Idle,
        })
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Timestamp of the first tick, if any
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Linear progress at `now_ms` without advancing the session
    pub fn progress_at(&self, now_ms: f64) -> f32 {
        let Some(start) = self.start_time else {
            return if self.duration_ms <= 0.0 { 1.0 } else { 0.0 };
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Advance to `now_ms`
    ///
    /// The first call records the start time. Returns `None` once the
    /// session has completed or was cancelled.
    pub fn step(&mut self, now_ms: f64) -> Option<FixedStep> {
        if !self.state.is_live() {
            return None;
        }
        if self.start_time.is_none() {
            self.start_time = Some(now_ms);
            self.state = SessionState::Running;
        }

        let progress = self.progress_at(now_ms);
        let finished = progress >= 1.0;
        if finished {
            self.state = SessionState::Completed;
        }

        Some(FixedStep {
            progress,
            eased: self.easing.apply(progress),
            finished,
        })
    }

    pub fn cancel(&mut self) {
        if self.state.is_live() {
            self.state = SessionState::Cancelled;
        }
    }
}
