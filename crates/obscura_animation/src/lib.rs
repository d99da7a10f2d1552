//! Obscura Animation
//!
//! The frame-driven interpolator behind every moving part of the page.
//!
//! # Features
//!
//! - **Continuous Pursuit**: exponential smoothing toward a target re-read
//!   from the input snapshot each frame (cursor trail, magnetic tilt)
//! - **Fixed Duration**: eased 0 to 1 progress over a bounded time (counters,
//!   hover distortion, timers)
//! - **Explicit Sessions**: `Idle`, `Running`, `Completed`, `Cancelled`
//!   state machines instead of self-rescheduling callbacks
//! - **Scheduler**: one loop ticks every session per frame; cancellation is
//!   idempotent and takes effect before the next callback

pub mod animated;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod values;

pub use animated::{ContinuousAnimation, FixedAnimation};
pub use easing::{Easing, EasingFn};
pub use error::{AnimationError, Result};
pub use scheduler::{
    AnimationScheduler, CompleteCallback, ProgressCallback, SchedulerHandle, SessionId,
    SessionKind,
};
pub use session::{ContinuousSession, FixedDurationSession, FixedStep, SessionState};
pub use values::Interpolate;
