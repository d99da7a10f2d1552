//! Counting statistics
//!
//! A stat counts up from zero to its target once, the first time it is
//! mostly on screen.

use std::sync::Arc;

use obscura_animation::{Easing, FixedAnimation, SchedulerHandle};
use parking_lot::Mutex;

use crate::error::{EffectError, Result};

/// Parse a counter target the way a lenient integer parser would
///
/// Leading whitespace and an optional sign are accepted, then as many
/// decimal digits as follow. Trailing text is ignored (`"150+"` is 150).
pub fn parse_count(raw: &str) -> Result<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(EffectError::InvalidCount(raw.to_string()));
    }
    let value: i64 = digits[..end]
        .parse()
        .map_err(|_| EffectError::InvalidCount(raw.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Value shown `eased` of the way to `target`
pub fn counted_value(target: i64, eased: f32) -> i64 {
    (target as f64 * eased as f64).floor() as i64
}

pub struct Counter {
    target: i64,
    displayed: Arc<Mutex<i64>>,
    started: bool,
    anim: FixedAnimation,
}

impl Counter {
    pub fn new(handle: SchedulerHandle, target: i64) -> Self {
        Self {
            target,
            displayed: Arc::new(Mutex::new(0)),
            started: false,
            anim: FixedAnimation::new(handle),
        }
    }

    /// Build from a raw `data-count` attribute
    pub fn parse(handle: SchedulerHandle, raw: &str) -> Result<Self> {
        Ok(Self::new(handle, parse_count(raw)?))
    }

    /// Begin counting; later calls do nothing
    pub fn start(&mut self, duration_ms: f64) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let target = self.target;
        let tick_sink = Arc::clone(&self.displayed);
        let done_sink = Arc::clone(&self.displayed);
        self.anim.start(
            duration_ms,
            Easing::EaseOutCubic,
            move |eased| *tick_sink.lock() = counted_value(target, eased),
            move || *done_sink.lock() = target,
        )?;
        tracing::debug!(target, duration_ms, "counter started");
        Ok(())
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn value(&self) -> i64 {
        *self.displayed.lock()
    }

    pub fn text(&self) -> String {
        self.value().to_string()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.started && !self.anim.is_running()
    }
}
