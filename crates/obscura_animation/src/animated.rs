//! Owning session handles
//!
//! One logical animation (the hover filter on a grid image, the trailing
//! cursor dot) must never have two sessions writing at once. These wrappers
//! own at most one [`SessionId`] and cancel it before starting the next one,
//! and again when dropped.

use obscura_core::InputSnapshot;

use crate::easing::Easing;
use crate::error::Result;
use crate::scheduler::{SchedulerHandle, SessionId};
use crate::session::ContinuousSession;
use crate::values::Interpolate;

/// A restartable fixed-duration animation
///
/// ```ignore
/// let mut fade = FixedAnimation::new(scheduler.handle());
/// fade.start(600.0, Easing::EaseOutQuart, |e| set_opacity(e), || {})?;
/// // pointer left before it finished: the first session is cancelled
/// fade.start(400.0, Easing::EaseOutCubic, |e| set_opacity(1.0 - e), || {})?;
/// ```
pub struct FixedAnimation {
    handle: SchedulerHandle,
    session: Option<SessionId>,
}

impl FixedAnimation {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            session: None,
        }
    }

    /// Cancel any running session and start a new one
    pub fn start<F, C>(
        &mut self,
        duration_ms: f64,
        easing: Easing,
        on_tick: F,
        on_complete: C,
    ) -> Result<SessionId>
    where
        F: FnMut(f32) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.cancel();
        let id = self
            .handle
            .start_fixed_duration(duration_ms, easing, on_tick, on_complete)?;
        self.session = Some(id);
        Ok(id)
    }

    /// Cancel any running session and schedule `callback` after `delay_ms`
    pub fn delay<C>(&mut self, delay_ms: f64, callback: C) -> Result<SessionId>
    where
        C: FnOnce() + Send + 'static,
    {
        self.start(delay_ms, Easing::Linear, |_| {}, callback)
    }

    /// Cancel the running session, if any
    pub fn cancel(&mut self) {
        if let Some(id) = self.session.take() {
            self.handle.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some_and(|id| self.handle.is_live(id))
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }
}

impl Drop for FixedAnimation {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A restartable continuous pursuit
pub struct ContinuousAnimation {
    handle: SchedulerHandle,
    session: Option<SessionId>,
}

impl ContinuousAnimation {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            session: None,
        }
    }

    /// Cancel any running pursuit and start a new one
    pub fn start<T, G, F>(
        &mut self,
        session: ContinuousSession<T>,
        target: G,
        on_tick: F,
    ) -> Result<SessionId>
    where
        T: Interpolate,
        G: FnMut(&InputSnapshot) -> T + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        self.cancel();
        let id = self
            .handle
            .start_continuous_session(session, target, on_tick)?;
        self.session = Some(id);
        Ok(id)
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.session.take() {
            self.handle.cancel(id);
        }
    }

    /// Whether the pursuit is still scheduled (false once it settled)
    pub fn is_running(&self) -> bool {
        self.session.is_some_and(|id| self.handle.is_live(id))
    }
}

impl Drop for ContinuousAnimation {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::AnimationScheduler;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_restart_cancels_previous_session() {
        let scheduler = AnimationScheduler::new();
        let input = InputSnapshot::default();
        let mut anim = FixedAnimation::new(scheduler.handle());
        let completions = Arc::new(Mutex::new(Vec::new()));

        let c = Arc::clone(&completions);
        anim.start(100.0, Easing::Linear, |_| {}, move || c.lock().push("first"))
            .unwrap();
        scheduler.tick(0.0, &input);
        scheduler.tick(50.0, &input);

        let c = Arc::clone(&completions);
        anim.start(100.0, Easing::Linear, |_| {}, move || c.lock().push("second"))
            .unwrap();
        assert_eq!(scheduler.session_count(), 1);

        for t in [60.0, 120.0, 200.0] {
            scheduler.tick(t, &input);
        }
        assert_eq!(*completions.lock(), vec!["second"]);
    }

    #[test]
    fn test_cancel_before_start_and_after_finish_is_noop() {
        let scheduler = AnimationScheduler::new();
        let mut anim = FixedAnimation::new(scheduler.handle());
        anim.cancel();
        assert!(!anim.is_running());

        anim.delay(0.0, || {}).unwrap();
        scheduler.tick(0.0, &InputSnapshot::default());
        assert!(!anim.is_running());
        anim.cancel();
        anim.cancel();
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = AnimationScheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        {
            let mut anim = ContinuousAnimation::new(scheduler.handle());
            let t = Arc::clone(&ticks);
            anim.start(
                ContinuousSession::new(0.0_f32, 0.5).unwrap(),
                |_| 1.0,
                move |_| {
                    t.fetch_add(1, Ordering::SeqCst);
                },
            )
            .unwrap();
            assert!(anim.is_running());
        }
        scheduler.tick(0.0, &InputSnapshot::default());
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.session_count(), 0);
    }
}
