//! Frame scheduler
//!
//! Owns every live interpolation session and advances them once per host
//! frame. The host calls [`AnimationScheduler::tick`] from its
//! "request next frame" callback with the frame timestamp and the current
//! [`InputSnapshot`]; sessions never schedule themselves.
//!
//! Sessions tick in creation order. Callbacks run without the scheduler lock
//! held, so an `on_tick` or `on_complete` may start or cancel sessions. A
//! session cancelled earlier in the same frame is skipped before any of its
//! callbacks run.

use std::sync::{Arc, Weak};
use std::time::Instant;

use obscura_core::InputSnapshot;
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::session::{ContinuousSession, FixedDurationSession, SessionState};
use crate::values::Interpolate;

new_key_type! {
    /// Handle to a scheduled session
    ///
    /// Keys are generational: a handle to a finished or cancelled session
    /// never aliases a newer one, so cancelling it is always a no-op.
    pub struct SessionId;
}

/// Which mode a session runs in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Continuous,
    FixedDuration,
}

/// Per-tick callback for fixed-duration sessions (receives eased progress)
pub type ProgressCallback = Box<dyn FnMut(f32) + Send>;

/// Completion callback for fixed-duration sessions
pub type CompleteCallback = Box<dyn FnOnce() + Send>;

// ============================================================================
// Type-erased session drivers
// ============================================================================

/// A session bundled with the callbacks it feeds
trait Driver: Send {
    fn tick(&mut self, now_ms: f64, input: &InputSnapshot) -> SessionState;
}

struct ContinuousDriver<T, G, F>
where
    T: Interpolate,
{
    session: ContinuousSession<T>,
    target: G,
    on_tick: F,
}

impl<T, G, F> Driver for ContinuousDriver<T, G, F>
where
    T: Interpolate,
    G: FnMut(&InputSnapshot) -> T + Send,
    F: FnMut(T) + Send,
{
    fn tick(&mut self, _now_ms: f64, input: &InputSnapshot) -> SessionState {
        let target = (self.target)(input);
        if let Some(value) = self.session.step(&target) {
            (self.on_tick)(value);
        }
        self.session.state()
    }
}

struct FixedDriver {
    session: FixedDurationSession,
    on_tick: ProgressCallback,
    on_complete: Option<CompleteCallback>,
}

impl Driver for FixedDriver {
    fn tick(&mut self, now_ms: f64, _input: &InputSnapshot) -> SessionState {
        if let Some(step) = self.session.step(now_ms) {
            (self.on_tick)(step.eased);
            if step.finished {
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
            }
        }
        self.session.state()
    }
}

// ============================================================================
// Scheduler state
// ============================================================================

struct Slot {
    kind: SessionKind,
    state: SessionState,
    /// `None` while the driver is checked out for its tick
    driver: Option<Box<dyn Driver>>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    sessions: SlotMap<SessionId, Slot>,
    /// Session ids in creation order
    order: Vec<SessionId>,
    epoch: Instant,
    frames: u64,
}

impl SchedulerInner {
    fn insert(&mut self, kind: SessionKind, driver: Box<dyn Driver>) -> SessionId {
        let id = self.sessions.insert(Slot {
            kind,
            state: SessionState::Idle,
            driver: Some(driver),
        });
        self.order.push(id);
        tracing::debug!(?id, ?kind, "session scheduled");
        id
    }

    fn remove(&mut self, id: SessionId) -> Option<Slot> {
        let slot = self.sessions.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(slot)
    }

    /// Remove a session, handing the slot back so its callbacks can be
    /// dropped outside the lock
    fn cancel(&mut self, id: SessionId) -> Option<Slot> {
        let slot = self.remove(id)?;
        tracing::debug!(?id, kind = ?slot.kind, "session cancelled");
        Some(slot)
    }
}

/// The scheduler that ticks all live sessions
///
/// Clones share the same session table.
///
/// ```ignore
/// let scheduler = AnimationScheduler::new();
/// let id = scheduler.start_fixed_duration(
///     600.0,
///     Easing::EaseOutQuart,
///     |eased| apply_filter(eased),
///     || {},
/// )?;
///
/// // from the host frame callback
/// scheduler.tick(timestamp_ms, tracker.snapshot());
/// ```
#[derive(Clone)]
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                sessions: SlotMap::with_key(),
                order: Vec::new(),
                epoch: Instant::now(),
                frames: 0,
            })),
        }
    }

    /// Get a weak handle for passing to collaborators
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Start an unbounded pursuit of `target`
    ///
    /// Each tick reads the target from the input snapshot, moves the current
    /// value by `factor` of the remaining distance and hands it to `on_tick`.
    pub fn start_continuous<T, G, F>(
        &self,
        initial: T,
        factor: f32,
        target: G,
        on_tick: F,
    ) -> Result<SessionId>
    where
        T: Interpolate,
        G: FnMut(&InputSnapshot) -> T + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let session = ContinuousSession::new(initial, factor)?;
        Ok(self.start_continuous_session(session, target, on_tick))
    }

    /// Schedule a pre-built continuous session
    pub fn start_continuous_session<T, G, F>(
        &self,
        session: ContinuousSession<T>,
        target: G,
        on_tick: F,
    ) -> SessionId
    where
        T: Interpolate,
        G: FnMut(&InputSnapshot) -> T + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let driver = ContinuousDriver {
            session,
            target,
            on_tick,
        };
        self.inner
            .lock()
            .insert(SessionKind::Continuous, Box::new(driver))
    }

    /// Start a bounded session reporting eased progress
    ///
    /// `on_complete` runs exactly once, on the tick progress reaches 1.
    pub fn start_fixed_duration<F, C>(
        &self,
        duration_ms: f64,
        easing: Easing,
        on_tick: F,
        on_complete: C,
    ) -> Result<SessionId>
    where
        F: FnMut(f32) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let driver = FixedDriver {
            session: FixedDurationSession::new(duration_ms, easing)?,
            on_tick: Box::new(on_tick),
            on_complete: Some(Box::new(on_complete)),
        };
        Ok(self
            .inner
            .lock()
            .insert(SessionKind::FixedDuration, Box::new(driver)))
    }

    /// Run `callback` once `delay_ms` has elapsed since the first tick
    pub fn delay<C>(&self, delay_ms: f64, callback: C) -> Result<SessionId>
    where
        C: FnOnce() + Send + 'static,
    {
        self.start_fixed_duration(delay_ms, Easing::Linear, |_| {}, callback)
    }

    /// Deschedule a session
    ///
    /// Idempotent: unknown, finished and already-cancelled ids are ignored.
    /// Returns whether a live session was removed.
    pub fn cancel(&self, id: SessionId) -> bool {
        let removed = self.inner.lock().cancel(id);
        removed.is_some()
    }

    /// Cancel every session
    pub fn cancel_all(&self) {
        let removed = {
            let mut inner = self.inner.lock();
            inner.order.clear();
            std::mem::take(&mut inner.sessions)
        };
        tracing::debug!(count = removed.len(), "all sessions cancelled");
    }

    /// Run one frame at `timestamp_ms`
    ///
    /// Returns true if any sessions are still live (need another tick).
    pub fn tick(&self, timestamp_ms: f64, input: &InputSnapshot) -> bool {
        let ids: SmallVec<[SessionId; 16]> = {
            let mut inner = self.inner.lock();
            inner.frames += 1;
            inner.order.iter().copied().collect()
        };

        for id in ids {
            // Check out the driver; skip anything cancelled since the frame began
            let mut driver = {
                let mut inner = self.inner.lock();
                match inner.sessions.get_mut(id) {
                    Some(slot) if slot.state.is_live() => match slot.driver.take() {
                        Some(driver) => driver,
                        None => continue,
                    },
                    _ => continue,
                }
            };

            let state = driver.tick(timestamp_ms, input);

            // Finished drivers are dropped after the lock is released
            let _finished = {
                let mut inner = self.inner.lock();
                match inner.sessions.get_mut(id) {
                    // cancelled from inside its own callback
                    None => Some(driver),
                    Some(slot) if state.is_live() => {
                        slot.state = state;
                        slot.driver = Some(driver);
                        None
                    }
                    Some(slot) => {
                        tracing::debug!(?id, kind = ?slot.kind, ?state, "session finished");
                        inner.remove(id);
                        Some(driver)
                    }
                }
            };
        }

        let inner = self.inner.lock();
        tracing::trace!(
            frame = inner.frames,
            live = inner.sessions.len(),
            "scheduler tick"
        );
        !inner.sessions.is_empty()
    }

    /// Run one frame using the scheduler's own monotonic clock
    pub fn tick_now(&self, input: &InputSnapshot) -> bool {
        let now_ms = self.inner.lock().epoch.elapsed().as_secs_f64() * 1000.0;
        self.tick(now_ms, input)
    }

    /// Whether a session is still scheduled
    pub fn is_live(&self, id: SessionId) -> bool {
        self.inner.lock().sessions.contains_key(id)
    }

    /// State of a scheduled session, `None` once it finished or was cancelled
    pub fn state(&self, id: SessionId) -> Option<SessionState> {
        self.inner.lock().sessions.get(id).map(|slot| slot.state)
    }

    pub fn kind(&self, id: SessionId) -> Option<SessionKind> {
        self.inner.lock().sessions.get(id).map(|slot| slot.kind)
    }

    pub fn has_active_sessions(&self) -> bool {
        !self.inner.lock().sessions.is_empty()
    }

    /// Number of scheduled sessions
    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    /// Number of sessions that have ticked at least once
    pub fn active_count(&self) -> usize {
        self.inner
            .lock()
            .sessions
            .values()
            .filter(|slot| slot.state == SessionState::Running)
            .count()
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.inner.lock().frames
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to collaborators that start or cancel sessions. It won't keep the
/// scheduler alive; once the scheduler is dropped, starts fail with
/// [`AnimationError::SchedulerDropped`] and cancels do nothing.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    fn upgrade(&self) -> Result<AnimationScheduler> {
        self.inner
            .upgrade()
            .map(|inner| AnimationScheduler { inner })
            .ok_or(AnimationError::SchedulerDropped)
    }

    pub fn start_continuous<T, G, F>(
        &self,
        initial: T,
        factor: f32,
        target: G,
        on_tick: F,
    ) -> Result<SessionId>
    where
        T: Interpolate,
        G: FnMut(&InputSnapshot) -> T + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        self.upgrade()?
            .start_continuous(initial, factor, target, on_tick)
    }

    pub fn start_continuous_session<T, G, F>(
        &self,
        session: ContinuousSession<T>,
        target: G,
        on_tick: F,
    ) -> Result<SessionId>
    where
        T: Interpolate,
        G: FnMut(&InputSnapshot) -> T + Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        Ok(self
            .upgrade()?
            .start_continuous_session(session, target, on_tick))
    }

    pub fn start_fixed_duration<F, C>(
        &self,
        duration_ms: f64,
        easing: Easing,
        on_tick: F,
        on_complete: C,
    ) -> Result<SessionId>
    where
        F: FnMut(f32) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.upgrade()?
            .start_fixed_duration(duration_ms, easing, on_tick, on_complete)
    }

    pub fn delay<C>(&self, delay_ms: f64, callback: C) -> Result<SessionId>
    where
        C: FnOnce() + Send + 'static,
    {
        self.upgrade()?.delay(delay_ms, callback)
    }

    pub fn cancel(&self, id: SessionId) -> bool {
        self.upgrade().map(|s| s.cancel(id)).unwrap_or(false)
    }

    pub fn is_live(&self, id: SessionId) -> bool {
        self.upgrade().map(|s| s.is_live(id)).unwrap_or(false)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn input() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_continuous_ticks_toward_target() {
        let scheduler = AnimationScheduler::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        scheduler
            .start_continuous(0.0_f32, 0.2, |_| 100.0, move |v| sink.lock().push(v))
            .unwrap();

        scheduler.tick(0.0, &input());
        scheduler.tick(16.0, &input());

        let seen = seen.lock();
        assert!((seen[0] - 20.0).abs() < 1e-4);
        assert!((seen[1] - 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_continuous_reads_target_from_snapshot() {
        use obscura_core::Point;

        let scheduler = AnimationScheduler::new();
        let last = Arc::new(Mutex::new(Point::ZERO));
        let sink = Arc::clone(&last);

        scheduler
            .start_continuous(
                Point::ZERO,
                1.0,
                |snap: &InputSnapshot| snap.pointer,
                move |p| *sink.lock() = p,
            )
            .unwrap();

        let mut snap = input();
        snap.pointer = Point::new(12.0, 34.0);
        scheduler.tick(0.0, &snap);
        assert_eq!(*last.lock(), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_invalid_factor_rejected_at_start() {
        let scheduler = AnimationScheduler::new();
        let err = scheduler
            .start_continuous(0.0_f32, 1.5, |_| 1.0, |_| {})
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidParameter { name: "factor", .. }));
        assert_eq!(scheduler.session_count(), 0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let scheduler = AnimationScheduler::new();
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let completes = Arc::new(AtomicUsize::new(0));
        let (t, c) = (Arc::clone(&ticks), Arc::clone(&completes));

        scheduler
            .start_fixed_duration(
                0.0,
                Easing::EaseOutCubic,
                move |e| t.lock().push(e),
                move || {
                    c.fetch_add(1, Ordering::SeqCst);
                },
            )
            .unwrap();

        assert!(!scheduler.tick(5.0, &input()));
        scheduler.tick(21.0, &input());

        assert_eq!(*ticks.lock(), vec![1.0]);
        assert_eq!(completes.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.session_count(), 0);
    }

    #[test]
    fn test_fixed_duration_runs_to_completion() {
        let scheduler = AnimationScheduler::new();
        let done = Arc::new(AtomicUsize::new(0));
        let d = Arc::clone(&done);

        let id = scheduler
            .start_fixed_duration(100.0, Easing::Linear, |_| {}, move || {
                d.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert_eq!(scheduler.state(id), Some(SessionState::Idle));
        assert!(scheduler.tick(0.0, &input()));
        assert_eq!(scheduler.state(id), Some(SessionState::Running));
        assert!(scheduler.tick(50.0, &input()));
        assert!(!scheduler.tick(100.0, &input()));

        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_live(id));
        assert_eq!(scheduler.state(id), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.delay(0.0, || {}).unwrap();
        scheduler.tick(0.0, &input());

        // already completed
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.cancel(SessionId::default()));
    }

    #[test]
    fn test_cancel_from_earlier_callback_blocks_later_session() {
        let scheduler = AnimationScheduler::new();
        let victim_ticks = Arc::new(AtomicUsize::new(0));
        let victim_slot: Arc<Mutex<Option<SessionId>>> = Arc::new(Mutex::new(None));

        let handle = scheduler.handle();
        let slot = Arc::clone(&victim_slot);
        scheduler
            .start_fixed_duration(
                1000.0,
                Easing::Linear,
                move |_| {
                    if let Some(id) = *slot.lock() {
                        handle.cancel(id);
                    }
                },
                || {},
            )
            .unwrap();

        let v = Arc::clone(&victim_ticks);
        let victim = scheduler
            .start_fixed_duration(
                1000.0,
                Easing::Linear,
                move |_| {
                    v.fetch_add(1, Ordering::SeqCst);
                },
                || {},
            )
            .unwrap();
        *victim_slot.lock() = Some(victim);

        scheduler.tick(0.0, &input());
        assert_eq!(victim_ticks.load(Ordering::SeqCst), 0);
        assert!(!scheduler.is_live(victim));
    }

    #[test]
    fn test_callback_may_cancel_itself() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let own: Arc<Mutex<Option<SessionId>>> = Arc::new(Mutex::new(None));
        let own_id = Arc::clone(&own);
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);

        let id = scheduler
            .start_continuous(0.0_f32, 0.5, |_| 1.0, move |_| {
                c.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *own_id.lock() {
                    handle.cancel(id);
                }
            })
            .unwrap();
        *own.lock() = Some(id);

        scheduler.tick(0.0, &input());
        scheduler.tick(16.0, &input());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.session_count(), 0);
    }

    #[test]
    fn test_completion_may_start_next_session() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let second_done = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&second_done);

        scheduler
            .delay(10.0, move || {
                handle
                    .delay(10.0, move || {
                        s.fetch_add(1, Ordering::SeqCst);
                    })
                    .unwrap();
            })
            .unwrap();

        scheduler.tick(0.0, &input());
        scheduler.tick(10.0, &input()); // first completes, second scheduled
        assert_eq!(scheduler.session_count(), 1);
        scheduler.tick(20.0, &input()); // second starts
        scheduler.tick(30.0, &input());
        assert_eq!(second_done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert_eq!(
            handle.delay(10.0, || {}).unwrap_err(),
            AnimationError::SchedulerDropped
        );
        assert!(!handle.cancel(SessionId::default()));
    }

    #[test]
    fn test_scheduler_counts() {
        let scheduler = AnimationScheduler::new();
        assert_eq!(scheduler.session_count(), 0);

        let a = scheduler
            .start_continuous(0.0_f32, 0.1, |_| 1.0, |_| {})
            .unwrap();
        scheduler.delay(100.0, || {}).unwrap();
        assert_eq!(scheduler.session_count(), 2);
        assert_eq!(scheduler.kind(a), Some(SessionKind::Continuous));
        assert_eq!(scheduler.active_count(), 0);

        scheduler.tick(0.0, &input());
        assert_eq!(scheduler.active_count(), 2);
        assert_eq!(scheduler.state(a), Some(SessionState::Running));

        scheduler.cancel_all();
        assert!(!scheduler.has_active_sessions());
    }
}
