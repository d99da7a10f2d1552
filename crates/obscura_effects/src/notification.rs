//! Toast notifications
//!
//! At most one toast is on screen. Showing a new one replaces the old one
//! outright, cancelling its transitions and dismissal timer. Every callback
//! checks the toast id it was created for, so a stale timer can never touch
//! a newer toast.

use std::sync::Arc;

use obscura_animation::{Easing, SchedulerHandle, SessionId};
use parking_lot::Mutex;

use crate::config::TimingConfig;
use crate::error::Result;

/// Identifies one shown notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Background color
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#ff1f1f",
            NotificationKind::Error => "#333",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPhase {
    Entering,
    Shown,
    Leaving,
}

/// A toast and its current transition values
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: NotificationPhase,
    /// Pixels below its resting place
    pub translate_y: f32,
    pub opacity: f32,
}

impl Notification {
    /// Distance travelled while entering and leaving
    pub const TRAVEL: f32 = 100.0;

    fn apply(&mut self, phase: NotificationPhase, eased: f32) {
        let shown = match phase {
            NotificationPhase::Leaving => 1.0 - eased,
            _ => eased,
        };
        self.translate_y = Self::TRAVEL * (1.0 - shown);
        self.opacity = shown;
    }
}

#[derive(Default)]
struct CenterInner {
    current: Option<Notification>,
    next_id: u64,
    transition: Option<SessionId>,
    timer: Option<SessionId>,
}

impl CenterInner {
    fn current_mut(&mut self, id: NotificationId) -> Option<&mut Notification> {
        self.current.as_mut().filter(|n| n.id == id)
    }
}

/// Shows and dismisses notifications
///
/// Cheap to clone; clones share the same toast.
#[derive(Clone)]
pub struct NotificationCenter {
    handle: SchedulerHandle,
    visible_ms: f64,
    transition_ms: f64,
    inner: Arc<Mutex<CenterInner>>,
}

impl NotificationCenter {
    pub fn new(handle: SchedulerHandle, timing: &TimingConfig, duration_scale: f64) -> Self {
        Self {
            handle,
            visible_ms: timing.notification_ms,
            transition_ms: timing.notification_transition_ms * duration_scale,
            inner: Arc::new(Mutex::new(CenterInner::default())),
        }
    }

    /// Show `message`, replacing any notification already on screen
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> Result<NotificationId> {
        let message = message.into();
        let (id, stale) = {
            let mut inner = self.inner.lock();
            inner.next_id += 1;
            let id = NotificationId(inner.next_id);
            if let Some(old) = inner.current.take() {
                tracing::debug!(old = ?old.id, "replacing notification");
            }
            inner.current = Some(Notification {
                id,
                message,
                kind,
                phase: NotificationPhase::Entering,
                translate_y: Notification::TRAVEL,
                opacity: 0.0,
            });
            (id, [inner.transition.take(), inner.timer.take()])
        };
        for session in stale.into_iter().flatten() {
            self.handle.cancel(session);
        }

        let transition = self.start_transition(id, NotificationPhase::Entering)?;
        let center = self.clone();
        let timer = self
            .handle
            .delay(self.visible_ms, move || center.begin_leave(id))?;

        let mut inner = self.inner.lock();
        inner.transition = Some(transition);
        inner.timer = Some(timer);
        tracing::debug!(?id, ?kind, "notification shown");
        Ok(id)
    }

    fn start_transition(&self, id: NotificationId, phase: NotificationPhase) -> Result<SessionId> {
        let sink = Arc::clone(&self.inner);
        let done = Arc::clone(&self.inner);
        let session = self.handle.start_fixed_duration(
            self.transition_ms,
            Easing::EaseInOutCubic,
            move |eased| {
                if let Some(notification) = sink.lock().current_mut(id) {
                    notification.apply(phase, eased);
                }
            },
            move || {
                let mut inner = done.lock();
                match phase {
                    NotificationPhase::Leaving => {
                        if inner.current_mut(id).is_some() {
                            inner.current = None;
                            tracing::debug!(?id, "notification removed");
                        }
                    }
                    _ => {
                        if let Some(notification) = inner.current_mut(id) {
                            notification.phase = NotificationPhase::Shown;
                        }
                    }
                }
            },
        )?;
        Ok(session)
    }

    fn begin_leave(&self, id: NotificationId) {
        {
            let mut inner = self.inner.lock();
            match inner.current_mut(id) {
                Some(notification) => notification.phase = NotificationPhase::Leaving,
                None => return,
            }
        }
        match self.start_transition(id, NotificationPhase::Leaving) {
            Ok(session) => self.inner.lock().transition = Some(session),
            Err(err) => {
                tracing::warn!(?id, error = %err, "could not animate notification out");
                let mut inner = self.inner.lock();
                if inner.current_mut(id).is_some() {
                    inner.current = None;
                }
            }
        }
    }

    /// The notification on screen, if any
    pub fn current(&self) -> Option<Notification> {
        self.inner.lock().current.clone()
    }

    pub fn is_showing(&self) -> bool {
        self.inner.lock().current.is_some()
    }
}
