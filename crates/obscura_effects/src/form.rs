//! Contact form
//!
//! Validation runs on submit. A valid submission is simulated: the button
//! shows a sending label for a while, then the form resets and a success
//! notification appears.

use std::sync::{Arc, OnceLock};

use obscura_animation::{FixedAnimation, SchedulerHandle};
use parking_lot::Mutex;
use regex::Regex;

use crate::error::Result;
use crate::notification::{NotificationCenter, NotificationKind};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const SENDING_LABEL: &str = "SENDING...";
pub const DEFAULT_BUTTON_LABEL: &str = "SEND MESSAGE";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }
}

/// Why a submission was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    MissingFields,
    InvalidEmail,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MissingFields => MISSING_FIELDS_MESSAGE,
            Rejection::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(Rejection),
    /// Accepted; the button is disabled until sending finishes
    Sending,
    /// A previous submission is still sending
    Busy,
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Floating label raised
    pub focused: bool,
}

#[derive(Debug, Default)]
struct FormState {
    fields: [FieldState; 3],
    sending: bool,
}

impl FormState {
    fn reset(&mut self) {
        self.fields = Default::default();
        self.sending = false;
    }
}

pub struct ContactForm {
    state: Arc<Mutex<FormState>>,
    notifications: NotificationCenter,
    submit_ms: f64,
    button_label: String,
    timer: FixedAnimation,
}

impl ContactForm {
    pub fn new(handle: SchedulerHandle, notifications: NotificationCenter, submit_ms: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            notifications,
            submit_ms,
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            timer: FixedAnimation::new(handle),
        }
    }

    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = label.into();
        self
    }

    pub fn set_value(&self, field: Field, value: impl Into<String>) {
        self.state.lock().fields[field.index()].value = value.into();
    }

    pub fn focus(&self, field: Field) {
        self.state.lock().fields[field.index()].focused = true;
    }

    /// Lower the label unless the field has content
    pub fn blur(&self, field: Field) {
        let mut state = self.state.lock();
        let entry = &mut state.fields[field.index()];
        if entry.value.is_empty() {
            entry.focused = false;
        }
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let rejection = {
            let state = self.state.lock();
            if state.sending {
                return Ok(SubmitOutcome::Busy);
            }
            let [name, email, message] = &state.fields;
            if name.value.is_empty() || email.value.is_empty() || message.value.is_empty() {
                Some(Rejection::MissingFields)
            } else if !is_valid_email(&email.value) {
                Some(Rejection::InvalidEmail)
            } else {
                None
            }
        };

        if let Some(rejection) = rejection {
            tracing::debug!(?rejection, "form rejected");
            self.notifications
                .show(rejection.message(), NotificationKind::Error)?;
            return Ok(SubmitOutcome::Rejected(rejection));
        }

        self.state.lock().sending = true;
        let state = Arc::clone(&self.state);
        let notifications = self.notifications.clone();
        self.timer.delay(self.submit_ms, move || {
            if let Err(err) = notifications.show(SENT_MESSAGE, NotificationKind::Success) {
                tracing::warn!(error = %err, "could not show confirmation");
            }
            state.lock().reset();
            tracing::debug!("form sent and reset");
        })?;
        Ok(SubmitOutcome::Sending)
    }

    pub fn field(&self, field: Field) -> FieldState {
        self.state.lock().fields[field.index()].clone()
    }

    pub fn is_sending(&self) -> bool {
        self.state.lock().sending
    }

    pub fn button_disabled(&self) -> bool {
        self.is_sending()
    }

    pub fn button_text(&self) -> &str {
        if self.is_sending() {
            SENDING_LABEL
        } else {
            &self.button_label
        }
    }
}
