use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{UserId, UserPayload, UserRecord};

pub const UPDATE_FAILED_MESSAGE: &str = "Error updating user";
pub const CREATE_FAILED_MESSAGE: &str = "Error creating user";

/// The two editable inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Username, Field::Email];

    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email Address",
        }
    }

    pub fn autocomplete(self) -> &'static str {
        self.name()
    }

    /// Markup-level hint only; empty values are still submitted.
    pub fn is_required(self) -> bool {
        true
    }

    pub fn autofocus(self) -> bool {
        matches!(self, Field::Username)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Field::Username),
            "email" => Ok(Field::Email),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Why the notification is being closed.
///
/// Only [`DismissReason::ClickAway`] is special: a click outside the
/// notification does not close it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissReason {
    ClickAway,
    Button,
    Timeout,
    EscapeKeyDown,
    Other(String),
}

impl From<&str> for DismissReason {
    fn from(reason: &str) -> Self {
        match reason {
            "clickaway" => DismissReason::ClickAway,
            "button" => DismissReason::Button,
            "timeout" => DismissReason::Timeout,
            "escapeKeyDown" => DismissReason::EscapeKeyDown,
            other => DismissReason::Other(other.to_string()),
        }
    }
}

/// Which request a submission issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Update(UserId),
}

impl RequestKind {
    /// Message shown when this request fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            RequestKind::Create => CREATE_FAILED_MESSAGE,
            RequestKind::Update(_) => UPDATE_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
}

/// Everything the form owns for the lifetime of one mount.
#[derive(Debug, Default)]
pub struct FormState {
    record: Option<Arc<UserRecord>>,
    username: String,
    email: String,
    notification: Notification,
    submitting: bool,
}

impl FormState {
    pub fn new(record: Option<Arc<UserRecord>>) -> Self {
        let mut state = Self::default();
        state.load(record);
        state
    }

    /// Mirrors a newly supplied record into the fields.
    ///
    /// Fields are replaced, never merged, whenever the record's identity
    /// differs from the current one. Returns `false` for the same identity.
    pub fn sync_record(&mut self, record: Option<Arc<UserRecord>>) -> bool {
        let same = match (&self.record, &record) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if same {
            return false;
        }
        self.load(record);
        true
    }

    fn load(&mut self, record: Option<Arc<UserRecord>>) {
        match &record {
            Some(record) => {
                self.username = record.username.clone();
                self.email = record.email.clone();
            }
            None => {
                self.username.clear();
                self.email.clear();
            }
        }
        self.record = record;
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Username => self.username = value,
            Field::Email => self.email = value,
        }
    }

    /// Clears both fields, even when a record was supplied.
    pub fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
    }

    /// Starts a submission unless one is already outstanding.
    ///
    /// A new submission supersedes any visible notification.
    pub fn begin_submission(&mut self) -> Option<(RequestKind, UserPayload)> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.notification.visible = false;
        Some((self.request_kind(), self.payload()))
    }

    /// Applies the outcome of the outstanding submission. Field values are
    /// left untouched either way.
    pub fn finish_submission(&mut self, kind: &RequestKind, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.notification.visible = false;
        } else {
            self.notification = Notification {
                visible: true,
                message: kind.failure_message().to_string(),
            };
        }
    }

    /// Returns `true` when the notification went from visible to hidden.
    pub fn dismiss(&mut self, reason: &DismissReason) -> bool {
        if *reason == DismissReason::ClickAway || !self.notification.visible {
            return false;
        }
        self.notification.visible = false;
        true
    }

    pub fn request_kind(&self) -> RequestKind {
        match self.record.as_ref().and_then(|record| record.id.clone()) {
            Some(id) => RequestKind::Update(id),
            None => RequestKind::Create,
        }
    }

    pub fn payload(&self) -> UserPayload {
        UserPayload {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn view(&self) -> FormView {
        FormView {
            username: self.username.clone(),
            email: self.email.clone(),
            notification: self.notification.clone(),
            submitting: self.submitting,
            editing: self.record.is_some(),
        }
    }
}

/// Read-only snapshot of the form, published after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub username: String,
    pub email: String,
    pub notification: Notification,
    pub submitting: bool,
    pub editing: bool,
}

impl FormView {
    pub fn title(&self) -> &'static str {
        if self.editing {
            "Edit User"
        } else {
            "Add User"
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
        }
    }

    /// Required fields that are currently empty. Informational; submission is
    /// never blocked on it.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.value(*field).is_empty())
            .collect()
    }
}
