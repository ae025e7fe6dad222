use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier of a user record.
///
/// The backend may hand out numeric or textual ids; both are kept as text
/// since the controller only ever places them in a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Self::from(id),
            RawId::Text(id) => Self(id),
        })
    }
}

/// A user record as the host hands it to the form.
///
/// The form only ever reads it. Hosts share it behind an `Arc`, and a new
/// `Arc` means a new record even when the contents are equal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
}

/// Request body for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
}

impl UserRecord {
    /// Creates a record that already exists on the backend.
    ///
    /// # Arguments
    /// * `id` - Backend identifier, used to address the update request
    /// * `username` - Current username
    /// * `email` - Current email address
    pub fn new(id: impl Into<UserId>, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Creates a record without an identifier. Submitting a form mounted with
    /// such a record issues a create request.
    pub fn unsaved(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
        }
    }
}
