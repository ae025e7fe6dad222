//! Form configuration: backend location and notification behaviour.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost/";
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(6000);
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Builder-style configuration for mounting a form.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub(crate) api_base: Url,
    pub(crate) notification_auto_hide: Option<Duration>,
    pub(crate) buffer_size: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            notification_auto_hide: Some(DEFAULT_AUTO_HIDE),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FormConfig {
    /// Point the form at a different backend origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when `base` does not parse or
    /// cannot carry a path (e.g. `mailto:`).
    pub fn with_api_base(mut self, base: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        self.api_base = url;
        Ok(self)
    }

    /// How long a failure notification stays up before closing itself.
    /// `None` keeps it until dismissed.
    #[must_use]
    pub fn with_notification_auto_hide(mut self, after: Option<Duration>) -> Self {
        self.notification_auto_hide = after;
        self
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn notification_auto_hide(&self) -> Option<Duration> {
        self.notification_auto_hide
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

fn default_api_base() -> Url {
    // Constant input, parsing cannot fail.
    match Url::parse(DEFAULT_API_BASE) {
        Ok(url) => url,
        Err(_) => unreachable!("default API base is a valid URL"),
    }
}
