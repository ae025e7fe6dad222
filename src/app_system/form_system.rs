use std::sync::Arc;

use tracing::{error, info};

use crate::api::{HttpUserApi, UserApi};
use crate::clients::FormClient;
use crate::config::FormConfig;
use crate::domain::UserRecord;
use crate::error::ConfigError;
use crate::form::FormService;
use crate::host::OnSave;

/// A mounted form together with the task running it.
///
/// Responsible for wiring the backend adapter and the host callback into the
/// form's loop, and for tearing it down again.
pub struct FormSystem {
    pub form_client: FormClient,
    handle: tokio::task::JoinHandle<()>,
}

impl FormSystem {
    /// Mounts a form that talks HTTP to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] when the HTTP client cannot be built.
    pub fn mount(
        config: &FormConfig,
        user: Option<Arc<UserRecord>>,
        on_save: impl OnSave,
    ) -> Result<Self, ConfigError> {
        let api = HttpUserApi::new(config.api_base().clone()).map_err(|e| {
            error!(error = %e, "HTTP client setup failed");
            ConfigError::HttpClient(e.to_string())
        })?;
        Ok(Self::mount_with_api(config, Arc::new(api), user, on_save))
    }

    /// Mounts a form against any [`UserApi`] implementation.
    pub fn mount_with_api(
        config: &FormConfig,
        api: Arc<dyn UserApi>,
        user: Option<Arc<UserRecord>>,
        on_save: impl OnSave,
    ) -> Self {
        info!(api_base = %config.api_base(), editing = user.is_some(), "Mounting user form");
        let (service, form_client) = FormService::new(config, api, Arc::new(on_save), user);
        let handle = tokio::spawn(service.run());
        Self { form_client, handle }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Unmounting user form...");
        // Fails only when the loop has already stopped.
        let _ = self.form_client.unmount().await;
        drop(self.form_client);

        if let Err(e) = self.handle.await {
            error!("Form task failed: {:?}", e);
            return Err(format!("Form task failed: {:?}", e));
        }

        info!("User form unmounted.");
        Ok(())
    }
}
