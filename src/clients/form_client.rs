use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::UserRecord;
use crate::error::FormError;
use crate::form::{DismissReason, Field, FormView};
use crate::messages::{FormRequest, SubmitStatus};

/// Handle to a mounted form.
///
/// Cheap to clone. Every method is one event on the form's loop; the
/// rendered state is available through [`FormClient::subscribe`].
#[derive(Clone)]
pub struct FormClient {
    sender: mpsc::Sender<FormRequest>,
    views: watch::Receiver<FormView>,
}

impl FormClient {
    pub fn new(sender: mpsc::Sender<FormRequest>, views: watch::Receiver<FormView>) -> Self {
        Self { sender, views }
    }

    /// Hands the form a (possibly different) record. Returns `true` when the
    /// fields were replaced, i.e. the record's identity changed.
    #[instrument(fields(user_id = ?user.as_ref().and_then(|u| u.id.as_ref())), skip(self, user))]
    pub async fn set_user(&self, user: Option<Arc<UserRecord>>) -> Result<bool, FormError> {
        debug!("Sending request");
        let (respond_to, response) = tokio::sync::oneshot::channel();
        self.sender
            .send(FormRequest::SetUser { user, respond_to })
            .await
            .map_err(|_| FormError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| FormError::ActorCommunicationError("Actor dropped".to_string()))
    }

    pub async fn set_username(&self, value: impl Into<String>) -> Result<(), FormError> {
        self.set_field(Field::Username, value.into()).await
    }

    pub async fn set_email(&self, value: impl Into<String>) -> Result<(), FormError> {
        self.set_field(Field::Email, value.into()).await
    }

    /// Stops the form. An outstanding request is abandoned and its result,
    /// should it still arrive, is discarded.
    #[instrument(skip(self))]
    pub async fn unmount(&self) -> Result<(), FormError> {
        debug!("Sending request");
        self.sender
            .send(FormRequest::Unmount)
            .await
            .map_err(|_| FormError::ActorCommunicationError("Actor closed".to_string()))
    }

    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.views.clone()
    }

    /// Waits until no submission is outstanding and returns that view.
    pub async fn settled(&self) -> Result<FormView, FormError> {
        let mut views = self.views.clone();
        let view = views
            .wait_for(|view| !view.submitting)
            .await
            .map_err(|_| FormError::ActorCommunicationError("Actor dropped".to_string()))?;
        Ok(view.clone())
    }
}

client_method!(FormClient => fn set_field(field: Field, value: String) -> () as FormRequest::SetField);
client_method!(FormClient => fn reset() -> () as FormRequest::Reset);
client_method!(FormClient => fn submit() -> SubmitStatus as FormRequest::Submit);
client_method!(FormClient => fn dismiss_notification(reason: DismissReason) -> bool as FormRequest::DismissNotification);
client_method!(FormClient => fn view() -> FormView as FormRequest::GetView);
