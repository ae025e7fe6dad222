use std::sync::Arc;

use tokio::sync::oneshot;

use crate::domain::UserRecord;
use crate::error::SubmissionError;
use crate::form::{DismissReason, Field, FormView, RequestKind};

pub type ServiceResponse<T> = oneshot::Sender<T>;

/// Messages a [`FormClient`](crate::clients::FormClient) sends to the form's
/// run loop. Each variant carries a oneshot channel for the reply.
#[derive(Debug)]
pub enum FormRequest {
    SetUser {
        user: Option<Arc<UserRecord>>,
        respond_to: ServiceResponse<bool>,
    },
    SetField {
        field: Field,
        value: String,
        respond_to: ServiceResponse<()>,
    },
    Reset {
        respond_to: ServiceResponse<()>,
    },
    Submit {
        respond_to: ServiceResponse<SubmitStatus>,
    },
    DismissNotification {
        reason: DismissReason,
        respond_to: ServiceResponse<bool>,
    },
    GetView {
        respond_to: ServiceResponse<FormView>,
    },
    Unmount,
}

/// What a submit call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// A request went out; its result arrives later through the view and
    /// the save callback.
    Started(RequestKind),
    /// An earlier submission is still outstanding, nothing was sent.
    AlreadySubmitting,
}

/// Sent back to the run loop by the task performing the HTTP call.
#[derive(Debug)]
pub(crate) struct SubmissionOutcome {
    pub submission: u64,
    pub kind: RequestKind,
    pub result: Result<(), SubmissionError>,
}
