//! Outbound port to the users REST backend.

pub mod http;

use async_trait::async_trait;

use crate::domain::{UserId, UserPayload};
use crate::error::SubmissionError;

pub use http::HttpUserApi;

/// Create and update calls the form submits through.
///
/// Implementations resolve `Ok(())` on any acknowledged save and
/// `Err` for transport failures and rejected requests alike.
#[async_trait]
pub trait UserApi: Send + Sync + 'static {
    async fn create_user(&self, payload: UserPayload) -> Result<(), SubmissionError>;

    async fn update_user(&self, id: UserId, payload: UserPayload) -> Result<(), SubmissionError>;
}
