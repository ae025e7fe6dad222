//! Reqwest-backed users adapter.
//!
//! Owns transport details only: URL construction, JSON serialisation and
//! mapping of non-2xx statuses into [`SubmissionError`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use super::UserApi;
use crate::domain::{UserId, UserPayload};
use crate::error::SubmissionError;

/// Talks to `{base}/api/users/` over HTTP.
#[derive(Clone)]
pub struct HttpUserApi {
    client: Client,
    base: Url,
}

impl HttpUserApi {
    /// Build an adapter with a default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    #[instrument(skip(self, payload))]
    async fn create_user(&self, payload: UserPayload) -> Result<(), SubmissionError> {
        let url = collection_url(&self.base)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response)
    }

    #[instrument(fields(user_id = %id), skip(self, id, payload))]
    async fn update_user(&self, id: UserId, payload: UserPayload) -> Result<(), SubmissionError> {
        let url = member_url(&self.base, &id)?;
        debug!(%url, "PUT");
        let response = self
            .client
            .put(url)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response)
    }
}

/// `{base}/api/users/`
pub(crate) fn collection_url(base: &Url) -> Result<Url, SubmissionError> {
    users_url(base, None)
}

/// `{base}/api/users/{id}/`, with `id` percent-encoded as one path segment.
pub(crate) fn member_url(base: &Url, id: &UserId) -> Result<Url, SubmissionError> {
    users_url(base, Some(id))
}

fn users_url(base: &Url, id: Option<&UserId>) -> Result<Url, SubmissionError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| SubmissionError::InvalidEndpoint(base.to_string()))?;
        segments.pop_if_empty().extend(["api", "users"]);
        if let Some(id) = id {
            segments.push(id.as_str());
        }
        // Trailing slash.
        segments.push("");
    }
    Ok(url)
}

fn check_status(response: Response) -> Result<(), SubmissionError> {
    status_result(response.status())
}

fn status_result(status: StatusCode) -> Result<(), SubmissionError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> SubmissionError {
    SubmissionError::Transport(error.to_string())
}
