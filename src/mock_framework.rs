//! # Mock Framework
//!
//! Utilities for testing the form without a backend.
//!
//! Use [`create_mock_api`] to get a [`UserApi`] and a receiver.
//! Then use [`expect_create`] or [`expect_update`] to assert the request and
//! decide its result.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::api::UserApi;
use crate::domain::{UserId, UserPayload};
use crate::error::SubmissionError;

pub type Responder = oneshot::Sender<Result<(), SubmissionError>>;

/// One captured call against the mock backend.
#[derive(Debug)]
pub enum ApiCall {
    Create {
        payload: UserPayload,
        respond_to: Responder,
    },
    Update {
        id: UserId,
        payload: UserPayload,
        respond_to: Responder,
    },
}

/// [`UserApi`] whose calls land on a channel the test controls.
///
/// # Testing Strategy
/// The form only sees a request resolve or reject. Instead of a real server
/// the test receives each call together with a oneshot responder and answers
/// it with success or failure, whenever it chooses.
pub struct MockUserApi {
    sender: mpsc::Sender<ApiCall>,
}

pub fn create_mock_api(buffer_size: usize) -> (MockUserApi, mpsc::Receiver<ApiCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockUserApi { sender }, receiver)
}

impl MockUserApi {
    async fn call(&self, build: impl FnOnce(Responder) -> ApiCall) -> Result<(), SubmissionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SubmissionError::Transport("Mock closed".to_string()))?;
        response
            .await
            .map_err(|_| SubmissionError::Transport("Mock dropped".to_string()))?
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn create_user(&self, payload: UserPayload) -> Result<(), SubmissionError> {
        self.call(|respond_to| ApiCall::Create { payload, respond_to }).await
    }

    async fn update_user(&self, id: UserId, payload: UserPayload) -> Result<(), SubmissionError> {
        self.call(|respond_to| ApiCall::Update {
            id,
            payload,
            respond_to,
        })
        .await
    }
}

/// Helper to verify that the next call is a create request
pub async fn expect_create(receiver: &mut mpsc::Receiver<ApiCall>) -> Option<(UserPayload, Responder)> {
    match receiver.recv().await {
        Some(ApiCall::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an update request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ApiCall>,
) -> Option<(UserId, UserPayload, Responder)> {
    match receiver.recv().await {
        Some(ApiCall::Update {
            id,
            payload,
            respond_to,
        }) => Some((id, payload, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api(10);

        let create_task = tokio::spawn(async move {
            let payload = UserPayload {
                username: "Test".to_string(),
                email: "test@example.com".to_string(),
            };
            api.create_user(payload).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.username, "Test");
        responder.send(Err(SubmissionError::Rejected { status: 422 })).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(SubmissionError::Rejected { status: 422 }));
    }
}
