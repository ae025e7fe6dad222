use thiserror::Error;

/// Why a create or update request did not succeed.
///
/// The form shows the same message for every variant; the distinction only
/// reaches the logs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request rejected with status {status}")]
    Rejected { status: u16 },
}

/// Errors returned by [`FormClient`](crate::clients::FormClient) methods.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}
