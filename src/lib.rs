//! # User form
//!
//! Create and edit a user record against a REST backend.
//!
//! ## Ingredients
//!
//! - **Domain types** - the record the host hands in and the payload sent out → [`UserRecord`], [`UserPayload`]
//! - **Form state** - two fields, a notification and the submission guard → [`FormState`]
//! - **Run loop** - the single writer applying every event → [`FormService`]
//! - **Client** - cloneable handle with one method per event → [`FormClient`]
//! - **Backend port** - create/update calls, HTTP adapter included → [`UserApi`], [`HttpUserApi`]
//! - **System** - wiring, startup and unmount → [`FormSystem`]
//!
//! ## Example Usage
//!
//! ```ignore
//! let system = FormSystem::mount(&FormConfig::default(), None, || println!("saved"))?;
//! let form = system.form_client.clone();
//!
//! form.set_username("bob").await?;
//! form.set_email("b@x.com").await?;
//! form.submit().await?;
//!
//! let view = form.settled().await?;
//! if view.notification.visible {
//!     eprintln!("{}", view.notification.message);
//! }
//! system.shutdown().await?;
//! ```

pub mod api;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod host;
pub mod messages;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

pub use api::{HttpUserApi, UserApi};
pub use app_system::{setup_tracing, FormSystem};
pub use clients::FormClient;
pub use config::FormConfig;
pub use domain::{UserId, UserPayload, UserRecord};
pub use error::{ConfigError, FormError, SubmissionError};
pub use form::{DismissReason, Field, FormService, FormState, FormView, Notification, RequestKind};
pub use host::OnSave;
pub use messages::SubmitStatus;
