//! System orchestration, startup, and shutdown logic.

pub mod form_system;
pub mod telemetry;

pub use form_system::*;
pub use telemetry::*;
