//! The user form: field state, submission lifecycle and its run loop.

pub mod service;
pub mod state;

pub use service::FormService;
pub use state::*;
