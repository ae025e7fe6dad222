#[macro_use]
mod macros;

pub mod form_client;

pub use form_client::*;
