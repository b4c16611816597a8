//! Request-independent HTTP helpers

pub mod error;

pub use error::{handle_domain_error, json_error_handler, not_found, status_for, ApiError};
