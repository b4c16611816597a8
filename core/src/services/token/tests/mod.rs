use std::fmt::Debug;

use crate::errors::{DomainError, TokenError};

mod key_manager_tests;
mod service_tests;

/// Unwraps the token-level rejection from a failed operation
fn expect_token_error<T: Debug>(result: Result<T, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected a token error, got {:?}", other),
    }
}
