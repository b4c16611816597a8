//! Mapping of domain failures onto HTTP responses
//!
//! Clients only ever see the generic code and message of
//! [`DomainError::public_code`]; the specific reason is written to the log.

use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use tg_core::errors::{AuthError, DomainError, ErrorCategory};
use tg_shared::errors::{error_codes, ErrorResponse};

/// A domain failure on its way out of a handler or middleware
#[derive(Debug, Error)]
#[error("{}", .0.public_message())]
pub struct ApiError(#[from] pub DomainError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(self.0.clone())
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error.public_code() {
        error_codes::UNAUTHORIZED => StatusCode::UNAUTHORIZED,
        error_codes::FORBIDDEN => StatusCode::FORBIDDEN,
        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,
        error_codes::SERVICE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs `error` with its internal reason and renders the public body
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error.category() {
        ErrorCategory::ClientInput => {
            tracing::debug!(reason = %error, "Rejected request input");
        }
        ErrorCategory::SecurityRejection => {
            tracing::warn!(reason = %error, "Rejected credential");
        }
        ErrorCategory::Infrastructure => {
            tracing::error!(reason = %error, "Backing store unavailable");
        }
        ErrorCategory::Internal | ErrorCategory::StartupFatal => {
            tracing::error!(reason = %error, "Internal error");
        }
    }

    let status = status_for(&error);
    let mut response = HttpResponse::build(status);
    if status == StatusCode::UNAUTHORIZED {
        response.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
    }
    response.json(ErrorResponse::new(error.public_code(), error.public_message()))
}

/// Error handler for `web::JsonConfig`: unreadable bodies become `invalid_request`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(reason = %err, "Rejected request body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::INVALID_REQUEST,
        "Invalid request",
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, "Not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use tg_core::errors::{KeyError, RevocationError, TokenError};

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::from(TokenError::TokenExpired), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::MissingCredential), StatusCode::UNAUTHORIZED),
            (
                DomainError::from(AuthError::AuthenticationFailed(TokenError::TokenRevoked)),
                StatusCode::UNAUTHORIZED,
            ),
            (DomainError::from(AuthError::InsufficientPermissions), StatusCode::FORBIDDEN),
            (
                DomainError::from(TokenError::InvalidIdentity {
                    field: "email".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::from(RevocationError::Store {
                    message: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::from(KeyError::Format {
                    message: "bad".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(status_for(&error), expected, "{:?}", error);
        }
    }

    #[actix_rt::test]
    async fn test_rejection_body_hides_reason() {
        let response = handle_domain_error(AuthError::AuthenticationFailed(TokenError::TokenExpired).into());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let body = body_json(response).await;
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "Unauthorized");
        assert!(!body.to_string().to_lowercase().contains("expired"));
    }

    #[actix_rt::test]
    async fn test_store_failure_body() {
        let error = DomainError::from(RevocationError::Store {
            message: "connection refused".to_string(),
        });
        let body = body_json(ApiError(error).error_response()).await;

        assert_eq!(body["error"], "service_unavailable");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[test]
    fn test_api_error_display_is_public_message() {
        let error = ApiError::from(AuthError::InsufficientPermissions);
        assert_eq!(error.to_string(), "Insufficient permissions");
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }
}
