use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new token pair. Under single-use
/// rotation the presented refresh token stops working.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, revoked or already used refresh token
/// - 503 Service Unavailable: Revocation store unreachable
/// - 500 Internal Server Error: Signing failure
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    match state.authority.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
