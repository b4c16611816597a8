use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};

use tg_core::services::extract_bearer_token;

use crate::app::AppState;
use crate::dto::auth::{MessageResponse, RevokeRequest};
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/revoke
///
/// Revokes the access token used to authenticate the request and, when the
/// body names one, a refresh token as well. Both stay revoked until they
/// would have expired.
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Bearer token missing or rejected, or the refresh token is unreadable
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn revoke_tokens(
    state: web::Data<AppState>,
    auth: AuthContext,
    req: HttpRequest,
    body: Option<web::Json<RevokeRequest>>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let access_token = match extract_bearer_token(authorization) {
        Ok(token) => token,
        Err(error) => return handle_domain_error(error.into()),
    };

    let refresh_token = body
        .and_then(|body| body.into_inner().refresh_token)
        .filter(|token| !token.trim().is_empty());

    // Revoke the refresh token first so a failure leaves the caller able to retry
    if let Some(refresh_token) = refresh_token {
        if let Err(error) = state.authority.revoke(&refresh_token).await {
            return handle_domain_error(error);
        }
    }

    if let Err(error) = state.authority.revoke(access_token).await {
        return handle_domain_error(error);
    }

    tracing::info!(
        subject_id = %auth.subject_id(),
        token_id = %auth.token_id(),
        "Tokens revoked"
    );
    HttpResponse::Ok().json(MessageResponse::new("Tokens revoked"))
}
