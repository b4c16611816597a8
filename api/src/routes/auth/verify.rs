use actix_web::HttpResponse;

use crate::dto::auth::VerifyResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/verify
///
/// Reached only once [`JwtAuth`](crate::middleware::JwtAuth) has accepted
/// the bearer token, so the answer is always `valid: true`.
pub async fn verify_token(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(VerifyResponse::from(&auth.claims))
}
