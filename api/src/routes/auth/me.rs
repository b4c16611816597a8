use actix_web::HttpResponse;

use crate::dto::auth::IdentityResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
pub async fn current_identity(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse::from(&auth.claims))
}
