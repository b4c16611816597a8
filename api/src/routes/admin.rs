//! Administrative endpoints, all behind the `admin` role

use actix_web::HttpResponse;

use crate::dto::auth::MessageResponse;
use crate::middleware::AuthContext;

pub use tg_core::domain::entities::ADMIN_ROLE;

/// Handler for GET /api/v1/admin/ping
pub async fn ping(auth: AuthContext) -> HttpResponse {
    tracing::debug!(subject_id = %auth.subject_id(), "Admin ping");
    HttpResponse::Ok().json(MessageResponse::new("pong"))
}
