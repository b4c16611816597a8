use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use tg_core::services::{Authenticator, TokenAuthority};

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::{JwtAuth, RequireRole};
use crate::routes::{admin, auth, health};

/// Shared state handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub authority: Arc<dyn TokenAuthority>,
}

impl AppState {
    pub fn new(authority: Arc<dyn TokenAuthority>) -> Self {
        Self { authority }
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(Arc::clone(&self.authority))
    }
}

/// Create the application with all routes and middleware configured
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/refresh", web::post().to(auth::refresh::refresh_token))
                        .service(
                            web::resource("/verify")
                                .wrap(JwtAuth::new())
                                .route(web::get().to(auth::verify::verify_token)),
                        )
                        .service(
                            web::resource("/revoke")
                                .wrap(JwtAuth::new())
                                .route(web::post().to(auth::revoke::revoke_tokens)),
                        )
                        .service(
                            web::resource("/me")
                                .wrap(JwtAuth::new())
                                .route(web::get().to(auth::me::current_identity)),
                        ),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RequireRole::any_of([admin::ADMIN_ROLE]))
                        .wrap(JwtAuth::new())
                        .route("/ping", web::get().to(admin::ping)),
                ),
        )
        .default_service(web::to(not_found))
}
