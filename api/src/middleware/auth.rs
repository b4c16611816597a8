//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware reads the bearer token from the Authorization header,
//! verifies it through the [`TokenAuthority`] and injects the caller's
//! [`AuthContext`] into the request. Rejected requests never reach the
//! wrapped service.
//!
//! The authority comes from the middleware itself when built with
//! [`JwtAuth::with_authority`], otherwise from the [`AppState`] app data.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::BTreeSet,
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use tg_core::domain::entities::AccessClaims;
use tg_core::errors::{AuthError, DomainError};
use tg_core::services::{Authenticator, TokenAuthority};

use crate::app::AppState;
use crate::handlers::error::{handle_domain_error, ApiError};

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Verified access claims
    pub claims: AccessClaims,
}

impl AuthContext {
    pub fn new(claims: AccessClaims) -> Self {
        Self { claims }
    }

    pub fn subject_id(&self) -> &str {
        &self.claims.subject_id
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.claims.roles
    }

    pub fn token_id(&self) -> &str {
        &self.claims.token_id
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.claims.has_role(role)
    }
}

impl From<AccessClaims> for AuthContext {
    fn from(claims: AccessClaims) -> Self {
        Self::new(claims)
    }
}

/// JWT authentication middleware factory
#[derive(Clone, Default)]
pub struct JwtAuth {
    authenticator: Option<Authenticator>,
}

impl JwtAuth {
    /// Authenticates against the authority held in [`AppState`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates against a specific authority
    pub fn with_authority(authority: Arc<dyn TokenAuthority>) -> Self {
        Self {
            authenticator: Some(Authenticator::new(authority)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Option<Authenticator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone().or_else(|| {
            req.app_data::<web::Data<AppState>>()
                .map(|state| state.authenticator())
        });

        Box::pin(async move {
            let Some(authenticator) = authenticator else {
                let error = DomainError::Internal {
                    message: "JwtAuth has no token authority configured".to_string(),
                };
                return Ok(req.into_response(handle_domain_error(error)).map_into_right_body());
            };

            // A header that is not visible ASCII cannot carry a bearer token
            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default().to_string());

            match authenticator.authenticate(authorization.as_deref()).await {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthContext::new(claims));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    tracing::info!(path = %req.path(), "Authentication failed");
                    Ok(req.into_response(handle_domain_error(error)).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor for the authenticated caller
///
/// Fails with 401 when the request did not pass through [`JwtAuth`].
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| ApiError::from(AuthError::MissingCredential)),
        )
    }
}

/// Extractor for routes that serve both anonymous and authenticated callers
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthContext>);

impl OptionalAuth {
    pub fn into_inner(self) -> Option<AuthContext> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalAuth(req.extensions().get::<AuthContext>().cloned())))
    }
}
