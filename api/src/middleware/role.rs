//! Role requirement middleware
//!
//! Must run inside [`JwtAuth`](super::JwtAuth): register it with `.wrap()`
//! before `JwtAuth` so that authentication happens first.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use tg_core::errors::AuthError;
use tg_core::services::RoleGate;

use super::auth::AuthContext;
use crate::handlers::error::handle_domain_error;

/// Admits callers holding at least one of the given roles
#[derive(Debug, Clone)]
pub struct RequireRole {
    gate: Rc<RoleGate>,
}

impl RequireRole {
    pub fn any_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gate: Rc::new(RoleGate::any_of(roles)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: Rc::clone(&self.gate),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: Rc<RoleGate>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let context = req.extensions().get::<AuthContext>().cloned();
        let verdict = match &context {
            None => Err(AuthError::MissingCredential),
            Some(context) => self.gate.check(&context.claims),
        };

        Box::pin(async move {
            match verdict {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(error) => {
                    Ok(req.into_response(handle_domain_error(error.into())).map_into_right_body())
                }
            }
        })
    }
}
