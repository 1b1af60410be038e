//! # Authentication Middleware Module
//!
//! Intercepts requests to the usage endpoints, extracts the bearer token
//! from the `Authorization` header and resolves it through an
//! [`IdentityProvider`]. The resolved [`Principal`] is added to the request
//! extensions for route handlers. Requests that do not resolve to a
//! principal are answered with 401 and never reach the handler.
//!
//! ## Usage
//! ```rust,ignore
//! web::scope("/usage")
//!     .wrap(api_auth::auth_middleware(identity.clone()))
//!     .service(/* secured endpoints */)
//! ```

use std::{future::Future, pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use common::{error::AppError, jwt::bearer_token, principal::Principal};
use futures::future::{Ready, ok};
use log::{error, warn};

use crate::services::identity::IdentityProvider;

/// Authentication middleware for securing API endpoints.
pub struct AuthMiddleware {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthMiddleware {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        AuthMiddleware { provider }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            provider: self.provider.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    provider: Arc<dyn IdentityProvider>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Format: "Bearer <token>"
        let token_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        let provider = self.provider.clone();
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = token_value else {
                warn!("No authorization token provided for {}", req.path());
                return Ok(req.error_response(AppError::Unauthorized));
            };

            match provider.resolve(&token).await {
                Ok(Some(principal)) => {
                    req.extensions_mut().insert::<Principal>(principal);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Ok(None) => {
                    warn!("Invalid token for {}", req.path());
                    Ok(req.error_response(AppError::Unauthorized))
                }
                Err(e) => {
                    error!("Identity resolution failed for {}: {}", req.path(), e);
                    Ok(req.error_response(AppError::Unauthorized))
                }
            }
        })
    }
}
