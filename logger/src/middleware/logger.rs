//! # Logger Middleware Module
//!
//! Logs one line per HTTP request: method, path, status code, elapsed time
//! and the id of the authenticated principal when one was resolved.
//!
//! ## Usage
//! ```rust,ignore
//! App::new()
//!     .wrap(logger::middleware(console_logging_enabled))
//!     .service(/* routes */)
//! ```

use std::{rc::Rc, time::Instant};

use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
};
use colored::Colorize;
use common::principal::Principal;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::{info, warn};

/// Formats the line logged for one request.
pub fn request_line(
    method: &str,
    path: &str,
    status: StatusCode,
    elapsed_ms: u128,
    principal: Option<&Principal>,
) -> String {
    let user_id = principal.map_or("None".to_string(), |p| p.user_id.to_string());
    let status_text = status.as_u16().to_string();
    let status_text = if status.is_server_error() {
        status_text.red()
    } else if status.is_client_error() {
        status_text.yellow()
    } else {
        status_text.green()
    };

    format!(
        "{} {} {} {} user={}",
        method.bright_white(),
        path,
        status_text,
        format!("({}ms)", elapsed_ms).bright_black(),
        user_id.bright_blue(),
    )
}

pub struct LoggerMiddleware {
    console_logging_enabled: bool,
}

impl LoggerMiddleware {
    pub fn new(console_logging_enabled: bool) -> Self {
        Self {
            console_logging_enabled,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
            console_logging_enabled: self.console_logging_enabled,
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
    console_logging_enabled: bool,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        let console_logging_enabled = self.console_logging_enabled;
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let res = srv.call(req).await?;

            if console_logging_enabled {
                let status = res.status();
                // set by the auth middleware further down the chain
                let line = request_line(
                    &method,
                    &path,
                    status,
                    started.elapsed().as_millis(),
                    res.request().extensions().get::<Principal>(),
                );
                if status.is_server_error() {
                    warn!("{}", line);
                } else {
                    info!("{}", line);
                }
            }

            Ok(res.map_into_boxed_body())
        })
    }
}
