use std::sync::Arc;

use common::env_config::{AuthMode, Config};
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod services {
    pub mod auth_client;
    pub mod identity;
}

pub use services::identity::IdentityProvider;

/// Builds the identity provider selected by `AUTH_MODE`.
pub fn identity_provider(config: &Config) -> Arc<dyn IdentityProvider> {
    match &config.auth {
        AuthMode::Remote {
            service_url,
            api_key,
        } => Arc::new(services::auth_client::AuthClient::new(
            service_url.clone(),
            api_key.clone(),
        )),
        AuthMode::Jwt { secret } => {
            Arc::new(services::identity::JwtIdentityProvider::new(secret.clone()))
        }
    }
}

// Auth middleware
pub fn auth_middleware(provider: Arc<dyn IdentityProvider>) -> AuthMiddleware {
    AuthMiddleware::new(provider)
}
