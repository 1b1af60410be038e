use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    principal::Principal,
};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::IdentityProvider;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenValidationRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenValidationResponse {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Client for the external authentication service.
///
/// Tokens are checked with `POST {auth_service_url}/validate/validate-token`,
/// authenticated with the `X-API-Key` header.
pub struct AuthClient {
    client: Client,
    auth_service_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(auth_service_url: String, api_key: String) -> Self {
        AuthClient {
            client: Client::new(),
            auth_service_url: auth_service_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Res<Option<Principal>> {
        let request_body = TokenValidationRequest {
            token: token.to_string(),
        };

        debug!(
            "Sending token validation request to {}",
            self.auth_service_url
        );
        let response = self
            .client
            .post(format!("{}/validate/validate-token", self.auth_service_url))
            .json(&request_body)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                let error_response = response
                    .json::<serde_json::Value>()
                    .await
                    .unwrap_or(serde_json::json!({"message": "Failed to validate token"}));
                let message = error_response["message"]
                    .as_str()
                    .unwrap_or("Failed to validate token");
                debug!("Token validation failed: {}", message);
                return Ok(None);
            }
            status => {
                return Err(AppError::Internal(format!(
                    "Auth service answered {}",
                    status
                )));
            }
        }

        let token_response = response.json::<TokenValidationResponse>().await?;
        Ok(token_response.user_id.map(|user_id| {
            debug!("Token validated successfully for user_id: {}", user_id);
            Principal {
                user_id,
                email: token_response.email,
            }
        }))
    }
}

#[async_trait]
impl IdentityProvider for AuthClient {
    async fn resolve(&self, token: &str) -> Res<Option<Principal>> {
        self.validate_token(token).await
    }
}
