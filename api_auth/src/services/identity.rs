use async_trait::async_trait;
use common::{error::Res, jwt, principal::Principal};
use log::debug;

/// Resolves a bearer token into the principal it belongs to.
///
/// `Ok(None)` means the token was understood but does not identify anyone
/// (expired, revoked, unknown). `Err` means resolution itself failed.
/// The middleware answers 401 in both cases.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Res<Option<Principal>>;
}

/// Verifies HS256 tokens locally; the `sub` claim is the user id.
pub struct JwtIdentityProvider {
    secret: String,
}

impl JwtIdentityProvider {
    pub fn new(secret: String) -> Self {
        JwtIdentityProvider { secret }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Res<Option<Principal>> {
        match jwt::validate_jwt(token, &self.secret) {
            Ok(claims) => Ok(Some(claims.into())),
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use common::jwt::JwtClaims;
    use jsonwebtoken::{EncodingKey, Header};
    use uuid::Uuid;

    use super::*;

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn resolves_valid_token() {
        let user_id = Uuid::new_v4();
        let token = sign(
            &JwtClaims {
                sub: user_id,
                email: None,
                exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
            },
            "secret",
        );

        let provider = JwtIdentityProvider::new("secret".to_string());
        let principal = provider.resolve(&token).await.unwrap().unwrap();
        assert_eq!(principal.user_id, user_id);
    }

    #[actix_web::test]
    async fn invalid_tokens_resolve_to_nobody() {
        let provider = JwtIdentityProvider::new("secret".to_string());
        let expired = sign(
            &JwtClaims {
                sub: Uuid::new_v4(),
                email: None,
                exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
            },
            "secret",
        );

        assert_eq!(provider.resolve(&expired).await.unwrap(), None);
        assert_eq!(provider.resolve("garbage").await.unwrap(), None);
    }
}
