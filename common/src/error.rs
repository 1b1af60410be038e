use actix_web::{HttpResponse, http::StatusCode};
use log::error;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // === APPLICATION ERRORS ===
    #[error("Unauthorized")]
    Unauthorized,

    /// A usage procedure failed. The message is what the caller sees.
    #[error("{0}")]
    Procedure(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let json_response = serde_json::json!({"error": self.to_string()});
        let internal = || {
            HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": "Internal server error"}))
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(err) => {
                error!("Database error: {}", err);
                internal()
            }
            AppError::JWT(err) => {
                error!("JWT error: {}", err);
                internal()
            }
            AppError::Reqwest(err) => {
                error!("Reqwest error: {}", err);
                internal()
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized => HttpResponse::Unauthorized().json(json_response),
            AppError::Procedure(_) => HttpResponse::InternalServerError().json(json_response),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(json_response),

            AppError::Internal(err) => {
                error!("Internal error: {}", err);
                internal()
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.to_http_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn unauthorized_is_401() {
        let (status, body) = body_of(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));
    }

    #[actix_web::test]
    async fn procedure_error_keeps_its_message() {
        let (status, body) = body_of(AppError::Procedure("Failed to increment usage".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Failed to increment usage"}));
    }

    #[actix_web::test]
    async fn internal_details_are_hidden() {
        let (status, body) = body_of(AppError::Internal("pool exhausted".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));

        let (_, body) = body_of(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }
}
