use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Field-keyed validation messages, serialized as a flat `{field: message}` object.
/// The first message recorded for a field wins.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("email already exists")]
    DuplicateEmail,

    #[error("user not found")]
    UserNotFound,

    #[error("password incorrect")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "email": "Email already exists" })),
            )
                .into_response(),
            ApiError::UserNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "email": "User not found" })),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "password": "Password incorrect" })),
            )
                .into_response(),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_field_keyed_400() {
        let res = ApiError::DuplicateEmail.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(
            json.get("email").and_then(|v| v.as_str()),
            Some("Email already exists")
        );
    }

    #[tokio::test]
    async fn user_not_found_is_404() {
        let res = ApiError::UserNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json.get("email").and_then(|v| v.as_str()), Some("User not found"));
    }

    #[tokio::test]
    async fn invalid_credentials_keys_on_password() {
        let res = ApiError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(
            json.get("password").and_then(|v| v.as_str()),
            Some("Password incorrect")
        );
    }

    #[tokio::test]
    async fn validation_serializes_flat_field_map() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name field is required");
        errors.push("name", "shadowed");
        errors.push("email", "Email is invalid");
        let res = ApiError::Validation(errors).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(
            json.get("name").and_then(|v| v.as_str()),
            Some("Name field is required")
        );
        assert_eq!(json.get("email").and_then(|v| v.as_str()), Some("Email is invalid"));
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let res = ApiError::Unauthorized("Missing Authorization header".into()).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
