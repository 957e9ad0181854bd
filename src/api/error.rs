//! Translation of [`AppError`] into HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::domain::{AppError, DatabaseError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // Conflicts deliberately map to 400, not 409, for compatibility
            // with existing clients of this API.
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // A unique-constraint violation that reached the client untyped
            // is still a bad request.
            AppError::Database(DatabaseError::Duplicate(_)) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// A write referencing a missing id is a bad request; only reads and
/// deletes answer 404. Applied by the PUT handlers.
pub(crate) fn write_error(err: AppError) -> AppError {
    match err {
        AppError::NotFound(message) => AppError::Validation(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use http_body_util::BodyExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let response = AppError::Validation("username is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "username is required");
    }

    #[tokio::test]
    async fn test_conflict_maps_to_400() {
        let response = AppError::Conflict("username already exists".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404_with_message() {
        let response = AppError::NotFound("user not found with id: 3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "user not found with id: 3");
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_400() {
        let response =
            AppError::Database(DatabaseError::Duplicate("users_username_key".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_other_database_errors_map_to_500() {
        let response =
            AppError::Database(DatabaseError::Query("syntax error".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_config_and_internal_map_to_500() {
        let response =
            AppError::Config(ConfigError::MissingEnvVar("X".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_write_error_rewrites_not_found_only() {
        let err = write_error(AppError::NotFound("user not found with id: 1".to_string()));
        assert!(matches!(err, AppError::Validation(msg) if msg == "user not found with id: 1"));

        let err = write_error(AppError::Conflict("email already exists".to_string()));
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
