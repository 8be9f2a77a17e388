use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use iv_core::TourError;
use serde_json::json;

/// Error response: `{"success": false, "error": <code>, "message": <text>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", "User not logged in")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", "Admin privileges required")
    }
}

impl From<TourError> for ApiError {
    fn from(err: TourError) -> Self {
        match &err {
            TourError::Validation(message) => Self::validation(message.clone()),
            TourError::StepNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            TourError::CorruptRecord { .. } => {
                tracing::error!(error = %err, "corrupt step record");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "corrupt_record", err.to_string())
            }
            TourError::Storage(_) => {
                tracing::error!(error = %err, "config store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", err.to_string())
            }
            TourError::Directory(_) => {
                tracing::error!(error = %err, "user directory failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "directory_error", err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "success": false,
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iv_core::ports::ConfigStoreError;

    #[test]
    fn domain_errors_map_to_status_and_code() {
        let cases = [
            (TourError::validation("bad"), StatusCode::BAD_REQUEST, "validation_error"),
            (
                TourError::StepNotFound { id: "x".into() },
                StatusCode::NOT_FOUND,
                "not_found",
            ),
            (
                TourError::corrupt("nl", "not an array"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "corrupt_record",
            ),
            (
                TourError::Storage(ConfigStoreError::Write("disk full".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
            ),
        ];

        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn validation_message_is_passed_through() {
        let api: ApiError = TourError::validation("Invalid step data: title is required").into();
        assert_eq!(api.message, "Invalid step data: title is required");
    }
}
