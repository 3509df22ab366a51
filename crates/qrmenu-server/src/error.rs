//! HTTP error mapping.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use qrmenu_core::QrMenuError;
use serde::Serialize;
use utoipa::ToSchema;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(QrMenuError);

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// `not_found`, `validation`, `inactive` or `internal`.
    pub error: String,
    pub message: String,
}

impl From<QrMenuError> for ApiError {
    fn from(err: QrMenuError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            QrMenuError::NotFound { .. } => StatusCode::NOT_FOUND,
            QrMenuError::Validation { .. } => StatusCode::BAD_REQUEST,
            QrMenuError::Inactive { .. } => StatusCode::GONE,
            QrMenuError::StoreUnavailable(_)
            | QrMenuError::EncodingTooLarge
            | QrMenuError::EncodingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self.0 {
            QrMenuError::NotFound { .. } => "not_found",
            QrMenuError::Validation { .. } => "validation",
            QrMenuError::Inactive { .. } => "inactive",
            _ => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal failures are logged and replaced with a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorBody {
            error: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (QrMenuError::not_found("Menu", "x"), StatusCode::NOT_FOUND),
            (QrMenuError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                QrMenuError::Inactive {
                    entity: "Establishment".into(),
                    id: "x".into(),
                },
                StatusCode::GONE,
            ),
            (
                QrMenuError::StoreUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (QrMenuError::EncodingTooLarge, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }
}
