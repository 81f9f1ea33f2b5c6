use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finance_tracker_core::errors::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(CoreError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::warn!("Rejected request: {self}");
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
