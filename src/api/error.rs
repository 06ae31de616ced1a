//! HTTP-level errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

use super::responses::ErrorResponse;
use crate::{
    state::StateError,
    timer::{Button, Press},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    State(#[from] StateError),

    #[error("unknown button `{0}`")]
    UnknownButton(String),

    #[error("{press} press on {button} has no binding")]
    UnboundPress { button: Button, press: Press },

    #[error("invalid press body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::State(StateError::TimerUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UnknownButton(_) => StatusCode::NOT_FOUND,
            ApiError::UnboundPress { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
