use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::engine::{GameState, IllegalMove, InvariantViolation, RuleViolation};

/// Everything a handler can fail with. Status codes are chosen by variant, so
/// the message text is free to change.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not a number")]
    InvalidNumber,
    #[error("invalid board dimensions")]
    InvalidBoardDimensions,
    #[error("invalid body request")]
    InvalidBody(#[from] serde_json::Error),
    #[error("invalid body request")]
    UnreadableBody(#[source] BytesRejection),
    #[error("request body too large")]
    BodyTooLarge(#[source] BytesRejection),
    #[error("invalid game id")]
    InvalidGameId,
    #[error("snake is not moving")]
    SnakeNotMoving,
    #[error("{}", .0.violation)]
    IllegalMove(#[from] IllegalMove),
    #[error("fruit not found")]
    FruitNotFound(Box<GameState>),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("method not allowed")]
    MethodNotAllowed,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge(rejection)
        } else {
            ApiError::UnreadableBody(rejection)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidNumber
            | ApiError::InvalidBoardDimensions
            | ApiError::InvalidBody(_)
            | ApiError::UnreadableBody(_)
            | ApiError::InvalidGameId
            | ApiError::SnakeNotMoving => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::IllegalMove(err) => match err.violation {
                RuleViolation::InvalidMove => StatusCode::BAD_REQUEST,
                RuleViolation::ReverseMove
                | RuleViolation::DiagonalMove
                | RuleViolation::OutOfBounds => StatusCode::IM_A_TEAPOT,
            },
            ApiError::FruitNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// The state to send back alongside the message, if the caller needs it to
    /// carry on.
    fn state(self) -> Option<GameState> {
        match self {
            ApiError::IllegalMove(err) => Some(err.state),
            ApiError::FruitNotFound(state) => Some(*state),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request Error");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            state: self.state(),
        };

        (status, Json(body)).into_response()
    }
}
