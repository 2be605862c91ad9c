use crate::mood::UnknownEmotion;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to a status code
/// and an `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidEmotion(#[from] UnknownEmotion),

    #[error("No text provided")]
    NoText,

    #[error("{0}")]
    BadRequest(String),

    #[error("Emotion detection model or vectorizer failed to load")]
    ClassifierUnavailable,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidEmotion(_) | ApiError::NoText | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ClassifierUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidEmotion(_) => "invalid_emotion",
            ApiError::NoText => "no_text",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::ClassifierUnavailable => "classifier_unavailable",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
