use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ErrorBody;

pub type Result<T> = std::result::Result<T, SpecCheckError>;

#[derive(Debug, Error)]
pub enum SpecCheckError {
    #[error("missing required field: {0}")]
    Validation(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("generator request failed: {0}")]
    Upstream(String),

    /// The generator replied, but no well-formed payload could be extracted
    /// from its text. The raw text is kept for diagnostics.
    #[error("invalid generator response format: {reason}")]
    MalformedUpstreamResponse { reason: String, raw: String },

    #[error("an analysis is already in progress")]
    InFlight,
}

impl SpecCheckError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::InFlight => StatusCode::TOO_MANY_REQUESTS,
            Self::Configuration(_)
            | Self::Upstream(_)
            | Self::MalformedUpstreamResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SpecCheckError {
    fn into_response(self) -> Response {
        if let Self::MalformedUpstreamResponse { reason, raw } = &self {
            tracing::error!(%reason, raw_response = %raw, "generator response failed extraction");
        } else {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
