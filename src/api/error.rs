//! Error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A single-record lookup found nothing.
    #[error("{0}")]
    NotFound(&'static str),

    /// The storage layer failed; `error` carries the underlying message.
    #[error("{message}: {error}")]
    Query { message: &'static str, error: String },

    /// A path or query parameter could not be used.
    #[error("{message}: {error}")]
    InvalidParameter { message: &'static str, error: String },
}

impl ApiError {
    /// Map a storage error to a [`ApiError::Query`] labelled with `message`.
    pub fn query(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |e| {
            tracing::error!("{}: {:#}", message, e);
            Self::Query {
                message,
                error: e.to_string(),
            }
        }
    }

    pub fn invalid(message: &'static str, error: impl ToString) -> Self {
        let error = error.to_string();
        tracing::warn!("{}: {}", message, error);
        Self::InvalidParameter { message, error }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Query { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound(message) => ErrorBody {
                message,
                error: None,
            },
            Self::Query { message, error } | Self::InvalidParameter { message, error } => {
                ErrorBody {
                    message,
                    error: Some(error.as_str()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
