use std::error::Error;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::{header, HeaderValue, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{api::FetchError, navigation::NavigationError, resolve::ResolveError};

#[derive(Debug, Error)]
pub enum RestError {
    /// Upstream answered with a failure status.
    #[error("{message}")]
    Upstream { code: u16, message: String },

    #[error("Internal server error")]
    Transport(#[from] FetchError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidDate(String),

    #[error("Error recording navigation")]
    Navigation(#[from] NavigationError),
}

impl From<ResolveError> for RestError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::NotFound(message) => RestError::NotFound(message),
            e @ ResolveError::InvalidDateFormat(_) => RestError::InvalidDate(e.to_string()),
            ResolveError::Transport(e) => RestError::Transport(e),
        }
    }
}

impl RestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::Upstream { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RestError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            RestError::Navigation(NavigationError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
            RestError::Navigation(NavigationError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        error!("{}: {:?}", self, self.source());

        let status = self.status();
        let payload = Json(json!({"code": status.as_u16(), "error": self.to_string()}));

        let mut response = (status, payload).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}
