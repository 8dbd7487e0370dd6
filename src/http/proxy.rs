//! Same-origin passthrough to the upstream API.
//!
//! Success bodies go out untouched. Every failure becomes `{code, error}`.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};

use crate::api::types::{ARTICLE_NOT_FOUND, NO_DATA_FOR_DATE};
use crate::api::{FetchError, UpstreamResponse};
use crate::error::RestError;
use crate::http::routes::AppState;
use crate::resolve::DateParam;

const GENERIC_FAILURE: &str = "An error occurred";

pub async fn article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, RestError> {
    let not_found = || RestError::Upstream {
        code: 404,
        message: ARTICLE_NOT_FOUND.to_string(),
    };

    let id: i64 = raw_id.parse().map_err(|_| not_found())?;
    let upstream = state.upstream.forward(&format!("article/{id}")).await?;
    if upstream.status == StatusCode::NOT_FOUND {
        return Err(not_found());
    }

    passthrough(upstream)
}

pub async fn date(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
) -> Result<Response, RestError> {
    let day = DateParam::parse(&raw_date)?;
    let upstream = state.upstream.forward(&format!("date/{day}")).await?;
    if upstream.status == StatusCode::NOT_FOUND {
        return Err(RestError::Upstream {
            code: 404,
            message: upstream
                .error_message()
                .unwrap_or_else(|| NO_DATA_FOR_DATE.to_string()),
        });
    }

    passthrough(upstream)
}

pub async fn latest(State(state): State<AppState>) -> Result<Response, RestError> {
    passthrough(state.upstream.forward("latest").await?)
}

fn passthrough(upstream: UpstreamResponse) -> Result<Response, RestError> {
    if !upstream.status.is_success() {
        return Err(RestError::Upstream {
            code: upstream.status.as_u16(),
            message: upstream
                .error_message()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        });
    }

    // Not reshaped, only checked to be JSON.
    serde_json::from_slice::<serde_json::Value>(&upstream.body).map_err(FetchError::Decode)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        upstream.body,
    )
        .into_response())
}
