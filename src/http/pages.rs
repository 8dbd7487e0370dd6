use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use http::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::article::Article;
use crate::error::RestError;
use crate::http::routes::AppState;
use crate::http::session::Session;
use crate::navigation::Departure;
use crate::resolve::{parse_article_id, DateParam, ResolveError};
use crate::view::date::{date_page, DateSelection};
use crate::view::detail::{article_error, article_page};
use crate::view::home::home_page;
use crate::view::{render_page, Page};

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub category: Option<String>,
    pub article: Option<String>,
}

fn status_for<T>(outcome: &Result<T, ResolveError>) -> StatusCode {
    match outcome {
        Ok(_) => StatusCode::OK,
        Err(ResolveError::NotFound(_)) => StatusCode::NOT_FOUND,
        Err(ResolveError::InvalidDateFormat(_)) => StatusCode::BAD_REQUEST,
        Err(ResolveError::Transport(_)) => StatusCode::BAD_GATEWAY,
    }
}

/// Scroll offset for `path`, only once its data has loaded.
async fn arrival<T>(
    session: &Session,
    path: &str,
    outcome: &Result<T, ResolveError>,
) -> Option<i64> {
    if outcome.is_err() {
        return None;
    }
    session.navigation().consume_arrival(path).await
}

pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let outcome = state.resolver.latest().await;
    if let Ok(articles) = &outcome {
        debug!("home: {} latest articles", articles.len());
    }

    let restore = arrival(&session, "/", &outcome).await;
    let page = Page::new("", home_page(&outcome)).restore_scroll(restore);

    (status_for(&outcome), session.cookie(), Html(render_page(&page)))
}

async fn resolve_article(
    state: &AppState,
    session: &Session,
    raw_id: &str,
    date: Option<&str>,
) -> Result<Article, ResolveError> {
    let date = date
        .filter(|raw| !raw.is_empty())
        .map(DateParam::parse)
        .transpose()?;
    let id = parse_article_id(raw_id)?;

    state
        .resolver
        .resolve(&session.cache(), id, date.as_ref())
        .await
}

pub async fn article(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> impl IntoResponse {
    let outcome = resolve_article(&state, &session, &raw_id, query.date.as_deref()).await;
    let show_back = session.navigation().take_navigated_from_site().await;
    let restore = arrival(&session, &format!("/article/{raw_id}"), &outcome).await;

    let page = match &outcome {
        Ok(article) => Page::new(
            article.title.clone(),
            article_page(article, show_back, &state.rules),
        ),
        Err(e) => Page::new("Article", article_error(e)),
    };

    (
        status_for(&outcome),
        session.cookie(),
        Html(render_page(&page.restore_scroll(restore))),
    )
}

pub async fn date(
    State(state): State<AppState>,
    session: Session,
    Path(raw_date): Path<String>,
    Query(query): Query<DateQuery>,
) -> impl IntoResponse {
    let outcome = state.resolver.list_date(&raw_date).await;
    let selection = DateSelection::from_query(query.category.as_deref(), query.article.as_deref());
    let restore = arrival(&session, &format!("/date/{raw_date}"), &outcome).await;

    let title = DateParam::parse(&raw_date)
        .map(|day| format!("Trends for {}", day.display()))
        .unwrap_or_else(|_| raw_date.clone());
    let body = date_page(&raw_date, &outcome, &selection, &state.rules);
    let page = Page::new(title, body).restore_scroll(restore);

    (status_for(&outcome), session.cookie(), Html(render_page(&page)))
}

/// Beacon sent by the page script right before following an internal link.
pub async fn departure(
    session: Session,
    Json(departure): Json<Departure>,
) -> Result<impl IntoResponse, RestError> {
    session.navigation().record_departure(&departure).await?;
    info!("session {} left {}", session.id, departure.path);

    Ok((StatusCode::NO_CONTENT, session.cookie()))
}
