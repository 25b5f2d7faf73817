use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::dto::{MovieDetails, MoviePage, TimeWindow};
use super::CatalogClient;
use crate::error::ApiError;
use crate::state::AppState;

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/trending", get(trending))
        .route("/movies/popular", get(popular))
        .route("/movies/top_rated", get(top_rated))
        .route("/movies/now_playing", get(now_playing))
        .route("/movies/upcoming", get(upcoming))
        .route("/movies/search", get(search))
        .route("/movies/:id", get(details))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    pub time_window: TimeWindow,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

// Routes are only mounted when a catalog key is configured, so this guard is
// unreachable in practice; it keeps the handlers total.
fn catalog(state: &AppState) -> Result<&Arc<CatalogClient>, ApiError> {
    state
        .catalog
        .as_ref()
        .ok_or_else(|| ApiError::Upstream(anyhow::anyhow!("catalog API key not configured")))
}

async fn trending(
    State(state): State<AppState>,
    Query(q): Query<TrendingQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = catalog(&state)?
        .trending(q.time_window)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn popular(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = catalog(&state)?
        .popular(q.page)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn top_rated(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = catalog(&state)?
        .top_rated(q.page)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn now_playing(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = catalog(&state)?
        .now_playing(q.page)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn upcoming(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = catalog(&state)?
        .upcoming(q.page)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let query = q.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("Search query is required".into()));
    }
    let page = catalog(&state)?
        .search(query, q.page)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(page))
}

async fn details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetails>, ApiError> {
    let details = catalog(&state)?
        .details(id)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(details))
}
