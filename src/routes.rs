use std::{path::Path, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path as UrlPath, State, rejection::JsonRejection},
    routing::get,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, MovieInput, MovieList, Outcome, SearchField},
};

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // Unknown paths get the SPA entry document so client-side routing keeps working.
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/movies", get(list).post(create))
        .route("/movies/{id}", get(show).put(update).delete(destroy))
        .route("/movies/search/{field}/{term}", get(search))
        .fallback_service(spa)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Ids that are not a valid primary key, out of range or non-numeric,
/// cannot name an existing row.
fn movie_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>().map_err(|_| AppError::not_found(raw))
}

fn body(payload: Result<Json<MovieInput>, JsonRejection>) -> AppResult<MovieInput> {
    payload.map(|Json(input)| input).map_err(|rejection| AppError::validation(rejection.body_text()))
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<MovieList>> {
    let movies = state.store.list().await?;
    Ok(Json(MovieList { movies }))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.store.get(movie_id(&id)?).await?))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    UrlPath((field, term)): UrlPath<(String, String)>,
) -> AppResult<Json<MovieList>> {
    let field: SearchField = field.parse()?;
    let movies = state.store.search(field, &term).await?;
    tracing::debug!(field = field.as_str(), term = %term, hits = movies.len(), "search");
    Ok(Json(MovieList { movies }))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Outcome>> {
    state.store.create(body(payload)?).await?;
    Ok(Json(Outcome { success: true }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Json<Outcome>> {
    let id = movie_id(&id)?;
    let existing = state.store.find(id).await?.ok_or_else(|| AppError::not_found(id))?;
    state.store.update(existing, body(payload)?).await?;
    Ok(Json(Outcome { success: true }))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> AppResult<Json<Outcome>> {
    state.store.delete(movie_id(&id)?).await?;
    Ok(Json(Outcome { success: true }))
}
