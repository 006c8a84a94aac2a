use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::word::{CreateWordRequest, ListQuery, SearchQuery, UpdateWordRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

const OK: SuccessResponse = SuccessResponse { success: true };

/// Non-numeric ids can never match a row, so they are reported as a missing word.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim().parse::<i32>().map_err(|_| {
        tracing::warn!("--- unparsable word id: {:?}", raw);
        AppError::NotFound
    })
}

/// 1. List all words
pub async fn list_words(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    // page/limit are accepted for API compatibility; the listing is not paginated yet.
    // An unreadable query string falls back to the defaults.
    let query = query.map(|Query(q)| q).unwrap_or_default();
    tracing::debug!(">>> list words (page={}, limit={})", query.page(), query.limit());

    let words = state.words.list_all().await?;
    Ok(Json(words))
}

/// 2. Substring search on the word column
pub async fn search_words(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    // an unreadable query string (e.g. a repeated `q`) has no usable term
    let term = query
        .ok()
        .and_then(|Query(q)| q.q)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Invalid("Search term required".to_string()))?;

    tracing::debug!(">>> search words: q={}", term);
    let words = state.words.search(&term).await?;
    Ok(Json(words))
}

/// 3. Fetch one word
pub async fn get_word(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;

    match state.words.get_by_id(id).await? {
        Some(word) => Ok(Json(word)),
        None => Err(AppError::NotFound),
    }
}

/// 4. Create a word
pub async fn create_word(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateWordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // A missing or unreadable body counts as missing fields.
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    let new_word = request.validate()?;

    tracing::info!(">>> creating word: {}", new_word.word);
    let word = state.words.create(new_word).await.map_err(|e| {
        if let AppError::Conflict(_) = e {
            tracing::warn!("--- duplicate word rejected");
        }
        e
    })?;

    tracing::info!("<<< word created: id={}", word.id);
    Ok((StatusCode::CREATED, Json(word)))
}

/// 5. Partial update
pub async fn update_word(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateWordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    // A missing or unreadable body is an empty patch, as on create.
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    let patch = request.validate()?;

    tracing::info!(">>> updating word: ID={}", id);
    let found = if patch.is_empty() {
        // nothing to write; still answer 404 for an unknown id
        state.words.get_by_id(id).await?.is_some()
    } else {
        state.words.update(id, patch).await?
    };

    if !found {
        tracing::warn!("--- update of missing word: ID={}", id);
        return Err(AppError::NotFound);
    }
    tracing::info!("<<< word updated: ID={}", id);
    Ok(Json(OK))
}

/// 6. Delete a word
pub async fn delete_word(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;

    tracing::warn!(">>> deleting word: ID={}", id);
    if !state.words.delete(id).await? {
        tracing::warn!("--- delete of missing word: ID={}", id);
        return Err(AppError::NotFound);
    }
    tracing::info!("<<< word deleted: ID={}", id);
    Ok(Json(OK))
}

/// Liveness probe
pub async fn root() -> &'static str {
    "Dictionary API Running"
}
