use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use mdsnips_core::models::search::{SearchParams, SortBy, DEFAULT_LIMIT};
use mdsnips_core::models::snippet::{
    CreatedSnippet, NewSnippet, Snippet, SnippetListItem, UpdateSnippet,
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validate;

/// Header carrying the update key on `DELETE /md/{id}`.
pub const UPDATE_KEY_HEADER: &str = "x-update-key";

/// Raw search query string. Parsed by hand so each bad value gets its own
/// message.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub limit: Option<String>,
    pub skip: Option<String>,
    pub sort: Option<String>,
}

impl SearchQuery {
    fn into_params(self) -> Result<SearchParams, ApiError> {
        let limit = parse_count("limit", self.limit.as_deref(), DEFAULT_LIMIT)?;
        let skip = parse_count("skip", self.skip.as_deref(), 0)?;
        let sort_by = match self.sort.as_deref() {
            Some(sort) => sort.parse::<SortBy>()?,
            None => SortBy::default(),
        };

        Ok(SearchParams {
            text: self.text,
            limit,
            skip,
            sort_by,
        })
    }
}

fn parse_count(name: &str, raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("{name}: invalid value"))),
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("markdown snippet not found".to_string())
}

fn invalid_key() -> ApiError {
    ApiError::Unauthorized("invalid update key".to_string())
}

pub async fn create_snippet(
    State(state): State<AppState>,
    payload: Result<Json<NewSnippet>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedSnippet>), ApiError> {
    let Json(req) = payload?;
    let errors = validate::new_snippet(&req);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let created = state.store.create(&req).await?;
    info!(id = %created.snippet.id, "snippet created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    state.store.get(&id).await?.map(Json).ok_or_else(not_found)
}

/// Deprecated: unpaginated listing, kept for older clients. Use search.
pub async fn list_snippets(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnippetListItem>>, ApiError> {
    #[allow(deprecated)]
    let items = state.store.list_all().await?;
    Ok(Json(items))
}

pub async fn search_snippets(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SnippetListItem>>, ApiError> {
    let params = query.into_params()?;
    let items = state.store.search(&params).await?;
    Ok(Json(items))
}

pub async fn update_snippet(
    State(state): State<AppState>,
    payload: Result<Json<UpdateSnippet>, JsonRejection>,
) -> Result<Json<Snippet>, ApiError> {
    let Json(patch) = payload?;
    let errors = validate::update_snippet(&patch);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if !state.guard.authorize(&patch.id, &patch.update_key).await {
        return Err(invalid_key());
    }

    let updated = state.store.update(&patch).await?;
    info!(id = %updated.id, "snippet updated");
    Ok(Json(updated))
}

pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let key = headers
        .get(UPDATE_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if key.is_empty() || !state.guard.authorize(&id, key).await {
        return Err(invalid_key());
    }

    // The guard passed, so false here means a concurrent delete won.
    if state.store.delete(&id, key).await? {
        info!(id = %id, "snippet deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
