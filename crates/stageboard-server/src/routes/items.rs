//! The item CRUD contract. Bodies and responses use the stored snake_case
//! field names so `HttpStore` can talk to this server directly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use stageboard_core::item::{ItemPatch, NewItem, WorkItem};
use stageboard_core::store::ItemStore;
use stageboard_core::types::Niche;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListQuery {
    pub niche: Option<String>,
}

/// GET /items?niche=: every item of one niche, oldest first.
pub async fn list_items(
    State(app): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WorkItem>>, AppError> {
    let niche: Niche = query
        .niche
        .ok_or_else(|| AppError::bad_request("missing 'niche' query parameter"))?
        .parse()?;
    let store = app.store();
    let items = tokio::task::spawn_blocking(move || store.list(niche))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(items))
}

/// POST /items: create an item; the server assigns its id.
pub async fn create_item(
    State(app): State<AppState>,
    Json(body): Json<NewItem>,
) -> Result<(StatusCode, Json<WorkItem>), AppError> {
    let store = app.store();
    let item = tokio::task::spawn_blocking(move || store.create(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id}: apply a partial update and return the stored item.
pub async fn update_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ItemPatch>,
) -> Result<Json<WorkItem>, AppError> {
    let store = app.store();
    let item = tokio::task::spawn_blocking(move || store.update(&id, body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(item))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store();
    let result = tokio::task::spawn_blocking(move || {
        store.delete(&id)?;
        Ok::<_, stageboard_core::StageboardError>(serde_json::json!({
            "id": id,
            "deleted": true,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
