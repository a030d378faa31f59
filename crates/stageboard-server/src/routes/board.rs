use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use stageboard_core::fields;
use stageboard_core::store;
use stageboard_core::transition::{StageTransitionCoordinator, TransitionOutcome};
use stageboard_core::StageboardError;

use crate::error::AppError;
use crate::routes::niche_or_default;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct BoardQuery {
    pub niche: Option<String>,
}

/// GET /api/board?niche=: one column per stage, in vocabulary order.
pub async fn get_board(
    State(app): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let item_store = app.store();
    let result = tokio::task::spawn_blocking(move || {
        let niche = niche_or_default(&root, query.niche.as_deref())?;
        let mut coordinator = StageTransitionCoordinator::new(&*item_store, niche);
        let count = coordinator.load();

        let columns: Vec<serde_json::Value> = coordinator
            .board()
            .columns()
            .into_iter()
            .map(|col| {
                let total_value = col.total_value();
                serde_json::json!({
                    "stage": col.stage,
                    "total_value": total_value,
                    "items": col.items,
                })
            })
            .collect();

        Ok::<_, StageboardError>(serde_json::json!({
            "niche": niche,
            "total_items": count,
            "columns": columns,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(fields::to_view(result)))
}

#[derive(serde::Deserialize)]
pub struct MoveBody {
    pub stage: String,
}

/// POST /api/board/{id}/move: drag an item onto another stage.
///
/// A write failure rolls the item back and answers 500 with the rolled-back
/// transition as the body.
pub async fn move_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let item_store = app.store();
    let outcome = tokio::task::spawn_blocking(move || {
        let niche = store::find_item(&*item_store, &id)?.niche;
        let mut coordinator = StageTransitionCoordinator::new(&*item_store, niche);
        coordinator.load();
        coordinator.move_item(&id, &body.stage)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let status = match outcome {
        TransitionOutcome::RolledBack(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };
    let json = serde_json::to_value(&outcome)?;
    Ok((status, Json(fields::to_view(json))))
}
