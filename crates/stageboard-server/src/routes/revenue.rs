use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use stageboard_core::dashboard;
use stageboard_core::dates;
use stageboard_core::fields;
use stageboard_core::series::RevenueWindow;
use stageboard_core::store;
use stageboard_core::types::WindowKind;
use stageboard_core::StageboardError;

use crate::error::AppError;
use crate::routes::niche_or_default;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct RevenueQuery {
    pub niche: Option<String>,
    pub window: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => dates::parse_day(s)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("invalid '{name}' date: {s}"))),
    }
}

/// GET /api/revenue?niche=&window=&from=&to=: headline metrics, stage
/// counts and the windowed monthly series for the current year.
pub async fn get_revenue(
    State(app): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let kind: WindowKind = query.window.as_deref().unwrap_or("month").parse()?;
    let window = match kind {
        WindowKind::Custom => RevenueWindow::custom(
            parse_bound("from", query.from.as_deref())?,
            parse_bound("to", query.to.as_deref())?,
        ),
        other => RevenueWindow::new(other),
    };

    let root = app.root.clone();
    let item_store = app.store();
    let niche_param = query.niche;
    let result = tokio::task::spawn_blocking(move || {
        let niche = niche_or_default(&root, niche_param.as_deref())?;
        let items = store::load_or_empty(&*item_store, niche);
        let snapshot = dashboard::snapshot(&items, niche, window, Utc::now());
        let json = serde_json::to_value(&snapshot)?;
        Ok::<_, StageboardError>(json)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(fields::to_view(result)))
}
