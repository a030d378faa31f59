use axum::extract::Path;
use axum::Json;
use stageboard_core::fields;
use stageboard_core::types::Niche;
use stageboard_core::vocabulary;

use crate::error::AppError;

/// GET /api/niches: the supported niches and the size of each vocabulary.
pub async fn list_niches() -> Json<serde_json::Value> {
    let niches: Vec<serde_json::Value> = Niche::all()
        .iter()
        .map(|&niche| {
            let table = vocabulary::table_for(niche);
            serde_json::json!({
                "niche": niche,
                "stage_count": table.stages.len(),
                "earliest": vocabulary::earliest_stage(niche).id,
            })
        })
        .collect();
    Json(fields::to_view(serde_json::Value::Array(niches)))
}

/// GET /api/stages/{niche}: ordered vocabulary entries.
///
/// An unrecognized niche renders the creator vocabulary.
pub async fn get_stages(Path(niche): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let stages = vocabulary::stages_for_name(&niche);
    let json = serde_json::to_value(stages)?;
    Ok(Json(fields::to_view(json)))
}
