use crate::item::WorkItem;
use crate::types::{CanonicalStatus, Niche};
use crate::vocabulary::{self, StageEntry};
use serde::Serialize;

/// Translate a persisted status into the niche's stage id.
///
/// Unknown statuses resolve to the niche's earliest stage; this never fails.
pub fn map_status_to_stage(status: &str, niche: Niche) -> &'static str {
    match status.parse::<CanonicalStatus>() {
        Ok(canonical) => vocabulary::stage_for_status(niche, canonical),
        Err(_) => vocabulary::earliest_stage(niche).id,
    }
}

/// Human label for a stage id, or the earliest stage's label when the id is
/// not part of the niche's vocabulary.
pub fn stage_display_name(stage_id: &str, niche: Niche) -> &'static str {
    vocabulary::find_stage(niche, stage_id)
        .unwrap_or_else(|| vocabulary::earliest_stage(niche))
        .display_name
}

/// The stage id an item should be bucketed under.
pub fn resolve_stage(stage_id: &str, niche: Niche) -> &'static str {
    vocabulary::find_stage(niche, stage_id)
        .unwrap_or_else(|| vocabulary::earliest_stage(niche))
        .id
}

pub fn is_won(status: &str, niche: Niche) -> bool {
    niche.won_statuses().contains(&status)
}

// ---------------------------------------------------------------------------
// Stage counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    #[serde(flatten)]
    pub stage: StageEntry,
    pub count: usize,
    pub value: f64,
}

/// Bucket items into the niche's stages, in vocabulary order.
///
/// Every item lands in exactly one bucket, so the counts always sum to
/// `items.len()`.
pub fn stage_counts(items: &[WorkItem], niche: Niche) -> Vec<StageCount> {
    let mut buckets: Vec<StageCount> = vocabulary::stages_for(niche)
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: 0,
            value: 0.0,
        })
        .collect();

    for item in items {
        let id = resolve_stage(&item.stage, niche);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.stage.id == id) {
            bucket.count += 1;
            bucket.value += item.amount();
        }
    }
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
