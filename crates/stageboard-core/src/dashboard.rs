use crate::item::WorkItem;
use crate::mapper::{self, StageCount};
use crate::revenue::{self, RevenueSummary};
use crate::series::{self, MonthlyPoint, RevenueWindow};
use crate::types::Niche;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Everything the dashboard panels render for one niche.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub niche: Niche,
    pub total_items: usize,
    pub stages: Vec<StageCount>,
    pub revenue: RevenueSummary,
    /// Gross won revenue inside `window`.
    pub window_revenue: f64,
    pub window: RevenueWindow,
    pub series: Vec<MonthlyPoint>,
    pub generated_at: DateTime<Utc>,
}

/// Build a snapshot from the raw record collection of one niche.
///
/// The series covers the calendar year of `now`.
pub fn snapshot(
    items: &[WorkItem],
    niche: Niche,
    window: RevenueWindow,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let won = revenue::won_items(items, niche);
    let window_revenue = revenue::gross_revenue(&series::items_in_window(&won, &window, now));
    let full_series = series::monthly_series(&won, now.year());

    DashboardSnapshot {
        niche,
        total_items: items.len(),
        stages: mapper::stage_counts(items, niche),
        revenue: revenue::summarize(items, niche, now),
        window_revenue,
        window,
        series: series::windowed(&full_series, &window, now),
        generated_at: now,
    }
}
