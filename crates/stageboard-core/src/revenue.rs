use crate::item::WorkItem;
use crate::mapper;
use crate::types::{Niche, SplitKind};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Items that count as closed/won deals for `niche`.
pub fn won_items(items: &[WorkItem], niche: Niche) -> Vec<WorkItem> {
    items
        .iter()
        .filter(|i| mapper::is_won(i.status_key(), niche))
        .cloned()
        .collect()
}

pub fn gross_revenue(items: &[WorkItem]) -> f64 {
    items.iter().map(WorkItem::amount).sum()
}

/// Net contribution of one deal after its revenue splits, never below zero.
pub fn item_net(item: &WorkItem) -> f64 {
    let value = item.amount();
    let deductions: f64 = item
        .revenue_splits
        .iter()
        .filter(|s| s.amount.is_finite() && s.amount > 0.0)
        .map(|s| match s.kind {
            SplitKind::Percent => value * s.amount / 100.0,
            SplitKind::Fixed => s.amount,
            SplitKind::Unknown => 0.0,
        })
        .sum();
    (value - deductions).max(0.0)
}

pub fn net_revenue(items: &[WorkItem]) -> f64 {
    items.iter().map(item_net).sum()
}

/// `(year, month)` of the calendar month before the one containing `now`.
fn previous_month(now: DateTime<Utc>) -> (i32, u32) {
    if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    }
}

fn month_total(items: &[WorkItem], year: i32, month: u32) -> f64 {
    items
        .iter()
        .filter(|i| {
            i.revenue_date()
                .map(|d| d.year() == year && d.month() == month)
                .unwrap_or(false)
        })
        .map(WorkItem::amount)
        .sum()
}

/// Month-over-month growth in percent.
///
/// - previous > 0: relative change
/// - previous == 0, current > 0: 100 (new business)
/// - both zero: 0
pub fn growth_rate(items: &[WorkItem], now: DateTime<Utc>) -> f64 {
    let current = month_total(items, now.year(), now.month());
    let (py, pm) = previous_month(now);
    let previous = month_total(items, py, pm);

    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// RevenueSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub niche: Niche,
    pub gross: f64,
    pub net: f64,
    pub growth_rate: f64,
    pub won_count: usize,
}

/// Filter to the niche's won set and compute all headline metrics.
pub fn summarize(items: &[WorkItem], niche: Niche, now: DateTime<Utc>) -> RevenueSummary {
    let won = won_items(items, niche);
    let summary = RevenueSummary {
        niche,
        gross: gross_revenue(&won),
        net: net_revenue(&won),
        growth_rate: growth_rate(&won, now),
        won_count: won.len(),
    };
    tracing::debug!(
        niche = %niche,
        items = items.len(),
        won = summary.won_count,
        gross = summary.gross,
        net = summary.net,
        "revenue summary computed"
    );
    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
