//! Monthly revenue buckets and time-window slicing for the chart panels.

use crate::item::WorkItem;
use crate::types::WindowKind;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// MonthlyPoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// 1 = January.
    pub month: u32,
    pub label: &'static str,
    pub total: f64,
}

/// Twelve buckets, January through December of `year`, zero-filled.
///
/// Items without a revenue date or dated outside `year` contribute nothing.
pub fn monthly_series(items: &[WorkItem], year: i32) -> Vec<MonthlyPoint> {
    let mut totals = [0.0_f64; 12];
    for item in items {
        let Some(date) = item.revenue_date() else {
            continue;
        };
        if date.year() == year {
            totals[date.month0() as usize] += item.amount();
        }
    }
    totals
        .iter()
        .enumerate()
        .map(|(i, &total)| MonthlyPoint {
            month: i as u32 + 1,
            label: MONTH_LABELS[i],
            total,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// RevenueWindow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueWindow {
    pub kind: WindowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl RevenueWindow {
    pub fn new(kind: WindowKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
        }
    }

    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            kind: WindowKind::Custom,
            start,
            end,
        }
    }

    /// Both custom boundaries, lowest first. `None` unless both are set.
    fn ordered_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(a), Some(b)) => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }
}

/// Slice a 12-entry monthly series for display.
///
/// - `month`: unchanged; the view picks the current entry.
/// - `quarter`: every third entry starting at January.
/// - `ytd`: January through the month containing `now`.
/// - `custom`: the inclusive month range between the two boundaries in
///   either order; the whole series when a boundary is missing.
pub fn windowed(
    series: &[MonthlyPoint],
    window: &RevenueWindow,
    now: DateTime<Utc>,
) -> Vec<MonthlyPoint> {
    match window.kind {
        WindowKind::Month => series.to_vec(),
        WindowKind::Quarter => series.iter().step_by(3).cloned().collect(),
        WindowKind::Ytd => series
            .iter()
            .take(now.month() as usize)
            .cloned()
            .collect(),
        WindowKind::Custom => match window.ordered_bounds() {
            Some((lo, hi)) => {
                let (lo, hi) = (lo.month0() as usize, hi.month0() as usize);
                let (lo, hi) = (lo.min(hi), lo.max(hi));
                series
                    .iter()
                    .skip(lo)
                    .take(hi - lo + 1)
                    .cloned()
                    .collect()
            }
            None => series.to_vec(),
        },
    }
}

// ---------------------------------------------------------------------------
// Record-level window filter
// ---------------------------------------------------------------------------

fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3
}

/// Whether `date` falls inside `window` as seen from `now`.
pub fn in_window(date: DateTime<Utc>, window: &RevenueWindow, now: DateTime<Utc>) -> bool {
    match window.kind {
        WindowKind::Month => date.year() == now.year() && date.month() == now.month(),
        WindowKind::Quarter => {
            date.year() == now.year() && quarter_of(date.month()) == quarter_of(now.month())
        }
        WindowKind::Ytd => date.year() == now.year() && date <= now,
        WindowKind::Custom => match window.ordered_bounds() {
            Some((lo, hi)) => {
                let day = date.date_naive();
                day >= lo && day <= hi
            }
            None => true,
        },
    }
}

/// Records whose revenue date falls inside the window.
///
/// Undated records are dropped from every bounded window; an unbounded
/// custom window keeps everything.
pub fn items_in_window(
    items: &[WorkItem],
    window: &RevenueWindow,
    now: DateTime<Utc>,
) -> Vec<WorkItem> {
    let unbounded = window.kind == WindowKind::Custom && window.ordered_bounds().is_none();
    items
        .iter()
        .filter(|item| match item.revenue_date() {
            Some(date) => in_window(date, window, now),
            None => unbounded,
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
