use crate::dates::de_lenient_date;
use crate::error::{Result, StageboardError};
use crate::mapper;
use crate::types::{Niche, SplitKind};
use crate::vocabulary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Lenient numeric fields
// ---------------------------------------------------------------------------

/// Interpret a JSON/YAML scalar as a monetary amount. Numbers and numeric
/// strings are accepted; anything else is 0. Negative and non-finite values
/// clamp to 0.
pub fn lenient_amount(raw: &serde_json::Value) -> f64 {
    let n = match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

fn de_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(lenient_amount).unwrap_or(0.0))
}

fn de_opt_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(lenient_amount))
}

fn de_opt_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// RevenueSplit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub kind: SplitKind,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RevenueSplit {
    pub fn percent(amount: f64) -> Self {
        Self {
            kind: SplitKind::Percent,
            amount,
            label: None,
        }
    }

    pub fn fixed(amount: f64) -> Self {
        Self {
            kind: SplitKind::Fixed,
            amount,
            label: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ItemDetails: niche-specific optional fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    // creator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<String>,
    // coach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub enrollment_count: Option<u32>,
    // podcaster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub episode_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_date: Option<String>,
    // freelancer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ItemDetails {
    /// Overlay every field that is set in `other`.
    pub fn merge(&mut self, other: ItemDetails) {
        fn take<T>(dst: &mut Option<T>, src: Option<T>) {
            if src.is_some() {
                *dst = src;
            }
        }
        take(&mut self.platform, other.platform);
        take(&mut self.post_date, other.post_date);
        take(&mut self.program_type, other.program_type);
        take(&mut self.start_date, other.start_date);
        take(&mut self.enrollment_count, other.enrollment_count);
        take(&mut self.guest_name, other.guest_name);
        take(&mut self.episode_number, other.episode_number);
        take(&mut self.record_date, other.record_date);
        take(&mut self.client_name, other.client_name);
        take(&mut self.due_date, other.due_date);
        take(&mut self.notes, other.notes);
    }
}

// ---------------------------------------------------------------------------
// WorkItem
// ---------------------------------------------------------------------------

/// A content item or opportunity moving through a niche pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub niche: Niche,
    #[serde(default)]
    pub title: String,
    pub stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub value: f64,
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "de_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "de_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revenue_splits: Vec<RevenueSplit>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl WorkItem {
    /// A fresh item in the niche's earliest stage.
    pub fn new(niche: Niche, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            niche,
            title: title.into(),
            stage: vocabulary::earliest_stage(niche).id.to_string(),
            status: None,
            value: 0.0,
            created_at: Some(now),
            closed_at: None,
            updated_at: Some(now),
            revenue_splits: Vec::new(),
            details: ItemDetails::default(),
        }
    }

    /// Build a stored item from a create request.
    ///
    /// The stage is the requested one when it belongs to the niche, else the
    /// stage mapped from `status`, else the earliest stage.
    pub fn from_new(new: NewItem) -> Self {
        let mut item = Self::new(new.niche, new.title);
        item.stage = match (&new.stage, &new.status) {
            (Some(stage), _) if vocabulary::contains_stage(new.niche, stage) => stage.clone(),
            (_, Some(status)) => mapper::map_status_to_stage(status, new.niche).to_string(),
            _ => item.stage,
        };
        item.status = new.status;
        item.value = new.value;
        item.closed_at = new.closed_at;
        item.revenue_splits = new.revenue_splits;
        item.details = new.details;
        item
    }

    /// Monetary value with the lenient rules applied.
    pub fn amount(&self) -> f64 {
        if self.value.is_finite() && self.value > 0.0 {
            self.value
        } else {
            0.0
        }
    }

    /// Status used for won classification: the explicit status when present,
    /// else the stage id.
    pub fn status_key(&self) -> &str {
        self.status.as_deref().unwrap_or(&self.stage)
    }

    /// Timestamp used for time-window bucketing.
    pub fn revenue_date(&self) -> Option<DateTime<Utc>> {
        self.closed_at.or(self.created_at)
    }

    pub fn stage_display_name(&self) -> &'static str {
        mapper::stage_display_name(&self.stage, self.niche)
    }

    /// Apply a partial update. The niche may be re-asserted but never
    /// changed, and a new stage must belong to the niche's vocabulary.
    pub fn apply_patch(&mut self, patch: ItemPatch) -> Result<()> {
        if let Some(niche) = patch.niche {
            if niche != self.niche {
                return Err(StageboardError::NicheMismatch {
                    id: self.id.clone(),
                    expected: self.niche.to_string(),
                    got: niche.to_string(),
                });
            }
        }
        if let Some(stage) = &patch.stage {
            if !vocabulary::contains_stage(self.niche, stage) {
                return Err(StageboardError::UnknownStage {
                    stage: stage.clone(),
                    niche: self.niche.to_string(),
                });
            }
        }

        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(closed_at) = patch.closed_at {
            self.closed_at = Some(closed_at);
        }
        if let Some(splits) = patch.revenue_splits {
            self.revenue_splits = splits;
        }
        self.details.merge(patch.details);
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NewItem / ItemPatch: CRUD request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub niche: Niche,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_amount")]
    pub value: f64,
    #[serde(
        default,
        deserialize_with = "de_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revenue_splits: Vec<RevenueSplit>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl NewItem {
    pub fn new(niche: Niche, title: impl Into<String>) -> Self {
        Self {
            niche,
            title: title.into(),
            stage: None,
            status: None,
            value: 0.0,
            closed_at: None,
            revenue_splits: Vec::new(),
            details: ItemDetails::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<Niche>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_splits: Option<Vec<RevenueSplit>>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl ItemPatch {
    /// The body sent for a stage move. The niche is re-asserted so a stale
    /// read elsewhere cannot overwrite it.
    pub fn stage_move(niche: Niche, stage: impl Into<String>) -> Self {
        Self {
            niche: Some(niche),
            stage: Some(stage.into()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
