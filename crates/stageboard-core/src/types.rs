use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Niche
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Niche {
    Creator,
    Coach,
    Podcaster,
    Freelancer,
}

impl Niche {
    pub fn all() -> &'static [Niche] {
        &[
            Niche::Creator,
            Niche::Coach,
            Niche::Podcaster,
            Niche::Freelancer,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Niche::Creator => "creator",
            Niche::Coach => "coach",
            Niche::Podcaster => "podcaster",
            Niche::Freelancer => "freelancer",
        }
    }

    /// Parse a niche name, falling back to [`Niche::Creator`] for anything
    /// outside the supported set.
    pub fn from_str_or_default(s: &str) -> Niche {
        s.parse().unwrap_or(Niche::Creator)
    }

    /// Statuses counted as a closed/won deal for this niche.
    ///
    /// Coach treats `paid` as terminal success alongside `won`.
    pub fn won_statuses(self) -> &'static [&'static str] {
        match self {
            Niche::Coach => &["won", "paid"],
            Niche::Creator | Niche::Podcaster | Niche::Freelancer => &["won"],
        }
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Niche {
    type Err = crate::error::StageboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(Niche::Creator),
            "coach" => Ok(Niche::Coach),
            "podcaster" => Ok(Niche::Podcaster),
            "freelancer" => Ok(Niche::Freelancer),
            _ => Err(crate::error::StageboardError::UnsupportedNiche(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// CanonicalStatus
// ---------------------------------------------------------------------------

/// Niche-independent workflow status as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl CanonicalStatus {
    pub fn all() -> &'static [CanonicalStatus] {
        &[
            CanonicalStatus::Prospecting,
            CanonicalStatus::Qualification,
            CanonicalStatus::Proposal,
            CanonicalStatus::Negotiation,
            CanonicalStatus::Won,
            CanonicalStatus::Lost,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalStatus::Prospecting => "prospecting",
            CanonicalStatus::Qualification => "qualification",
            CanonicalStatus::Proposal => "proposal",
            CanonicalStatus::Negotiation => "negotiation",
            CanonicalStatus::Won => "won",
            CanonicalStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalStatus {
    type Err = crate::error::StageboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prospecting" => Ok(CanonicalStatus::Prospecting),
            "qualification" => Ok(CanonicalStatus::Qualification),
            "proposal" => Ok(CanonicalStatus::Proposal),
            "negotiation" => Ok(CanonicalStatus::Negotiation),
            "won" => Ok(CanonicalStatus::Won),
            "lost" => Ok(CanonicalStatus::Lost),
            _ => Err(crate::error::StageboardError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SplitKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    Percent,
    Fixed,
    /// Anything the store sent that we don't understand. Never deducts.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SplitKind::Percent => "percent",
            SplitKind::Fixed => "fixed",
            SplitKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// WindowKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Month,
    Quarter,
    Ytd,
    Custom,
}

impl WindowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::Month => "month",
            WindowKind::Quarter => "quarter",
            WindowKind::Ytd => "ytd",
            WindowKind::Custom => "custom",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WindowKind {
    type Err = crate::error::StageboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(WindowKind::Month),
            "quarter" => Ok(WindowKind::Quarter),
            "ytd" => Ok(WindowKind::Ytd),
            "custom" => Ok(WindowKind::Custom),
            _ => Err(crate::error::StageboardError::InvalidWindow(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
