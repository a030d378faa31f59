//! Per-niche stage vocabularies.
//!
//! Each niche has one static table holding its ordered stages and the
//! canonical status → stage mapping. Every consumer (board, mapper, revenue
//! views) derives from these tables; nothing else defines stage labels.

use crate::types::{CanonicalStatus, Niche};
use serde::Serialize;

// ---------------------------------------------------------------------------
// StageEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub color_class: &'static str,
    pub icon: &'static str,
}

const fn stage(
    id: &'static str,
    display_name: &'static str,
    color_class: &'static str,
    icon: &'static str,
) -> StageEntry {
    StageEntry {
        id,
        display_name,
        color_class,
        icon,
    }
}

// ---------------------------------------------------------------------------
// NicheTable
// ---------------------------------------------------------------------------

/// The full configuration for one niche.
///
/// `status_map` is indexed by [`CanonicalStatus::index`]; every entry must
/// name a stage in `stages`.
pub struct NicheTable {
    pub niche: Niche,
    pub stages: &'static [StageEntry],
    pub status_map: [&'static str; 6],
}

const CREATOR_STAGES: &[StageEntry] = &[
    stage("idea", "Idea", "bg-slate-100 text-slate-700", "lightbulb"),
    stage("scripting", "Scripting", "bg-blue-100 text-blue-700", "pen-line"),
    stage("filming", "Filming", "bg-violet-100 text-violet-700", "video"),
    stage("editing", "Editing", "bg-amber-100 text-amber-700", "scissors"),
    stage("scheduled", "Scheduled", "bg-cyan-100 text-cyan-700", "calendar-clock"),
    stage("published", "Published", "bg-green-100 text-green-700", "send"),
];

const COACH_STAGES: &[StageEntry] = &[
    stage("lead", "Lead", "bg-slate-100 text-slate-700", "user-plus"),
    stage("discovery_call", "Discovery Call", "bg-blue-100 text-blue-700", "phone"),
    stage("proposal_sent", "Proposal Sent", "bg-indigo-100 text-indigo-700", "file-text"),
    stage("negotiating", "Negotiating", "bg-amber-100 text-amber-700", "handshake"),
    stage("enrolled", "Enrolled", "bg-cyan-100 text-cyan-700", "clipboard-check"),
    stage("in_progress", "In Progress", "bg-violet-100 text-violet-700", "activity"),
    stage("completed", "Completed", "bg-teal-100 text-teal-700", "check-circle"),
    stage("paid", "Paid/Won", "bg-green-100 text-green-700", "dollar-sign"),
    stage("lost", "Lost", "bg-red-100 text-red-700", "x-circle"),
];

const PODCASTER_STAGES: &[StageEntry] = &[
    stage("pitch", "Pitch", "bg-slate-100 text-slate-700", "mail"),
    stage("booked", "Booked", "bg-blue-100 text-blue-700", "calendar"),
    stage("recorded", "Recorded", "bg-amber-100 text-amber-700", "mic"),
    stage("live", "Live", "bg-green-100 text-green-700", "radio"),
];

const FREELANCER_STAGES: &[StageEntry] = &[
    stage("lead", "Lead", "bg-slate-100 text-slate-700", "user-plus"),
    stage("qualified", "Qualified", "bg-blue-100 text-blue-700", "filter"),
    stage("proposal", "Proposal", "bg-indigo-100 text-indigo-700", "file-text"),
    stage("negotiation", "Negotiation", "bg-amber-100 text-amber-700", "handshake"),
    stage("won", "Won", "bg-green-100 text-green-700", "trophy"),
    stage("invoiced", "Invoiced", "bg-teal-100 text-teal-700", "receipt"),
    stage("lost", "Lost", "bg-red-100 text-red-700", "x-circle"),
];

// prospecting, qualification, proposal, negotiation, won, lost
static TABLES: [NicheTable; 4] = [
    NicheTable {
        niche: Niche::Creator,
        stages: CREATOR_STAGES,
        status_map: ["idea", "scripting", "filming", "editing", "published", "idea"],
    },
    NicheTable {
        niche: Niche::Coach,
        stages: COACH_STAGES,
        status_map: [
            "lead",
            "discovery_call",
            "proposal_sent",
            "negotiating",
            "paid",
            "lost",
        ],
    },
    NicheTable {
        niche: Niche::Podcaster,
        stages: PODCASTER_STAGES,
        status_map: ["pitch", "pitch", "booked", "booked", "live", "pitch"],
    },
    NicheTable {
        niche: Niche::Freelancer,
        stages: FREELANCER_STAGES,
        status_map: [
            "lead",
            "qualified",
            "proposal",
            "negotiation",
            "won",
            "lost",
        ],
    },
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn table_for(niche: Niche) -> &'static NicheTable {
    match niche {
        Niche::Creator => &TABLES[0],
        Niche::Coach => &TABLES[1],
        Niche::Podcaster => &TABLES[2],
        Niche::Freelancer => &TABLES[3],
    }
}

/// Ordered stage entries for a niche.
pub fn stages_for(niche: Niche) -> &'static [StageEntry] {
    table_for(niche).stages
}

/// Stage entries for a niche given by name. Unsupported names get the
/// creator vocabulary.
pub fn stages_for_name(niche: &str) -> &'static [StageEntry] {
    stages_for(Niche::from_str_or_default(niche))
}

/// The niche's earliest stage, used as the fallback for anything unmapped.
pub fn earliest_stage(niche: Niche) -> &'static StageEntry {
    // Every table is non-empty; checked in tests.
    &stages_for(niche)[0]
}

pub fn find_stage(niche: Niche, stage_id: &str) -> Option<&'static StageEntry> {
    stages_for(niche).iter().find(|s| s.id == stage_id)
}

pub fn contains_stage(niche: Niche, stage_id: &str) -> bool {
    find_stage(niche, stage_id).is_some()
}

pub fn stage_for_status(niche: Niche, status: CanonicalStatus) -> &'static str {
    table_for(niche).status_map[status.index()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
