use crate::item::WorkItem;
use crate::mapper;
use crate::types::Niche;
use crate::vocabulary::{self, StageEntry};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The in-memory working set of one niche.
///
/// `generation` increments on every niche switch. A reload carries the
/// generation read when its listing was requested and is applied only if the
/// board has not switched since, so a late listing is dropped even after the
/// board has switched away and back to the same niche.
#[derive(Debug, Clone)]
pub struct Board {
    niche: Niche,
    items: Vec<WorkItem>,
    generation: u64,
}

impl Board {
    pub fn new(niche: Niche) -> Self {
        Self {
            niche,
            items: Vec::new(),
            generation: 0,
        }
    }

    pub fn niche(&self) -> Niche {
        self.niche
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn item(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut WorkItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Replace the working set with a listing requested at `generation`.
    /// Returns `false` and leaves the board untouched when the board has
    /// switched niche since the listing was requested.
    pub fn apply_reload(&mut self, generation: u64, items: Vec<WorkItem>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                board = %self.niche,
                current = self.generation,
                requested = generation,
                "discarding reload requested before a niche switch"
            );
            return false;
        }
        let niche = self.niche;
        self.items = items.into_iter().filter(|i| i.niche == niche).collect();
        true
    }

    pub fn switch_niche(&mut self, niche: Niche) {
        if niche == self.niche {
            return;
        }
        self.niche = niche;
        self.items.clear();
        self.generation += 1;
    }

    /// One column per stage in vocabulary order. Items with a stage outside
    /// the vocabulary are shown in the earliest column.
    pub fn columns(&self) -> Vec<BoardColumn> {
        let mut columns: Vec<BoardColumn> = vocabulary::stages_for(self.niche)
            .iter()
            .map(|&stage| BoardColumn {
                stage,
                items: Vec::new(),
            })
            .collect();
        for item in &self.items {
            let id = mapper::resolve_stage(&item.stage, self.niche);
            if let Some(col) = columns.iter_mut().find(|c| c.stage.id == id) {
                col.items.push(item.clone());
            }
        }
        columns
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub stage: StageEntry,
    pub items: Vec<WorkItem>,
}

impl BoardColumn {
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(WorkItem::amount).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
