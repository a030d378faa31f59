//! Drag-and-drop stage moves with optimistic updates and rollback.
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──drop──▶ Dropping ──▶ Idle
//!                         │
//!                         └──end_drag──▶ Idle (cancelled)
//! ```
//!
//! A drop moves the item in memory first, then writes through the store.
//! On success the board is reloaded from the store; on failure the item's
//! previous stage is restored. While the write is outstanding the move is
//! visible only as [`DragState::Dropping`]; a [`Transition`] is recorded once
//! the store has answered.

use crate::board::Board;
use crate::error::{Result, StageboardError};
use crate::item::ItemPatch;
use crate::store::{load_or_empty, ItemStore};
use crate::types::Niche;
use crate::vocabulary;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// DragState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        item_id: String,
        from_stage: String,
        hover: Option<String>,
    },
    Dropping {
        item_id: String,
        from_stage: String,
        to_stage: String,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn hover_target(&self) -> Option<&str> {
        match self {
            DragState::Dragging { hover, .. } => hover.as_deref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub item_id: String,
    pub niche: Niche,
    pub from: String,
    pub to: String,
    pub phase: TransitionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Dropped on the item's current stage; nothing was written.
    NoOp,
    Committed(Transition),
    RolledBack(Transition),
}

impl TransitionOutcome {
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            TransitionOutcome::NoOp => None,
            TransitionOutcome::Committed(t) | TransitionOutcome::RolledBack(t) => Some(t),
        }
    }
}

// ---------------------------------------------------------------------------
// StageTransitionCoordinator
// ---------------------------------------------------------------------------

/// Owns one niche board and tracks a single in-flight drag.
pub struct StageTransitionCoordinator<S: ItemStore> {
    store: S,
    board: Board,
    drag: DragState,
    last: Option<Transition>,
}

impl<S: ItemStore> StageTransitionCoordinator<S> {
    pub fn new(store: S, niche: Niche) -> Self {
        Self {
            store,
            board: Board::new(niche),
            drag: DragState::Idle,
            last: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn niche(&self) -> Niche {
        self.board.niche()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn last_transition(&self) -> Option<&Transition> {
        self.last.as_ref()
    }

    /// Reload the board from the store. List failures leave an empty board.
    pub fn load(&mut self) -> usize {
        let niche = self.board.niche();
        let generation = self.board.generation();
        let items = load_or_empty(&self.store, niche);
        self.board.apply_reload(generation, items);
        self.board.items().len()
    }

    /// Switch the active niche, cancelling any drag, and reload.
    pub fn switch_niche(&mut self, niche: Niche) -> usize {
        self.end_drag();
        self.board.switch_niche(niche);
        self.load()
    }

    pub fn begin_drag(&mut self, item_id: &str) -> Result<()> {
        if let DragState::Dragging { item_id: current, .. }
        | DragState::Dropping { item_id: current, .. } = &self.drag
        {
            return Err(StageboardError::DragInFlight(current.clone()));
        }
        let item = self
            .board
            .item(item_id)
            .ok_or_else(|| StageboardError::ItemNotFound(item_id.to_string()))?;
        self.drag = DragState::Dragging {
            item_id: item.id.clone(),
            from_stage: item.stage.clone(),
            hover: None,
        };
        tracing::debug!(item = item_id, from = %item.stage, "drag started");
        Ok(())
    }

    /// Record the stage under the pointer. Returns `false` when no drag is in
    /// flight. Has no effect on the item itself.
    pub fn hover(&mut self, target_stage: &str) -> bool {
        match &mut self.drag {
            DragState::Dragging { hover, .. } => {
                if hover.as_deref() != Some(target_stage) {
                    *hover = Some(target_stage.to_string());
                }
                true
            }
            _ => false,
        }
    }

    /// Cancel the in-flight drag without writing. Returns whether a drag was
    /// cancelled; always safe to call.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = matches!(self.drag, DragState::Dragging { .. });
        if was_dragging {
            tracing::debug!("drag cancelled");
        }
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Commit the dragged item to `target_stage`.
    ///
    /// The drag state is back to idle when this returns, whatever the result.
    pub fn drop(&mut self, target_stage: &str) -> Result<TransitionOutcome> {
        let result = self.drop_inner(target_stage);
        self.drag = DragState::Idle;
        result
    }

    fn drop_inner(&mut self, target_stage: &str) -> Result<TransitionOutcome> {
        let item_id = match &self.drag {
            DragState::Dragging { item_id, .. } => item_id.clone(),
            _ => return Err(StageboardError::NoDragInFlight),
        };
        let niche = self.board.niche();

        if !vocabulary::contains_stage(niche, target_stage) {
            return Err(StageboardError::UnknownStage {
                stage: target_stage.to_string(),
                niche: niche.to_string(),
            });
        }

        let item = self
            .board
            .item_mut(&item_id)
            .ok_or_else(|| StageboardError::ItemNotFound(item_id.clone()))?;
        if item.stage == target_stage {
            tracing::debug!(item = %item_id, stage = target_stage, "dropped on current stage");
            return Ok(TransitionOutcome::NoOp);
        }

        let from = std::mem::replace(&mut item.stage, target_stage.to_string());
        self.drag = DragState::Dropping {
            item_id: item_id.clone(),
            from_stage: from.clone(),
            to_stage: target_stage.to_string(),
        };
        let generation = self.board.generation();

        let result = self
            .store
            .update(&item_id, ItemPatch::stage_move(niche, target_stage));
        let (phase, error) = match result {
            Ok(_) => {
                match self.store.list(niche) {
                    Ok(items) => {
                        self.board.apply_reload(generation, items);
                    }
                    Err(e) => tracing::warn!(
                        item = %item_id,
                        error = %e,
                        "stage saved but reload failed; keeping local state"
                    ),
                }
                tracing::info!(
                    item = %item_id,
                    niche = %niche,
                    from = %from,
                    to = target_stage,
                    "stage transition committed"
                );
                (TransitionPhase::Committed, None)
            }
            Err(e) => {
                if let Some(item) = self.board.item_mut(&item_id) {
                    item.stage = from.clone();
                }
                tracing::error!(
                    item = %item_id,
                    niche = %niche,
                    from = %from,
                    to = target_stage,
                    error = %e,
                    "stage transition failed; rolled back"
                );
                (TransitionPhase::RolledBack, Some(e.to_string()))
            }
        };

        let transition = Transition {
            item_id,
            niche,
            from,
            to: target_stage.to_string(),
            phase,
            error,
            at: Utc::now(),
        };
        let outcome = match phase {
            TransitionPhase::Committed => TransitionOutcome::Committed(transition.clone()),
            TransitionPhase::RolledBack => TransitionOutcome::RolledBack(transition.clone()),
        };
        self.last = Some(transition);
        Ok(outcome)
    }

    /// Begin a drag on `item_id` and drop it on `target_stage` in one step.
    pub fn move_item(&mut self, item_id: &str, target_stage: &str) -> Result<TransitionOutcome> {
        self.begin_drag(item_id)?;
        self.hover(target_stage);
        self.drop(target_stage)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
