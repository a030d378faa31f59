use crate::output::print_json;
use stageboard_core::mapper;
use stageboard_core::store::ItemStore;
use stageboard_core::transition::{StageTransitionCoordinator, TransitionOutcome};

/// Move one item to another stage of its niche's board.
pub fn run(store: &dyn ItemStore, id: &str, stage: &str, json: bool) -> anyhow::Result<()> {
    let niche = super::item::find(store, id)?.niche;

    let mut coordinator = StageTransitionCoordinator::new(store, niche);
    coordinator.load();
    let outcome = coordinator.move_item(id, stage)?;

    if json {
        print_json(&outcome)?;
    }

    match &outcome {
        TransitionOutcome::NoOp => {
            if !json {
                println!(
                    "[{id}] is already in {}",
                    mapper::stage_display_name(stage, niche)
                );
            }
            Ok(())
        }
        TransitionOutcome::Committed(t) => {
            if !json {
                println!(
                    "Moved [{id}]: {} -> {}",
                    mapper::stage_display_name(&t.from, niche),
                    mapper::stage_display_name(&t.to, niche)
                );
            }
            Ok(())
        }
        TransitionOutcome::RolledBack(t) => anyhow::bail!(
            "move of [{id}] to '{}' failed and was rolled back: {}",
            t.to,
            t.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
