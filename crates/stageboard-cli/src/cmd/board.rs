use crate::output::{money, print_json};
use stageboard_core::store::ItemStore;
use stageboard_core::transition::StageTransitionCoordinator;
use std::path::Path;

pub fn run(
    root: &Path,
    store: &dyn ItemStore,
    niche: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let niche = super::resolve_niche(root, niche)?;
    let mut coordinator = StageTransitionCoordinator::new(store, niche);
    let total = coordinator.load();
    let columns = coordinator.board().columns();

    if json {
        let columns: Vec<serde_json::Value> = columns
            .iter()
            .map(|col| {
                serde_json::json!({
                    "stage": col.stage,
                    "total_value": col.total_value(),
                    "items": col.items,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "niche": niche,
            "total_items": total,
            "columns": columns,
        }))?;
        return Ok(());
    }

    let currency = super::currency(root);
    println!("{niche} board ({total} items)");
    for col in &columns {
        println!(
            "\n{} ({})  {}",
            col.stage.display_name,
            col.items.len(),
            money(col.total_value(), &currency)
        );
        for item in &col.items {
            println!("  - [{}] {}", item.id, item.title);
        }
    }
    Ok(())
}
