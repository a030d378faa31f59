use crate::output::{print_json, print_table};
use stageboard_core::types::{CanonicalStatus, Niche};
use stageboard_core::vocabulary;
use std::path::Path;

pub fn run(root: &Path, niche: Option<&str>, json: bool) -> anyhow::Result<()> {
    let niche = match niche {
        Some(name) => {
            let resolved = Niche::from_str_or_default(name);
            if resolved.as_str() != name {
                tracing::warn!(niche = name, "unknown niche; showing {resolved} stages");
            }
            resolved
        }
        None => super::resolve_niche(root, None)?,
    };
    let table = vocabulary::table_for(niche);

    let status_map: serde_json::Map<String, serde_json::Value> = CanonicalStatus::all()
        .iter()
        .map(|&s| {
            (
                s.as_str().to_string(),
                vocabulary::stage_for_status(niche, s).into(),
            )
        })
        .collect();

    if json {
        print_json(&serde_json::json!({
            "niche": niche,
            "stages": table.stages,
            "status_map": status_map,
        }))?;
        return Ok(());
    }

    println!("Stages for {niche}:\n");
    let rows = table
        .stages
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.id.to_string(),
                s.display_name.to_string(),
                s.icon.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "ID", "NAME", "ICON"], rows);

    println!("\nStatus mapping:");
    for &status in CanonicalStatus::all() {
        println!(
            "  {:<15} -> {}",
            status.as_str(),
            vocabulary::stage_for_status(niche, status)
        );
    }
    Ok(())
}
