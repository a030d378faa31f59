use crate::output::print_json;
use anyhow::Context;
use stageboard_core::{config::Config, io, paths, types::Niche};
use std::path::Path;

pub fn run(root: &Path, niche: Option<&str>, json: bool) -> anyhow::Result<()> {
    let niche: Niche = match niche {
        Some(n) => n.parse()?,
        None => Niche::Creator,
    };

    let dir = paths::stageboard_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_created = if paths::is_initialized(root) {
        false
    } else {
        Config::new(niche)
            .save(root)
            .context("failed to write config.yaml")?;
        true
    };

    let items_created = io::write_if_missing(&paths::items_path(root), b"[]\n")
        .context("failed to write items.yaml")?;

    tracing::debug!(root = %root.display(), niche = %niche, "initialized");

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "default_niche": Config::load(root)?.default_niche,
            "config_created": config_created,
            "items_created": items_created,
        }))?;
        return Ok(());
    }

    println!("Initializing stageboard in: {}", root.display());
    for (created, file) in [
        (config_created, paths::CONFIG_FILE),
        (items_created, paths::ITEMS_FILE),
    ] {
        if created {
            println!("  created: {file}");
        } else {
            println!("  exists:  {file}");
        }
    }
    Ok(())
}
