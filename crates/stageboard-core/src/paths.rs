use crate::error::{Result, StageboardError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const STAGEBOARD_DIR: &str = ".stageboard";

pub const CONFIG_FILE: &str = ".stageboard/config.yaml";
pub const ITEMS_FILE: &str = ".stageboard/items.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn stageboard_dir(root: &Path) -> PathBuf {
    root.join(STAGEBOARD_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn items_path(root: &Path) -> PathBuf {
    root.join(ITEMS_FILE)
}

/// A project counts as initialized once its config file exists.
pub fn is_initialized(root: &Path) -> bool {
    config_path(root).exists()
}

// ---------------------------------------------------------------------------
// Item id validation
// ---------------------------------------------------------------------------

/// Ids end up in URL paths; keep them to a conservative character set.
pub fn validate_item_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(StageboardError::ItemNotFound(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
