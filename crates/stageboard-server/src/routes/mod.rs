pub mod board;
pub mod items;
pub mod revenue;
pub mod stages;

use stageboard_core::config::Config;
use stageboard_core::types::Niche;
use stageboard_core::StageboardError;
use std::path::Path;

/// Resolve an optional `?niche=` query value, falling back to the project's
/// configured default niche.
pub(crate) fn niche_or_default(root: &Path, niche: Option<&str>) -> Result<Niche, StageboardError> {
    match niche {
        Some(n) if !n.is_empty() => n.parse(),
        _ => Ok(Config::load_or_default(root)?.default_niche),
    }
}
