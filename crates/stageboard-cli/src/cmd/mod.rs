pub mod board;
pub mod init;
pub mod item;
pub mod move_item;
pub mod revenue;
pub mod serve;
pub mod stages;

use anyhow::Context;
use stageboard_core::config::{Config, StoreKind, WarnLevel};
use stageboard_core::store::{FileStore, HttpStore, ItemStore};
use stageboard_core::types::Niche;
use std::path::Path;

/// Open the item store for this invocation.
///
/// `--remote` wins; otherwise the project config picks between the local
/// item file and an HTTP endpoint.
pub fn open_store(root: &Path, remote: Option<&str>) -> anyhow::Result<Box<dyn ItemStore>> {
    if let Some(url) = remote {
        tracing::debug!(url, "using remote store from --remote");
        return Ok(Box::new(HttpStore::new(url)));
    }

    let config = Config::load_or_default(root).context("failed to load config")?;
    for w in config.validate() {
        match w.level {
            WarnLevel::Error => tracing::error!("config: {}", w.message),
            WarnLevel::Warning => tracing::warn!("config: {}", w.message),
        }
    }

    match (config.store.kind, config.store.base_url) {
        (StoreKind::Http, Some(url)) if !url.is_empty() => Ok(Box::new(HttpStore::new(url))),
        (StoreKind::Http, _) => anyhow::bail!("store.kind is 'http' but store.base_url is not set"),
        (StoreKind::File, _) => Ok(Box::new(FileStore::new(root))),
    }
}

/// The niche named on the command line, else the project's default.
pub fn resolve_niche(root: &Path, niche: Option<&str>) -> anyhow::Result<Niche> {
    match niche {
        Some(n) => Ok(n.parse()?),
        None => Ok(Config::load_or_default(root)
            .context("failed to load config")?
            .default_niche),
    }
}

/// Currency code used when printing money.
pub fn currency(root: &Path) -> String {
    Config::load_or_default(root)
        .map(|c| c.currency)
        .unwrap_or_else(|_| "USD".to_string())
}
