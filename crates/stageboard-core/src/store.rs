//! The CRUD contract over work items and its implementations.
//!
//! | Operation | Request                                   |
//! |-----------|-------------------------------------------|
//! | List      | `GET /items?niche={niche}`                |
//! | Create    | `POST /items` with a [`NewItem`] body     |
//! | Update    | `PUT /items/{id}` with an [`ItemPatch`]   |
//! | Delete    | `DELETE /items/{id}`                      |

use crate::error::{Result, StageboardError};
use crate::item::{ItemPatch, NewItem, WorkItem};
use crate::paths;
use crate::types::Niche;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

pub trait ItemStore {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>>;
    fn create(&self, item: NewItem) -> Result<WorkItem>;
    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem>;
    fn delete(&self, id: &str) -> Result<()>;
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>> {
        (**self).list(niche)
    }
    fn create(&self, item: NewItem) -> Result<WorkItem> {
        (**self).create(item)
    }
    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem> {
        (**self).update(id, patch)
    }
    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}

impl<S: ItemStore + ?Sized> ItemStore for Box<S> {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>> {
        (**self).list(niche)
    }
    fn create(&self, item: NewItem) -> Result<WorkItem> {
        (**self).create(item)
    }
    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem> {
        (**self).update(id, patch)
    }
    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}

/// Look an item up by id alone. Ids carry no niche, so every niche is
/// listed until the item turns up.
pub fn find_item<S: ItemStore + ?Sized>(store: &S, id: &str) -> Result<WorkItem> {
    paths::validate_item_id(id)?;
    for &niche in Niche::all() {
        if let Some(item) = store.list(niche)?.into_iter().find(|i| i.id == id) {
            return Ok(item);
        }
    }
    Err(StageboardError::ItemNotFound(id.to_string()))
}

/// List items, degrading to an empty collection when the store fails.
pub fn load_or_empty<S: ItemStore + ?Sized>(store: &S, niche: Niche) -> Vec<WorkItem> {
    match store.list(niche) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(niche = %niche, error = %e, "item list failed; showing empty board");
            Vec::new()
        }
    }
}

fn find_mut<'a>(items: &'a mut [WorkItem], id: &str) -> Result<&'a mut WorkItem> {
    items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| StageboardError::ItemNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryInner {
    items: Vec<WorkItem>,
    fail_writes: bool,
    writes: usize,
}

/// In-process store. Writes can be forced to fail to exercise rollback paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<WorkItem>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                items,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of write requests received (successful or not).
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn get(&self, id: &str) -> Option<WorkItem> {
        self.lock().items.iter().find(|i| i.id == id).cloned()
    }

    fn begin_write(inner: &mut MemoryInner) -> Result<()> {
        inner.writes += 1;
        if inner.fail_writes {
            return Err(StageboardError::Transport("simulated write failure".into()));
        }
        Ok(())
    }
}

impl ItemStore for MemoryStore {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>> {
        Ok(self
            .lock()
            .items
            .iter()
            .filter(|i| i.niche == niche)
            .cloned()
            .collect())
    }

    fn create(&self, item: NewItem) -> Result<WorkItem> {
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;
        let item = WorkItem::from_new(item);
        inner.items.push(item.clone());
        Ok(item)
    }

    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem> {
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;
        let item = find_mut(&mut inner.items, id)?;
        item.apply_patch(patch)?;
        Ok(item.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.lock();
        Self::begin_write(&mut inner)?;
        let before = inner.items.len();
        inner.items.retain(|i| i.id != id);
        if inner.items.len() == before {
            return Err(StageboardError::ItemNotFound(id.to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

static WRITE_LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

/// The lock serializing read-modify-write cycles on one items file. Every
/// `FileStore` opened on the same root in this process shares it.
fn write_lock(items_path: &Path) -> Arc<Mutex<()>> {
    let locks = WRITE_LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut locks = locks.lock().unwrap_or_else(|e| e.into_inner());
    locks
        .entry(items_path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Items kept in `.stageboard/items.yaml` under a project root.
///
/// Create, update and delete hold a per-file lock across load and save, so
/// concurrent writers in one process never drop each other's records.
pub struct FileStore {
    root: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let lock = write_lock(&paths::items_path(&root));
        Self { root, lock }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every item regardless of niche.
    pub fn load_all(&self) -> Result<Vec<WorkItem>> {
        let path = paths::items_path(&self.root);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<WorkItem> = serde_yaml::from_str(&data)?;
        Ok(items)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn save_all(&self, items: &[WorkItem]) -> Result<()> {
        let data = serde_yaml::to_string(items)?;
        crate::io::atomic_write(&paths::items_path(&self.root), data.as_bytes())
    }

    pub fn get(&self, id: &str) -> Result<WorkItem> {
        paths::validate_item_id(id)?;
        self.load_all()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| StageboardError::ItemNotFound(id.to_string()))
    }
}

impl ItemStore for FileStore {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>> {
        let mut items: Vec<WorkItem> = self
            .load_all()?
            .into_iter()
            .filter(|i| i.niche == niche)
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    fn create(&self, item: NewItem) -> Result<WorkItem> {
        let _guard = self.lock_writes();
        let mut items = self.load_all()?;
        let item = WorkItem::from_new(item);
        if items.iter().any(|i| i.id == item.id) {
            return Err(StageboardError::ItemExists(item.id));
        }
        items.push(item.clone());
        self.save_all(&items)?;
        tracing::debug!(id = %item.id, niche = %item.niche, stage = %item.stage, "item created");
        Ok(item)
    }

    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem> {
        paths::validate_item_id(id)?;
        let _guard = self.lock_writes();
        let mut items = self.load_all()?;
        let item = find_mut(&mut items, id)?;
        item.apply_patch(patch)?;
        let updated = item.clone();
        self.save_all(&items)?;
        tracing::debug!(id = %updated.id, stage = %updated.stage, "item updated");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        paths::validate_item_id(id)?;
        let _guard = self.lock_writes();
        let mut items = self.load_all()?;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(StageboardError::ItemNotFound(id.to_string()));
        }
        self.save_all(&items)?;
        tracing::debug!(id, "item deleted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HttpStore
// ---------------------------------------------------------------------------

/// Blocking client for a remote CRUD endpoint.
pub struct HttpStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, id)
    }

    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(StageboardError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

impl ItemStore for HttpStore {
    fn list(&self, niche: Niche) -> Result<Vec<WorkItem>> {
        let resp = self
            .client
            .get(format!("{}/items", self.base_url))
            .query(&[("niche", niche.as_str())])
            .send()?;
        let items: Vec<WorkItem> = Self::check(resp)?.json()?;
        tracing::debug!(niche = %niche, count = items.len(), "items listed");
        Ok(items)
    }

    fn create(&self, item: NewItem) -> Result<WorkItem> {
        let resp = self
            .client
            .post(format!("{}/items", self.base_url))
            .json(&item)
            .send()?;
        Ok(Self::check(resp)?.json()?)
    }

    fn update(&self, id: &str, patch: ItemPatch) -> Result<WorkItem> {
        paths::validate_item_id(id)?;
        let resp = self.client.put(self.item_url(id)).json(&patch).send()?;
        Ok(Self::check(resp)?.json()?)
    }

    fn delete(&self, id: &str) -> Result<()> {
        paths::validate_item_id(id)?;
        let resp = self.client.delete(self.item_url(id)).send()?;
        Self::check(resp)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
