//! In-memory implementations of the link store and of reference providers,
//! for testing and development

use crate::core::link::LinkRecord;
use crate::core::reference::ReferenceProvider;
use crate::core::service::LinkStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// In-memory link store
///
/// Ids are assigned sequentially starting at 1. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryLinkStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    next_id: u64,
    records: BTreeMap<u64, LinkRecord>,
}

impl InMemoryLinkStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, mut record: LinkRecord) -> Result<LinkRecord> {
        let mut state = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        state.next_id += 1;
        let now = Utc::now();
        record.id = state.next_id;
        record.created_at = now;
        record.updated_at = now;

        state.records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn load(&self, id: u64) -> Result<Option<LinkRecord>> {
        let state = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(state.records.get(&id).cloned())
    }

    async fn update(&self, mut record: LinkRecord) -> Result<LinkRecord> {
        let mut state = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let existing = state
            .records
            .get(&record.id)
            .ok_or_else(|| anyhow!("Link {} not found", record.id))?;

        record.created_at = existing.created_at;
        record.updated_at = Utc::now();
        state.records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        state.records.remove(&id);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<LinkRecord>> {
        let state = self
            .inner
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(state.records.values().cloned().collect())
    }
}

/// An entity held by [`InMemoryReferenceProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedEntity {
    pub title: String,
    /// Navigation label; falls back to `title` when `None`
    pub menu_title: Option<String>,
    /// Canonical URL; `None` for entities that cannot be linked to directly
    pub url: Option<String>,
    pub published: bool,
}

impl ReferencedEntity {
    /// A published entity with a URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            menu_title: None,
            url: Some(url.into()),
            published: true,
        }
    }

    /// A published entity that has no URL of its own
    pub fn without_url(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            menu_title: None,
            url: None,
            published: true,
        }
    }

    pub fn with_menu_title(mut self, menu_title: impl Into<String>) -> Self {
        self.menu_title = Some(menu_title.into());
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

/// Reference provider backed by a map, standing in for a host's page tree or file store
#[derive(Clone)]
pub struct InMemoryReferenceProvider {
    kind: String,
    entities: Arc<RwLock<HashMap<u64, ReferencedEntity>>>,
}

impl InMemoryReferenceProvider {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add or replace an entity
    pub fn insert(&self, id: u64, entity: ReferencedEntity) {
        if let Ok(mut entities) = self.entities.write() {
            entities.insert(id, entity);
        }
    }

    /// Remove an entity, leaving any link to it broken
    pub fn remove(&self, id: u64) -> Option<ReferencedEntity> {
        self.entities.write().ok().and_then(|mut e| e.remove(&id))
    }

    fn get(&self, id: u64) -> Option<ReferencedEntity> {
        self.entities.read().ok().and_then(|e| e.get(&id).cloned())
    }
}

impl ReferenceProvider for InMemoryReferenceProvider {
    fn entity_kind(&self) -> &str {
        &self.kind
    }

    fn exists(&self, ref_id: u64) -> bool {
        self.get(ref_id).is_some()
    }

    fn url(&self, ref_id: u64) -> Option<String> {
        self.get(ref_id).and_then(|e| e.url)
    }

    fn title(&self, ref_id: u64) -> Option<String> {
        self.get(ref_id).map(|e| e.title)
    }

    fn menu_title(&self, ref_id: u64) -> Option<String> {
        self.get(ref_id).map(|e| e.menu_title.unwrap_or(e.title))
    }

    fn is_published(&self, ref_id: u64) -> bool {
        self.get(ref_id).is_some_and(|e| e.published)
    }
}
