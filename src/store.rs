//! Persistence seam for endpoint records.
//!
//! Real deployments put a database behind [`EndpointStore`]; the crate ships
//! [`MemoryStore`] for tests and embedders that do not need durability.

use crate::spec::ApiEndpoint;
use anyhow::{anyhow, bail};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Basic operations over stored endpoint records.
pub trait EndpointStore: Send + Sync {
    /// Persist a new record, assigning its identity.
    fn create(&self, endpoint: &mut ApiEndpoint) -> anyhow::Result<()>;
    /// Fetch one record; an unknown id is an error.
    fn get_by_id(&self, id: u64) -> anyhow::Result<ApiEndpoint>;
    /// Replace a stored record by its id.
    fn update(&self, endpoint: &ApiEndpoint) -> anyhow::Result<()>;
    fn delete(&self, id: u64) -> anyhow::Result<()>;
    /// All records extracted from one specification document, ordered by id.
    fn list_by_spec(&self, spec_id: u64) -> anyhow::Result<Vec<ApiEndpoint>>;
}

/// In-memory [`EndpointStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<u64, ApiEndpoint>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl EndpointStore for MemoryStore {
    fn create(&self, endpoint: &mut ApiEndpoint) -> anyhow::Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        endpoint.id = id;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("endpoint store lock poisoned"))?;
        entries.insert(id, endpoint.clone());
        Ok(())
    }

    fn get_by_id(&self, id: u64) -> anyhow::Result<ApiEndpoint> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("endpoint store lock poisoned"))?;
        entries
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("endpoint not found: {id}"))
    }

    fn update(&self, endpoint: &ApiEndpoint) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("endpoint store lock poisoned"))?;
        if !entries.contains_key(&endpoint.id) {
            bail!("endpoint not found: {}", endpoint.id);
        }
        entries.insert(endpoint.id, endpoint.clone());
        Ok(())
    }

    fn delete(&self, id: u64) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("endpoint store lock poisoned"))?;
        if entries.remove(&id).is_none() {
            bail!("endpoint not found: {id}");
        }
        Ok(())
    }

    fn list_by_spec(&self, spec_id: u64) -> anyhow::Result<Vec<ApiEndpoint>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("endpoint store lock poisoned"))?;
        let mut endpoints: Vec<ApiEndpoint> = entries
            .values()
            .filter(|e| e.spec_id == spec_id)
            .cloned()
            .collect();
        endpoints.sort_by_key(|e| e.id);
        Ok(endpoints)
    }
}
