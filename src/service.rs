//! Orchestration of the ingestion pipeline and of test invocations.

use crate::detect::detect_version;
use crate::invoke::{test_invoke, HttpTransport};
use crate::spec::{extract_endpoints, loader_for, ApiEndpoint};
use crate::store::EndpointStore;
use anyhow::{anyhow, Context};
use tracing::info;

/// Ties the pipeline together: detect → load → validate → extract → store,
/// plus descriptor CRUD passthrough and single-shot test invocations.
///
/// Stateless apart from its collaborators; every call builds its own
/// document graph, so one service instance can serve many callers at once.
pub struct SpecService<S, T> {
    store: S,
    transport: T,
}

impl<S: EndpointStore, T: HttpTransport> SpecService<S, T> {
    pub fn new(store: S, transport: T) -> Self {
        SpecService { store, transport }
    }

    /// Run the full pipeline over raw document bytes and persist every
    /// extracted endpoint under `spec_id`. Returns the stored records with
    /// their assigned identities.
    pub fn parse_and_store(&self, spec_id: u64, data: &[u8]) -> anyhow::Result<Vec<ApiEndpoint>> {
        let version = detect_version(data);
        let loader = loader_for(version)
            .ok_or_else(|| anyhow!("unrecognized swagger/openapi version"))?;
        let doc = loader.parse_from_bytes(data)?;
        loader.validate(&doc)?;

        let mut endpoints = extract_endpoints(&doc, spec_id);
        for endpoint in &mut endpoints {
            self.store
                .create(endpoint)
                .with_context(|| format!("storing {} {}", endpoint.method, endpoint.path))?;
        }
        info!(%version, spec_id, count = endpoints.len(), "parsed and stored endpoints");
        Ok(endpoints)
    }

    pub fn list_endpoints(&self, spec_id: u64) -> anyhow::Result<Vec<ApiEndpoint>> {
        self.store.list_by_spec(spec_id)
    }

    pub fn get_endpoint(&self, id: u64) -> anyhow::Result<ApiEndpoint> {
        self.store.get_by_id(id)
    }

    pub fn update_endpoint(&self, endpoint: &ApiEndpoint) -> anyhow::Result<()> {
        self.store.update(endpoint)
    }

    pub fn delete_endpoint(&self, id: u64) -> anyhow::Result<()> {
        self.store.delete(id)
    }

    /// Build and dispatch one live request from a stored endpoint record.
    /// The response body text is returned whatever the status code.
    pub fn test_endpoint(&self, endpoint: &ApiEndpoint, base_url: &str) -> anyhow::Result<String> {
        Ok(test_invoke(&self.transport, endpoint, base_url)?)
    }
}
