//! # apidock
//!
//! Ingestion and test-invocation library for API specification documents.
//! Uploaded OpenAPI 3.x / Swagger 2.0 documents (JSON or YAML) are
//! classified, normalized, validated against version-specific semantic
//! rules and flattened into storage-ready endpoint records; a stored record
//! plus runtime parameter values deterministically becomes one live HTTP
//! request.
//!
//! ## Architecture
//!
//! - **[`detect`]** - substring-based version sniffing (no full parse)
//! - **[`spec`]** - document loading, Value-level repair, semantic
//!   validation and endpoint extraction
//! - **[`invoke`]** - parameter resolution into a concrete request and
//!   single-shot dispatch through a pluggable transport
//! - **[`store`]** - persistence seam plus an in-memory implementation
//! - **[`service`]** - pipeline orchestration and descriptor CRUD
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes -> detect_version -> SpecLoader::parse_from_bytes
//!           -> SpecLoader::validate -> extract_endpoints -> EndpointStore
//! ```
//!
//! Separately, a stored [`spec::ApiEndpoint`] plus a base URL becomes one
//! outbound request via [`invoke::test_invoke`].
//!
//! Every call constructs its own document graph; there is no shared mutable
//! state, no locking and no retry logic anywhere in the pipeline.

pub mod detect;
pub mod invoke;
pub mod service;
pub mod spec;
pub mod store;

pub use detect::{detect_version, SpecVersion};
pub use invoke::{
    resolve_request, test_invoke, HttpTransport, InvokeError, ReqwestTransport, ResolvedRequest,
};
pub use service::SpecService;
pub use spec::{
    extract_endpoints, loader_for, ApiEndpoint, ApiParameter, LoadError, NormalizedDocument,
    ParameterLocation, SpecLoader,
};
pub use store::{EndpointStore, MemoryStore};
