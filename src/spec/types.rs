use super::swagger2::Swagger2Document;
use crate::detect::SpecVersion;
use oas3::OpenApiV3Spec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a parameter is injected when a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    /// Parse a Swagger-style `in` string. Locations this crate does not
    /// build requests from (`formData`, `cookie`) map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Body => write!(f, "body"),
        }
    }
}

/// One declared input slot on an endpoint.
///
/// `value` is empty at extraction time; a caller wanting to invoke the
/// endpoint fills it in before calling [`crate::invoke::test_invoke`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Declared type from the source document. Informational only.
    #[serde(rename = "type", default)]
    pub param_type: String,
    #[serde(default)]
    pub value: String,
}

impl ApiParameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        ApiParameter {
            name: name.into(),
            location,
            required,
            param_type: String::new(),
            value: String::new(),
        }
    }
}

/// The flattened, storage-ready record of one path+method operation.
///
/// Identity (`id`) is assigned by the [`crate::store::EndpointStore`]
/// implementation; the extractor leaves it at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    #[serde(default)]
    pub id: u64,
    /// Identifier of the specification document this endpoint came from.
    #[serde(default)]
    pub spec_id: u64,
    /// URL path template, may contain `{name}` placeholders.
    pub path: String,
    /// Uppercase HTTP verb.
    pub method: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    /// May be empty when the source document omitted `operationId`.
    #[serde(default)]
    pub operation_id: String,
    /// Comma-joined tag list.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    /// Free-form response documentation.
    #[serde(default)]
    pub responses: String,
    /// Default headers applied to every test invocation.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Default body template used when no body parameter supplies a value.
    #[serde(default)]
    pub body: String,
}

/// A parsed, repaired and validated specification document.
///
/// Constructed once per parse call by a [`super::SpecLoader`], consumed by
/// [`super::extract_endpoints`], then discarded. Each call path produces its
/// own private instance, so sharing concerns never arise.
#[derive(Debug, Clone)]
pub enum NormalizedDocument {
    OpenApi3(Box<OpenApiV3Spec>),
    Swagger2(Box<Swagger2Document>),
}

impl NormalizedDocument {
    pub fn version(&self) -> SpecVersion {
        match self {
            NormalizedDocument::OpenApi3(_) => SpecVersion::OpenApi3,
            NormalizedDocument::Swagger2(_) => SpecVersion::Swagger2,
        }
    }
}
