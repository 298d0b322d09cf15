//! Document loading and normalization.
//!
//! Both loaders follow the same shape: decode the raw bytes into a private
//! `serde_json::Value`, produce a repaired Value from it, then decode that
//! into the typed document. Repair is a pure transform of a value the call
//! owns, so loaders are trivially safe to run from many callers at once,
//! and repairing an already-repaired document changes nothing.

use super::swagger2::Swagger2Document;
use super::types::NormalizedDocument;
use crate::detect::SpecVersion;
use oas3::OpenApiV3Spec;
use serde_json::{json, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Why a document could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The bytes are not a decodable JSON/YAML document of the expected shape.
    Parse {
        message: String,
    },
    /// The document decoded but violates a version-specific semantic rule.
    /// The message names the offending field.
    Validation {
        message: String,
    },
}

impl LoadError {
    pub fn parse(message: impl Into<String>) -> Self {
        LoadError::Parse {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LoadError::Validation {
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse { message } => {
                write!(f, "failed to parse specification: {message}")
            }
            LoadError::Validation { message } => {
                write!(f, "invalid specification: {message}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Loader contract shared by the two specification flavors.
///
/// A loader is selected once from the [`SpecVersion`] produced by
/// [`crate::detect_version`] and never re-decided downstream.
pub trait SpecLoader: Send + Sync {
    /// Decode, repair and type the raw bytes. Does not run semantic
    /// validation; call [`SpecLoader::validate`] on the result.
    fn parse_from_bytes(&self, data: &[u8]) -> Result<NormalizedDocument, LoadError>;

    /// Read a file and defer to [`SpecLoader::parse_from_bytes`].
    fn parse_from_path(&self, path: &Path) -> Result<NormalizedDocument, LoadError> {
        let data = std::fs::read(path).map_err(|err| {
            LoadError::parse(format!("failed to read spec file {}: {err}", path.display()))
        })?;
        self.parse_from_bytes(&data)
    }

    /// Check version-specific semantic rules. Pure; never mutates the document.
    fn validate(&self, doc: &NormalizedDocument) -> Result<(), LoadError>;
}

/// Select the loader for a detected version, or `None` for [`SpecVersion::Unknown`].
pub fn loader_for(version: SpecVersion) -> Option<&'static dyn SpecLoader> {
    match version {
        SpecVersion::OpenApi3 => Some(&OpenApi3Loader),
        SpecVersion::Swagger2 => Some(&Swagger2Loader),
        SpecVersion::Unknown => None,
    }
}

/// Decode bytes as JSON first, then YAML; a parse error names both attempts.
fn decode_value(data: &[u8]) -> Result<Value, LoadError> {
    let json_err = match serde_json::from_slice::<Value>(data) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    match serde_yaml::from_slice::<Value>(data) {
        Ok(value) => Ok(value),
        Err(yaml_err) => Err(LoadError::parse(format!(
            "not valid JSON ({json_err}) nor valid YAML ({yaml_err})"
        ))),
    }
}

/// Named sub-collections under `components` that must exist as (possibly
/// empty) containers after repair.
const COMPONENT_SECTIONS: [&str; 9] = [
    "schemas",
    "responses",
    "parameters",
    "examples",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
];

fn ensure_object(slot: &mut Value) {
    if !slot.is_object() {
        *slot = json!({});
    }
}

fn drop_null_entries(slot: &mut Value) {
    if let Some(map) = slot.as_object_mut() {
        // Some decoders retain explicit `null` values as map entries,
        // which strict consumers reject downstream.
        map.retain(|_, v| !v.is_null());
    }
}

/// Repair an OpenAPI 3.x document at the Value level: every known
/// sub-collection under `components` becomes an empty container when absent
/// or null, tombstoned entries are stripped, and a missing/null `paths`
/// becomes an empty map (3.x tolerates zero declared paths).
pub fn repair_openapi3(mut value: Value) -> Value {
    if let Some(root) = value.as_object_mut() {
        let components = root.entry("components").or_insert_with(|| json!({}));
        ensure_object(components);
        if let Some(map) = components.as_object_mut() {
            for section in COMPONENT_SECTIONS {
                let slot = map.entry(section).or_insert_with(|| json!({}));
                ensure_object(slot);
                drop_null_entries(slot);
            }
        }
        let paths = root.entry("paths").or_insert_with(|| json!({}));
        ensure_object(paths);
        drop_null_entries(paths);
    }
    value
}

/// Repair a Swagger 2.0 document at the Value level: strip tombstoned
/// entries from every named sub-collection. Absent containers are supplied
/// by the serde defaults on [`Swagger2Document`].
pub fn repair_swagger2(mut value: Value) -> Value {
    if let Some(root) = value.as_object_mut() {
        for section in [
            "paths",
            "definitions",
            "parameters",
            "responses",
            "securityDefinitions",
        ] {
            if let Some(slot) = root.get_mut(section) {
                drop_null_entries(slot);
            }
        }
    }
    value
}

/// Loader for OpenAPI 3.x documents, backed by the `oas3` decoder.
pub struct OpenApi3Loader;

impl SpecLoader for OpenApi3Loader {
    fn parse_from_bytes(&self, data: &[u8]) -> Result<NormalizedDocument, LoadError> {
        let value = repair_openapi3(decode_value(data)?);
        let spec: OpenApiV3Spec = serde_json::from_value(value)
            .map_err(|err| LoadError::parse(format!("invalid OpenAPI 3.x structure: {err}")))?;
        debug!(title = %spec.info.title, "parsed OpenAPI 3.x document");
        Ok(NormalizedDocument::OpenApi3(Box::new(spec)))
    }

    fn validate(&self, doc: &NormalizedDocument) -> Result<(), LoadError> {
        let NormalizedDocument::OpenApi3(spec) = doc else {
            return Err(LoadError::validation("not an OpenAPI 3.x document"));
        };
        if spec.info.title.is_empty() {
            return Err(LoadError::validation("info.title is required"));
        }
        if spec.info.version.is_empty() {
            return Err(LoadError::validation("info.version is required"));
        }
        // Repair guarantees a container; an empty one is allowed in 3.x.
        if spec.paths.is_none() {
            return Err(LoadError::validation("document missing paths section"));
        }
        Ok(())
    }
}

/// Loader for Swagger 2.0 documents, backed by the hand-rolled serde model.
pub struct Swagger2Loader;

/// RFC 1035 cap on a full host name.
const MAX_HOST_LENGTH: usize = 253;
const MAX_BASE_PATH_LENGTH: usize = 256;

impl SpecLoader for Swagger2Loader {
    fn parse_from_bytes(&self, data: &[u8]) -> Result<NormalizedDocument, LoadError> {
        let value = repair_swagger2(decode_value(data)?);
        let doc: Swagger2Document = serde_json::from_value(value)
            .map_err(|err| LoadError::parse(format!("invalid Swagger 2.0 structure: {err}")))?;
        debug!(title = %doc.info.title, "parsed Swagger 2.0 document");
        Ok(NormalizedDocument::Swagger2(Box::new(doc)))
    }

    fn validate(&self, doc: &NormalizedDocument) -> Result<(), LoadError> {
        let NormalizedDocument::Swagger2(doc) = doc else {
            return Err(LoadError::validation("not a Swagger 2.0 document"));
        };
        if doc.swagger != "2.0" {
            return Err(LoadError::validation("swagger version must be 2.0"));
        }
        if doc.info.title.is_empty() {
            return Err(LoadError::validation("info.title is required"));
        }
        if doc.info.version.is_empty() {
            return Err(LoadError::validation("info.version is required"));
        }
        // Stricter than 3.x on purpose: a 2.0 document must declare paths.
        if doc.paths.is_empty() {
            return Err(LoadError::validation(
                "paths section is required and cannot be empty",
            ));
        }
        if let Some(host) = &doc.host {
            if host == "string" || host.len() > MAX_HOST_LENGTH {
                return Err(LoadError::validation("invalid host format"));
            }
        }
        if let Some(base_path) = &doc.base_path {
            if !base_path.starts_with('/') || base_path.len() > MAX_BASE_PATH_LENGTH {
                return Err(LoadError::validation(
                    "basePath must start with '/' and be at most 256 characters",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repair_fills_missing_components() {
        let repaired = repair_openapi3(json!({"openapi": "3.0.3"}));
        for section in COMPONENT_SECTIONS {
            assert!(
                repaired["components"][section].is_object(),
                "{section} should exist as an object"
            );
        }
        assert!(repaired["paths"].is_object());
    }

    #[test]
    fn test_repair_strips_tombstones() {
        let repaired = repair_openapi3(json!({
            "components": {
                "schemas": {"Kept": {"type": "object"}, "Dropped": null}
            }
        }));
        assert!(repaired["components"]["schemas"]["Kept"].is_object());
        assert!(repaired["components"]["schemas"].get("Dropped").is_none());
    }

    #[test]
    fn test_repair_replaces_null_paths() {
        let repaired = repair_openapi3(json!({"paths": null}));
        assert!(repaired["paths"].is_object());
    }

    #[test]
    fn test_repair_is_idempotent() {
        let once = repair_openapi3(json!({
            "openapi": "3.0.3",
            "components": {"schemas": {"Gone": null}},
            "paths": {"/a": {"get": {}}}
        }));
        let twice = repair_openapi3(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_swagger2_repair_is_idempotent() {
        let once = repair_swagger2(json!({
            "swagger": "2.0",
            "definitions": {"Gone": null},
            "paths": {"/a": {"get": {}}}
        }));
        let twice = repair_swagger2(once.clone());
        assert_eq!(once, twice);
        assert!(once["definitions"].get("Gone").is_none());
    }

    #[test]
    fn test_decode_value_names_both_attempts() {
        // A bare `{` is invalid JSON and invalid YAML.
        let err = decode_value(b"{").unwrap_err();
        match err {
            LoadError::Parse { message } => {
                assert!(message.contains("JSON"), "message was: {message}");
                assert!(message.contains("YAML"), "message was: {message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
