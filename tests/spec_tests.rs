#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidock::spec::NormalizedDocument;
use apidock::{detect_version, loader_for, LoadError, SpecVersion};

const OPENAPI3_YAML: &str = r#"openapi: 3.1.0
info:
  title: Test API
  version: "1.0.0"
components:
  schemas:
    Item:
      type: object
      properties:
        id: { type: string }
    Tombstone: null
paths:
  /items/{id}:
    get:
      operationId: get_item
      summary: Fetch one item
      responses:
        "200":
          description: OK
"#;

const SWAGGER2_JSON: &str = r#"{
  "swagger": "2.0",
  "info": { "title": "Legacy API", "version": "0.9" },
  "basePath": "/v1",
  "paths": {
    "/pets": {
      "get": { "operationId": "list_pets", "responses": { "200": { "description": "OK" } } }
    }
  }
}"#;

fn load(version: SpecVersion, data: &str) -> Result<NormalizedDocument, LoadError> {
    let loader = loader_for(version).unwrap();
    let doc = loader.parse_from_bytes(data.as_bytes())?;
    loader.validate(&doc)?;
    Ok(doc)
}

#[test]
fn test_openapi3_yaml_loads_and_validates() {
    let doc = load(SpecVersion::OpenApi3, OPENAPI3_YAML).unwrap();
    let NormalizedDocument::OpenApi3(spec) = doc else {
        panic!("wrong document variant");
    };
    assert_eq!(spec.info.title, "Test API");
    // The tombstoned schema entry was stripped during repair.
    let components = spec.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Item"));
    assert!(!components.schemas.contains_key("Tombstone"));
}

#[test]
fn test_openapi3_json_loads() {
    let json = r#"{"openapi": "3.1.0", "info": {"title": "T", "version": "1"}, "paths": {}}"#;
    assert!(load(SpecVersion::OpenApi3, json).is_ok());
}

#[test]
fn test_openapi3_empty_paths_is_accepted() {
    let json = r#"{"openapi": "3.1.0", "info": {"title": "T", "version": "1"}}"#;
    let doc = load(SpecVersion::OpenApi3, json).unwrap();
    let NormalizedDocument::OpenApi3(spec) = doc else {
        panic!("wrong document variant");
    };
    // Repair materializes an empty paths container rather than leaving it absent.
    assert!(spec.paths.as_ref().is_some_and(|p| p.is_empty()));
}

#[test]
fn test_openapi3_empty_title_is_rejected() {
    let json = r#"{"openapi": "3.1.0", "info": {"title": "", "version": "1"}, "paths": {}}"#;
    let err = load(SpecVersion::OpenApi3, json).unwrap_err();
    assert!(err.to_string().contains("title"), "error was: {err}");
}

#[test]
fn test_openapi3_empty_version_is_rejected() {
    let json = r#"{"openapi": "3.1.0", "info": {"title": "T", "version": ""}, "paths": {}}"#;
    let err = load(SpecVersion::OpenApi3, json).unwrap_err();
    assert!(err.to_string().contains("version"), "error was: {err}");
}

#[test]
fn test_swagger2_json_loads_and_validates() {
    let doc = load(SpecVersion::Swagger2, SWAGGER2_JSON).unwrap();
    let NormalizedDocument::Swagger2(doc) = doc else {
        panic!("wrong document variant");
    };
    assert_eq!(doc.swagger, "2.0");
    assert_eq!(doc.base_path.as_deref(), Some("/v1"));
}

#[test]
fn test_swagger2_yaml_loads() {
    let yaml = r#"swagger: "2.0"
info:
  title: Legacy API
  version: "0.9"
paths:
  /pets:
    get:
      responses:
        "200": { description: OK }
"#;
    assert!(load(SpecVersion::Swagger2, yaml).is_ok());
}

#[test]
fn test_swagger2_missing_title_mentions_title() {
    let json = r#"{"swagger": "2.0", "info": {"version": "1"}, "paths": {"/a": {}}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(err.to_string().contains("title"), "error was: {err}");
}

#[test]
fn test_swagger2_missing_version_mentions_version() {
    let json = r#"{"swagger": "2.0", "info": {"title": "T"}, "paths": {"/a": {}}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(err.to_string().contains("version"), "error was: {err}");
}

#[test]
fn test_swagger2_empty_paths_is_rejected() {
    let json = r#"{"swagger": "2.0", "info": {"title": "T", "version": "1"}, "paths": {}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(matches!(err, LoadError::Validation { .. }));
    assert!(err.to_string().contains("paths"), "error was: {err}");
}

#[test]
fn test_swagger2_wrong_version_marker_is_rejected() {
    let json = r#"{"swagger": "2.1", "info": {"title": "T", "version": "1"}, "paths": {"/a": {}}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(err.to_string().contains("2.0"), "error was: {err}");
}

#[test]
fn test_swagger2_placeholder_host_is_rejected() {
    let json = r#"{"swagger": "2.0", "info": {"title": "T", "version": "1"},
        "host": "string", "paths": {"/a": {}}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(err.to_string().contains("host"), "error was: {err}");
}

#[test]
fn test_swagger2_overlong_host_is_rejected() {
    let host = "h".repeat(254);
    let json = format!(
        r#"{{"swagger": "2.0", "info": {{"title": "T", "version": "1"}},
            "host": "{host}", "paths": {{"/a": {{}}}}}}"#
    );
    let err = load(SpecVersion::Swagger2, &json).unwrap_err();
    assert!(err.to_string().contains("host"), "error was: {err}");
}

#[test]
fn test_swagger2_base_path_must_start_with_slash() {
    let json = r#"{"swagger": "2.0", "info": {"title": "T", "version": "1"},
        "basePath": "v1", "paths": {"/a": {}}}"#;
    let err = load(SpecVersion::Swagger2, json).unwrap_err();
    assert!(err.to_string().contains("basePath"), "error was: {err}");
}

#[test]
fn test_neither_json_nor_yaml_is_a_parse_error() {
    let loader = loader_for(SpecVersion::Swagger2).unwrap();
    let err = loader.parse_from_bytes(b"{ this is: [ not, a document").unwrap_err();
    match err {
        LoadError::Parse { message } => {
            assert!(message.contains("JSON"), "message was: {message}");
            assert!(message.contains("YAML"), "message was: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.yaml");
    std::fs::write(&path, OPENAPI3_YAML).unwrap();

    let loader = loader_for(SpecVersion::OpenApi3).unwrap();
    let doc = loader.parse_from_path(&path).unwrap();
    loader.validate(&doc).unwrap();
}

#[test]
fn test_parse_from_missing_path_is_a_parse_error() {
    let loader = loader_for(SpecVersion::OpenApi3).unwrap();
    let err = loader
        .parse_from_path(std::path::Path::new("/nonexistent/spec.yaml"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn test_no_loader_for_unknown_version() {
    assert!(loader_for(SpecVersion::Unknown).is_none());
    assert!(loader_for(detect_version(b"gibberish")).is_none());
}

#[test]
fn test_validate_rejects_mismatched_variant() {
    let doc = load(SpecVersion::Swagger2, SWAGGER2_JSON).unwrap();
    let openapi3_loader = loader_for(SpecVersion::OpenApi3).unwrap();
    assert!(openapi3_loader.validate(&doc).is_err());
}
