//! Hand-rolled serde model of a Swagger 2.0 document.
//!
//! The `oas3` decoder only understands OpenAPI 3.x, so the 2.0 shape is
//! modeled directly. Every container field defaults to empty so that a
//! decoded document always satisfies the "sub-collections exist, possibly
//! empty" invariant; semantic rules are enforced separately by
//! [`super::Swagger2Loader`](super::load::Swagger2Loader).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger2Document {
    /// Version marker; must be the literal `"2.0"`.
    #[serde(default)]
    pub swagger: String,
    #[serde(default)]
    pub info: Swagger2Info,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "basePath", default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default)]
    pub paths: BTreeMap<String, Swagger2PathItem>,
    #[serde(default)]
    pub definitions: BTreeMap<String, Value>,
    /// Document-level reusable parameters, targets of `#/parameters/{name}` refs.
    #[serde(default)]
    pub parameters: BTreeMap<String, Swagger2Parameter>,
    #[serde(default)]
    pub responses: BTreeMap<String, Value>,
    #[serde(rename = "securityDefinitions", default)]
    pub security_definitions: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger2Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger2PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Swagger2Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Swagger2Operation>,
    /// Parameters shared by every operation on this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Swagger2Parameter>,
}

impl Swagger2PathItem {
    /// Declared operations paired with their uppercase verb.
    pub fn methods(&self) -> Vec<(&'static str, &Swagger2Operation)> {
        let mut out = Vec::new();
        let pairs: [(&'static str, &Option<Swagger2Operation>); 7] = [
            ("GET", &self.get),
            ("POST", &self.post),
            ("PUT", &self.put),
            ("PATCH", &self.patch),
            ("DELETE", &self.delete),
            ("HEAD", &self.head),
            ("OPTIONS", &self.options),
        ];
        for (verb, op) in pairs {
            if let Some(op) = op {
                out.push((verb, op));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger2Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Swagger2Parameter>,
    #[serde(default)]
    pub responses: BTreeMap<String, Value>,
}

/// A parameter declaration, or a `$ref` to one under `#/parameters/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger2Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body parameters carry a schema instead of a flat type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
}
