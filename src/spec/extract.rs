//! Flattening a normalized document into storage-ready endpoint records.
//!
//! Emission order is deterministic: paths sort lexicographically and the
//! methods of one path follow a fixed priority table, so repeated extraction
//! of the same document always yields the same sequence regardless of the
//! decoder's own iteration order.

use super::swagger2::{Swagger2Document, Swagger2Parameter};
use super::types::{ApiEndpoint, ApiParameter, NormalizedDocument, ParameterLocation};
use oas3::spec::{ObjectOrReference, ObjectSchema, Parameter, SchemaType, SchemaTypeSet};
use oas3::OpenApiV3Spec;
use serde_json::Value;
use tracing::debug;

const METHOD_ORDER: [&str; 8] = [
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE",
];

fn method_rank(method: &str) -> usize {
    METHOD_ORDER
        .iter()
        .position(|&m| m == method)
        .unwrap_or(METHOD_ORDER.len())
}

/// Flatten a document into one [`ApiEndpoint`] per path+method pair.
///
/// Pure function of the document; `spec_id` stamps every record with its
/// owning specification. N paths with M operations each yield exactly N×M
/// records.
pub fn extract_endpoints(doc: &NormalizedDocument, spec_id: u64) -> Vec<ApiEndpoint> {
    let endpoints = match doc {
        NormalizedDocument::OpenApi3(spec) => extract_openapi3(spec, spec_id),
        NormalizedDocument::Swagger2(doc) => extract_swagger2(doc, spec_id),
    };
    debug!(
        version = %doc.version(),
        count = endpoints.len(),
        "extracted endpoints"
    );
    endpoints
}

fn extract_openapi3(spec: &OpenApiV3Spec, spec_id: u64) -> Vec<ApiEndpoint> {
    let mut endpoints = Vec::new();
    let Some(paths) = spec.paths.as_ref() else {
        return endpoints;
    };
    // BTreeMap iteration gives the lexicographic path order already.
    for (path, item) in paths {
        let mut operations: Vec<_> = item.methods().into_iter().collect();
        operations.sort_by_key(|(method, _)| method_rank(method.as_str()));

        for (method, op) in operations {
            let mut parameters = lift_parameters3(spec, &item.parameters);
            parameters.extend(lift_parameters3(spec, &op.parameters));
            if let Some(body) = synthesize_body_parameter(op) {
                parameters.push(body);
            }

            endpoints.push(ApiEndpoint {
                spec_id,
                path: path.clone(),
                method: method.as_str().to_string(),
                summary: op.summary.clone().unwrap_or_default(),
                description: op.description.clone().unwrap_or_default(),
                operation_id: op.operation_id.clone().unwrap_or_default(),
                tags: op.tags.join(","),
                parameters,
                ..ApiEndpoint::default()
            });
        }
    }
    endpoints
}

/// Resolve `#/components/parameters/{name}` references against the document.
fn resolve_parameter_ref<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_path.strip_prefix("#/components/parameters/")?;
    spec.components
        .as_ref()?
        .parameters
        .get(name)
        .and_then(|param_ref| match param_ref {
            ObjectOrReference::Object(param) => Some(param),
            _ => None,
        })
}

fn lift_parameters3(
    spec: &OpenApiV3Spec,
    params: &[ObjectOrReference<Parameter>],
) -> Vec<ApiParameter> {
    let mut out = Vec::new();
    for p in params {
        let param = match p {
            ObjectOrReference::Object(obj) => Some(obj),
            ObjectOrReference::Ref { ref_path, .. } => resolve_parameter_ref(spec, ref_path),
        };
        let Some(param) = param else { continue };

        let location = match param.location {
            oas3::spec::ParameterIn::Path => ParameterLocation::Path,
            oas3::spec::ParameterIn::Query => ParameterLocation::Query,
            oas3::spec::ParameterIn::Header => ParameterLocation::Header,
            // Cookie parameters never feed into request building here.
            oas3::spec::ParameterIn::Cookie => continue,
        };

        let mut lifted = ApiParameter::new(
            param.name.clone(),
            location,
            param.required.unwrap_or(false),
        );
        lifted.param_type = param
            .schema
            .as_ref()
            .and_then(|s| match s {
                ObjectOrReference::Object(obj) => object_schema_type(obj),
                ObjectOrReference::Ref { .. } => None,
            })
            .unwrap_or_default();
        out.push(lifted);
    }
    out
}

/// An OpenAPI 3 `requestBody` becomes a single `body` parameter slot so the
/// invoker can treat both flavors uniformly.
fn synthesize_body_parameter(op: &oas3::spec::Operation) -> Option<ApiParameter> {
    let required = match op.request_body.as_ref()? {
        ObjectOrReference::Object(body) => body.required.unwrap_or(false),
        ObjectOrReference::Ref { .. } => false,
    };
    Some(ApiParameter::new("body", ParameterLocation::Body, required))
}

fn schema_type_name(ty: &SchemaType) -> &'static str {
    match ty {
        SchemaType::Boolean => "boolean",
        SchemaType::Integer => "integer",
        SchemaType::Number => "number",
        SchemaType::String => "string",
        SchemaType::Array => "array",
        SchemaType::Object => "object",
        SchemaType::Null => "null",
    }
}

/// The informational `type` string of a typed OpenAPI 3 schema. A 3.1
/// nullable type set reports its first non-null entry.
fn object_schema_type(schema: &ObjectSchema) -> Option<String> {
    match schema.schema_type.as_ref()? {
        SchemaTypeSet::Single(ty) => Some(schema_type_name(ty).to_string()),
        SchemaTypeSet::Multiple(types) => types
            .iter()
            .find(|ty| **ty != SchemaType::Null)
            .or_else(|| types.first())
            .map(|ty| schema_type_name(ty).to_string()),
    }
}

/// The informational `type` string of a raw Swagger 2 schema value; the
/// first entry wins when a type array sneaks in.
fn schema_type_string(schema: &Value) -> Option<String> {
    match schema.get("type") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(arr)) => arr.iter().find_map(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}

fn extract_swagger2(doc: &Swagger2Document, spec_id: u64) -> Vec<ApiEndpoint> {
    let mut endpoints = Vec::new();
    for (path, item) in &doc.paths {
        let mut operations = item.methods();
        operations.sort_by_key(|(method, _)| method_rank(method));

        for (method, op) in operations {
            let mut parameters = lift_parameters2(doc, &item.parameters);
            parameters.extend(lift_parameters2(doc, &op.parameters));

            endpoints.push(ApiEndpoint {
                spec_id,
                path: path.clone(),
                method: method.to_string(),
                summary: op.summary.clone().unwrap_or_default(),
                description: op.description.clone().unwrap_or_default(),
                operation_id: op.operation_id.clone().unwrap_or_default(),
                tags: op.tags.join(","),
                parameters,
                ..ApiEndpoint::default()
            });
        }
    }
    endpoints
}

fn lift_parameters2(doc: &Swagger2Document, params: &[Swagger2Parameter]) -> Vec<ApiParameter> {
    let mut out = Vec::new();
    for p in params {
        let param = match &p.ref_path {
            Some(ref_path) => {
                let Some(resolved) = ref_path
                    .strip_prefix("#/parameters/")
                    .and_then(|name| doc.parameters.get(name))
                else {
                    continue;
                };
                resolved
            }
            None => p,
        };
        let Some(location) = ParameterLocation::parse(&param.location) else {
            continue;
        };
        let mut lifted = ApiParameter::new(param.name.clone(), location, param.required);
        lifted.param_type = param
            .param_type
            .clone()
            .or_else(|| param.schema.as_ref().and_then(schema_type_string))
            .unwrap_or_default();
        out.push(lifted);
    }
    out
}
