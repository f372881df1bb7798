//! REST resource functionality for the Appercode SDK.
//!
//! This module contains the endpoint table infrastructure ([`ResourcePath`],
//! [`get_path`], [`build_path`]), the query payload type ([`Query`]), the
//! resource error taxonomy ([`ResourceError`]), and the typed resource
//! models under [`resources`].

mod errors;
mod path;
mod query;

pub mod resources;

pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use query::Query;

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::HttpMethod;

/// Resolves an operation against a resource's endpoint table.
///
/// Returns the HTTP method and the interpolated path, or a
/// [`ResourceError::PathResolutionFailed`] if the table has no matching
/// entry for the available placeholder values.
pub(crate) fn resolve(
    resource: &'static str,
    paths: &'static [ResourcePath],
    operation: ResourceOperation,
    values: &HashMap<&str, String>,
) -> Result<(HttpMethod, String), ResourceError> {
    let available: Vec<&str> = values.keys().copied().collect();
    let path = get_path(paths, operation, &available)
        .ok_or(ResourceError::no_path(resource, operation))?;
    Ok((path.http_method, build_path(path.template, values)))
}

/// Deserializes a response value into a model type, attaching the resource
/// name to any failure.
pub(crate) fn decode<T: DeserializeOwned>(
    resource: &'static str,
    value: serde_json::Value,
) -> Result<T, ResourceError> {
    serde_json::from_value(value).map_err(|source| ResourceError::Deserialize { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: &[ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Find,
        &["id"],
        "things/{id}",
    )];

    #[test]
    fn test_resolve_builds_method_and_path() {
        let mut values = HashMap::new();
        values.insert("id", "t1".to_string());

        let (method, path) = resolve("Thing", PATHS, ResourceOperation::Find, &values).unwrap();
        assert_eq!(method, HttpMethod::Get);
        assert_eq!(path, "things/t1");
    }

    #[test]
    fn test_resolve_fails_for_missing_operation() {
        let result = resolve("Thing", PATHS, ResourceOperation::Delete, &HashMap::new());
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed { resource: "Thing", operation: "delete" })
        ));
    }

    #[test]
    fn test_decode_attaches_resource_name() {
        let result: Result<u64, _> = decode("Thing", serde_json::json!("not a number"));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("Thing"));
    }
}
