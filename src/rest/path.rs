//! Endpoint table infrastructure for REST resources.
//!
//! Every resource declares its endpoints as a constant data table of
//! [`ResourcePath`] entries instead of branching on operation names. The
//! resolution system selects the most specific path whose placeholders can
//! all be filled from the available values.
//!
//! # Example
//!
//! ```rust
//! use appercode::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use appercode::clients::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["schema", "id"],
//!         "objects/{schema}/{id}",
//!     ),
//!     ResourcePath::new(
//!         HttpMethod::Post,
//!         ResourceOperation::List,
//!         &["schema"],
//!         "objects/{schema}/query",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["schema", "id"]).unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("schema", "events");
//! values.insert("id", "e1");
//! assert_eq!(build_path(path.template, &values), "objects/events/e1");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::clients::HttpMethod;

/// Operations that can be performed on an Appercode resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource by id.
    Find,
    /// Query a collection (POST with a filter payload).
    List,
    /// Query a collection for its total count.
    Count,
    /// Create a new resource.
    Create,
    /// Update an existing resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Update many resources in one request.
    BulkUpdate,
    /// Run several queries in one request.
    BulkQuery,
    /// Delete many resources in one request.
    BulkDelete,
    /// Dispatch a notification campaign.
    Send,
    /// Open a form for responding.
    Start,
    /// Submit a completed form response.
    Submit,
    /// Fetch aggregated report results.
    Results,
    /// Upload file content.
    Upload,
}

impl ResourceOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::List => "list",
            Self::Count => "count",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::BulkUpdate => "bulk-update",
            Self::BulkQuery => "bulk-query",
            Self::BulkDelete => "bulk-delete",
            Self::Send => "send",
            Self::Start => "start",
            Self::Submit => "submit",
            Self::Results => "results",
            Self::Upload => "upload",
        }
    }
}

/// A path configuration for a resource operation.
///
/// Templates use `{name}` placeholders interpolated from the values the
/// caller provides (e.g., `objects/{schema}/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required placeholder names in order (e.g., `["schema", "id"]`).
    pub params: &'static [&'static str],
    /// The URL template with `{name}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` so endpoint tables can be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        params: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            params,
            template,
        }
    }

    /// Returns the number of required placeholders for this path.
    #[must_use]
    pub const fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Checks if all required placeholders are available.
    #[must_use]
    pub fn matches_params(&self, available: &[&str]) -> bool {
        self.params.iter().all(|p| available.contains(p))
    }
}

/// Selects the best matching path for an operation.
///
/// Filters by operation, keeps the paths whose required placeholders are
/// all available, and picks the most specific one (most placeholders).
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_params(available))
        .max_by_key(|p| p.param_count())
}

/// Builds a URL path from a template by interpolating placeholder values.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, values: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in values {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
