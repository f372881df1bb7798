//! Resource-specific error types for REST API operations.
//!
//! The SDK maps HTTP failure statuses to semantic error variants while
//! keeping the operation's context (resource name, id) attached:
//!
//! - **404**: [`ResourceError::NotFound`] - resource doesn't exist
//! - **409**: [`ResourceError::Conflict`] - creation conflict (e.g., a
//!   schema id that is already taken)
//! - **Other failures**: [`ResourceError::Http`] - wrapped pipeline error
//!
//! # Example
//!
//! ```rust,ignore
//! use appercode::rest::ResourceError;
//!
//! match Element::find(&client, "events", "e1").await {
//!     Ok(element) => println!("Found: {}", element.id),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{resource} with id {id} not found");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::rest::ResourceOperation;

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Element", "Schema").
        resource: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// The server rejected a create because the id is already taken
    /// (HTTP 409).
    #[error("{resource} with id {id} already exists")]
    Conflict {
        /// The type name of the resource.
        resource: &'static str,
        /// The conflicting id.
        id: String,
    },

    /// The resource's endpoint table has no entry for this operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided parameters")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The response body could not be deserialized into the model type.
    #[error("Failed to deserialize {resource} response: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred (transport failure, auth failure, or
    /// a status that has no semantic mapping).
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Maps a pipeline error to a semantic resource error.
    ///
    /// 404 becomes [`NotFound`](Self::NotFound), 409 becomes
    /// [`Conflict`](Self::Conflict); everything else is passed through.
    #[must_use]
    pub fn from_http(error: HttpError, resource: &'static str, id: Option<&str>) -> Self {
        match error.status() {
            Some(404) => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            Some(409) => Self::Conflict {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            _ => Self::Http(error),
        }
    }

    /// Creates a path resolution failure for an operation.
    #[must_use]
    pub const fn no_path(resource: &'static str, operation: ResourceOperation) -> Self {
        Self::PathResolutionFailed {
            resource,
            operation: operation.as_str(),
        }
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    fn response_error(code: u16) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: String::new(),
        })
    }

    #[test]
    fn test_not_found_error_formats_message_with_resource_and_id() {
        let error = ResourceError::NotFound {
            resource: "Element",
            id: "e1".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Element"));
        assert!(message.contains("e1"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_from_http_maps_404_to_not_found() {
        let error = ResourceError::from_http(response_error(404), "Element", Some("e1"));
        assert!(matches!(
            error,
            ResourceError::NotFound { resource: "Element", id } if id == "e1"
        ));
    }

    #[test]
    fn test_from_http_maps_409_to_conflict() {
        let error = ResourceError::from_http(response_error(409), "Schema", Some("events"));
        assert!(matches!(
            error,
            ResourceError::Conflict { resource: "Schema", id } if id == "events"
        ));
    }

    #[test]
    fn test_from_http_passes_other_codes_through() {
        let error = ResourceError::from_http(response_error(500), "Element", None);
        assert!(matches!(error, ResourceError::Http(_)));
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_no_path_includes_operation_context() {
        let error = ResourceError::no_path("Form", ResourceOperation::Update);
        let message = error.to_string();
        assert!(message.contains("Form"));
        assert!(message.contains("update"));
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(
            ResourceError::NotFound {
                resource: "Element",
                id: "e1".to_string()
            }
            .status(),
            Some(404)
        );
        assert_eq!(
            ResourceError::no_path("Form", ResourceOperation::Find).status(),
            None
        );
    }

    #[test]
    fn test_all_error_variants_implement_std_error() {
        let not_found: &dyn std::error::Error = &ResourceError::NotFound {
            resource: "Element",
            id: "e1".to_string(),
        };
        let _ = not_found;

        let conflict: &dyn std::error::Error = &ResourceError::Conflict {
            resource: "Schema",
            id: "events".to_string(),
        };
        let _ = conflict;
    }
}
