//! Event membership resource implementation.
//!
//! Memberships link users to calendar events. The server exposes a small
//! surface: create, query, and batch delete.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// A user's membership in an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventMembership {
    /// The unique membership id.
    #[serde(default)]
    pub id: Option<String>,

    /// Remaining membership attributes.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl EventMembership {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "EventMembership";

    /// Endpoint table for event membership operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "EventMemberships",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "EventMemberships/query",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::BulkDelete,
            &[],
            "EventMemberships/batch",
        ),
    ];

    /// Creates a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(client: &HttpClient, fields: Value) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(fields)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }

    /// Returns the memberships matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(client: &HttpClient, query: &Query) -> Result<Vec<Self>, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::List,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(query.to_body())
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }

    /// Deletes several memberships in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn remove(client: &HttpClient, ids: &[String]) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::BulkDelete,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(serde_json::json!(ids))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialization_keeps_extra_fields() {
        let membership: EventMembership = serde_json::from_value(json!({
            "id": "m1",
            "userId": "u1",
            "eventId": "e1",
        }))
        .unwrap();

        assert_eq!(membership.id.as_deref(), Some("m1"));
        assert_eq!(membership.fields.get("userId"), Some(&json!("u1")));
    }

    #[test]
    fn test_path_table() {
        use crate::rest::get_path;

        let create = get_path(EventMembership::PATHS, ResourceOperation::Create, &[]).unwrap();
        assert_eq!(create.template, "EventMemberships");

        let bulk = get_path(EventMembership::PATHS, ResourceOperation::BulkDelete, &[]).unwrap();
        assert_eq!(bulk.template, "EventMemberships/batch");
        assert_eq!(bulk.http_method, HttpMethod::Delete);
    }
}
