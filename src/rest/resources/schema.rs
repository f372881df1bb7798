//! Schema resource implementation.
//!
//! A schema describes one collection of [`Element`](super::Element)s: its
//! id doubles as the collection name under `objects/{schema}`, and its
//! field list defines the shape of the stored objects.
//!
//! On the wire a field's multiplicity is encoded in its type string
//! (`"[text]"` means a list of `text` values); the model decodes that into
//! `multiple: bool` plus the bare type, and re-encodes it when writing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, ResourceError, ResourceOperation, ResourcePath};

/// Built-in collection schema ids provisioned on every Appercode project.
pub const COLLECTION_TYPES: &[&str] = &[
    "areaCatalogItem",
    "generalCatalogItem",
    "eventCatalogItem",
    "feedbackMessage",
    "htmlPage",
    "newsCatalogItem",
    "photoCatalogItem",
    "tag",
    "userProfile",
    "videoCatalogItem",
];

/// Wire format of a schema field, with multiplicity encoded in the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    localized: bool,
}

/// A field definition within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireField", into = "WireField")]
pub struct SchemaField {
    /// The field name.
    pub name: String,
    /// The bare field type (e.g., `text`, `integer`, a schema id).
    pub field_type: String,
    /// Human-readable title.
    pub title: String,
    /// Whether the field holds per-language values.
    pub localized: bool,
    /// Whether the field holds a list of values.
    pub multiple: bool,
}

impl From<WireField> for SchemaField {
    fn from(wire: WireField) -> Self {
        let (field_type, multiple) = wire
            .field_type
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .map_or((wire.field_type.clone(), false), |inner| {
                (inner.to_string(), true)
            });

        Self {
            name: wire.name,
            field_type,
            title: wire.title,
            localized: wire.localized,
            multiple,
        }
    }
}

impl From<SchemaField> for WireField {
    fn from(field: SchemaField) -> Self {
        let field_type = if field.multiple {
            format!("[{}]", field.field_type)
        } else {
            field.field_type
        };

        Self {
            name: field.name,
            field_type,
            title: field.title,
            localized: field.localized,
        }
    }
}

/// Input for creating a new schema.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDraft {
    /// Unique schema id, which becomes the collection name.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Whether element changes are logged.
    pub is_logged: bool,
    /// Whether deletes are deferred (soft deletes).
    pub is_deferred_deletion: bool,
    /// Presentation metadata, passed through untouched.
    pub view_data: Value,
    /// Field definitions.
    pub fields: Vec<SchemaField>,
}

/// A collection schema on an Appercode project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The unique schema id.
    pub id: String,

    /// Human-readable title. Empty titles fall back to the id.
    #[serde(default)]
    pub title: String,

    /// Field definitions.
    #[serde(default)]
    pub fields: Vec<SchemaField>,

    /// When the schema was created.
    pub created_at: DateTime<Utc>,

    /// When the schema was last updated.
    pub updated_at: DateTime<Utc>,

    /// Whether deletes are deferred (soft deletes).
    #[serde(default)]
    pub is_deferred_deletion: bool,

    /// Whether element changes are logged.
    #[serde(default)]
    pub is_logged: bool,

    /// Presentation metadata, passed through untouched.
    #[serde(default)]
    pub view_data: Value,
}

impl Schema {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "Schema";

    /// Endpoint table for schema operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "schemas"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["schema"],
            "schemas/{schema}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["schema"],
            "schemas/{schema}",
        ),
    ];

    fn schema_values(schema: &str) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("schema", schema.to_string());
        values
    }

    /// Creates a new schema.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Conflict`] if the id is already taken
    /// (HTTP 409), or another [`ResourceError`] for other failures.
    pub async fn create(client: &HttpClient, draft: SchemaDraft) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &HashMap::new(),
        )?;

        let id = draft.id.clone();
        let body = serde_json::to_value(&draft).map_err(|source| ResourceError::Deserialize {
            resource: Self::NAME,
            source,
        })?;

        let request = HttpRequest::builder(method, path)
            .body(body)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&id)))?;

        decode(Self::NAME, json)
    }

    /// Fetches a single schema by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the schema doesn't exist.
    pub async fn get(client: &HttpClient, schema: &str) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Find,
            &Self::schema_values(schema),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(schema)))?;

        let mut parsed: Self = decode(Self::NAME, json)?;
        if parsed.title.is_empty() {
            parsed.title = parsed.id.clone();
        }
        Ok(parsed)
    }

    /// Deletes this schema and its collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the schema doesn't exist.
    pub async fn delete(&self, client: &HttpClient) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Delete,
            &Self::schema_values(&self.id),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_decoding_single() {
        let field: SchemaField = serde_json::from_value(json!({
            "name": "title",
            "type": "text",
            "title": "Title",
            "localized": true,
        }))
        .unwrap();

        assert_eq!(field.field_type, "text");
        assert!(!field.multiple);
        assert!(field.localized);
    }

    #[test]
    fn test_field_type_decoding_multiple() {
        let field: SchemaField = serde_json::from_value(json!({
            "name": "tags",
            "type": "[tag]",
        }))
        .unwrap();

        assert_eq!(field.field_type, "tag");
        assert!(field.multiple);
        assert!(!field.localized);
    }

    #[test]
    fn test_field_type_encoding_round_trip() {
        let field = SchemaField {
            name: "tags".to_string(),
            field_type: "tag".to_string(),
            title: String::new(),
            localized: false,
            multiple: true,
        };

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "[tag]");

        let parsed: SchemaField = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, field);
    }

    #[test]
    fn test_schema_deserialization() {
        let schema: Schema = serde_json::from_value(json!({
            "id": "newsCatalogItem",
            "title": "News",
            "createdAt": "2024-01-10T08:00:00Z",
            "updatedAt": "2024-06-20T15:45:00Z",
            "isDeferredDeletion": false,
            "isLogged": true,
            "viewData": {"icon": "news"},
            "fields": [
                {"name": "title", "type": "text", "title": "Title", "localized": true},
                {"name": "tags", "type": "[tag]"},
            ],
        }))
        .unwrap();

        assert_eq!(schema.id, "newsCatalogItem");
        assert!(schema.is_logged);
        assert_eq!(schema.fields.len(), 2);
        assert!(schema.fields[1].multiple);
    }

    #[test]
    fn test_schema_draft_serialization() {
        let draft = SchemaDraft {
            id: "events".to_string(),
            title: "Events".to_string(),
            is_logged: false,
            is_deferred_deletion: true,
            view_data: json!({}),
            fields: vec![SchemaField {
                name: "name".to_string(),
                field_type: "text".to_string(),
                title: "Name".to_string(),
                localized: false,
                multiple: false,
            }],
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["id"], "events");
        assert_eq!(json["isDeferredDeletion"], true);
        assert_eq!(json["fields"][0]["type"], "text");
    }

    #[test]
    fn test_collection_types_include_user_profile() {
        assert!(COLLECTION_TYPES.contains(&"userProfile"));
    }
}
