//! Element resource implementation.
//!
//! Elements are the rows of a user-defined [`Schema`](super::Schema):
//! every schema gets a collection under `objects/{schema}`, and an element
//! is one JSON object in that collection. The system fields `id`,
//! `createdAt`, `updatedAt` and `ownerId` are typed; everything else is
//! schema-defined and kept in a flattened field map.
//!
//! # Example
//!
//! ```rust,ignore
//! use appercode::rest::{Query, resources::Element};
//! use serde_json::{json, Map};
//!
//! // Query elements
//! let query = Query::new().filter(json!({"isPublished": true})).take(10);
//! let elements = Element::list(&client, "newsCatalogItem", &query).await?;
//!
//! // Create an element
//! let mut fields = Map::new();
//! fields.insert("title".to_string(), json!("Launch day"));
//! let element = Element::create(&client, "newsCatalogItem", fields).await?;
//!
//! // Count with a filter
//! let total = Element::count(&client, "newsCatalogItem", &Query::new()).await?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// One result of a bulk query: the item list and, when the sub-query asked
/// for it, the total count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkQueryResult {
    /// Total count for the sub-query, if requested.
    #[serde(default)]
    pub count: Option<u64>,
    /// Elements matched by the sub-query.
    #[serde(default)]
    pub list: Vec<Element>,
}

/// An object stored in a schema collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// The unique identifier of the element.
    pub id: String,

    /// When the element was created.
    pub created_at: DateTime<Utc>,

    /// When the element was last updated.
    pub updated_at: DateTime<Utc>,

    /// The id of the user owning the element.
    #[serde(default)]
    pub owner_id: Option<String>,

    /// Schema-defined fields, everything that is not a system field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// The schema this element belongs to. Not part of the wire format.
    #[serde(skip)]
    pub schema_name: String,

    /// Localized field values, keyed by language. Populated by
    /// [`get_languages`](Self::get_languages) and
    /// [`list_localized`](Self::list_localized).
    #[serde(skip)]
    pub languages: HashMap<String, Map<String, Value>>,
}

impl Element {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "Element";

    /// Endpoint table for element operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &["schema"],
            "objects/{schema}/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &["schema"],
            "objects/{schema}/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["schema", "id"],
            "objects/{schema}/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["schema"],
            "objects/{schema}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["schema", "id"],
            "objects/{schema}/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["schema", "id"],
            "objects/{schema}/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::BulkUpdate,
            &["schema"],
            "objects/{schema}/batch",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::BulkQuery,
            &["schema"],
            "objects/{schema}/batch/query",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::BulkDelete,
            &["schema"],
            "objects/{schema}/batch",
        ),
    ];

    /// Deserializes an element and attaches the schema name.
    fn from_value(value: Value, schema: &str) -> Result<Self, ResourceError> {
        let mut element: Self = decode(Self::NAME, value)?;
        element.schema_name = schema.to_string();
        Ok(element)
    }

    fn schema_values(schema: &str) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("schema", schema.to_string());
        values
    }

    fn item_values(schema: &str, id: &str) -> HashMap<&'static str, String> {
        let mut values = Self::schema_values(schema);
        values.insert("id", id.to_string());
        values
    }

    /// Returns the count of elements matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn count(
        client: &HttpClient,
        schema: &str,
        query: &Query,
    ) -> Result<u64, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Count,
            &Self::schema_values(schema),
        )?;

        let request = HttpRequest::builder(method, path)
            .query_param("count", "true")
            .body(query.to_body())
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_count(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Returns the elements matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response
    /// cannot be deserialized.
    pub async fn list(
        client: &HttpClient,
        schema: &str,
        query: &Query,
    ) -> Result<Vec<Self>, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::List,
            &Self::schema_values(schema),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(query.to_body())
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        let items: Vec<Value> = decode(Self::NAME, json)?;
        items
            .into_iter()
            .map(|item| Self::from_value(item, schema))
            .collect()
    }

    /// Returns the elements matching the query with localized field values
    /// attached for each of the given languages.
    ///
    /// Issues one additional query per language, filtered to the ids of
    /// the base result set, and merges the localized fields into each
    /// element's `languages` map.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any of the requests fail.
    pub async fn list_localized(
        client: &HttpClient,
        schema: &str,
        query: &Query,
        languages: &[&str],
    ) -> Result<Vec<Self>, ResourceError> {
        let mut elements = Self::list(client, schema, query).await?;
        if elements.is_empty() || languages.is_empty() {
            return Ok(elements);
        }

        let ids: Vec<String> = elements.iter().map(|e| e.id.clone()).collect();
        let localized_query = Query::by_ids(ids).take(-1);

        for language in languages {
            let (method, path) = resolve(
                Self::NAME,
                Self::PATHS,
                ResourceOperation::List,
                &Self::schema_values(schema),
            )?;

            let request = HttpRequest::builder(method, path)
                .body(localized_query.to_body())
                .language(*language)
                .build()
                .map_err(|e| ResourceError::Http(e.into()))?;

            let json = client
                .request_json(request)
                .await
                .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

            let items: Vec<Value> = decode(Self::NAME, json)?;
            let mut by_id: HashMap<String, Map<String, Value>> = HashMap::new();
            for item in items {
                let localized = Self::from_value(item, schema)?;
                by_id.insert(localized.id.clone(), localized.fields);
            }

            for element in &mut elements {
                if let Some(fields) = by_id.remove(&element.id) {
                    element.languages.insert((*language).to_string(), fields);
                }
            }
        }

        Ok(elements)
    }

    /// Fetches a single element by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the element doesn't exist.
    pub async fn find(
        client: &HttpClient,
        schema: &str,
        id: &str,
    ) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Find,
            &Self::item_values(schema, id),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;

        Self::from_value(json, schema)
    }

    /// Creates a new element in the schema collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(
        client: &HttpClient,
        schema: &str,
        fields: Map<String, Value>,
    ) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &Self::schema_values(schema),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(Value::Object(fields))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        Self::from_value(json, schema)
    }

    /// Updates selected fields of an element without fetching it first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the element doesn't exist.
    pub async fn update(
        client: &HttpClient,
        schema: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Update,
            &Self::item_values(schema, id),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(Value::Object(fields))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;
        Ok(())
    }

    /// Saves localized field values for the given languages, one request
    /// per language.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on the first failing language.
    pub async fn update_languages(
        client: &HttpClient,
        schema: &str,
        id: &str,
        languages: &HashMap<String, Map<String, Value>>,
    ) -> Result<(), ResourceError> {
        for (language, fields) in languages {
            let (method, path) = resolve(
                Self::NAME,
                Self::PATHS,
                ResourceOperation::Update,
                &Self::item_values(schema, id),
            )?;

            let request = HttpRequest::builder(method, path)
                .body(Value::Object(fields.clone()))
                .language(language)
                .build()
                .map_err(|e| ResourceError::Http(e.into()))?;

            client
                .request_json(request)
                .await
                .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;
        }
        Ok(())
    }

    /// Saves this element's current fields back to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn save(&self, client: &HttpClient) -> Result<(), ResourceError> {
        Self::update(client, &self.schema_name, &self.id, self.fields.clone()).await
    }

    /// Loads localized field values for the given languages into this
    /// element's `languages` map.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on the first failing language.
    pub async fn get_languages(
        &mut self,
        client: &HttpClient,
        languages: &[&str],
    ) -> Result<(), ResourceError> {
        for language in languages {
            let (method, path) = resolve(
                Self::NAME,
                Self::PATHS,
                ResourceOperation::Find,
                &Self::item_values(&self.schema_name, &self.id),
            )?;

            let request = HttpRequest::builder(method, path)
                .language(*language)
                .build()
                .map_err(|e| ResourceError::Http(e.into()))?;

            let json = client
                .request_json(request)
                .await
                .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;

            let localized = Self::from_value(json, &self.schema_name)?;
            self.languages
                .insert((*language).to_string(), localized.fields);
        }
        Ok(())
    }

    /// Deletes this element.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the element doesn't exist.
    pub async fn delete(&self, client: &HttpClient) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Delete,
            &Self::item_values(&self.schema_name, &self.id),
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

    /// Applies the same changes to many elements in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn bulk_update(
        client: &HttpClient,
        schema: &str,
        ids: &[String],
        changes: Map<String, Value>,
    ) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::BulkUpdate,
            &Self::schema_values(schema),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(serde_json::json!({
                "ids": ids,
                "changes": changes,
            }))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;
        Ok(())
    }

    /// Runs several queries against the collection in one request.
    ///
    /// Each sub-query yields a [`BulkQueryResult`] with its matched list
    /// and, when requested, its total count.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response
    /// cannot be deserialized.
    pub async fn bulk_query(
        client: &HttpClient,
        schema: &str,
        queries: &[Query],
    ) -> Result<Vec<BulkQueryResult>, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::BulkQuery,
            &Self::schema_values(schema),
        )?;

        let body: Vec<Value> = queries.iter().map(Query::to_body).collect();
        let request = HttpRequest::builder(method, path)
            .body(Value::Array(body))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        let mut results: Vec<BulkQueryResult> = decode(Self::NAME, json)?;
        for result in &mut results {
            for element in &mut result.list {
                element.schema_name = schema.to_string();
            }
        }
        Ok(results)
    }

    /// Deletes many elements in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn bulk_delete(
        client: &HttpClient,
        schema: &str,
        ids: &[String],
    ) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::BulkDelete,
            &Self::schema_values(schema),
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
