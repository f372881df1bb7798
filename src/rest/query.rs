//! Query payloads for Appercode list and count endpoints.
//!
//! List endpoints on the Appercode API are POSTs carrying a filter object:
//! `{where, order, take, skip, include}`, all optional. An empty query
//! serializes to `{}`, which the server treats as "everything".

use serde::Serialize;
use serde_json::Value;

/// A filter payload for query endpoints.
///
/// # Example
///
/// ```rust
/// use appercode::rest::Query;
/// use serde_json::json;
///
/// let query = Query::new()
///     .filter(json!({"isPublished": true}))
///     .order("-createdAt")
///     .take(20)
///     .skip(40);
///
/// let body = query.to_body();
/// assert_eq!(body["where"], json!({"isPublished": true}));
/// assert_eq!(body["take"], 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    /// Filter conditions, in the server's Mongo-like condition syntax
    /// (e.g., `{"id": {"$in": ["a", "b"]}}`).
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    /// Sort specification (e.g., `"-createdAt"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Maximum number of items to return. `-1` means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,

    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    /// Related fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl Query {
    /// Creates an empty query matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query filtering on a single id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().filter(serde_json::json!({ "id": id.into() }))
    }

    /// Creates a query filtering on a set of ids.
    #[must_use]
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        Self::new().filter(serde_json::json!({ "id": { "$in": ids } }))
    }

    /// Sets the `where` conditions.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the maximum number of items to return.
    #[must_use]
    pub const fn take(mut self, take: i64) -> Self {
        self.take = Some(take);
        self
    }

    /// Sets the number of items to skip.
    #[must_use]
    pub const fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the related fields to include.
    #[must_use]
    pub fn include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(include.into_iter().map(Into::into).collect());
        self
    }

    /// Serializes the query to a JSON body. An empty query yields `{}`.
    ///
    /// # Panics
    ///
    /// Never panics in practice: all fields serialize to plain JSON.
    #[must_use]
    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_query_serializes_to_empty_object() {
        assert_eq!(Query::new().to_body(), json!({}));
    }

    #[test]
    fn test_query_with_all_fields() {
        let query = Query::new()
            .filter(json!({"isPublished": true}))
            .order("-createdAt")
            .take(10)
            .skip(20)
            .include(["owner"]);

        let body = query.to_body();
        assert_eq!(body["where"], json!({"isPublished": true}));
        assert_eq!(body["order"], "-createdAt");
        assert_eq!(body["take"], 10);
        assert_eq!(body["skip"], 20);
        assert_eq!(body["include"], json!(["owner"]));
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let body = Query::new().take(5).to_body();
        assert_eq!(body, json!({"take": 5}));
        assert!(body.get("where").is_none());
        assert!(body.get("order").is_none());
    }

    #[test]
    fn test_by_id_builds_where_clause() {
        let body = Query::by_id("e1").to_body();
        assert_eq!(body["where"], json!({"id": "e1"}));
    }

    #[test]
    fn test_by_ids_builds_in_clause() {
        let body = Query::by_ids(["a", "b"]).to_body();
        assert_eq!(body["where"], json!({"id": {"$in": ["a", "b"]}}));
    }
}
