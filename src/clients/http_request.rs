//! HTTP request types for the Appercode SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Appercode API.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Header carrying the requested content language on localized operations.
pub const LANGUAGE_HEADER: &str = "X-Appercode-Language";

/// HTTP methods supported by the Appercode API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and query endpoints.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the Appercode API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder
/// pattern. Bodies are always JSON; the session token header is attached
/// by the client at dispatch time, never stored on the request.
///
/// # Example
///
/// ```rust
/// use appercode::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// // POST query request
/// let request = HttpRequest::builder(HttpMethod::Post, "objects/events/query")
///     .body(json!({"take": 10}))
///     .build()
///     .unwrap();
///
/// // Count request
/// let count_request = HttpRequest::builder(HttpMethod::Post, "objects/events/query")
///     .query_param("count", "true")
///     .body(json!({}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path, relative to `{server}/{project}`.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Whether a 401 response may trigger a token refresh and a single
    /// retry. Disabled for the login calls themselves to avoid recursion.
    pub retry_on_unauthorized: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] if the path is empty.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
    retry_on_unauthorized: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
            retry_on_unauthorized: true,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the `X-Appercode-Language` header for localized operations.
    #[must_use]
    pub fn language(self, language: impl Into<String>) -> Self {
        self.header(LANGUAGE_HEADER, language)
    }

    /// Controls whether a 401 response triggers the refresh-and-retry flow.
    ///
    /// Default is `true`. The login endpoints disable this so that a
    /// rejected refresh token cannot trigger a recursive refresh.
    #[must_use]
    pub const fn retry_on_unauthorized(mut self, retry: bool) -> Self {
        self.retry_on_unauthorized = retry;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            retry_on_unauthorized: self.retry_on_unauthorized,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "objects/events/e1")
            .build()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "objects/events/e1");
        assert!(request.body.is_none());
        assert!(request.retry_on_unauthorized);
    }

    #[test]
    fn test_builder_creates_valid_post_request_with_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "objects/events")
            .body(json!({"title": "Launch"}))
            .build()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({"title": "Launch"})));
    }

    #[test]
    fn test_builder_rejects_empty_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));

        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_builder_with_query_params() {
        let request = HttpRequest::builder(HttpMethod::Post, "objects/events/query")
            .query_param("count", "true")
            .build()
            .unwrap();

        let query = request.query.unwrap();
        assert_eq!(query.get("count"), Some(&"true".to_string()));
    }

    #[test]
    fn test_builder_with_language_header() {
        let request = HttpRequest::builder(HttpMethod::Get, "objects/events/e1")
            .language("en")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get(LANGUAGE_HEADER), Some(&"en".to_string()));
    }

    #[test]
    fn test_retry_on_unauthorized_can_be_disabled() {
        let request = HttpRequest::builder(HttpMethod::Post, "login")
            .body(json!({}))
            .retry_on_unauthorized(false)
            .build()
            .unwrap();

        assert!(!request.retry_on_unauthorized);
    }
}
