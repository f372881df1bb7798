//! HTTP response types for the Appercode SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing API
//! response data and Appercode-specific header values.

use std::collections::HashMap;

/// Header carrying the total item count on count-enabled query responses.
///
/// Stored lowercase; response header names are lowercased during parsing
/// so the lookup is case-insensitive.
pub const TOTAL_ITEMS_HEADER: &str = "x-appercode-totalitems";

/// An HTTP response from the Appercode API.
///
/// Contains the response status code, headers, parsed JSON body, and the
/// total-items count when the server reported one.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty and no-content bodies parse to `{}`.
    pub body: serde_json::Value,
    /// Total item count from the `X-Appercode-TotalItems` header.
    pub total_items: Option<u64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let total_items = headers
            .get(TOTAL_ITEMS_HEADER)
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<u64>().ok());

        Self {
            code,
            headers,
            body,
            total_items,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the server reported an expired or invalid session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }
}
