//! HTTP-specific error types for the Appercode SDK.
//!
//! This module contains error types for HTTP operations. The retry policy
//! of the [`HttpClient`](crate::clients::HttpClient) is scoped strictly to
//! authentication expiry: every other failure surfaces through one of
//! these variants immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use appercode::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::Auth(e)) => println!("Auth failure: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;

/// Error returned when an HTTP request receives a non-successful response.
///
/// Carries the status code and the response body so callers can map the
/// failure to an operation-specific error (e.g., 409 on a schema create
/// means the id is taken).
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, serialized as JSON text.
    pub message: String,
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Cannot send a request with an empty path.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
///
/// Use pattern matching to handle specific failure kinds. Network errors
/// (connect failures, timeouts) are never retried by the client; a 401 is
/// retried exactly once after a token refresh and otherwise surfaces as a
/// `Response` error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Authentication failed (wrong credentials, or a refresh was needed
    /// with no active session).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}
