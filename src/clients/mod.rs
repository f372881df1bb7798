//! HTTP client functionality for the Appercode SDK.
//!
//! This module contains the request pipeline:
//!
//! - [`HttpClient`]: sends requests with session token injection and
//!   automatic refresh-and-retry on 401
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: request descriptors
//! - [`HttpResponse`]: parsed responses with Appercode header handling
//! - [`HttpError`] and friends: the HTTP error taxonomy

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION, SESSION_TOKEN_HEADER};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, LANGUAGE_HEADER};
pub use http_response::{HttpResponse, TOTAL_ITEMS_HEADER};
