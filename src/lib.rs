//! # Appercode API Rust SDK
//!
//! A Rust SDK for the Appercode backend-as-a-service API, providing
//! type-safe configuration, session handling with automatic token refresh,
//! and typed resource models over the platform's REST endpoints.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`AppercodeConfig`] and validated newtypes
//! - Session management with a shared [`SessionStore`]
//! - An async HTTP client that retries a 401 exactly once after exchanging
//!   the refresh token for a new session token
//! - Typed resources: elements, schemas, forms, form responses and
//!   reports, notification campaigns, onboarding entities, event
//!   memberships, files and settings
//!
//! ## Quick Start
//!
//! ```rust
//! use appercode::{AppercodeConfig, ProjectCode, ServerUrl};
//!
//! let config = AppercodeConfig::builder()
//!     .server(ServerUrl::new("https://api.appercode.com").unwrap())
//!     .project(ProjectCode::new("my-project").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Logging In and Making Requests
//!
//! ```rust,ignore
//! use appercode::{AppercodeConfig, HttpClient};
//! use appercode::rest::{Query, resources::Element};
//!
//! let client = HttpClient::new(&config);
//!
//! // Log in; the session (token + refresh token) is stored on the client.
//! client.login("admin", "secret").await?;
//!
//! // Typed resource calls go through the same client. If the session
//! // token expires server-side, the client refreshes it and retries the
//! // request once, transparently.
//! let news = Element::list(&client, "newsCatalogItem", &Query::new().take(10)).await?;
//! let total = Element::count(&client, "newsCatalogItem", &Query::new()).await?;
//! ```
//!
//! ## Session Refresh Semantics
//!
//! A 401 on an authenticated call means the session token expired. The
//! client then:
//!
//! 1. takes the store's refresh gate (concurrent 401s produce at most one
//!    refresh call),
//! 2. exchanges the stored refresh token via `login/byToken`,
//! 3. replaces the stored session, and
//! 4. retries the original request once with the new token.
//!
//! A second 401, and every non-401 failure, surfaces immediately. If the
//! refresh call itself fails, the operation fails with the refresh error
//! and the stored session is left unchanged.
//!
//! ## Design Principles
//!
//! - **No global state**: the session store is owned by the client and can
//!   be shared explicitly
//! - **Fail-fast validation**: configuration newtypes validate on
//!   construction
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **Endpoint tables as data**: each resource declares its routes as a
//!   constant table, not a branching function

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Session, SessionStore};
pub use config::{AppercodeConfig, AppercodeConfigBuilder, ProjectCode, ServerUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};
