//! Configuration types for the Appercode SDK.
//!
//! This module provides [`AppercodeConfig`] and its builder for configuring
//! the SDK with validated values. Construction is fail-fast: invalid values
//! are rejected when the newtypes are created, and the builder refuses to
//! build without the required fields.
//!
//! # Example
//!
//! ```rust
//! use appercode::{AppercodeConfig, ProjectCode, ServerUrl};
//!
//! let config = AppercodeConfig::builder()
//!     .server(ServerUrl::new("https://api.appercode.com").unwrap())
//!     .project(ProjectCode::new("my-project").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.appercode.com/my-project");
//! ```

mod newtypes;

pub use newtypes::{ProjectCode, ServerUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout applied at the transport boundary.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Appercode SDK.
///
/// Holds the server URL and project code that together form the base of
/// every endpoint URL, plus optional transport settings.
///
/// Use [`AppercodeConfig::builder`] to construct instances.
#[derive(Debug, Clone)]
pub struct AppercodeConfig {
    server: ServerUrl,
    project: ProjectCode,
    user_agent_prefix: Option<String>,
    request_timeout: Duration,
}

impl AppercodeConfig {
    /// Creates a new builder for constructing an `AppercodeConfig`.
    #[must_use]
    pub fn builder() -> AppercodeConfigBuilder {
        AppercodeConfigBuilder::new()
    }

    /// Returns the server URL.
    #[must_use]
    pub const fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the project code.
    #[must_use]
    pub const fn project(&self) -> &ProjectCode {
        &self.project
    }

    /// Returns the User-Agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the base URL for endpoint construction: `{server}/{project}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.server, self.project)
    }
}

/// Builder for constructing [`AppercodeConfig`] instances.
///
/// `server` and `project` are required; everything else has a default.
#[derive(Debug, Default)]
pub struct AppercodeConfigBuilder {
    server: Option<ServerUrl>,
    project: Option<ProjectCode>,
    user_agent_prefix: Option<String>,
    request_timeout: Option<Duration>,
}

impl AppercodeConfigBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server URL (required).
    #[must_use]
    pub fn server(mut self, server: ServerUrl) -> Self {
        self.server = Some(server);
        self
    }

    /// Sets the project code (required).
    #[must_use]
    pub fn project(mut self, project: ProjectCode) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets a prefix for the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout (default: 30 seconds).
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the [`AppercodeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `server` or
    /// `project` was not set.
    pub fn build(self) -> Result<AppercodeConfig, ConfigError> {
        let server = self
            .server
            .ok_or(ConfigError::MissingRequiredField { field: "server" })?;
        let project = self
            .project
            .ok_or(ConfigError::MissingRequiredField { field: "project" })?;

        Ok(AppercodeConfig {
            server,
            project,
            user_agent_prefix: self.user_agent_prefix,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }
}

// Verify AppercodeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppercodeConfig>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppercodeConfig {
        AppercodeConfig::builder()
            .server(ServerUrl::new("https://api.appercode.com").unwrap())
            .project(ProjectCode::new("demo").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_with_required_fields() {
        let config = test_config();
        assert_eq!(config.server().as_ref(), "https://api.appercode.com");
        assert_eq!(config.project().as_ref(), "demo");
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_missing_server_fails() {
        let result = AppercodeConfig::builder()
            .project(ProjectCode::new("demo").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "server" })
        ));
    }

    #[test]
    fn test_builder_missing_project_fails() {
        let result = AppercodeConfig::builder()
            .server(ServerUrl::new("https://api.appercode.com").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "project" })
        ));
    }

    #[test]
    fn test_base_url_joins_server_and_project() {
        let config = test_config();
        assert_eq!(config.base_url(), "https://api.appercode.com/demo");
    }

    #[test]
    fn test_builder_optional_fields() {
        let config = AppercodeConfig::builder()
            .server(ServerUrl::new("https://api.appercode.com").unwrap())
            .project(ProjectCode::new("demo").unwrap())
            .user_agent_prefix("MyApp/2.0")
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.user_agent_prefix(), Some("MyApp/2.0"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
