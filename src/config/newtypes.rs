//! Validated newtypes for Appercode configuration values.
//!
//! Each newtype validates on construction, so holding an instance is proof
//! the value is well-formed. Invalid input fails fast with a [`ConfigError`].

use std::fmt;

use crate::error::ConfigError;

/// The base URL of an Appercode server.
///
/// Must carry an `http://` or `https://` scheme. A trailing slash is
/// stripped so URL construction can always join with `/`.
///
/// # Example
///
/// ```rust
/// use appercode::ServerUrl;
///
/// let server = ServerUrl::new("https://api.appercode.com/").unwrap();
/// assert_eq!(server.as_ref(), "https://api.appercode.com");
///
/// assert!(ServerUrl::new("api.appercode.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerUrl(String);

impl ServerUrl {
    /// Creates a new `ServerUrl`, validating the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] if the URL is empty or
    /// does not start with `http://` or `https://`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim_end_matches('/');

        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed
            .splitn(2, "://")
            .nth(1)
            .is_some_and(|rest| !rest.is_empty());

        if !has_scheme || !has_host {
            return Err(ConfigError::InvalidServerUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An Appercode project code.
///
/// The project code is the first path segment of every endpoint URL
/// (e.g., `https://server/{project}/login`), so it is restricted to
/// characters that are safe in a URL segment.
///
/// # Example
///
/// ```rust
/// use appercode::ProjectCode;
///
/// let project = ProjectCode::new("my-project").unwrap();
/// assert_eq!(project.as_ref(), "my-project");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectCode(String);

impl ProjectCode {
    /// Creates a new `ProjectCode`, validating the characters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProjectCode`] if the code is empty, or
    /// [`ConfigError::InvalidProjectCode`] if it contains characters other
    /// than letters, digits, `-` or `_`.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();

        if code.is_empty() {
            return Err(ConfigError::EmptyProjectCode);
        }

        let valid = code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidProjectCode { code });
        }

        Ok(Self(code))
    }
}

impl AsRef<str> for ProjectCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Verify newtypes are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServerUrl>();
    assert_send_sync::<ProjectCode>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_accepts_https() {
        let server = ServerUrl::new("https://api.appercode.com").unwrap();
        assert_eq!(server.as_ref(), "https://api.appercode.com");
    }

    #[test]
    fn test_server_url_accepts_http() {
        let server = ServerUrl::new("http://localhost:8080").unwrap();
        assert_eq!(server.as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_server_url_strips_trailing_slash() {
        let server = ServerUrl::new("https://api.appercode.com/").unwrap();
        assert_eq!(server.as_ref(), "https://api.appercode.com");

        let server = ServerUrl::new("https://api.appercode.com//").unwrap();
        assert_eq!(server.as_ref(), "https://api.appercode.com");
    }

    #[test]
    fn test_server_url_rejects_missing_scheme() {
        assert!(matches!(
            ServerUrl::new("api.appercode.com"),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn test_server_url_rejects_empty() {
        assert!(matches!(
            ServerUrl::new(""),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
        assert!(matches!(
            ServerUrl::new("https://"),
            Err(ConfigError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn test_project_code_accepts_valid_codes() {
        assert!(ProjectCode::new("myproject").is_ok());
        assert!(ProjectCode::new("my-project_2").is_ok());
    }

    #[test]
    fn test_project_code_rejects_empty() {
        assert!(matches!(
            ProjectCode::new(""),
            Err(ConfigError::EmptyProjectCode)
        ));
    }

    #[test]
    fn test_project_code_rejects_invalid_characters() {
        assert!(matches!(
            ProjectCode::new("my project"),
            Err(ConfigError::InvalidProjectCode { .. })
        ));
        assert!(matches!(
            ProjectCode::new("project/extra"),
            Err(ConfigError::InvalidProjectCode { .. })
        ));
    }

    #[test]
    fn test_display_matches_inner_value() {
        let server = ServerUrl::new("https://api.appercode.com").unwrap();
        assert_eq!(server.to_string(), "https://api.appercode.com");

        let project = ProjectCode::new("demo").unwrap();
        assert_eq!(project.to_string(), "demo");
    }
}
