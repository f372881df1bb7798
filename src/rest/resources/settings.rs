//! Settings resource implementation.
//!
//! Project-level settings endpoints. Currently exposes the server clock,
//! which callers use to detect drift against local time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, ResourceError, ResourceOperation, ResourcePath};

/// Project settings endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Settings;

impl Settings {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "Settings";

    /// Endpoint table for settings operations.
    pub const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Find,
        &[],
        "settings/currentDateTime",
    )];

    /// Returns the server's current date and time.
    ///
    /// The endpoint responds with a quoted timestamp string.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the timestamp
    /// cannot be parsed.
    pub async fn time(client: &HttpClient) -> Result<DateTime<Utc>, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Find,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_time_path() {
        let (method, path) = resolve(
            Settings::NAME,
            Settings::PATHS,
            ResourceOperation::Find,
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(method, HttpMethod::Get);
        assert_eq!(path, "settings/currentDateTime");
    }

    #[test]
    fn test_timestamp_body_parses() {
        let parsed: DateTime<Utc> =
            decode(Settings::NAME, json!("2024-03-01T12:00:00Z")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_non_timestamp_body_fails() {
        let result: Result<DateTime<Utc>, _> = decode(Settings::NAME, json!({"nope": true}));
        assert!(result.is_err());
    }
}
