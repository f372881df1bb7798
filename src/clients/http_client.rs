//! HTTP client for Appercode API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to an Appercode backend with automatic session refresh.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::auth::{AuthError, Session, SessionStore};
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::AppercodeConfig;

/// Header carrying the session token on authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "X-Appercode-Session-Token";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body shape of the `login` and `login/byToken` endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user_id: String,
    session_id: String,
    refresh_token: String,
    #[serde(default)]
    role_id: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(login: LoginResponse) -> Self {
        Self::new(
            login.user_id,
            login.session_id,
            login.refresh_token,
            login.role_id,
        )
    }
}

/// HTTP client for making requests to an Appercode backend.
///
/// The client handles:
/// - Base URL construction from the configured server and project
/// - Default headers including User-Agent
/// - Session token injection from the shared [`SessionStore`]
/// - Automatic token refresh and a single retry on 401 responses
///
/// The retry policy is deliberately narrow: only an expired session is
/// retried, exactly once. Every other failure (including network errors
/// and all other 4xx/5xx statuses) surfaces immediately.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async
/// tasks. Concurrent 401s serialize on the store's refresh gate so that at
/// most one login-by-token call is made; all waiting requests retry with
/// the single new token.
///
/// # Example
///
/// ```rust,ignore
/// use appercode::{AppercodeConfig, HttpClient, ProjectCode, ServerUrl};
/// use appercode::clients::{HttpMethod, HttpRequest};
///
/// let config = AppercodeConfig::builder()
///     .server(ServerUrl::new("https://api.appercode.com").unwrap())
///     .project(ProjectCode::new("my-project").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config);
/// client.login("admin", "secret").await?;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "objects/events/query")
///     .body(serde_json::json!({}))
///     .build()?;
/// let events = client.request_json(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (`{server}/{project}`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// The session store shared by all requests of this client.
    sessions: Arc<SessionStore>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client with its own empty session store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &AppercodeConfig) -> Self {
        Self::with_session_store(config, Arc::new(SessionStore::new()))
    }

    /// Creates a new HTTP client sharing an existing session store.
    ///
    /// Useful when several clients (e.g., for different projects on the
    /// same server) should observe one login.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_session_store(config: &AppercodeConfig, sessions: Arc<SessionStore>) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Appercode API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url(),
            default_headers,
            sessions,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session store shared by this client's requests.
    #[must_use]
    pub const fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Logs in with a username and password and stores the session.
    ///
    /// Sends `generateRefreshToken: true` so the resulting session can be
    /// refreshed when the server reports it as expired.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::WrongCredentials`] (wrapped in
    /// [`HttpError::Auth`]) if the server rejects the credentials, or the
    /// underlying [`HttpError`] for transport failures.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "login")
            .body(serde_json::json!({
                "username": username,
                "password": password,
                "generateRefreshToken": true,
            }))
            .retry_on_unauthorized(false)
            .build()?;

        let response = self.dispatch(&request, self.current_token().as_deref()).await?;
        if !response.is_ok() {
            if (400..500).contains(&response.code) {
                return Err(HttpError::Auth(AuthError::WrongCredentials));
            }
            return Err(Self::response_error(response));
        }

        let session = Self::parse_session(&response)?;
        self.sessions.set_current(session.clone());
        Ok(session)
    }

    /// Exchanges a refresh token for a new session and stores it.
    ///
    /// This is the same call the refresh-and-retry flow performs when a
    /// request hits a 401. On failure the previously stored session is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] if the server rejects the refresh
    /// token, or [`HttpError::Network`] for transport failures.
    pub async fn login_by_token(&self, refresh_token: &str) -> Result<Session, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "login/byToken")
            .body(serde_json::Value::String(refresh_token.to_string()))
            .retry_on_unauthorized(false)
            .build()?;

        let response = self.dispatch(&request, self.current_token().as_deref()).await?;
        if !response.is_ok() {
            return Err(Self::response_error(response));
        }

        let session = Self::parse_session(&response)?;
        self.sessions.set_current(session.clone());
        Ok(session)
    }

    /// Forgets the stored session.
    pub fn logout(&self) {
        self.sessions.clear();
    }

    /// Sends an HTTP request to the Appercode API.
    ///
    /// If the server responds 401 and the request allows it, the client
    /// performs one login-by-token call through the store's refresh gate
    /// and retries the original request once with the new session token.
    /// A second 401 is surfaced as an error, never retried again.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error or timeout occurs (`Network`), never retried
    /// - A non-2xx response is received (`Response`)
    /// - A refresh was needed but no session is stored (`Auth`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let token = self.current_token();
        let response = self.dispatch(&request, token.as_deref()).await?;
        if response.is_ok() {
            return Ok(response);
        }

        if response.is_unauthorized() && request.retry_on_unauthorized {
            let stale = token.ok_or(HttpError::Auth(AuthError::NotLoggedIn))?;
            let fresh = self.refresh_session(&stale).await?;
            tracing::debug!(path = %request.path, "retrying request with refreshed session token");

            let retried = self.dispatch(&request, Some(&fresh.token)).await?;
            if retried.is_ok() {
                return Ok(retried);
            }
            return Err(Self::response_error(retried));
        }

        Err(Self::response_error(response))
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// Empty and no-content (204) bodies yield an empty JSON object.
    ///
    /// # Errors
    ///
    /// Propagates the same failures as [`request`](Self::request).
    pub async fn request_json(
        &self,
        request: HttpRequest,
    ) -> Result<serde_json::Value, HttpError> {
        let response = self.request(request).await?;
        Ok(response.body)
    }

    /// Sends a request and returns the total item count from the
    /// `X-Appercode-TotalItems` response header.
    ///
    /// A missing or unparseable header counts as zero.
    ///
    /// # Errors
    ///
    /// Propagates the same failures as [`request`](Self::request).
    pub async fn request_count(&self, request: HttpRequest) -> Result<u64, HttpError> {
        let response = self.request(request).await?;
        Ok(response.total_items.unwrap_or(0))
    }

    /// Uploads a file as multipart form data.
    ///
    /// Participates in the same 401-refresh flow as JSON requests; the
    /// multipart form is rebuilt for the retried attempt.
    ///
    /// # Errors
    ///
    /// Propagates the same failures as [`request`](Self::request).
    pub async fn upload(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<HttpResponse, HttpError> {
        let token = self.current_token();
        let response = self
            .dispatch_multipart(path, file_name, bytes.clone(), token.as_deref())
            .await?;
        if response.is_ok() {
            return Ok(response);
        }

        if response.is_unauthorized() {
            let stale = token.ok_or(HttpError::Auth(AuthError::NotLoggedIn))?;
            let fresh = self.refresh_session(&stale).await?;
            tracing::debug!(path, "retrying upload with refreshed session token");

            let retried = self
                .dispatch_multipart(path, file_name, bytes, Some(&fresh.token))
                .await?;
            if retried.is_ok() {
                return Ok(retried);
            }
            return Err(Self::response_error(retried));
        }

        Err(Self::response_error(response))
    }

    /// Returns the session token of the stored session, if any.
    fn current_token(&self) -> Option<String> {
        self.sessions.current().map(|session| session.token)
    }

    /// Obtains a fresh session after a 401, serializing concurrent refreshes.
    ///
    /// `stale_token` is the token the rejected request was sent with.
    /// Only one in-flight request performs the login-by-token call; the
    /// others wait on the gate, observe the replaced token and reuse it.
    /// The refresh call itself bypasses [`request`](Self::request) so a
    /// rejected refresh token cannot recurse.
    async fn refresh_session(&self, stale_token: &str) -> Result<Session, HttpError> {
        let _gate = self.sessions.lock_refresh().await;

        let current = self
            .sessions
            .current()
            .ok_or(HttpError::Auth(AuthError::NotLoggedIn))?;
        if current.token != stale_token {
            // Another request already refreshed while we waited.
            return Ok(current);
        }

        tracing::warn!("session token rejected by server, logging in with refresh token");
        self.login_by_token(&current.refresh_token).await
    }

    /// Performs a single HTTP round trip without any retry handling.
    async fn dispatch(
        &self,
        request: &HttpRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(token) = token {
            req_builder = req_builder.header(SESSION_TOKEN_HEADER, token);
        }

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;
        Ok(Self::parse_response(res).await)
    }

    /// Performs a single multipart upload round trip.
    async fn dispatch_multipart(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut req_builder = self.client.post(&url).multipart(form);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(token) = token {
            req_builder = req_builder.header(SESSION_TOKEN_HEADER, token);
        }

        let res = req_builder.send().await?;
        Ok(Self::parse_response(res).await)
    }

    /// Parses a reqwest response into an [`HttpResponse`].
    async fn parse_response(res: reqwest::Response) -> HttpResponse {
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        HttpResponse::new(code, headers, body)
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Deserializes a login response body into a [`Session`].
    fn parse_session(response: &HttpResponse) -> Result<Session, HttpError> {
        let login: LoginResponse =
            serde_json::from_value(response.body.clone()).map_err(|e| {
                HttpError::Response(HttpResponseError {
                    code: response.code,
                    message: format!("Failed to deserialize login response: {e}"),
                })
            })?;
        Ok(login.into())
    }

    /// Maps a non-2xx response to an [`HttpError`].
    fn response_error(response: HttpResponse) -> HttpError {
        HttpError::Response(HttpResponseError {
            code: response.code,
            message: response.body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProjectCode, ServerUrl};

    fn create_test_config() -> AppercodeConfig {
        AppercodeConfig::builder()
            .server(ServerUrl::new("https://api.appercode.com").unwrap())
            .project(ProjectCode::new("demo").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_builds_base_url() {
        let client = HttpClient::new(&create_test_config());
        assert_eq!(client.base_url(), "https://api.appercode.com/demo");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Appercode API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = AppercodeConfig::builder()
            .server(ServerUrl::new("https://api.appercode.com").unwrap())
            .project(ProjectCode::new("demo").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new(&config);
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Appercode API Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config());
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_starts_without_session() {
        let client = HttpClient::new(&create_test_config());
        assert!(client.sessions().current().is_none());
    }

    #[test]
    fn test_clients_can_share_a_session_store() {
        let store = Arc::new(SessionStore::new());
        let client_a = HttpClient::with_session_store(&create_test_config(), Arc::clone(&store));
        let client_b = HttpClient::with_session_store(&create_test_config(), store);

        client_a
            .sessions()
            .set_current(Session::new("u1", "t1", "r1", None));
        assert_eq!(client_b.sessions().current().unwrap().token, "t1");
    }

    #[test]
    fn test_logout_clears_session() {
        let client = HttpClient::new(&create_test_config());
        client
            .sessions()
            .set_current(Session::new("u1", "t1", "r1", None));
        client.logout();
        assert!(client.sessions().current().is_none());
    }

    #[test]
    fn test_login_response_conversion() {
        let body = serde_json::json!({
            "userId": "u1",
            "sessionId": "t1",
            "refreshToken": "r1",
            "roleId": "admin",
        });
        let login: LoginResponse = serde_json::from_value(body).unwrap();
        let session: Session = login.into();

        assert_eq!(session.user_id, "u1");
        assert_eq!(session.token, "t1");
        assert_eq!(session.refresh_token, "r1");
        assert_eq!(session.role, Some("admin".to_string()));
    }

    #[test]
    fn test_response_error_carries_code_and_body() {
        let response = HttpResponse::new(
            409,
            HashMap::new(),
            serde_json::json!({"error": "duplicate"}),
        );
        let error = HttpClient::response_error(response);
        assert_eq!(error.status(), Some(409));
        assert!(error.to_string().contains("duplicate"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
