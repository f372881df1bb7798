//! Form response resource implementation.
//!
//! Submitting a response is a two-step protocol on the server: `start`
//! opens the form for the current user, `submit` sends the answers and
//! returns the id of the stored response as a quoted JSON string.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// One user's submitted answers to a [`Form`](super::Form).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    /// The unique response id.
    pub id: String,

    /// The id of the responding user.
    #[serde(default)]
    pub user_id: Option<String>,

    /// The id of the form responded to.
    pub form_id: String,

    /// The language the form was answered in.
    #[serde(default)]
    pub language: Option<String>,

    /// Answers keyed by control id.
    #[serde(default)]
    pub response: Value,

    /// Number of answered questions.
    #[serde(default)]
    pub submitted_count: Option<i64>,

    /// Number of correctly answered questions.
    #[serde(default)]
    pub correct_count: Option<i64>,

    /// When the response record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the response record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the user opened the form.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// When the user submitted the form.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl FormResponse {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "FormResponse";

    /// Endpoint table for form response operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Start,
            &["form"],
            "v2/forms/{form}/start",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Submit,
            &["form"],
            "v2/forms/{form}/submit",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "v2/forms/responses/query",
        ),
    ];

    fn form_values(form_id: &str) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("form", form_id.to_string());
        values
    }

    /// Starts the form and submits the given answers, returning the stored
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any of the three round trips (start,
    /// submit, fetch) fails.
    pub async fn create(
        client: &HttpClient,
        form_id: &str,
        fields: Value,
    ) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Start,
            &Self::form_values(form_id),
        )?;

        let start_request = HttpRequest::builder(method, path)
            .body(serde_json::json!({}))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(start_request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Submit,
            &Self::form_values(form_id),
        )?;

        let submit_request = HttpRequest::builder(method, path)
            .query_param("submit", "true")
            .body(fields)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        // The submit body is the new response id as a JSON string.
        let json = client
            .request_json(submit_request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;
        let id: String = decode(Self::NAME, json)?;

        Self::find(client, &id).await
    }

    /// Fetches a single response by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no response matches the id.
    pub async fn find(client: &HttpClient, id: &str) -> Result<Self, ResourceError> {
        let mut responses = Self::list(client, &Query::by_id(id)).await?;
        if responses.is_empty() {
            return Err(ResourceError::NotFound {
                resource: Self::NAME,
                id: id.to_string(),
            });
        }
        Ok(responses.remove(0))
    }

    /// Returns the responses matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list(client: &HttpClient, query: &Query) -> Result<Vec<Self>, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::List,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(query.to_body())
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }
}
