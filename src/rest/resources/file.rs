//! File resource implementation.
//!
//! Creating a file is a two-step protocol: a JSON `create` registers the
//! file record and returns its id, then `upload` sends the content as
//! multipart form data to `files/{id}/upload`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{build_path, decode, get_path, resolve, ResourceError, ResourceOperation, ResourcePath};

/// A file stored on an Appercode project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// The unique file id.
    pub id: String,

    /// The file name.
    #[serde(default)]
    pub name: Option<String>,

    /// The id of the owning user.
    #[serde(default)]
    pub owner_id: Option<String>,

    /// The name of the owning user.
    #[serde(default)]
    pub owner_name: Option<String>,

    /// The id of the parent directory.
    #[serde(default)]
    pub parent_id: Option<String>,

    /// The file type reported by the server.
    #[serde(default)]
    pub file_type: Option<String>,

    /// The file's sharing status.
    #[serde(default)]
    pub share_status: Option<String>,

    /// Content length in bytes.
    #[serde(default)]
    pub length: Option<i64>,

    /// When the file record was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the file record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the file is deleted.
    #[serde(default)]
    pub is_deleted: Option<bool>,

    /// Access rights metadata.
    #[serde(default)]
    pub rights: Value,
}

impl File {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "File";

    /// Endpoint table for file operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "files"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Upload,
            &["id"],
            "files/{id}/upload",
        ),
    ];

    /// Registers a new file record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(client: &HttpClient, props: Value) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(props)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }

    /// Uploads the file's content as multipart form data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the upload fails.
    pub async fn upload(
        &self,
        client: &HttpClient,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ResourceError> {
        let path = get_path(Self::PATHS, ResourceOperation::Upload, &["id"])
            .ok_or(ResourceError::no_path(Self::NAME, ResourceOperation::Upload))?;

        let mut values = HashMap::new();
        values.insert("id", self.id.clone());
        let path = build_path(path.template, &values);

        client
            .upload(&path, file_name, bytes)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;
        Ok(())
    }
}
