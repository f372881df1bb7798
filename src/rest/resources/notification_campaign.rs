//! Notification campaign resource implementation.
//!
//! Campaigns describe push/badge notifications sent to project users,
//! either immediately via [`NotificationCampaign::send`] or at the
//! scheduled time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// A push notification campaign.
///
/// Read-only bookkeeping fields (`createdAt`, `isDeleted`, `updatedBy`)
/// are skipped on serialization, so [`save`](Self::save) sends exactly the
/// writable payload the server expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCampaign {
    /// The unique campaign id.
    pub id: String,

    /// When the campaign was sent, if it has been.
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,

    /// Notification title (localized map or plain string).
    #[serde(default)]
    pub title: Option<Value>,

    /// Notification body (localized map or plain string).
    #[serde(default)]
    pub body: Option<Value>,

    /// Deep link opened when the notification is tapped.
    #[serde(default)]
    pub deep_link: Option<String>,

    /// Recipient user ids.
    #[serde(default)]
    pub to: Option<Value>,

    /// When the campaign is scheduled to be sent.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,

    /// Whether a push notification is delivered.
    #[serde(default)]
    pub with_push_notification: Option<bool>,

    /// Whether the app badge is updated.
    #[serde(default)]
    pub with_badge_notification: Option<bool>,

    /// Filter narrowing the target installations.
    #[serde(default)]
    pub installation_filter: Option<Value>,

    /// When the campaign was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the campaign was created.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the campaign is deleted.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub is_deleted: Option<bool>,

    /// The id of the user who last updated the campaign.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub updated_by: Option<String>,
}

impl NotificationCampaign {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "NotificationCampaign";

    /// Endpoint table for campaign operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "notifications/campaigns",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "notifications/campaigns/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &[],
            "notifications/campaigns/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "notifications/campaigns/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "notifications/campaigns/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Send,
            &["id"],
            "notifications/campaigns/{id}/send",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "notifications/campaigns/{id}",
        ),
    ];

    fn id_values(id: &str) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("id", id.to_string());
        values
    }

    /// Creates a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(client: &HttpClient, fields: Value) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(fields)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }

    /// Returns the campaigns matching the query.
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

    /// Returns the count of campaigns matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn count(client: &HttpClient, query: &Query) -> Result<u64, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Count,
            &HashMap::new(),
        )?;

        let request = HttpRequest::builder(method, path)
            .query_param("count", "true")
            .body(query.to_body())
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_count(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))
    }

    /// Fetches a single campaign by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the campaign doesn't exist.
    pub async fn find(client: &HttpClient, id: &str) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Find,
            &Self::id_values(id),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;

        decode(Self::NAME, json)
    }

    /// Updates selected fields of a campaign without fetching it first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the campaign doesn't exist.
    pub async fn update(client: &HttpClient, id: &str, fields: Value) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Update,
            &Self::id_values(id),
        )?;

        let request = HttpRequest::builder(method, path)
            .body(fields)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;
        Ok(())
    }

    /// Saves this campaign's writable fields and returns the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn save(&self, client: &HttpClient) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Update,
            &Self::id_values(&self.id),
        )?;

        let body = serde_json::to_value(self).map_err(|source| ResourceError::Deserialize {
            resource: Self::NAME,
            source,
        })?;

        let request = HttpRequest::builder(method, path)
            .body(body)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;

        decode(Self::NAME, json)
    }

    /// Dispatches this campaign immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn send(&self, client: &HttpClient) -> Result<(), ResourceError> {
        Self::send_one(client, &self.id).await
    }

    /// Deletes this campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the campaign doesn't exist.
    pub async fn delete(&self, client: &HttpClient) -> Result<(), ResourceError> {
        Self::delete_one(client, &self.id).await
    }

    /// Dispatches several campaigns, one request per id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on the first failing id.
    pub async fn send_many(client: &HttpClient, ids: &[String]) -> Result<(), ResourceError> {
        for id in ids {
            Self::send_one(client, id).await?;
        }
        Ok(())
    }

    /// Deletes several campaigns, one request per id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on the first failing id.
    pub async fn delete_many(client: &HttpClient, ids: &[String]) -> Result<(), ResourceError> {
        for id in ids {
            Self::delete_one(client, id).await?;
        }
        Ok(())
    }

    async fn send_one(client: &HttpClient, id: &str) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Send,
            &Self::id_values(id),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;
        Ok(())
    }

    async fn delete_one(client: &HttpClient, id: &str) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Delete,
            &Self::id_values(id),
        )?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn campaign_json() -> Value {
        json!({
            "id": "n1",
            "sentAt": null,
            "title": {"en": "Hello"},
            "body": {"en": "World"},
            "deepLink": "app://news",
            "to": ["u1", "u2"],
            "scheduledAt": "2024-07-01T10:00:00Z",
            "withPushNotification": true,
            "withBadgeNotification": false,
            "installationFilter": {"platform": "ios"},
            "createdAt": "2024-06-01T10:00:00Z",
            "updatedAt": "2024-06-02T10:00:00Z",
            "isDeleted": false,
            "updatedBy": "admin",
        })
    }

    #[test]
    fn test_deserialization() {
        let campaign: NotificationCampaign = serde_json::from_value(campaign_json()).unwrap();

        assert_eq!(campaign.id, "n1");
        assert!(campaign.sent_at.is_none());
        assert_eq!(campaign.with_push_notification, Some(true));
        assert_eq!(campaign.is_deleted, Some(false));
        assert_eq!(campaign.updated_by.as_deref(), Some("admin"));
    }

    #[test]
    fn test_serialization_skips_read_only_fields() {
        let campaign: NotificationCampaign = serde_json::from_value(campaign_json()).unwrap();
        let json = serde_json::to_value(&campaign).unwrap();

        assert_eq!(json["id"], "n1");
        assert_eq!(json["deepLink"], "app://news");
        assert!(json.get("createdAt").is_none());
        assert!(json.get("isDeleted").is_none());
        assert!(json.get("updatedBy").is_none());
    }

    #[test]
    fn test_path_table_covers_operations() {
        use crate::rest::get_path;

        assert!(get_path(NotificationCampaign::PATHS, ResourceOperation::Create, &[]).is_some());
        assert!(get_path(NotificationCampaign::PATHS, ResourceOperation::Count, &[]).is_some());
        for operation in [
            ResourceOperation::Find,
            ResourceOperation::Update,
            ResourceOperation::Send,
            ResourceOperation::Delete,
        ] {
            assert!(
                get_path(NotificationCampaign::PATHS, operation, &["id"]).is_some(),
                "missing path for {operation:?}"
            );
        }
    }

    #[test]
    fn test_send_path_interpolation() {
        let values = NotificationCampaign::id_values("n1");
        let (method, path) = resolve(
            NotificationCampaign::NAME,
            NotificationCampaign::PATHS,
            ResourceOperation::Send,
            &values,
        )
        .unwrap();

        assert_eq!(method, HttpMethod::Post);
        assert_eq!(path, "notifications/campaigns/n1/send");
    }
}
