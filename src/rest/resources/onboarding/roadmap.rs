//! Roadmap entity: an ordered set of onboarding blocks assigned to user
//! groups.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::resources::onboarding::OnboardingEntity;
use crate::rest::{ResourceOperation, ResourcePath};

/// An onboarding roadmap.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    /// The unique roadmap id.
    pub id: String,

    /// When the roadmap was created.
    pub created_at: DateTime<Utc>,

    /// When the roadmap was last updated.
    pub updated_at: DateTime<Utc>,

    /// The id of the user who last updated the roadmap.
    #[serde(default)]
    pub updated_by: Option<String>,

    /// Whether the roadmap is deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Roadmap title.
    #[serde(default)]
    pub title: Option<String>,

    /// Child block ids, in order.
    #[serde(default)]
    pub block_ids: Vec<String>,

    /// User group ids the roadmap applies to.
    #[serde(default)]
    pub group_ids: Vec<String>,
}

impl OnboardingEntity for Roadmap {
    const NAME: &'static str = "Roadmap";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "onboarding/roadmaps",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "onboarding/roadmaps/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &[],
            "onboarding/roadmaps/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "onboarding/roadmaps/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "onboarding/roadmaps/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "onboarding/roadmaps/{id}",
        ),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn payload(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "blockIds": self.block_ids,
            "groupIds": self.group_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roadmap() -> Roadmap {
        serde_json::from_value(json!({
            "id": "rm1",
            "createdAt": "2024-01-10T08:00:00Z",
            "updatedAt": "2024-01-10T08:00:00Z",
            "updatedBy": "u1",
            "isDeleted": false,
            "title": "First week",
            "blockIds": ["b1", "b2"],
            "groupIds": ["g1"],
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialization() {
        let roadmap = roadmap();
        assert_eq!(roadmap.id, "rm1");
        assert_eq!(roadmap.block_ids, vec!["b1", "b2"]);
        assert!(!roadmap.is_deleted);
    }

    #[test]
    fn test_payload_contains_writable_fields_only() {
        let payload = roadmap().payload();
        assert_eq!(payload["title"], "First week");
        assert_eq!(payload["blockIds"], json!(["b1", "b2"]));
        assert_eq!(payload["groupIds"], json!(["g1"]));
        assert!(payload.get("id").is_none());
        assert!(payload.get("createdAt").is_none());
    }
}
