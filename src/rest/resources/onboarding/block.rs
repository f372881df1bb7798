//! Block entity: a titled group of onboarding tasks within a roadmap.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::resources::onboarding::OnboardingEntity;
use crate::rest::{ResourceOperation, ResourcePath};

/// An onboarding block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// The unique block id.
    pub id: String,

    /// When the block was created.
    pub created_at: DateTime<Utc>,

    /// When the block was last updated.
    pub updated_at: DateTime<Utc>,

    /// The id of the user who last updated the block.
    #[serde(default)]
    pub updated_by: Option<String>,

    /// Whether the block is deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Block title.
    #[serde(default)]
    pub title: Option<String>,

    /// Status icons (available, unavailable).
    #[serde(default)]
    pub icons: Value,

    /// Child task ids, in order.
    #[serde(default)]
    pub task_ids: Vec<String>,

    /// Position of the block within its roadmap.
    #[serde(default)]
    pub order_index: Option<i64>,
}

impl OnboardingEntity for Block {
    const NAME: &'static str = "Block";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "onboarding/blocks",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "onboarding/blocks/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &[],
            "onboarding/blocks/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "onboarding/blocks/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "onboarding/blocks/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "onboarding/blocks/{id}",
        ),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn payload(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "icons": self.icons,
            "taskIds": self.task_ids,
            "orderIndex": self.order_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialization_and_payload() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "createdAt": "2024-01-10T08:00:00Z",
            "updatedAt": "2024-01-10T08:00:00Z",
            "updatedBy": null,
            "isDeleted": false,
            "title": "Meet the team",
            "icons": {"available": "f-av", "unavailable": "f-un"},
            "taskIds": ["t1"],
            "orderIndex": 2,
        }))
        .unwrap();

        assert_eq!(block.order_index, Some(2));

        let payload = block.payload();
        assert_eq!(payload["title"], "Meet the team");
        assert_eq!(payload["icons"]["available"], "f-av");
        assert_eq!(payload["taskIds"], json!(["t1"]));
        assert!(payload.get("isDeleted").is_none());
    }
}
