//! Task entity: a single onboarding step with a reward and a confirmation
//! flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::resources::onboarding::OnboardingEntity;
use crate::rest::{ResourceOperation, ResourcePath};

/// How the completion of a task gets confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationType {
    /// Confirmed by filling in a form.
    ByForm,
    /// Confirmed by the performer themselves.
    ByPerformer,
    /// Confirmed by the performer's mentor.
    ByMentor,
    /// Confirmed by an administrator.
    ByAdministrator,
}

/// An onboarding task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The unique task id.
    pub id: String,

    /// When the task was created.
    pub created_at: DateTime<Utc>,

    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,

    /// The id of the user who last updated the task.
    #[serde(default)]
    pub updated_by: Option<String>,

    /// Whether the task is deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Reward for completing the task (points or achievement).
    #[serde(default)]
    pub reward: Value,

    /// How completion gets confirmed.
    pub confirmation_type: ConfirmationType,

    /// The confirmation form id, used when `confirmation_type` is
    /// [`ConfirmationType::ByForm`].
    #[serde(default)]
    pub confirmation_form_id: Option<String>,

    /// Full HTML description.
    #[serde(default)]
    pub description: Option<String>,

    /// Image file id.
    #[serde(default)]
    pub image_file_id: Option<String>,

    /// Short description (300 characters max).
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Title (40 characters max).
    #[serde(default)]
    pub title: Option<String>,
}

impl Task {
    /// The available confirmation type variants.
    #[must_use]
    pub const fn confirmation_types() -> &'static [ConfirmationType] {
        &[
            ConfirmationType::ByForm,
            ConfirmationType::ByPerformer,
            ConfirmationType::ByMentor,
            ConfirmationType::ByAdministrator,
        ]
    }
}

impl OnboardingEntity for Task {
    const NAME: &'static str = "Task";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "onboarding/tasks",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "onboarding/tasks/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &[],
            "onboarding/tasks/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "onboarding/tasks/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "onboarding/tasks/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "onboarding/tasks/{id}",
        ),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn payload(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "subtitle": self.subtitle,
            "imageFileId": self.image_file_id,
            "description": self.description,
            "confirmationFormId": self.confirmation_form_id,
            "confirmationType": self.confirmation_type,
            "reward": self.reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_type_wire_names() {
        assert_eq!(
            serde_json::to_value(ConfirmationType::ByForm).unwrap(),
            json!("byForm")
        );
        assert_eq!(
            serde_json::to_value(ConfirmationType::ByAdministrator).unwrap(),
            json!("byAdministrator")
        );

        let parsed: ConfirmationType = serde_json::from_value(json!("byMentor")).unwrap();
        assert_eq!(parsed, ConfirmationType::ByMentor);
    }

    #[test]
    fn test_confirmation_types_lists_all_variants() {
        assert_eq!(Task::confirmation_types().len(), 4);
    }

    #[test]
    fn test_deserialization_and_payload() {
        let task: Task = serde_json::from_value(json!({
            "id": "t1",
            "createdAt": "2024-01-10T08:00:00Z",
            "updatedAt": "2024-01-10T08:00:00Z",
            "updatedBy": "u1",
            "isDeleted": false,
            "reward": {"points": 10},
            "confirmationType": "byForm",
            "confirmationFormId": "f1",
            "title": "Fill in your profile",
        }))
        .unwrap();

        assert_eq!(task.confirmation_type, ConfirmationType::ByForm);
        assert_eq!(task.confirmation_form_id.as_deref(), Some("f1"));

        let payload = task.payload();
        assert_eq!(payload["confirmationType"], "byForm");
        assert_eq!(payload["reward"]["points"], 10);
        assert!(payload.get("createdAt").is_none());
    }
}
