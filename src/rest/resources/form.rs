//! Form resource implementation.
//!
//! Forms are questionnaires built from parts → sections → groups →
//! controls. The part tree is schemaless presentation data and is kept as
//! raw JSON; [`Form::controls`] flattens it into typed [`FormControl`]s,
//! reproducing the server's pairing of a two-control group's free-text
//! `textBox` with its sibling choice control.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::resources::{FormReport, FormResponse};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// A single form control (question) extracted from the part tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControl {
    /// The control id.
    #[serde(default)]
    pub id: Option<String>,

    /// The control type (e.g., `checkBoxList`, `radioButtonList`, `textBox`).
    #[serde(rename = "type", default)]
    pub control_type: Option<String>,

    /// The control title (localized map or plain string).
    #[serde(default)]
    pub title: Option<Value>,

    /// The control description.
    #[serde(default)]
    pub description: Option<Value>,

    /// Presentation metadata.
    #[serde(default)]
    pub view_data: Option<Value>,

    /// Values counted as correct answers.
    #[serde(default)]
    pub correct_values: Vec<Value>,

    /// Id of the free-text control paired with this one, when the group
    /// offered an "own variant" answer.
    #[serde(default)]
    pub own_variant_id: Option<String>,

    /// Remaining control attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A questionnaire on an Appercode project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// The unique form id.
    pub id: String,

    /// The form title (localized map or plain string).
    #[serde(default)]
    pub title: Value,

    /// The form description.
    #[serde(default)]
    pub description: Value,

    /// The form type.
    #[serde(rename = "type", default)]
    pub form_type: String,

    /// Time limit for filling the form, in seconds.
    #[serde(default)]
    pub time_limit: Option<i64>,

    /// Whether a user may submit the form more than once.
    #[serde(default)]
    pub is_resubmitting_allowed: Option<bool>,

    /// The part tree holding sections, groups and controls.
    #[serde(default)]
    pub parts: Vec<Value>,

    /// The welcome screen definition.
    #[serde(default)]
    pub welcome_part: Option<Value>,

    /// The result screen definition.
    #[serde(default)]
    pub result_part: Option<Value>,

    /// Presentation metadata.
    #[serde(default)]
    pub view_data: Value,

    /// User group ids the form is visible to.
    #[serde(default)]
    pub group_ids: Vec<String>,

    /// Whether the form is deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Whether the form is published.
    #[serde(default)]
    pub is_published: bool,

    /// When the form was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the form was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the form opens for responses.
    #[serde(default)]
    pub open_at: Option<DateTime<Utc>>,

    /// When the form closes for responses.
    #[serde(default)]
    pub close_at: Option<DateTime<Utc>>,
}

impl Form {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "Form";

    /// Endpoint table for form operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "v2/forms"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "v2/forms/query",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Count,
            &[],
            "v2/forms/query",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "v2/forms/{id}",
        ),
    ];

    /// Creates a new form.
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

    /// Returns the forms matching the query.
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

    /// Returns the count of forms matching the query.
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

    /// Deletes this form.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the form doesn't exist.
    pub async fn delete(&self, client: &HttpClient) -> Result<(), ResourceError> {
        let mut values = HashMap::new();
        values.insert("id", self.id.clone());

        let (method, path) = resolve(Self::NAME, Self::PATHS, ResourceOperation::Delete, &values)?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;
        Ok(())
    }

    /// Flattens the part tree into the form's controls.
    ///
    /// When a group holds exactly two controls and one is a free-text
    /// `textBox`, the text box is the "own variant" input of its sibling:
    /// it is removed from the list and its id is attached to the sibling's
    /// `own_variant_id`.
    #[must_use]
    pub fn controls(&self) -> Vec<FormControl> {
        let mut result = Vec::new();

        for part in &self.parts {
            let Some(sections) = part.get("sections").and_then(Value::as_array) else {
                continue;
            };
            for section in sections {
                let Some(groups) = section.get("groups").and_then(Value::as_array) else {
                    continue;
                };
                for group in groups {
                    let Some(controls) = group.get("controls").and_then(Value::as_array) else {
                        continue;
                    };
                    let mut controls = controls.clone();

                    if controls.len() == 2 {
                        let own_index = controls.iter().position(|control| {
                            control.get("type").and_then(Value::as_str) == Some("textBox")
                        });
                        if let Some(own_index) = own_index {
                            let own_variant = controls.remove(own_index);
                            let own_id = own_variant.get("id").cloned().unwrap_or(Value::Null);
                            if let Some(sibling) =
                                controls.first_mut().and_then(Value::as_object_mut)
                            {
                                sibling.insert("ownVariantId".to_string(), own_id);
                            }
                        }
                    }

                    for control in controls {
                        if let Ok(control) = serde_json::from_value::<FormControl>(control) {
                            result.push(control);
                        }
                    }
                }
            }
        }

        result
    }

    /// Returns the form's controls keyed by control id.
    #[must_use]
    pub fn questions(&self) -> HashMap<String, FormControl> {
        self.controls()
            .into_iter()
            .filter_map(|control| control.id.clone().map(|id| (id, control)))
            .collect()
    }

    /// Returns the reports generated for this form.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn reports(&self, client: &HttpClient) -> Result<Vec<FormReport>, ResourceError> {
        FormReport::list(client, &Query::new().filter(serde_json::json!({"formId": self.id})))
            .await
    }

    /// Returns the responses submitted to this form.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn responses(
        &self,
        client: &HttpClient,
    ) -> Result<Vec<FormResponse>, ResourceError> {
        FormResponse::list(client, &Query::new().filter(serde_json::json!({"formId": self.id})))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_with_parts(parts: Value) -> Form {
        serde_json::from_value(json!({
            "id": "f1",
            "title": {"en": "Survey"},
            "type": "survey",
            "parts": parts,
            "createdAt": "2024-01-10T08:00:00Z",
            "updatedAt": "2024-01-10T08:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_form_deserialization_defaults() {
        let form = form_with_parts(json!([]));
        assert_eq!(form.id, "f1");
        assert_eq!(form.form_type, "survey");
        assert!(form.parts.is_empty());
        assert!(form.time_limit.is_none());
        assert!(!form.is_deleted);
    }

    #[test]
    fn test_controls_flattens_part_tree() {
        let form = form_with_parts(json!([{
            "sections": [{
                "groups": [
                    {"controls": [{"id": "c1", "type": "radioButtonList"}]},
                    {"controls": [{"id": "c2", "type": "checkBoxList"}]},
                ],
            }],
        }]));

        let controls = form.controls();
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].id.as_deref(), Some("c1"));
        assert_eq!(controls[1].control_type.as_deref(), Some("checkBoxList"));
    }

    #[test]
    fn test_controls_pairs_own_variant_text_box() {
        let form = form_with_parts(json!([{
            "sections": [{
                "groups": [{
                    "controls": [
                        {"id": "c1", "type": "radioButtonList"},
                        {"id": "c2", "type": "textBox"},
                    ],
                }],
            }],
        }]));

        let controls = form.controls();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].id.as_deref(), Some("c1"));
        assert_eq!(controls[0].own_variant_id.as_deref(), Some("c2"));
    }

    #[test]
    fn test_controls_keeps_standalone_text_box() {
        let form = form_with_parts(json!([{
            "sections": [{
                "groups": [{
                    "controls": [{"id": "c1", "type": "textBox"}],
                }],
            }],
        }]));

        let controls = form.controls();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].control_type.as_deref(), Some("textBox"));
        assert!(controls[0].own_variant_id.is_none());
    }

    #[test]
    fn test_questions_keyed_by_id() {
        let form = form_with_parts(json!([{
            "sections": [{
                "groups": [{
                    "controls": [
                        {"id": "c1", "type": "radioButtonList", "correctValues": ["a"]},
                    ],
                }],
            }],
        }]));

        let questions = form.questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions["c1"].correct_values, vec![json!("a")]);
    }

    #[test]
    fn test_path_table_covers_operations() {
        use crate::rest::get_path;

        assert!(get_path(Form::PATHS, ResourceOperation::Create, &[]).is_some());
        assert!(get_path(Form::PATHS, ResourceOperation::List, &[]).is_some());
        assert!(get_path(Form::PATHS, ResourceOperation::Count, &[]).is_some());
        assert!(get_path(Form::PATHS, ResourceOperation::Delete, &["id"]).is_some());
        assert!(get_path(Form::PATHS, ResourceOperation::Find, &["id"]).is_none());
    }
}
