//! Form report resource implementation.
//!
//! A report aggregates the responses of a form per control ("perspective").
//! The raw aggregation from the server counts each answered option;
//! [`FormReport::compiled_results`] joins those counts with the form's
//! questions into per-option statistics with popularity and correctness.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::rest::resources::{Form, FormControl};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

/// Aggregated counts for one answer option of a control.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionStatistics {
    /// The answered value. Multi-choice controls report an array.
    pub value: Value,
    /// Number of responses containing the value.
    #[serde(default)]
    pub count: u64,
    /// Free-text responses attached to the option, if any.
    #[serde(default)]
    pub responses: Vec<Value>,
}

/// Raw aggregation for one control, as returned by the results endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlStatistics {
    /// The control id.
    pub control_id: String,
    /// Total number of responses to the control.
    #[serde(default)]
    pub count: u64,
    /// Per-option aggregation.
    #[serde(default)]
    pub values: Vec<OptionStatistics>,
}

/// Compiled statistics for one answer option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledVariant {
    /// Number of responses containing the option.
    pub count: u64,
    /// Free-text responses attached to the option.
    pub responses: Vec<Value>,
    /// Whether the option is among the question's correct values.
    pub is_correct: bool,
    /// Share of responses containing the option, rounded to 3 decimals.
    pub popularity: f64,
}

/// Compiled statistics for one question.
#[derive(Debug, Clone)]
pub struct CompiledQuestion {
    /// The control id.
    pub id: String,
    /// The control type.
    pub control_type: Option<String>,
    /// The question title.
    pub title: Option<Value>,
    /// The question description.
    pub description: Option<Value>,
    /// Presentation metadata.
    pub view_data: Option<Value>,
    /// Per-option statistics, ordered by option value.
    pub options: BTreeMap<String, CompiledVariant>,
    /// Total number of responses to the question.
    pub count: u64,
    /// Values counted as correct answers.
    pub correct_values: Vec<Value>,
}

/// The result of [`FormReport::compiled_results`].
#[derive(Debug, Clone)]
pub struct CompiledReport {
    /// Compiled statistics keyed by control id.
    pub statistics: HashMap<String, CompiledQuestion>,
    /// The form the report belongs to.
    pub form: Form,
}

/// An aggregation report over a form's responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    /// The unique report id.
    pub id: String,

    /// The id of the form being reported on.
    pub form_id: String,

    /// Whether the report is published.
    #[serde(default)]
    pub is_published: bool,

    /// Whether the report is deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// When the report was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the report was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// The id of the user who last updated the report.
    #[serde(default)]
    pub updated_by: Option<String>,

    /// The controls the report aggregates, as configured on creation.
    #[serde(default)]
    pub perspectives: Value,
}

impl FormReport {
    /// The resource name used in error messages.
    pub const NAME: &'static str = "FormReport";

    /// Endpoint table for form report operations.
    pub const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "v2/forms/reports",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::List,
            &[],
            "v2/forms/reports/query",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Results,
            &["id"],
            "v2/forms/reports/{id}/result",
        ),
    ];

    /// Creates a report aggregating the given controls of a form.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(
        client: &HttpClient,
        form_id: &str,
        control_ids: &[String],
    ) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Create,
            &HashMap::new(),
        )?;

        let perspectives: Vec<Value> = control_ids
            .iter()
            .map(|id| serde_json::json!({ "controlId": id }))
            .collect();

        let request = HttpRequest::builder(method, path)
            .body(serde_json::json!({
                "formId": form_id,
                "perspectives": perspectives,
            }))
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, None))?;

        decode(Self::NAME, json)
    }

    /// Returns the reports matching the query.
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

    /// Fetches the raw per-control aggregation for this report.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn results(
        &self,
        client: &HttpClient,
    ) -> Result<Vec<ControlStatistics>, ResourceError> {
        let mut values = HashMap::new();
        values.insert("id", self.id.clone());

        let (method, path) = resolve(Self::NAME, Self::PATHS, ResourceOperation::Results, &values)?;

        let request = HttpRequest::builder(method, path)
            .build()
            .map_err(|e| ResourceError::Http(e.into()))?;

        let json = client
            .request_json(request)
            .await
            .map_err(|e| ResourceError::from_http(e, Self::NAME, Some(&self.id)))?;

        decode(Self::NAME, json)
    }

    /// Fetches the form this report belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the form no longer exists.
    pub async fn form(&self, client: &HttpClient) -> Result<Form, ResourceError> {
        let mut forms = Form::list(client, &Query::by_id(&self.form_id)).await?;
        if forms.is_empty() {
            return Err(ResourceError::NotFound {
                resource: Form::NAME,
                id: self.form_id.clone(),
            });
        }
        Ok(forms.remove(0))
    }

    /// Fetches the raw aggregation and the form, and compiles per-question
    /// option statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if either fetch fails.
    pub async fn compiled_results(
        &self,
        client: &HttpClient,
    ) -> Result<CompiledReport, ResourceError> {
        let data = self.results(client).await?;
        let form = self.form(client).await?;
        let questions = form.questions();

        let mut statistics = HashMap::new();
        for control in data {
            let Some(question) = questions.get(&control.control_id) else {
                continue;
            };
            statistics.insert(
                control.control_id.clone(),
                compile_question(&control, question),
            );
        }

        Ok(CompiledReport { statistics, form })
    }
}

/// Joins one control's aggregation with its question definition.
fn compile_question(control: &ControlStatistics, question: &FormControl) -> CompiledQuestion {
    let mut options: BTreeMap<String, CompiledVariant> = BTreeMap::new();

    for option in &control.values {
        // Multi-choice answers arrive as arrays; each distinct value
        // contributes the option's count once.
        if let Some(values) = option.value.as_array() {
            let mut seen = Vec::new();
            for value in values {
                if seen.contains(value) {
                    continue;
                }
                seen.push(value.clone());
                accumulate(&mut options, value, option, question);
            }
        } else {
            accumulate(&mut options, &option.value, option, question);
        }
    }

    for variant in options.values_mut() {
        variant.popularity = if control.count == 0 {
            0.0
        } else {
            round3(variant.count as f64 / control.count as f64)
        };
    }

    CompiledQuestion {
        id: control.control_id.clone(),
        control_type: question.control_type.clone(),
        title: question.title.clone(),
        description: question.description.clone(),
        view_data: question.view_data.clone(),
        options,
        count: control.count,
        correct_values: question.correct_values.clone(),
    }
}

/// Adds one option occurrence to the variants map.
fn accumulate(
    options: &mut BTreeMap<String, CompiledVariant>,
    value: &Value,
    option: &OptionStatistics,
    question: &FormControl,
) {
    let key = value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string);

    let variant = options.entry(key).or_default();
    variant.count += option.count;
    variant.responses.extend(option.responses.iter().cloned());
    variant.is_correct = question.correct_values.contains(value);
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
