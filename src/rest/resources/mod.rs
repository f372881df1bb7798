//! Typed resource models for the Appercode API.
//!
//! Each resource defines its endpoints as a constant
//! [`ResourcePath`](crate::rest::ResourcePath) table and exposes the
//! operations the server supports for it. List endpoints accept a
//! [`Query`](crate::rest::Query); failures surface as
//! [`ResourceError`](crate::rest::ResourceError).

mod element;
mod event_membership;
mod file;
mod form;
mod form_report;
mod form_response;
mod notification_campaign;
mod schema;
mod settings;

pub mod onboarding;

pub use element::{BulkQueryResult, Element};
pub use event_membership::EventMembership;
pub use file::File;
pub use form::{Form, FormControl};
pub use form_report::{
    CompiledQuestion, CompiledReport, CompiledVariant, ControlStatistics, FormReport,
    OptionStatistics,
};
pub use form_response::FormResponse;
pub use notification_campaign::NotificationCampaign;
pub use onboarding::{Block, ConfirmationType, OnboardingEntity, Roadmap, Task};
pub use schema::{Schema, SchemaDraft, SchemaField, COLLECTION_TYPES};
pub use settings::Settings;
