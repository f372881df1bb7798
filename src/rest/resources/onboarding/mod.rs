//! Onboarding entities: roadmaps, blocks and tasks.
//!
//! The three entity types share one CRUD surface over parallel endpoint
//! sets (`onboarding/{roadmaps,blocks,tasks}`). The [`OnboardingEntity`]
//! trait provides the operations once; each entity supplies its endpoint
//! table, its id and its writable payload.

mod block;
mod roadmap;
mod task;

pub use block::Block;
pub use roadmap::Roadmap;
pub use task::{ConfirmationType, Task};

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpClient, HttpRequest};
use crate::rest::{decode, resolve, Query, ResourceError, ResourceOperation, ResourcePath};

fn id_values(id: &str) -> HashMap<&'static str, String> {
    let mut values = HashMap::new();
    values.insert("id", id.to_string());
    values
}

/// An onboarding entity with the shared CRUD surface.
///
/// Implementors define the endpoint table and the writable payload; the
/// trait supplies default implementations for all operations.
#[allow(async_fn_in_trait)]
pub trait OnboardingEntity: DeserializeOwned + Clone + Send + Sync + Sized {
    /// The entity name used in error messages (e.g., "Roadmap").
    const NAME: &'static str;

    /// Endpoint table for this entity.
    const PATHS: &'static [ResourcePath];

    /// Returns the entity's id.
    fn id(&self) -> &str;

    /// Returns the writable fields sent by [`save`](Self::save).
    fn payload(&self) -> Value;

    /// Creates a new entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn create(client: &HttpClient, fields: Value) -> Result<Self, ResourceError> {
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

    /// Fetches a single entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the entity doesn't exist.
    async fn find(client: &HttpClient, id: &str) -> Result<Self, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Find,
            &id_values(id),
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

    /// Returns the count of entities matching the filter.
    ///
    /// Sends `{take: 0}` so the server skips the item list and only
    /// reports the total.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn count(client: &HttpClient, filter: Option<Value>) -> Result<u64, ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Count,
            &HashMap::new(),
        )?;

        let mut query = Query::new().take(0);
        if let Some(filter) = filter {
            query = query.filter(filter);
        }

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

    /// Returns the entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn list(client: &HttpClient, query: &Query) -> Result<Vec<Self>, ResourceError> {
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

    /// Updates selected fields of an entity without fetching it first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the entity doesn't exist.
    async fn update(client: &HttpClient, id: &str, fields: Value) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Update,
            &id_values(id),
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

    /// Deletes an entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the entity doesn't exist.
    async fn remove(client: &HttpClient, id: &str) -> Result<(), ResourceError> {
        let (method, path) = resolve(
            Self::NAME,
            Self::PATHS,
            ResourceOperation::Delete,
            &id_values(id),
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

    /// Saves this entity's writable fields back to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn save(&self, client: &HttpClient) -> Result<(), ResourceError> {
        Self::update(client, self.id(), self.payload()).await
    }

    /// Deletes this entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the entity doesn't exist.
    async fn delete(&self, client: &HttpClient) -> Result<(), ResourceError> {
        Self::remove(client, self.id()).await
    }
}
