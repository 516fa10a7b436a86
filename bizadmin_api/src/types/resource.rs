use serde::{de::DeserializeOwned, Serialize};

use crate::query::Query;

/// Prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Identifier of a backend record.
pub type EntityId = String;

/// How a resource's delete endpoint takes its ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteMode {
    /// `DELETE /api/v1/<name>/delete/{id}`, one request per id.
    ById,
    /// `DELETE /api/v1/<name>/delete` with `{"ids": [...]}` in the body.
    IdList,
}

/// A backend resource with list, detail, create, update and delete
/// endpoints. Implementing this is all an entity needs to get the full
/// fetch/cache/mutate surface.
pub trait Resource: Send + Sync + 'static {
    /// Record returned by list and detail endpoints.
    type Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;
    /// Body sent on create and update.
    type Payload: Serialize + Send + Sync;
    /// Query builder for the list endpoint.
    type Query: Query + Default + Clone + Send + Sync;

    /// Singular path segment, e.g. `contract`. Also the cache tag.
    const NAME: &'static str;
    /// Collection path segment, e.g. `contracts`.
    const COLLECTION: &'static str;
    const DELETE_MODE: DeleteMode = DeleteMode::ById;
    /// Tags of other resources whose lists change when this one is mutated.
    const DEPENDENTS: &'static [&'static str] = &[];

    fn list_path() -> String {
        format!("{}/{}", API_PREFIX, Self::COLLECTION)
    }

    /// Detail endpoint; the record id is appended as its own path segment.
    fn detail_path() -> String {
        format!("{}/{}/get-detail", API_PREFIX, Self::NAME)
    }

    fn create_path() -> String {
        format!("{}/{}/create", API_PREFIX, Self::NAME)
    }

    /// Update endpoint; the record id is appended as its own path segment.
    fn update_path() -> String {
        format!("{}/{}/update", API_PREFIX, Self::NAME)
    }

    fn delete_path() -> String {
        format!("{}/{}/delete", API_PREFIX, Self::NAME)
    }

    /// Every cache tag a mutation of this resource invalidates.
    fn invalidated_tags() -> Vec<&'static str> {
        let mut tags = vec![Self::NAME];
        tags.extend_from_slice(Self::DEPENDENTS);
        tags
    }
}
