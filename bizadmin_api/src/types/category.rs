use serde::{Deserialize, Serialize};

use super::{DeleteMode, EntityId, Resource};
use crate::query::ListQuery;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<EntityId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
}

impl Resource for Category {
    type Entity = Category;
    type Payload = CategoryPayload;
    type Query = ListQuery;

    const NAME: &'static str = "category";
    const COLLECTION: &'static str = "categories";
    const DELETE_MODE: DeleteMode = DeleteMode::IdList;
    // Product rows show their category name.
    const DEPENDENTS: &'static [&'static str] = &["product"];
}
