use serde::{Deserialize, Serialize};

use super::{DeleteMode, EntityId, Resource};
use crate::query::ProductQuery;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub category_id: Option<EntityId>,
    pub category_name: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity_in_stock: i64,
    pub warehouse_id: Option<EntityId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub price: f64,
    pub quantity_in_stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<EntityId>,
}

impl Resource for Product {
    type Entity = Product;
    type Payload = ProductPayload;
    type Query = ProductQuery;

    const NAME: &'static str = "product";
    const COLLECTION: &'static str = "products";
    const DELETE_MODE: DeleteMode = DeleteMode::IdList;
    // Warehouse rows carry a product count.
    const DEPENDENTS: &'static [&'static str] = &["warehouse"];
}
