use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::query::ListQuery;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: EntityId,
    pub name: String,
    pub location: Option<String>,
    pub manager: Option<String>,
    #[serde(default)]
    pub product_count: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarehousePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl Resource for Warehouse {
    type Entity = Warehouse;
    type Payload = WarehousePayload;
    type Query = ListQuery;

    const NAME: &'static str = "warehouse";
    const COLLECTION: &'static str = "warehouses";
}
