use serde::{Deserialize, Serialize};

use super::{DeleteMode, EntityId, Resource};
use crate::query::ListQuery;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub tax_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Resource for Customer {
    type Entity = Customer;
    type Payload = CustomerPayload;
    type Query = ListQuery;

    const NAME: &'static str = "customer";
    const COLLECTION: &'static str = "customers";
    const DELETE_MODE: DeleteMode = DeleteMode::IdList;
    const DEPENDENTS: &'static [&'static str] = &["contract"];
}
