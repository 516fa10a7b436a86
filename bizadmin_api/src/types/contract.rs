use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::query::ContractQuery;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}
impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContractStatus::Draft => "draft",
                ContractStatus::Active => "active",
                ContractStatus::Completed => "completed",
                ContractStatus::Cancelled => "cancelled",
            }
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: EntityId,
    pub contract_number: String,
    pub customer_id: EntityId,
    pub customer_name: Option<String>,
    pub contract_type: Option<String>,
    pub sign_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_value: f64,
    pub status: Option<ContractStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractPayload {
    pub contract_number: String,
    pub customer_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub total_value: f64,
}

impl Resource for Contract {
    type Entity = Contract;
    type Payload = ContractPayload;
    type Query = ContractQuery;

    const NAME: &'static str = "contract";
    const COLLECTION: &'static str = "contracts";
}
