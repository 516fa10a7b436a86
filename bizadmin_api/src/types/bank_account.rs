use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::query::ListQuery;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: EntityId,
    pub account_number: String,
    pub account_name: String,
    pub bank_name: String,
    pub branch: Option<String>,
    #[serde(default)]
    pub balance: f64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountPayload {
    pub account_number: String,
    pub account_name: String,
    pub bank_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Resource for BankAccount {
    type Entity = BankAccount;
    type Payload = BankAccountPayload;
    type Query = ListQuery;

    const NAME: &'static str = "bank-account";
    const COLLECTION: &'static str = "bank-accounts";
}
