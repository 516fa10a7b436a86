use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityId, Resource};
use crate::query::ReceiptQuery;

/// Money in (`income`) or out (`expense`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiptType {
    Income,
    Expense,
}
impl std::fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ReceiptType::Income => "income",
                ReceiptType::Expense => "expense",
            }
        )
    }
}
impl FromStr for ReceiptType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(ReceiptType::Income),
            "expense" => Ok(ReceiptType::Expense),
            _ => Err(()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: EntityId,
    pub receipt_number: String,
    pub receipt_type: ReceiptType,
    pub amount: f64,
    pub receipt_date: NaiveDate,
    pub bank_account_id: Option<EntityId>,
    pub contract_id: Option<EntityId>,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub receipt_number: String,
    pub receipt_type: ReceiptType,
    pub amount: f64,
    pub receipt_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Resource for Receipt {
    type Entity = Receipt;
    type Payload = ReceiptPayload;
    type Query = ReceiptQuery;

    const NAME: &'static str = "receipt";
    const COLLECTION: &'static str = "receipts";
    // Receipts move bank balances and contract paid amounts.
    const DEPENDENTS: &'static [&'static str] = &["bank-account", "contract"];
}
