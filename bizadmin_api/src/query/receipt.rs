use crate::types::{EntityId, ReceiptType};

use super::{common::ListQuery, Query};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceiptQuery {
    pub common: ListQuery,
    pub receipt_type: Option<ReceiptType>,
    pub bank_account_id: Option<EntityId>,
}

impl Query for ReceiptQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = self.common.to_query_pairs();
        if let Some(receipt_type) = self.receipt_type {
            params.push(("receiptType".to_string(), receipt_type.to_string()));
        }
        if let Some(ref bank_account_id) = self.bank_account_id {
            params.push(("bankAccountId".to_string(), bank_account_id.clone()));
        }
        params
    }

    fn common(&self) -> &ListQuery {
        &self.common
    }

    fn get_common(&mut self) -> &mut ListQuery {
        &mut self.common
    }
}

impl ReceiptQuery {
    pub fn with_receipt_type(mut self, receipt_type: ReceiptType) -> Self {
        self.receipt_type = Some(receipt_type);
        self
    }

    pub fn with_bank_account_id(mut self, bank_account_id: &str) -> Self {
        self.bank_account_id = Some(bank_account_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Query, ReceiptQuery};
    use crate::types::ReceiptType;

    #[test]
    fn test_receipt_query() {
        let url = Url::parse("https://example.com/api/v1/receipts").unwrap();

        insta::assert_snapshot!(
            ReceiptQuery::default()
                .with_bank_account_id("ba-7")
                .with_receipt_type(ReceiptType::Expense)
                .with_month("2024-05")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/api/v1/receipts?Month=2024-05&receiptType=expense&bankAccountId=ba-7"
        );
    }
}
