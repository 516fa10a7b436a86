use crate::types::EntityId;

use super::{common::ListQuery, Query};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractQuery {
    pub common: ListQuery,
    pub customer_id: Option<EntityId>,
    pub contract_type: Option<String>,
}

impl Query for ContractQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = self.common.to_query_pairs();
        if let Some(ref customer_id) = self.customer_id {
            params.push(("customerId".to_string(), customer_id.clone()));
        }
        if let Some(ref contract_type) = self.contract_type {
            params.push(("contractType".to_string(), contract_type.clone()));
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

impl ContractQuery {
    pub fn with_customer_id(mut self, customer_id: &str) -> Self {
        self.customer_id = Some(customer_id.to_string());
        self
    }

    pub fn with_contract_type(mut self, contract_type: &str) -> Self {
        self.contract_type = Some(contract_type.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ContractQuery, Query, RecordStatus};

    #[test]
    fn test_contract_query() {
        let url = Url::parse("https://example.com/api/v1/contracts").unwrap();

        insta::assert_snapshot!(
            ContractQuery::default()
                .with_contract_type("service")
                .with_customer_id("c-42")
                .with_status(RecordStatus::Active)
                .with_page_number(1)
                .with_page_size(20)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/api/v1/contracts?pageNumber=1&pageSize=20&Status=1&customerId=c-42&contractType=service"
        );
    }
}
