use crate::types::EntityId;

use super::{common::ListQuery, Query};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub common: ListQuery,
    pub category_id: Option<EntityId>,
    pub in_stock: Option<bool>,
}

impl Query for ProductQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = self.common.to_query_pairs();
        if let Some(ref category_id) = self.category_id {
            params.push(("categoryId".to_string(), category_id.clone()));
        }
        if let Some(in_stock) = self.in_stock {
            params.push(("inStock".to_string(), in_stock.to_string()));
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

impl ProductQuery {
    pub fn with_category_id(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}
