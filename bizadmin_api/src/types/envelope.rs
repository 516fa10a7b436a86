use serde::{Deserialize, Serialize};

/// Page of a list endpoint. Every field may be missing on the wire; callers
/// apply their own defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub items: Option<Vec<T>>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub total_pages: Option<i64>,
    pub total_record: Option<i64>,
}

/// Envelope returned by every list endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<ListPage<T>>,
}

impl<T> ListEnvelope<T> {
    /// Items on this page, empty when the server omitted them.
    pub fn items(&self) -> &[T] {
        self.data
            .as_ref()
            .and_then(|d| d.items.as_deref())
            .unwrap_or_default()
    }
}

/// Envelope returned by detail endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Envelope returned by create/update/delete. The `data` shape varies per
/// endpoint (new id, updated record, nothing at all), so it stays untyped.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Resolved pagination for a list page.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_record: i64,
}

impl Pagination {
    /// `ceil(total_record / page_size)`, or 0 for a non-positive page size.
    pub fn expected_total_pages(total_record: i64, page_size: i64) -> i64 {
        if page_size <= 0 || total_record <= 0 {
            return 0;
        }
        (total_record + page_size - 1) / page_size
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_total_pages_rounds_up() {
        assert_eq!(Pagination::expected_total_pages(25, 10), 3);
        assert_eq!(Pagination::expected_total_pages(20, 10), 2);
        assert_eq!(Pagination::expected_total_pages(0, 10), 0);
        assert_eq!(Pagination::expected_total_pages(5, 0), 0);
    }

    #[test]
    fn envelope_with_null_data_has_no_items() {
        let env: ListEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"statusCode":200,"message":"ok","data":null}"#).unwrap();
        assert!(env.items().is_empty());
    }

    #[test]
    fn mutation_response_tolerates_missing_data() {
        let resp: MutationResponse =
            serde_json::from_str(r#"{"statusCode":200,"message":"Deleted"}"#).unwrap();
        assert_eq!(resp.message, "Deleted");
        assert!(resp.data.is_null());
    }
}
