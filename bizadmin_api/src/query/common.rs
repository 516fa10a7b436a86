//! Shared query infrastructure: the [`Query`] trait, [`ListQuery`] fields, and [`RecordStatus`].

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination, search, status and date filtering.
pub trait Query {
    /// Returns the query parameters in their canonical order.
    fn to_query_pairs(&self) -> Vec<(String, String)>;

    /// Returns the common list fields.
    fn common(&self) -> &ListQuery;

    /// Returns a mutable reference to the common list fields.
    fn get_common(&mut self) -> &mut ListQuery;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    ///
    /// A query with no parameters leaves the URL untouched, so the resolved
    /// URL never ends in a bare `?`.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }

    /// Sets the page number (1-indexed). `0` means "no page filter".
    fn with_page_number(mut self, page_number: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_number = page_number;
        self
    }

    /// Sets the number of results per page. `0` means "server default".
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = page_size;
        self
    }

    /// Free-text search.
    fn with_search(mut self, search: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().search_key = Some(search.to_string());
        self
    }

    /// Restricts to active or soft-deleted records.
    fn with_status(mut self, status: RecordStatus) -> Self
    where
        Self: Sized,
    {
        self.get_common().status = Some(status);
        self
    }

    /// Filters by an inclusive date range.
    fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self
    where
        Self: Sized,
    {
        self.get_common().date_range = Some(DateRange { from, to });
        self
    }

    /// Filters by accounting month (e.g. `2024-03`).
    fn with_month(mut self, month: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().month = Some(month.to_string());
        self
    }

    /// Sets the endpoint's generic `Filter` parameter.
    fn with_filter(mut self, filter: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().filter = Some(filter.to_string());
        self
    }

    /// Adds an arbitrary extra parameter. Extra parameters are emitted in key
    /// order regardless of the order they were added in.
    fn with_extra_filter(mut self, key: &str, value: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common()
            .extra_filters
            .insert(key.to_string(), value.to_string());
        self
    }
}

/// Soft-delete status filter. The backend encodes active records as
/// `Status=1` and the recycle bin as `Status=0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Active,
    Deleted,
}
impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordStatus::Active => "1",
                RecordStatus::Deleted => "0",
            }
        )
    }
}
impl FromStr for RecordStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "active" => Ok(RecordStatus::Active),
            "0" | "deleted" => Ok(RecordStatus::Deleted),
            _ => Err(()),
        }
    }
}

/// Inclusive date range, sent as `fromDate`/`toDate` in `YYYY-MM-DD` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Parameter names emitted by [`ListQuery`]. Extra filters must not reuse
/// them or the request would carry the same key twice.
pub const COMMON_PARAMS: &[&str] = &[
    "pageNumber",
    "pageSize",
    "search",
    "Status",
    "fromDate",
    "toDate",
    "Month",
    "Filter",
];

/// Fields shared by every list query. Also usable on its own for resources
/// without extra filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number (1-indexed). `0` is treated as unset.
    pub page_number: i64,
    /// Results per page. `0` is treated as unset.
    pub page_size: i64,
    pub search_key: Option<String>,
    pub status: Option<RecordStatus>,
    pub date_range: Option<DateRange>,
    pub month: Option<String>,
    pub filter: Option<String>,
    pub extra_filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Shorthand for a query on the given page.
    pub fn page(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }
}

impl Query for ListQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        // Both or neither: a zero page number with a real page size still
        // sends both, while 0/0 drops pagination entirely.
        if self.page_number != 0 || self.page_size != 0 {
            params.push(("pageNumber".to_string(), self.page_number.to_string()));
            params.push(("pageSize".to_string(), self.page_size.to_string()));
        }
        if let Some(ref search) = self.search_key {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("Status".to_string(), status.to_string()));
        }
        if let Some(range) = self.date_range {
            params.push(("fromDate".to_string(), range.from.format("%Y-%m-%d").to_string()));
            params.push(("toDate".to_string(), range.to.format("%Y-%m-%d").to_string()));
        }
        if let Some(ref month) = self.month {
            params.push(("Month".to_string(), month.clone()));
        }
        if let Some(ref filter) = self.filter {
            params.push(("Filter".to_string(), filter.clone()));
        }
        for (key, value) in self.extra_filters.iter() {
            params.push((key.clone(), value.clone()));
        }

        params
    }

    fn common(&self) -> &ListQuery {
        self
    }

    fn get_common(&mut self) -> &mut ListQuery {
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/api/v1/contracts").unwrap()
    }

    #[test]
    fn empty_query_leaves_url_untouched() {
        insta::assert_snapshot!(
            ListQuery::default().add_to_url(&base()).to_string(),
            @"https://example.com/api/v1/contracts"
        );
    }

    #[test]
    fn full_query_has_fixed_order() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        insta::assert_snapshot!(
            ListQuery::default()
                .with_extra_filter("zone", "north")
                .with_filter("overdue")
                .with_month("2024-03")
                .with_date_range(from, to)
                .with_status(RecordStatus::Deleted)
                .with_search("abc")
                .with_page_size(10)
                .with_page_number(2)
                .with_extra_filter("branch", "hq")
                .add_to_url(&base())
                .to_string(),
            @"https://example.com/api/v1/contracts?pageNumber=2&pageSize=10&search=abc&Status=0&fromDate=2024-01-01&toDate=2024-03-31&Month=2024-03&Filter=overdue&branch=hq&zone=north"
        );
    }

    #[test]
    fn page_size_alone_still_sends_both() {
        let pairs = ListQuery::page(0, 25).to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("pageNumber".to_string(), "0".to_string()),
                ("pageSize".to_string(), "25".to_string()),
            ]
        );
    }

    #[test]
    fn record_status_parses_words_and_digits() {
        assert_eq!("active".parse::<RecordStatus>(), Ok(RecordStatus::Active));
        assert_eq!("0".parse::<RecordStatus>(), Ok(RecordStatus::Deleted));
        assert!("archived".parse::<RecordStatus>().is_err());
    }
}
