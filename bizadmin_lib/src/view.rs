//! Projection of a list envelope and load flags into what a list screen renders.

use bizadmin_api::types::{ListEnvelope, Pagination};
use bizadmin_api::Error;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cache::{CacheSnapshot, MutateHandle};

/// Request state that a view model is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadFlags {
    pub is_loading: bool,
    pub is_validating: bool,
}

impl From<&CacheSnapshot> for LoadFlags {
    fn from(snapshot: &CacheSnapshot) -> Self {
        Self {
            is_loading: snapshot.is_loading,
            is_validating: snapshot.is_validating,
        }
    }
}

/// Everything a list screen needs. Derived on demand, never stored.
#[derive(Clone, Debug)]
pub struct ListViewModel<T> {
    pub entities: Vec<T>,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub is_validating: bool,
    pub error: Option<Error>,
    /// No rows and nothing in flight.
    pub is_empty: bool,
    /// Refresh handle for the list's cache key; `None` for a disabled list.
    pub mutate: Option<MutateHandle>,
}

/// What a list screen should show. Unlike `is_empty`, a failed fetch is
/// never reported as an empty list.
#[derive(Debug, PartialEq)]
pub enum ListStatus<'a, T> {
    Loading,
    Error(&'a Error),
    Empty,
    Ready(&'a [T]),
}

impl<T> ListViewModel<T> {
    /// Stale rows stay visible while a refresh is in flight. An error is
    /// reported whenever no refresh is running, even over stale rows.
    pub fn status(&self) -> ListStatus<'_, T> {
        if self.is_loading {
            return ListStatus::Loading;
        }
        if let Some(err) = &self.error {
            if !self.is_validating {
                return ListStatus::Error(err);
            }
        }
        if self.entities.is_empty() {
            if self.is_validating {
                ListStatus::Loading
            } else {
                ListStatus::Empty
            }
        } else {
            ListStatus::Ready(&self.entities)
        }
    }
}

/// Builds a view model from an optional envelope.
///
/// Missing items become an empty list, a missing page number becomes 1, a
/// missing page size becomes `requested_page_size`, and missing totals
/// become 0. `is_empty` is only set once nothing is loading or validating.
pub fn project<T>(
    envelope: Option<ListEnvelope<T>>,
    flags: LoadFlags,
    error: Option<Error>,
    requested_page_size: i64,
    mutate: Option<MutateHandle>,
) -> ListViewModel<T> {
    let page = envelope.and_then(|e| e.data);
    let (entities, pagination) = match page {
        Some(page) => (
            page.items.unwrap_or_default(),
            Pagination {
                page_number: page.page_number.unwrap_or(1),
                page_size: page.page_size.unwrap_or(requested_page_size),
                total_pages: page.total_pages.unwrap_or(0),
                total_record: page.total_record.unwrap_or(0),
            },
        ),
        None => (
            Vec::new(),
            Pagination {
                page_number: 1,
                page_size: requested_page_size,
                total_pages: 0,
                total_record: 0,
            },
        ),
    };
    let is_empty = !flags.is_loading && !flags.is_validating && entities.is_empty();

    ListViewModel {
        entities,
        pagination,
        is_loading: flags.is_loading,
        is_validating: flags.is_validating,
        error,
        is_empty,
        mutate,
    }
}

/// Decodes a cache snapshot and projects it. A cached value that does not
/// match `ListEnvelope<T>` is reported as a decode error, not a panic.
pub fn project_snapshot<T: DeserializeOwned>(
    snapshot: &CacheSnapshot,
    requested_page_size: i64,
    mutate: Option<MutateHandle>,
) -> ListViewModel<T> {
    let mut error = snapshot.error.clone();
    let envelope = snapshot.data.as_deref().and_then(|value| {
        ListEnvelope::<T>::deserialize(value)
            .map_err(|e| {
                tracing::error!("cached list does not match expected shape: {}", e);
                error.get_or_insert(Error::Decode(e.to_string()));
            })
            .ok()
    });
    project(
        envelope,
        LoadFlags::from(snapshot),
        error,
        requested_page_size,
        mutate,
    )
}
