//! One paginated list of a resource, bound to the shared cache.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bizadmin_api::{Client, Error, Query, Resource};

use crate::cache::{EntryState, SwrCache};
use crate::view::{project, project_snapshot, LoadFlags, ListViewModel};

/// A list of `R` described by a query. The resolved list URL is the cache
/// key, so two `ListResource`s with equal queries share one entry and one
/// in-flight request. A list without a query is disabled and never fetches.
pub struct ListResource<R: Resource> {
    api: Arc<Client>,
    cache: SwrCache,
    query: Option<R::Query>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ListResource<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cache: self.cache.clone(),
            query: self.query.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ListResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListResource")
            .field("resource", &R::NAME)
            .field("key", &self.key().ok().flatten())
            .finish()
    }
}

impl<R: Resource> ListResource<R> {
    pub fn new(api: Arc<Client>, cache: SwrCache, query: R::Query) -> Self {
        Self {
            api,
            cache,
            query: Some(query),
            _resource: PhantomData,
        }
    }

    pub fn disabled(api: Arc<Client>, cache: SwrCache) -> Self {
        Self {
            api,
            cache,
            query: None,
            _resource: PhantomData,
        }
    }

    /// Drops the query when `enabled` is false.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        if !enabled {
            self.query = None;
        }
        self
    }

    pub fn query(&self) -> Option<&R::Query> {
        self.query.as_ref()
    }

    /// Replaces the query. The next `fetch` reads the new key.
    pub fn set_query(&mut self, query: Option<R::Query>) {
        self.query = query;
    }

    /// Cache key for the current query, `None` while disabled.
    pub fn key(&self) -> Result<Option<String>, Error> {
        self.query
            .as_ref()
            .map(|q| self.api.list_url::<R>(q).map(String::from))
            .transpose()
    }

    fn requested_page_size(&self) -> i64 {
        self.query.as_ref().map_or(0, |q| q.common().page_size)
    }

    /// Returns the list, fetching it when the key has no data, was
    /// invalidated, or is stale. While a refresh is already running the
    /// stale rows come back at once with `is_validating` set.
    pub async fn fetch(&self) -> ListViewModel<R::Entity> {
        let page_size = self.requested_page_size();
        let Some(query) = self.query.as_ref() else {
            return project(None, LoadFlags::default(), None, page_size, None);
        };
        let url = match self.api.list_url::<R>(query) {
            Ok(url) => url,
            Err(e) => return project(None, LoadFlags::default(), Some(e), page_size, None),
        };
        let key = url.to_string();
        let api = Arc::clone(&self.api);
        let snapshot = self
            .cache
            .get(Some(&key), &[R::NAME], move || {
                let api = Arc::clone(&api);
                let url = url.clone();
                async move { api.fetch_value(url).await }
            })
            .await;
        project_snapshot(&snapshot, page_size, Some(self.cache.handle(&key)))
    }

    /// What the cache holds right now, without fetching.
    pub fn view(&self) -> ListViewModel<R::Entity> {
        let page_size = self.requested_page_size();
        match self.key() {
            Ok(Some(key)) => {
                let snapshot = self.cache.peek(Some(&key));
                project_snapshot(&snapshot, page_size, Some(self.cache.handle(&key)))
            }
            Ok(None) => project(None, LoadFlags::default(), None, page_size, None),
            Err(e) => project(None, LoadFlags::default(), Some(e), page_size, None),
        }
    }

    /// Refetches the current key, even when it is fresh.
    pub async fn revalidate(&self) -> ListViewModel<R::Entity> {
        if let Ok(Some(key)) = self.key() {
            if self.cache.peek(Some(&key)).state != EntryState::Idle {
                let snapshot = self.cache.revalidate(&key).await;
                let page_size = self.requested_page_size();
                return project_snapshot(&snapshot, page_size, Some(self.cache.handle(&key)));
            }
        }
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use bizadmin_api::types::Contract;
    use bizadmin_api::ContractQuery;

    use super::*;
    use crate::view::ListStatus;

    fn api() -> Arc<Client> {
        Arc::new(Client::with_base_url("http://127.0.0.1:9").unwrap())
    }

    #[test]
    fn key_is_resolved_list_url() {
        let list = ListResource::<Contract>::new(
            api(),
            SwrCache::default(),
            ContractQuery::default().with_page_number(1).with_page_size(10),
        );
        assert_eq!(
            list.key().unwrap().as_deref(),
            Some("http://127.0.0.1:9/api/v1/contracts?pageNumber=1&pageSize=10")
        );
    }

    #[tokio::test]
    async fn disabled_list_does_not_touch_the_cache() {
        let cache = SwrCache::default();
        let list = ListResource::<Contract>::new(api(), cache.clone(), ContractQuery::default())
            .with_enabled(false);

        assert_eq!(list.key().unwrap(), None);
        let vm = list.fetch().await;
        assert!(vm.entities.is_empty());
        assert!(vm.mutate.is_none());
        assert_eq!(vm.status(), ListStatus::Empty);
        assert!(cache.is_empty());
    }

    #[test]
    fn set_query_changes_key() {
        let mut list = ListResource::<Contract>::disabled(api(), SwrCache::default());
        assert!(list.query().is_none());
        list.set_query(Some(ContractQuery::default().with_search("abc")));
        assert_eq!(
            list.key().unwrap().as_deref(),
            Some("http://127.0.0.1:9/api/v1/contracts?search=abc")
        );
    }

    #[tokio::test]
    async fn unreachable_server_surfaces_error() {
        let list =
            ListResource::<Contract>::new(api(), SwrCache::default(), ContractQuery::default());
        let vm = list.fetch().await;
        assert_eq!(vm.error, Some(Error::RequestFailed));
        assert!(vm.entities.is_empty());
        assert!(matches!(vm.status(), ListStatus::Error(_)));
        assert!(vm.mutate.is_some());
    }
}
