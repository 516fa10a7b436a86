//! Cached, session-aware wrapper around the API client.

use std::sync::Arc;

use bizadmin_api::types::{MutationResponse, Response};
use bizadmin_api::{Client, Error, Resource};
use serde::Deserialize;

use crate::cache::SwrCache;
use crate::config::Config;
use crate::error::AdminError;
use crate::resource::ListResource;
use crate::session::{Action, Session, SessionStore};
use crate::validation::{validate_id, validate_ids, Validate};
use crate::view::ListViewModel;

/// API client wrapper that adds the shared list cache, tag invalidation
/// after mutations, and permission checks against the signed-in session.
///
/// Reads go through the cache: equal queries share one entry and one
/// in-flight request. A successful `save` or `delete` marks every list
/// tagged with the resource (and its dependents) for refetch.
#[derive(Clone, Debug)]
pub struct AdminClient {
    inner: Arc<Client>,
    cache: SwrCache,
    session: Arc<SessionStore>,
}

impl AdminClient {
    pub fn new(config: &Config) -> Result<Self, AdminError> {
        let inner = Client::with_timeout(&config.base_url, config.timeout)?;
        inner.set_token(config.token.clone());
        Ok(Self {
            inner: Arc::new(inner),
            cache: SwrCache::new(config.cache.clone()),
            session: Arc::new(SessionStore::new()),
        })
    }

    /// Creates a client with default settings for the given base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, AdminError> {
        Self::new(&Config {
            base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    pub fn api(&self) -> &Client {
        &self.inner
    }

    pub fn cache(&self) -> &SwrCache {
        &self.cache
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// A list handle bound to this client's cache.
    pub fn list_resource<R: Resource>(&self, query: R::Query) -> ListResource<R> {
        ListResource::new(Arc::clone(&self.inner), self.cache.clone(), query)
    }

    /// Fetches (or reads from cache) one page of `R`.
    pub async fn list<R: Resource>(
        &self,
        query: R::Query,
    ) -> Result<ListViewModel<R::Entity>, AdminError> {
        self.session.authorize(R::NAME, Action::View)?;
        Ok(self.list_resource::<R>(query).fetch().await)
    }

    /// Fetches one record. Details are cached under their URL and tagged
    /// like the resource's lists, so mutations invalidate them too.
    pub async fn detail<R: Resource>(&self, id: &str) -> Result<R::Entity, AdminError> {
        self.session.authorize(R::NAME, Action::View)?;
        let id = validate_id(id)?;
        let url = self.inner.detail_url::<R>(&id)?;
        let key = url.to_string();
        let api = Arc::clone(&self.inner);
        let snapshot = self
            .cache
            .get(Some(&key), &[R::NAME], move || {
                let api = Arc::clone(&api);
                let url = url.clone();
                async move { api.fetch_value(url).await }
            })
            .await;

        match (snapshot.data, snapshot.error) {
            (Some(value), _) => {
                let resp = Response::<R::Entity>::deserialize(value.as_ref())
                    .map_err(|e| AdminError::Api(Error::Decode(e.to_string())))?;
                Ok(resp.data)
            }
            (None, Some(err)) => Err(err.into()),
            (None, None) => Err(AdminError::Api(Error::Decode(format!(
                "no data cached for {}",
                key
            )))),
        }
    }

    /// Creates (no or empty `id`) or updates a record, then invalidates the
    /// lists it can appear in.
    pub async fn save<R>(
        &self,
        id: Option<&str>,
        payload: &R::Payload,
    ) -> Result<MutationResponse, AdminError>
    where
        R: Resource,
        R::Payload: Validate,
    {
        let id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(validate_id)
            .transpose()?;
        let action = if id.is_some() {
            Action::Update
        } else {
            Action::Create
        };
        self.session.authorize(R::NAME, action)?;
        payload.validate()?;

        let resp = self.inner.save::<R>(id.as_deref(), payload).await?;
        self.invalidate::<R>();
        Ok(resp)
    }

    /// Deletes records, then invalidates the lists they can appear in.
    pub async fn delete<R: Resource>(
        &self,
        ids: &[String],
    ) -> Result<MutationResponse, AdminError> {
        self.session.authorize(R::NAME, Action::Delete)?;
        let ids = validate_ids(ids)?;

        let resp = self.inner.delete::<R>(&ids).await?;
        self.invalidate::<R>();
        Ok(resp)
    }

    /// Marks every cached entry tagged with `R` or its dependents for refetch.
    pub fn invalidate<R: Resource>(&self) -> usize {
        R::invalidated_tags()
            .into_iter()
            .map(|tag| self.cache.invalidate_tag(tag))
            .sum()
    }

    /// Installs the session and attaches its token to every request.
    /// Anything cached for a previous user is dropped.
    pub fn sign_in(&self, session: Session) {
        self.inner.set_token(Some(session.token.clone()));
        self.cache.clear();
        self.session.sign_in(session);
    }

    /// Clears the session, the token, and the cache.
    pub fn sign_out(&self) -> Option<Session> {
        let previous = self.session.sign_out();
        self.inner.set_token(None);
        self.cache.clear();
        previous
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
