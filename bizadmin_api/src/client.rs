//! HTTP client for the business-administration REST API.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    errors::ErrorPayload,
    query::Query,
    types::{DeleteMode, ListEnvelope, MutationResponse, Resource, Response},
    Error,
};

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("bizadmin/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the admin API.
///
/// Requests fail fast: there is no retry, and the only time limit is the
/// transport timeout. A bearer token, when set, is attached to every request.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl Client {
    /// Creates a client for the given base URL with the default timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client for the given base URL and transport timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Sets or clears the bearer token sent with each request.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    /// Resolves `path` with `id` appended as one percent-encoded segment, so
    /// `/`, `?` and `#` inside an id cannot change the endpoint or query.
    fn get_url_with_id(&self, path: &str, id: &str) -> Result<Url, Error> {
        if id.is_empty() || id == "." || id == ".." {
            tracing::error!("Refusing record id {:?} as a path segment", id);
            return Err(Error::InvalidUrl(format!("invalid record id '{}'", id)));
        }
        let mut url = self.get_url(path)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot take a path segment", path)))?
            .push(id);
        Ok(url)
    }

    /// Resolves the list URL for a query. The string form of this URL is
    /// the cache key for the list.
    pub fn list_url<R: Resource>(&self, query: &R::Query) -> Result<Url, Error> {
        Ok(query.add_to_url(&self.get_url(&R::list_path())?))
    }

    /// Resolves the detail URL for one record.
    pub fn detail_url<R: Resource>(&self, id: &str) -> Result<Url, Error> {
        self.get_url_with_id(&R::detail_path(), id)
    }

    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<String, Error>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .header("accept", "application/json, text/plain, */*");
        let token = self
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} {} failed with status {}: {}", method, url, status, snippet);
            let payload = serde_json::from_str::<ErrorPayload>(&body).ok();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
                payload,
            });
        }

        Ok(body)
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str::<T>(body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(body));
            Error::Decode(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.send::<()>(Method::GET, url, None).await?;
        Self::parse(&body)
    }

    /// Fetches any JSON resource without interpreting it. This is the
    /// fetcher the cache layer uses.
    pub async fn fetch_value(&self, url: Url) -> Result<serde_json::Value, Error> {
        self.get(url).await
    }

    /// Fetches one page of a resource's list endpoint.
    pub async fn get_list<R: Resource>(
        &self,
        query: &R::Query,
    ) -> Result<ListEnvelope<R::Entity>, Error> {
        self.get(self.list_url::<R>(query)?).await
    }

    /// Fetches a single record by id.
    pub async fn get_detail<R: Resource>(&self, id: &str) -> Result<Response<R::Entity>, Error> {
        self.get(self.detail_url::<R>(id)?).await
    }

    /// `POST /api/v1/<name>/create`.
    pub async fn create<R: Resource>(
        &self,
        payload: &R::Payload,
    ) -> Result<MutationResponse, Error> {
        let url = self.get_url(&R::create_path())?;
        let body = self.send(Method::POST, url, Some(payload)).await?;
        Self::parse(&body)
    }

    /// `PATCH /api/v1/<name>/update/{id}`.
    pub async fn update<R: Resource>(
        &self,
        id: &str,
        payload: &R::Payload,
    ) -> Result<MutationResponse, Error> {
        let url = self.get_url_with_id(&R::update_path(), id)?;
        let body = self.send(Method::PATCH, url, Some(payload)).await?;
        Self::parse(&body)
    }

    /// Updates when `id` is present and non-empty, creates otherwise.
    pub async fn save<R: Resource>(
        &self,
        id: Option<&str>,
        payload: &R::Payload,
    ) -> Result<MutationResponse, Error> {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => self.update::<R>(id, payload).await,
            None => self.create::<R>(payload).await,
        }
    }

    /// Deletes records using the resource's [`DeleteMode`].
    ///
    /// In `ById` mode ids are deleted one at a time and the first failure
    /// stops the run; the response of the last delete is returned.
    pub async fn delete<R: Resource>(&self, ids: &[String]) -> Result<MutationResponse, Error> {
        match R::DELETE_MODE {
            DeleteMode::ById => {
                let mut last = MutationResponse::default();
                for id in ids {
                    let url = self.get_url_with_id(&R::delete_path(), id)?;
                    let body = self.send::<()>(Method::DELETE, url, None).await?;
                    last = Self::parse(&body)?;
                }
                Ok(last)
            }
            DeleteMode::IdList => {
                let url = self.get_url(&R::delete_path())?;
                let body = serde_json::json!({ "ids": ids });
                let body = self.send(Method::DELETE, url, Some(&body)).await?;
                Self::parse(&body)
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ContractQuery, ListQuery, Query};
    use crate::types::{Category, Contract};

    #[test]
    fn list_url_is_stable_for_equal_queries() {
        let client = Client::with_base_url("https://admin.example.com/").unwrap();
        let a = ContractQuery::default()
            .with_page_number(1)
            .with_page_size(10)
            .with_search("abc");
        let b = a.clone();
        assert_eq!(
            client.list_url::<Contract>(&a).unwrap(),
            client.list_url::<Contract>(&b).unwrap()
        );
        insta::assert_snapshot!(
            client.list_url::<Contract>(&a).unwrap().to_string(),
            @"https://admin.example.com/api/v1/contracts?pageNumber=1&pageSize=10&search=abc"
        );
    }

    #[test]
    fn detail_url_uses_singular_name() {
        let client = Client::with_base_url("https://admin.example.com").unwrap();
        assert_eq!(
            client.detail_url::<Category>("7").unwrap().path(),
            "/api/v1/category/get-detail/7"
        );
        let url = client.list_url::<Category>(&ListQuery::default()).unwrap();
        assert_eq!(url.path(), "/api/v1/categories");
        assert!(url.query().is_none());
    }

    #[test]
    fn ids_are_encoded_as_one_path_segment() {
        let client = Client::with_base_url("https://admin.example.com").unwrap();
        let url = client.detail_url::<Contract>("ct-1?hard=true#x").unwrap();
        assert_eq!(url.path(), "/api/v1/contract/get-detail/ct-1%3Fhard=true%23x");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = client.detail_url::<Contract>("a/b").unwrap();
        assert_eq!(url.path(), "/api/v1/contract/get-detail/a%2Fb");
    }

    #[test]
    fn dot_segments_are_refused() {
        let client = Client::with_base_url("https://admin.example.com").unwrap();
        for id in ["", ".", ".."] {
            assert!(matches!(
                client.detail_url::<Contract>(id),
                Err(Error::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let client = Client::with_base_url("https://admin.example.com").unwrap();
        assert!(!client.has_token());
        client.set_token(Some("t0k3n".to_string()));
        assert!(client.has_token());
        client.set_token(None);
        assert!(!client.has_token());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
    }
}
