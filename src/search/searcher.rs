//! Paginated search client
//!
//! Issues sequential page requests against `search/{kind}` and accumulates
//! items until the query's limit is reached or the provider stops sending a
//! `rel="next"` link.
//!
//! ## Paging
//!
//! 1. Each request asks for `min(remaining, 100)` items.
//! 2. The first request is page 1; later pages come only from the previous
//!    response's `Link` header.
//! 3. `remaining` shrinks by the items actually returned, so a short page
//!    never ends the fetch on its own.

use crate::models::{RepositoriesResult, SearchResult};
use crate::search::error::{translate_error, SearchError};
use crate::search::pagination::PageState;
use crate::search::query::Query;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LINK};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const CONTENT_TYPE_HEADER: &str = "application/json; charset=utf-8";

/// Search operations the command layer depends on
#[async_trait]
pub trait RepositorySearcher: Send + Sync {
    async fn repositories(&self, query: &Query) -> Result<RepositoriesResult, SearchError>;

    /// Browser URL of the provider's own result page
    fn url(&self, query: &Query) -> String;
}

/// REST search client for one host
#[derive(Debug, Clone)]
pub struct Searcher {
    client: Client,
    host: String,
    api_base: String,
}

impl Searcher {
    pub fn new(client: Client, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            client,
            api_base: rest_prefix(&host),
            host,
        }
    }

    /// Override the REST API base, e.g. for a proxy or a local test server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }
        self.api_base = api_base;
        self
    }

    /// Configure a searcher from config
    pub fn from_config(client: Client, config: &crate::config::SearchConfig) -> Self {
        let searcher = Self::new(client, config.host.clone());
        match &config.api_url {
            Some(api_url) => searcher.with_api_base(api_url.clone()),
            None => searcher,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch up to `query.limit` items.
    ///
    /// Any error aborts the whole fetch; pages merged before the failure
    /// are dropped with it.
    pub async fn search<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<SearchResult<T>, SearchError> {
        let compiled = query.to_query_string();
        let mut result = SearchResult::default();
        let mut state = PageState::new(query.limit);

        info!(kind = %query.kind, query = %compiled, limit = query.limit, "Searching");

        while let Some((page, per_page)) = state.next_request() {
            let (page_result, link) = self.fetch_page::<T>(query, &compiled, page, per_page).await?;
            let received = page_result.items.len();
            result.merge(page_result);
            state.advance(received, link.as_deref());

            debug!(
                page,
                received,
                remaining = state.remaining,
                next_page = ?state.next_page,
                "Search page merged"
            );
        }

        // A provider that ignores `per_page` must not push us past the limit.
        result.items.truncate(query.limit);

        info!(
            count = result.items.len(),
            total = result.total,
            incomplete = result.incomplete_results,
            "Search completed"
        );
        Ok(result)
    }

    /// Request a single page; returns it with the response's `Link` header.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        query: &Query,
        compiled: &str,
        page: u32,
        per_page: usize,
    ) -> Result<(SearchResult<T>, Option<String>), SearchError> {
        let url = format!("{}search/{}", self.api_base, query.kind);

        let mut params: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("q", compiled.to_string()),
        ];
        params.extend(query.parameters().into_iter().map(|(k, v)| (k, v.to_string())));

        debug!(url = %url, page, per_page, "Requesting search page");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(CONTENT_TYPE, CONTENT_TYPE_HEADER)
            .header(ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(translate_error(response).await);
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await?;
        let page_result: SearchResult<T> = serde_json::from_slice(&body)?;

        Ok((page_result, link))
    }

    pub fn url(&self, query: &Query) -> String {
        query.browser_url(&self.host)
    }
}

#[async_trait]
impl RepositorySearcher for Searcher {
    async fn repositories(&self, query: &Query) -> Result<RepositoriesResult, SearchError> {
        self.search(query).await
    }

    fn url(&self, query: &Query) -> String {
        Searcher::url(self, query)
    }
}

/// REST API base for a host: the public API for `github.com`, the
/// `/api/v3/` prefix for enterprise hosts.
pub fn rest_prefix(host: &str) -> String {
    let host = host.trim_end_matches('/').to_lowercase();
    if host == "github.com" || host == "api.github.com" {
        "https://api.github.com/".to_string()
    } else if host == "github.localhost" {
        "http://api.github.localhost/".to_string()
    } else if host.ends_with(".ghe.com") {
        format!("https://api.{}/", host)
    } else {
        format!("https://{}/api/v3/", host)
    }
}
