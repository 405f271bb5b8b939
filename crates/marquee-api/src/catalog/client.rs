//! `CatalogClient` - TMDB catalog client implementation.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::{CatalogError, Result};
use super::filter::FilterSet;
use super::request::{self, CatalogRequest};
use super::types::{ErrorBody, Genre, GenreList, MovieDetail, MovieSummary, PagedResult};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default `vote_count.gte` floor for quality-ranked listings.
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 200;

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB catalog client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Response language (`language` parameter).
    language: String,
    /// Vote floor for quality-ranked discovery.
    min_vote_count: u32,
    /// Request counter, exported through OpenTelemetry.
    #[cfg(feature = "otel")]
    requests: opentelemetry::metrics::Counter<u64>,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    min_vote_count: Option<u32>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            language: None,
            min_vote_count: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (default: `marquee-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the vote floor for rating/popularity listings (default: 200).
    #[must_use]
    pub const fn min_vote_count(mut self, floor: u32) -> Self {
        self.min_vote_count = Some(floor);
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingCredential`] if `api_token` is unset or blank.
    /// - [`CatalogError::InvalidRequest`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<CatalogClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(CatalogError::MissingCredential)?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| CatalogError::InvalidRequest(format!("invalid default base URL: {e}")))?
        };

        let user_agent = self.user_agent.unwrap_or_else(|| {
            String::from(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        });

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| CatalogError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_token,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            min_vote_count: self.min_vote_count.unwrap_or(DEFAULT_MIN_VOTE_COUNT),
            #[cfg(feature = "otel")]
            requests: opentelemetry::global::meter(env!("CARGO_PKG_NAME"))
                .u64_counter("catalog.requests")
                .with_description("Catalog HTTP requests by status")
                .build(),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Vote floor applied to quality-ranked discovery.
    #[must_use]
    pub const fn min_vote_count(&self) -> u32 {
        self.min_vote_count
    }

    /// Sends a GET request with Bearer auth and the request's query params.
    ///
    /// No retries: every failure is returned to the caller.
    #[instrument(skip_all, fields(path = %request.path))]
    async fn get_json<T: DeserializeOwned>(&self, request: &CatalogRequest) -> Result<T> {
        let url = self.base_url.join(&request.path).map_err(|e| {
            CatalogError::InvalidRequest(format!("failed to join URL path {}: {e}", request.path))
        })?;

        let http_request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(&request.query)
            .query(&[("language", self.language.as_str())])
            .build()
            .map_err(CatalogError::Network)?;

        tracing::debug!(url = %http_request.url(), "catalog request");

        let response = self
            .http_client
            .execute(http_request)
            .await
            .map_err(CatalogError::Network)?;
        let status = response.status();
        self.record_request(status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|e| e.status_message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| {
                    String::from(status.canonical_reason().unwrap_or("unknown status"))
                });
            tracing::warn!(status = status.as_u16(), %message, "catalog request rejected");
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(CatalogError::Network)?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            path: request.path.clone(),
            source,
        })
    }

    #[cfg(feature = "otel")]
    fn record_request(&self, status: u16) {
        self.requests.add(
            1,
            &[opentelemetry::KeyValue::new(
                "http.response.status_code",
                i64::from(status),
            )],
        );
    }

    #[cfg(not(feature = "otel"))]
    #[allow(clippy::unused_self)]
    const fn record_request(&self, _status: u16) {}
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn search(&self, term: &str, page: u32) -> Result<PagedResult<MovieSummary>> {
        self.get_json(&request::search(term, page)).await
    }

    #[instrument(skip_all)]
    async fn discover(&self, filters: &FilterSet, page: u32) -> Result<PagedResult<MovieSummary>> {
        self.get_json(&request::discover(filters, page, self.min_vote_count))
            .await
    }

    #[instrument(skip_all)]
    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json(&request::genres()).await?;
        Ok(list.genres)
    }

    #[instrument(skip_all)]
    async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
        self.get_json(&request::movie_detail(id)).await
    }
}
