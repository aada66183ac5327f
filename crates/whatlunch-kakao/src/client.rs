//! HTTP client for the Kakao Local search endpoints.
//!
//! Handles `KakaoAK` authorization, query encoding, non-2xx error bodies and
//! page-by-page collection. Place and address search results are returned
//! as raw [`PlaceDocument`]/[`AddressDocument`] values; the
//! [`whatlunch_core::PlacesIndex`] impl normalizes them.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use whatlunch_core::{AppConfig, CategoryCode, Coordinate, Radius, SearchScope};

use crate::error::KakaoError;
use crate::types::{AddressDocument, ErrorBody, PlaceDocument, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const CATEGORY_PATH: &str = "v2/local/search/category.json";
const KEYWORD_PATH: &str = "v2/local/search/keyword.json";
const ADDRESS_PATH: &str = "v2/local/search/address.json";

/// Kakao's page size ceiling for place searches.
const PLACE_PAGE_SIZE: u32 = 15;
/// Kakao rejects radii above 20 km.
const MAX_WIRE_RADIUS_M: u32 = 20_000;

/// Client for the Kakao Local REST API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_pages: u32,
}

impl std::fmt::Debug for KakaoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

impl KakaoClient {
    /// Creates a client pointed at the production Kakao API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, KakaoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`KakaoError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_pages: 1,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`KakaoClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, KakaoError> {
        Ok(Self::with_base_url(
            &config.kakao_rest_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.kakao_base_url,
        )?
        .with_max_pages(config.max_pages))
    }

    /// Sets how many result pages each place query may fetch. Clamped to at
    /// least one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Places in one category group around `origin`.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Api`] if Kakao answers with a non-2xx status.
    /// - [`KakaoError::Http`] on network failure.
    /// - [`KakaoError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_category(
        &self,
        code: CategoryCode,
        origin: Coordinate,
        radius: Radius,
    ) -> Result<Vec<PlaceDocument>, KakaoError> {
        let mut params = vec![("category_group_code", code.as_str().to_string())];
        params.extend(scope_params(origin, radius));
        self.collect_places(CATEGORY_PATH, &params).await
    }

    /// Places matching `query`, optionally restricted to a circle.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::search_category`].
    pub async fn search_keyword(
        &self,
        query: &str,
        scope: Option<SearchScope>,
    ) -> Result<Vec<PlaceDocument>, KakaoError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(scope) = scope {
            params.extend(scope_params(scope.origin, scope.radius));
        }
        self.collect_places(KEYWORD_PATH, &params).await
    }

    /// Addresses matching `query`. Only the first page is requested.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::search_category`].
    pub async fn search_address(&self, query: &str) -> Result<Vec<AddressDocument>, KakaoError> {
        let url = self.build_url(ADDRESS_PATH, &[("query", query.to_string())])?;
        let response: SearchResponse<AddressDocument> =
            self.request_json(&url, &format!("address(query={query})")).await?;
        tracing::debug!(
            query,
            count = response.documents.len(),
            "kakao address search"
        );
        Ok(response.documents)
    }

    /// Fetches pages `1..=max_pages` of a place search, stopping early once
    /// Kakao flags the last page.
    async fn collect_places(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<PlaceDocument>, KakaoError> {
        let mut documents = Vec::new();

        for page in 1..=self.max_pages {
            let mut paged = params.to_vec();
            paged.push(("page", page.to_string()));
            paged.push(("size", PLACE_PAGE_SIZE.to_string()));

            let url = self.build_url(path, &paged)?;
            let response: SearchResponse<PlaceDocument> =
                self.request_json(&url, path).await?;

            tracing::debug!(
                path,
                page,
                count = response.documents.len(),
                total = response.meta.total_count,
                is_end = response.meta.is_end,
                "kakao place search page"
            );

            let is_end = response.meta.is_end || response.documents.is_empty();
            documents.extend(response.documents);
            if is_end {
                break;
            }
        }

        Ok(documents)
    }

    /// Joins `path` onto the base URL and appends percent-encoded parameters.
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, KakaoError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| KakaoError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authorized GET and decodes the JSON body.
    ///
    /// Non-2xx statuses are turned into [`KakaoError::Api`] using Kakao's
    /// `{errorType, message}` body when it parses.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, KakaoError> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("KakaoAK {}", self.api_key),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default();
            let message = if parsed.message.is_empty() {
                body.chars().take(200).collect()
            } else {
                parsed.message
            };
            tracing::warn!(
                status = status.as_u16(),
                error_type = %parsed.error_type,
                context,
                "kakao request rejected"
            );
            return Err(KakaoError::Api {
                status: status.as_u16(),
                error_type: if parsed.error_type.is_empty() {
                    "unknown".to_string()
                } else {
                    parsed.error_type
                },
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| KakaoError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn scope_params(origin: Coordinate, radius: Radius) -> [(&'static str, String); 3] {
    [
        ("x", origin.lng.to_string()),
        ("y", origin.lat.to_string()),
        (
            "radius",
            radius.meters().min(MAX_WIRE_RADIUS_M).to_string(),
        ),
    ]
}
