//! HTTP client for the CineMatch recommendation endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{ClientError, Result};
use super::models::Page;
use crate::config::ApiConfig;

/// Path of the recommendation endpoint, relative to the service base URL.
pub const RECOMMENDATIONS_PATH: &str = "cinematch/recommendations/";

/// Anything that can produce pages of `T` for the cursor controller.
///
/// The search locator is built once per query; every later page is fetched
/// from a server-issued locator, used verbatim.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Build the locator of the first page for a free-text query.
    fn search_locator(&self, query: &str) -> Result<String>;

    /// Fetch one page from a complete locator.
    async fn fetch_page(&self, locator: &str) -> Result<Page<T>>;
}

/// Client for `GET <base>/cinematch/recommendations/?query=..&count=..`.
#[derive(Clone)]
pub struct RecommendationClient {
    base_url: Url,
    page_size: u32,
    client: Client,
}

impl RecommendationClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            base_url: normalize_base(&config.base_url)?,
            page_size: config.page_size.max(1),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Locator for the first page of `query`.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self.base_url.join(RECOMMENDATIONS_PATH)?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("count", &self.page_size.to_string());
        Ok(url)
    }

    /// GET a locator and decode the page envelope.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_page<T: DeserializeOwned>(&self, locator: &str) -> Result<Page<T>> {
        let url = Url::parse(locator)?;
        log::debug!("GET {url}");

        let start = std::time::Instant::now();
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            log::warn!(
                "Recommendation fetch failed with HTTP {} after {}ms",
                status.as_u16(),
                start.elapsed().as_millis()
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let page: Page<T> = serde_json::from_slice(&body)?;
        log::info!(
            "Fetched {} results in {}ms (next: {}, previous: {})",
            page.results.len(),
            start.elapsed().as_millis(),
            page.next.is_some(),
            page.previous.is_some()
        );
        Ok(page)
    }
}

#[async_trait]
impl<T> PageSource<T> for RecommendationClient
where
    T: DeserializeOwned + Send + 'static,
{
    fn search_locator(&self, query: &str) -> Result<String> {
        Ok(self.search_url(query)?.into())
    }

    async fn fetch_page(&self, locator: &str) -> Result<Page<T>> {
        self.get_page(locator).await
    }
}

/// Parse the configured base and make sure it ends in `/` so that
/// `Url::join` appends rather than replaces the last path segment.
fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
