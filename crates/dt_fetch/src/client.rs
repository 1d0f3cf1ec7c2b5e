use async_trait::async_trait;
use dt_core::{Article, ArticleSource, Error, FetchError, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use serde_json::Value;
use crate::normalize::normalize_value;

pub const DEFAULT_BASE_URL: &str = "https://dev.to/api";
const API_KEY_HEADER: &str = "api-key";
const API_MEDIA_TYPE: &str = "application/vnd.forem.api-v1+json";
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API root, without the `/articles` suffix.
    pub base_url: String,
    /// Upper bound for each request, body included.
    pub timeout: Duration,
    /// Page size requested from the API (the API caps it at 1000).
    pub per_page: u32,
    /// Stop with an error rather than paginate forever.
    pub max_pages: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            per_page: 1000,
            max_pages: 100,
        }
    }
}

/// Client for the DEV (Forem) articles API.
pub struct DevToClient {
    client: reqwest::Client,
    api_key: String,
    config: FetchConfig,
}

impl DevToClient {
    pub fn new(api_key: &str, config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(client, api_key, config)
    }

    /// Uses a preconfigured `reqwest::Client`. The per-request timeout from
    /// `config` still applies.
    pub fn with_client(client: reqwest::Client, api_key: &str, config: FetchConfig) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }
        if config.per_page == 0 {
            return Err(Error::Config("page size must be at least 1".to_string()));
        }
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", config.base_url, e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            config,
        })
    }

    fn page_url(&self, page: u32) -> Result<Url> {
        let endpoint = format!(
            "{}/articles/me/published",
            self.config.base_url.trim_end_matches('/')
        );
        let mut url = Url::parse(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.config.per_page.to_string());
        Ok(url)
    }

    /// A body that is not a JSON array is malformed; its elements are only
    /// checked later, one by one, by [`normalize_value`].
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>> {
        let url = self.page_url(page)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, API_MEDIA_TYPE)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized(status.as_u16()).into());
        }
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.text().await.map_err(FetchError::from)?;
        serde_json::from_str::<Vec<Value>>(&body)
            .map_err(|e| FetchError::Malformed(format!("page {}: {}", page, e)).into())
    }
}

#[async_trait]
impl ArticleSource for DevToClient {
    fn name(&self) -> &str {
        "DEV"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        info!("🔄 Fetching your {} articles...", self.name());
        let mut articles = Vec::new();

        for page in 1..=self.config.max_pages {
            let raw = self.fetch_page(page).await?;
            let received = raw.len();
            debug!("Page {} returned {} articles", page, received);

            for record in raw {
                let normalized = normalize_value(record);
                for issue in &normalized.issues {
                    warn!(
                        "⚠️ Article {} ({}): {}",
                        normalized.article.id, normalized.article.title, issue
                    );
                }
                articles.push(normalized.article);
            }

            if received < self.config.per_page as usize {
                info!("✅ Loaded {} articles", articles.len());
                return Ok(articles);
            }
        }

        Err(FetchError::Malformed(format!(
            "pagination did not end after {} pages of {}",
            self.config.max_pages, self.config.per_page
        ))
        .into())
    }
}
