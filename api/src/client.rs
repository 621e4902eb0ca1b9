use futures_util::future::{FutureExt, LocalBoxFuture};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::fetcher::{MetricSource, QueryPairs};
use crate::payload::{ClimberRecord, HealthStatus, Page};

/// Validated root of the API, e.g. `http://localhost:5000`.
///
/// Endpoint paths are appended textually so a base that carries a path prefix
/// (`https://host/stats`) keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|_| FetchError::Url(raw.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::Url(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link to the service's interactive documentation.
    pub fn docs_url(&self) -> String {
        format!("{}/docs", self.0)
    }
}

/// Thin reqwest wrapper for the read-only statistics endpoints.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base: ApiBase,
}

impl StatsClient {
    pub fn new(base: ApiBase) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.base.as_str(), path);
        let mut url = Url::parse(&raw).map_err(|_| FetchError::Url(raw.clone()))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET `path` and parse the body as JSON.
    ///
    /// Non-2xx answers are errors even when they carry a JSON body.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn list_climbers(&self, page: Page) -> Result<Vec<ClimberRecord>, FetchError> {
        let query = [
            ("skip", page.skip.to_string()),
            ("limit", page.limit.to_string()),
        ];
        let value = self.get_json("/climbers/", &query).await?;
        serde_json::from_value(value).map_err(|err| FetchError::shape(err.to_string()))
    }

    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        let value = self.get_json("/health", &[]).await?;
        serde_json::from_value(value).map_err(|err| FetchError::shape(err.to_string()))
    }
}

impl MetricSource for StatsClient {
    fn request_json(
        &self,
        path: &'static str,
        query: QueryPairs,
    ) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        let client = self.clone();
        async move { client.get_json(path, &query).await }.boxed_local()
    }
}
