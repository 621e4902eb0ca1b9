//! Per-metric fetch: filter snapshot in, [`MetricResult`] out, never an error.

use std::fmt;

use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::metric::{MetricId, MetricRequest};
use crate::payload::MetricPayload;
use crate::query::FilterSnapshot;

/// Query parameters in the order they are appended to the URL.
pub type QueryPairs = Vec<(&'static str, String)>;

/// Transport seam: anything that can answer a GET with a JSON document.
///
/// Futures are local (`!Send`) because the browser transport is.
pub trait MetricSource {
    fn request_json(
        &self,
        path: &'static str,
        query: QueryPairs,
    ) -> LocalBoxFuture<'static, Result<Value, FetchError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// State of one metric, tagged with the filter version that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub metric: MetricId,
    pub status: MetricStatus,
    pub data: Option<MetricPayload>,
    pub request_version: u64,
    pub error: Option<String>,
}

impl MetricResult {
    pub fn idle(metric: MetricId) -> Self {
        Self {
            metric,
            status: MetricStatus::Idle,
            data: None,
            request_version: 0,
            error: None,
        }
    }

    pub fn pending(metric: MetricId, version: u64) -> Self {
        Self {
            status: MetricStatus::Pending,
            request_version: version,
            ..Self::idle(metric)
        }
    }

    pub fn ready(metric: MetricId, version: u64, data: MetricPayload) -> Self {
        Self {
            status: MetricStatus::Ready,
            data: Some(data),
            request_version: version,
            ..Self::idle(metric)
        }
    }

    pub fn failed(metric: MetricId, version: u64, error: impl fmt::Display) -> Self {
        Self {
            status: MetricStatus::Failed,
            request_version: version,
            error: Some(error.to_string()),
            ..Self::idle(metric)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MetricStatus::Pending
    }
}

/// Issues metric requests against a [`MetricSource`].
#[derive(Debug, Clone)]
pub struct DataFetcher<S> {
    source: S,
}

impl<S: MetricSource> DataFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Start one request. Transport and payload failures resolve to a
    /// `Failed` result so sibling metrics are never affected.
    pub fn fetch(
        &self,
        request: &MetricRequest,
        filter: FilterSnapshot,
    ) -> LocalBoxFuture<'static, MetricResult> {
        let metric = request.id;
        let version = filter.version;
        let shape = metric.shape();
        let response = self.source.request_json(request.endpoint, request.params(&filter));
        debug!(metric = metric.key(), version, "fetch issued");

        async move {
            match response
                .await
                .and_then(|body| MetricPayload::parse(shape, body))
            {
                Ok(payload) => MetricResult::ready(metric, version, payload),
                Err(err) => {
                    warn!(metric = metric.key(), version, transport = err.is_transport(), "fetch failed: {err}");
                    MetricResult::failed(metric, version, err)
                }
            }
        }
        .boxed_local()
    }
}
