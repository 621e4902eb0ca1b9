//! HTTP client crate for the climbing statistics API.
//!
//! Everything that knows about the remote service lives here: endpoint paths,
//! per-metric query mapping, payload schemas and the transport itself. The UI
//! crate only sees [`MetricResult`] values and typed payloads.

mod client;
mod error;
mod fetcher;
mod metric;
mod payload;
mod query;

pub use client::{ApiBase, StatsClient};
pub use error::FetchError;
pub use fetcher::{DataFetcher, MetricResult, MetricSource, MetricStatus, QueryPairs};
pub use metric::{MetricId, MetricRequest, ParamMapping, PayloadShape};
pub use payload::{ClimberRecord, Distribution, HealthStatus, MetricPayload, Page, ScatterRecord};
pub use query::{FilterSnapshot, Gender};
