//! Presentation adapter: turns metric results into chart-ready series.

use api::{Distribution, MetricId, MetricResult, MetricStatus, ScatterRecord};
use tracing::{debug, warn};

/// Experience buckets always render in this order.
pub const EXPERIENCE_BUCKETS: [&str; 4] = ["0-2", "3-5", "6-10", "10+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    Categories { labels: Vec<String>, values: Vec<u64> },
    Points(Vec<(f64, f64)>),
}

impl SeriesData {
    pub fn is_empty(&self) -> bool {
        match self {
            SeriesData::Categories { values, .. } => values.is_empty(),
            SeriesData::Points(points) => points.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub status: SeriesStatus,
    pub data: SeriesData,
}

impl ChartSeries {
    /// Placeholder series of the right kind for `metric`.
    pub fn empty(metric: MetricId, status: SeriesStatus) -> Self {
        let data = match metric {
            MetricId::AgeGradeScatter => SeriesData::Points(Vec::new()),
            _ => SeriesData::Categories {
                labels: Vec::new(),
                values: Vec::new(),
            },
        };
        Self { status, data }
    }

    pub fn labels(&self) -> &[String] {
        match &self.data {
            SeriesData::Categories { labels, .. } => labels,
            SeriesData::Points(_) => &[],
        }
    }

    pub fn values(&self) -> &[u64] {
        match &self.data {
            SeriesData::Categories { values, .. } => values,
            SeriesData::Points(_) => &[],
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        match &self.data {
            SeriesData::Points(points) => points,
            SeriesData::Categories { .. } => &[],
        }
    }
}

pub fn adapt(result: &MetricResult) -> ChartSeries {
    let status = match result.status {
        MetricStatus::Idle => SeriesStatus::Idle,
        MetricStatus::Pending => SeriesStatus::Loading,
        MetricStatus::Failed => SeriesStatus::Failed,
        MetricStatus::Ready => SeriesStatus::Ready,
    };
    if status != SeriesStatus::Ready {
        return ChartSeries::empty(result.metric, status);
    }

    let data = match (result.metric, result.data.as_ref()) {
        (MetricId::AgeGradeScatter, Some(payload)) => payload.as_scatter().map(points),
        (MetricId::ExperiencePie, Some(payload)) => payload.as_distribution().map(experience),
        (MetricId::GenderPie | MetricId::GenderBar, Some(payload)) => {
            payload.as_distribution().map(genders)
        }
        (MetricId::CountryPie, Some(payload)) => payload.as_distribution().map(categories),
        (_, None) => None,
    };

    match data {
        Some(data) => ChartSeries { status, data },
        // A ready result whose payload kind disagrees with the metric.
        None => ChartSeries::empty(result.metric, SeriesStatus::Failed),
    }
}

fn categories(dist: &Distribution) -> SeriesData {
    let (labels, values): (Vec<String>, Vec<u64>) = dist.entries().iter().cloned().unzip();
    SeriesData::Categories { labels, values }
}

/// The backend keys the gender split by sex code.
fn genders(dist: &Distribution) -> SeriesData {
    let (labels, values): (Vec<String>, Vec<u64>) = dist
        .entries()
        .iter()
        .map(|(key, count)| {
            let label = match key.as_str() {
                "0" => "male".to_string(),
                "1" => "female".to_string(),
                other => other.to_string(),
            };
            (label, *count)
        })
        .unzip();
    SeriesData::Categories { labels, values }
}

fn experience(dist: &Distribution) -> SeriesData {
    let mut labels: Vec<String> = EXPERIENCE_BUCKETS.iter().map(|b| b.to_string()).collect();
    let mut values = vec![0u64; EXPERIENCE_BUCKETS.len()];
    let mut seen = [false; EXPERIENCE_BUCKETS.len()];

    // Unknown keys follow the fixed buckets so the total is never lost.
    for (key, count) in dist.entries() {
        let bucket = key.trim().trim_end_matches("ans").trim();
        match EXPERIENCE_BUCKETS.iter().position(|b| *b == bucket) {
            Some(idx) => {
                if seen[idx] {
                    debug!(key = %key, bucket, "merging duplicate experience bucket");
                }
                seen[idx] = true;
                values[idx] += *count;
            }
            None => {
                warn!(key = %key, "unrecognised experience bucket");
                labels.push(key.clone());
                values.push(*count);
            }
        }
    }
    SeriesData::Categories { labels, values }
}

fn points(records: &[ScatterRecord]) -> SeriesData {
    SeriesData::Points(
        records
            .iter()
            .map(|r| (r.age, r.average_grade_max))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MetricPayload, PayloadShape};
    use serde_json::json;

    fn ready(metric: MetricId, body: serde_json::Value) -> MetricResult {
        let payload = MetricPayload::parse(metric.shape(), body).unwrap();
        MetricResult::ready(metric, 1, payload)
    }

    #[test]
    fn country_keeps_backend_order() {
        let series = adapt(&ready(MetricId::CountryPie, json!({"FR": 10, "US": 5})));
        assert_eq!(series.status, SeriesStatus::Ready);
        assert_eq!(series.labels(), ["FR", "US"]);
        assert_eq!(series.values(), [10, 5]);
    }

    #[test]
    fn distribution_sum_is_preserved() {
        let body = json!({"FR": 10, "US": 5, "DE": 7, "JP": 0});
        let total = MetricPayload::parse(PayloadShape::Distribution, body.clone())
            .unwrap()
            .as_distribution()
            .unwrap()
            .total();
        let series = adapt(&ready(MetricId::CountryPie, body));
        assert_eq!(series.values().iter().sum::<u64>(), total);
    }

    #[test]
    fn experience_uses_fixed_order() {
        let series = adapt(&ready(
            MetricId::ExperiencePie,
            json!({"10+ ans": 4, "0-2 ans": 9, "6-10 ans": 2, "3-5 ans": 6}),
        ));
        assert_eq!(series.labels(), EXPERIENCE_BUCKETS);
        assert_eq!(series.values(), [9, 6, 2, 4]);
    }

    #[test]
    fn experience_keeps_unknown_buckets_after_known_ones() {
        let body = json!({"0-2 ans": 9, "inconnu": 7, "3-5 ans": 6, "6-10 ans": 2, "10+ ans": 4});
        let series = adapt(&ready(MetricId::ExperiencePie, body));
        assert_eq!(series.labels(), ["0-2", "3-5", "6-10", "10+", "inconnu"]);
        assert_eq!(series.values(), [9, 6, 2, 4, 7]);
        assert_eq!(series.values().iter().sum::<u64>(), 28);
    }

    #[test]
    fn experience_merges_spellings_of_one_bucket() {
        let series = adapt(&ready(MetricId::ExperiencePie, json!({"0-2": 3, "0-2 ans": 5})));
        assert_eq!(series.labels(), EXPERIENCE_BUCKETS);
        assert_eq!(series.values(), [8, 0, 0, 0]);
    }

    #[test]
    fn experience_missing_buckets_are_zero() {
        let series = adapt(&ready(MetricId::ExperiencePie, json!({"3-5": 6})));
        assert_eq!(series.values(), [0, 6, 0, 0]);
    }

    #[test]
    fn gender_codes_become_labels() {
        let series = adapt(&ready(MetricId::GenderBar, json!({"0": 30, "1": 12})));
        assert_eq!(series.labels(), ["male", "female"]);
        assert_eq!(series.values(), [30, 12]);
    }

    #[test]
    fn scatter_keeps_order_and_duplicates() {
        let series = adapt(&ready(
            MetricId::AgeGradeScatter,
            json!([
                {"age": 30, "average_grade_max": 60.0},
                {"age": 20, "average_grade_max": 55.5},
                {"age": 30, "average_grade_max": 60.0}
            ]),
        ));
        assert_eq!(series.points(), [(30.0, 60.0), (20.0, 55.5), (30.0, 60.0)]);
    }

    #[test]
    fn pending_and_failed_are_empty() {
        let loading = adapt(&MetricResult::pending(MetricId::CountryPie, 3));
        assert_eq!(loading.status, SeriesStatus::Loading);
        assert!(loading.data.is_empty());

        let failed = adapt(&MetricResult::failed(MetricId::AgeGradeScatter, 3, "boom"));
        assert_eq!(failed.status, SeriesStatus::Failed);
        assert!(matches!(failed.data, SeriesData::Points(ref p) if p.is_empty()));
    }
}
