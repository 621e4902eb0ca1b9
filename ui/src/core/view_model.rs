//! Read-only aggregate consumed by the dashboard view.

use api::{FilterSnapshot, MetricId, MetricResult};

use super::present::{adapt, ChartSeries, SeriesStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    pub filter: FilterSnapshot,
    pub gender_pie: ChartSeries,
    pub experience: ChartSeries,
    pub country: ChartSeries,
    pub gender_bar: ChartSeries,
    pub scatter: ChartSeries,
}

impl DashboardViewModel {
    pub fn build(filter: FilterSnapshot, results: &[MetricResult]) -> Self {
        let series = |metric: MetricId| {
            results
                .iter()
                .find(|r| r.metric == metric)
                .map(adapt)
                .unwrap_or_else(|| ChartSeries::empty(metric, SeriesStatus::Idle))
        };

        Self {
            filter,
            gender_pie: series(MetricId::GenderPie),
            experience: series(MetricId::ExperiencePie),
            country: series(MetricId::CountryPie),
            gender_bar: series(MetricId::GenderBar),
            scatter: series(MetricId::AgeGradeScatter),
        }
    }

    pub fn series(&self, metric: MetricId) -> &ChartSeries {
        match metric {
            MetricId::GenderPie => &self.gender_pie,
            MetricId::ExperiencePie => &self.experience,
            MetricId::CountryPie => &self.country,
            MetricId::GenderBar => &self.gender_bar,
            MetricId::AgeGradeScatter => &self.scatter,
        }
    }

    /// True while any chart still waits for its response.
    pub fn is_loading(&self) -> bool {
        MetricId::ALL
            .iter()
            .any(|m| self.series(*m).status == SeriesStatus::Loading)
    }
}
