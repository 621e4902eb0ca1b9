//! Metric registry: which endpoint backs which chart and how the filter maps
//! onto its query string.

use crate::fetcher::QueryPairs;
use crate::query::FilterSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricId {
    GenderPie,
    ExperiencePie,
    CountryPie,
    GenderBar,
    AgeGradeScatter,
}

/// JSON layout a metric endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Object of `label -> count`.
    Distribution,
    /// Array of `{age, average_grade_max}` records.
    Scatter,
}

/// How a metric turns a filter snapshot into query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMapping {
    /// Age range only; the endpoint computes the gender split itself.
    AgeRange,
    /// Age range plus `sex` when a single gender is selected.
    AgeRangeAndSex,
}

impl MetricId {
    pub const ALL: [MetricId; 5] = [
        MetricId::GenderPie,
        MetricId::ExperiencePie,
        MetricId::CountryPie,
        MetricId::GenderBar,
        MetricId::AgeGradeScatter,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            MetricId::GenderPie => "/PieChart_Climbers_Genders",
            MetricId::ExperiencePie => "/PieChart_Climbers_Experience",
            MetricId::CountryPie => "/PieChart_Climbers_Countries",
            MetricId::GenderBar => "/BarChart_Climbers_Genders",
            MetricId::AgeGradeScatter => "/scatterGradesByAge",
        }
    }

    pub fn shape(self) -> PayloadShape {
        match self {
            MetricId::AgeGradeScatter => PayloadShape::Scatter,
            _ => PayloadShape::Distribution,
        }
    }

    pub fn mapping(self) -> ParamMapping {
        match self {
            MetricId::GenderPie | MetricId::GenderBar => ParamMapping::AgeRange,
            _ => ParamMapping::AgeRangeAndSex,
        }
    }

    /// Stable identifier used in logs and element ids.
    pub fn key(self) -> &'static str {
        match self {
            MetricId::GenderPie => "gender-pie",
            MetricId::ExperiencePie => "experience",
            MetricId::CountryPie => "country",
            MetricId::GenderBar => "gender-bar",
            MetricId::AgeGradeScatter => "age-grade",
        }
    }
}

/// One entry of the fixed metric set fetched on every filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricRequest {
    pub id: MetricId,
    pub endpoint: &'static str,
    pub mapping: ParamMapping,
}

impl MetricRequest {
    pub fn new(id: MetricId) -> Self {
        Self {
            id,
            endpoint: id.endpoint(),
            mapping: id.mapping(),
        }
    }

    /// The five metrics the dashboard keeps in sync.
    pub fn registry() -> Vec<MetricRequest> {
        MetricId::ALL.into_iter().map(MetricRequest::new).collect()
    }

    pub fn params(&self, filter: &FilterSnapshot) -> QueryPairs {
        let mut pairs = vec![
            ("min_age", filter.age_min.to_string()),
            ("max_age", filter.age_max.to_string()),
        ];
        if self.mapping == ParamMapping::AgeRangeAndSex {
            if let Some(code) = filter.gender.sex_code() {
                pairs.push(("sex", code.to_string()));
            }
        }
        pairs
    }
}
