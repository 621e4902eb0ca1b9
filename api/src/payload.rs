//! Typed payloads. Every response is checked against the shape its endpoint
//! promises before it reaches the dashboard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;
use crate::metric::PayloadShape;

/// Category counts in the order the backend emitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<(String, u64)>,
}

impl Distribution {
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let Value::Object(map) = value else {
            return Err(FetchError::shape(format!(
                "expected an object of counts, got {}",
                kind(&value)
            )));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (label, count) in map {
            let Some(count) = as_count(&count) else {
                return Err(FetchError::shape(format!(
                    "count for `{label}` is not a non-negative integer"
                )));
            };
            entries.push((label, count));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Integral counts may arrive as `10` or `10.0` depending on the backend's
/// aggregation path.
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterRecord {
    pub age: f64,
    pub average_grade_max: f64,
}

/// Validated body of a metric endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricPayload {
    Distribution(Distribution),
    Scatter(Vec<ScatterRecord>),
}

impl MetricPayload {
    pub fn parse(shape: PayloadShape, value: Value) -> Result<Self, FetchError> {
        match shape {
            PayloadShape::Distribution => Distribution::from_value(value).map(Self::Distribution),
            PayloadShape::Scatter => {
                if !value.is_array() {
                    return Err(FetchError::shape(format!(
                        "expected an array of records, got {}",
                        kind(&value)
                    )));
                }
                serde_json::from_value(value)
                    .map(Self::Scatter)
                    .map_err(|err| FetchError::shape(err.to_string()))
            }
        }
    }

    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Distribution(dist) => Some(dist),
            Self::Scatter(_) => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&[ScatterRecord]> {
        match self {
            Self::Scatter(points) => Some(points),
            Self::Distribution(_) => None,
        }
    }
}

/// One row of the `/climbers/` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimberRecord {
    pub climber_id: i64,
    pub country: String,
    pub sex: i32,
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub years_cl: i32,
    pub date_first: String,
    pub date_last: String,
    pub grades_count: i32,
    pub grades_first: i32,
    pub grades_last: i32,
    pub grades_max: i32,
    pub grades_mean: f64,
    pub year_first: i32,
    pub year_last: i32,
}

/// `skip`/`limit` window over the climber listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn first(limit: u32) -> Self {
        Self {
            skip: 0,
            limit: limit.max(1),
        }
    }

    pub fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            skip: self.skip.saturating_sub(self.limit),
            ..self
        }
    }

    /// 1-based page number for display.
    pub fn number(self) -> u32 {
        self.skip / self.limit.max(1) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}
