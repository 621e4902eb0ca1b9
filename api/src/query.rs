//! Filter values as they travel to the API.

use std::fmt;
use std::str::FromStr;

/// Gender selection of the dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Both,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Both];

    /// Value of the `sex` query parameter; `None` means "do not filter".
    pub fn sex_code(self) -> Option<u8> {
        match self {
            Gender::Male => Some(0),
            Gender::Female => Some(1),
            Gender::Both => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Both => "both",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "both" => Ok(Gender::Both),
            other => Err(format!("unknown gender `{other}`")),
        }
    }
}

/// Immutable copy of the filter taken when a fetch cycle starts.
///
/// `version` identifies the filter state that produced the snapshot; results
/// carry it back so superseded responses can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSnapshot {
    pub gender: Gender,
    pub age_min: u32,
    pub age_max: u32,
    pub version: u64,
}
