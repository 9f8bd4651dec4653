//! Observation types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::observer::Observer;
use super::taxon::Taxon;
use crate::error::CoreError;

/// Observation page URL prefix on the upstream site.
const OBSERVATION_URL_PREFIX: &str = "https://www.inaturalist.org/observations";

// ============================================================================
// Quality Grade
// ============================================================================

/// Confidence classification the upstream API assigns to an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    /// No supporting evidence, or opted out of grading.
    #[default]
    Casual,
    /// Has evidence but the community has not settled an identification.
    NeedsId,
    /// Community-verified identification.
    Research,
}

impl QualityGrade {
    /// Returns the severity-style label used in report output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Casual => "CASUAL",
            Self::NeedsId => "NEEDS ID",
            Self::Research => "RESEARCH",
        }
    }

    /// Returns the wire value used in API query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::NeedsId => "needs_id",
            Self::Research => "research",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for QualityGrade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(Self::Casual),
            "needs_id" => Ok(Self::NeedsId),
            "research" => Ok(Self::Research),
            other => Err(CoreError::InvalidValue(format!(
                "unknown quality grade: {other}"
            ))),
        }
    }
}

// ============================================================================
// Observation
// ============================================================================

/// A single recorded sighting.
///
/// Immutable once fetched; built from one API response and discarded
/// after rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Unique observation id.
    pub id: u64,
    /// Canonical record URL, when the API supplies one.
    #[serde(default)]
    pub uri: Option<String>,
    /// Date the sighting was made, when known.
    #[serde(default)]
    pub observed_on: Option<NaiveDate>,
    /// Identified taxon. Absent for unidentified records.
    #[serde(default)]
    pub taxon: Option<Taxon>,
    /// The observer who recorded the sighting.
    pub user: Observer,
    /// Geolocation as "lat,lng", as the API returns it.
    #[serde(default)]
    pub location: Option<String>,
    /// Confidence classification for the record.
    #[serde(default)]
    pub quality_grade: QualityGrade,
    /// Photos attached to the observation.
    #[serde(default)]
    pub photos: Vec<ObservationPhoto>,
    /// Containing place ids, most specific last.
    #[serde(default)]
    pub place_ids: Vec<u64>,
}

impl Observation {
    /// Returns a direct link to the record.
    ///
    /// Prefers the API-supplied URI; falls back to the canonical
    /// observation page URL.
    pub fn url(&self) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| format!("{OBSERVATION_URL_PREFIX}/{}", self.id))
    }
}

/// A photo attached to an observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationPhoto {
    /// Photo id.
    pub id: u64,
    /// Photo URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Attribution string required by the photo license.
    #[serde(default)]
    pub attribution: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
