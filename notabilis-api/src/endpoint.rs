//! Typed endpoint definitions for the observation API.
//!
//! Each endpoint is a marker type implementing [`Endpoint`], tying together
//! its URL path, its cache-lifetime hint, a typed parameter struct, and the
//! decoded response shape. Parameter structs declare only the fields their
//! endpoint accepts, so a filter can never leak into a request for a
//! different endpoint.
//!
//! Fields that are `None` are omitted from the query string entirely,
//! never serialized as empty strings: upstream treats an absent filter and
//! an empty filter differently.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use notabilis_core::dates::iso_date;
use notabilis_core::{Observation, ObserverCount, Place, QualityGrade, TaxonCount};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Cache-lifetime hint of one hour, for raw observation listings.
const TTL_HOUR: u64 = 3_600;
/// Cache-lifetime hint of one day, for species counts and observer rankings.
const TTL_DAY: u64 = 86_400;
/// Cache-lifetime hint of thirty days, for histograms and place lookups.
const TTL_MONTH: u64 = 2_592_000;

// ============================================================================
// Endpoint Trait
// ============================================================================

/// A concrete API endpoint with typed request and response shapes.
pub trait Endpoint {
    /// Typed request parameters for this endpoint.
    type Params: QueryParams;
    /// Decoded response body.
    type Response: DeserializeOwned;
    /// URL path under the API base.
    const PATH: &'static str;
    /// Cache-lifetime hint attached to requests, in seconds.
    const CACHE_TTL_SECS: u64;
}

/// Conversion from a typed parameter struct to wire query pairs.
pub trait QueryParams {
    /// Returns wire-name/value pairs for the query string.
    ///
    /// Absent (`None`) fields are omitted.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Parameters that carry a page number, making the endpoint paginatable.
pub trait PagedParams: QueryParams {
    /// Sets the page number for the next request (1-based).
    fn set_page(&mut self, page: u32);
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Response Envelopes
// ============================================================================

/// Paged response envelope shared by the listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    /// Total matching results across all pages.
    pub total_results: u64,
    /// The page this response covers (1-based).
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size the server applied.
    pub per_page: u32,
    /// Items on this page.
    pub results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> Paged<T> {
    /// Total number of pages implied by the server's counts.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_results.div_ceil(u64::from(self.per_page))
    }
}

/// Response envelope for the place endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResults {
    /// Total matching places.
    #[serde(default)]
    pub total_results: u64,
    /// Matching places.
    pub results: Vec<Place>,
}

/// Response for the histogram endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramResponse {
    /// Bucketed observation counts.
    pub results: HistogramBuckets,
}

/// Observation counts keyed by calendar bucket.
///
/// Only the bucket matching the requested interval is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistogramBuckets {
    /// Counts keyed by week of year ("1".."53").
    #[serde(default)]
    pub week_of_year: BTreeMap<String, u64>,
    /// Counts keyed by month of year ("1".."12").
    #[serde(default)]
    pub month_of_year: BTreeMap<String, u64>,
}

// ============================================================================
// Wire Enums
// ============================================================================

/// Sort direction for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Highest taxonomic rank to include in species counts (`hrank`).
///
/// `Genus` means genus-or-finer: coarser identifications are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// Species rank.
    Species,
    /// Genus rank.
    Genus,
    /// Family rank.
    Family,
}

impl Rank {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Genus => "genus",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Ranking order for the observer leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverOrder {
    /// Rank by observation count.
    ObservationCount,
    /// Rank by distinct species count.
    SpeciesCount,
}

impl ObserverOrder {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ObservationCount => "observation_count",
            Self::SpeciesCount => "species_count",
        }
    }
}

impl fmt::Display for ObserverOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Result ordering for observation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationOrder {
    /// Order by observation date.
    ObservedOn,
    /// Order by record creation time.
    CreatedAt,
}

impl ObservationOrder {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ObservedOn => "observed_on",
            Self::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for ObservationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Calendar bucketing for the histogram endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistogramInterval {
    /// One bucket per ISO week of year.
    #[default]
    WeekOfYear,
    /// One bucket per month of year.
    MonthOfYear,
}

impl HistogramInterval {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::WeekOfYear => "week_of_year",
            Self::MonthOfYear => "month_of_year",
        }
    }
}

impl fmt::Display for HistogramInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Which date field histogram bucketing applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// The date the sighting was made.
    Observed,
    /// The date the record was created.
    Created,
}

impl DateField {
    /// Returns the wire value used in query parameters.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Created => "created",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ============================================================================
// Species Counts
// ============================================================================

/// `/observations/species_counts`: species observed in a place/date window.
pub struct SpeciesCounts;

/// Parameters for [`SpeciesCounts`].
#[derive(Debug, Clone, Default)]
pub struct SpeciesCountsParams {
    /// Place to query.
    pub place_id: u64,
    /// Window start (inclusive).
    pub d1: Option<NaiveDate>,
    /// Window end (inclusive).
    pub d2: Option<NaiveDate>,
    /// Calendar month filter (1-12), for month-of-year queries.
    pub month: Option<u32>,
    /// Restrict to these taxa and their descendants.
    pub taxon_ids: Vec<u64>,
    /// Highest rank to include.
    pub hrank: Option<Rank>,
    /// Result ordering.
    pub order: Option<SortOrder>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Restrict to verifiable-grade records.
    pub verifiable: Option<bool>,
    /// Include or exclude captive/cultivated records.
    pub captive: Option<bool>,
    /// Restrict to these iconic taxon groups (e.g. "Aves").
    pub iconic_taxa: Option<String>,
    /// Place to prefer when localizing names.
    pub preferred_place_id: Option<u64>,
}

impl QueryParams for SpeciesCountsParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("place_id", self.place_id.to_string())];
        push(&mut pairs, "d1", self.d1.map(iso_date));
        push(&mut pairs, "d2", self.d2.map(iso_date));
        push(&mut pairs, "month", self.month);
        if !self.taxon_ids.is_empty() {
            pairs.push(("taxon_id", join_ids(&self.taxon_ids)));
        }
        push(&mut pairs, "hrank", self.hrank);
        push(&mut pairs, "order", self.order);
        push(&mut pairs, "per_page", self.per_page);
        push(&mut pairs, "page", self.page);
        push(&mut pairs, "verifiable", self.verifiable);
        push(&mut pairs, "captive", self.captive);
        push(&mut pairs, "iconic_taxa", self.iconic_taxa.clone());
        push(&mut pairs, "preferred_place_id", self.preferred_place_id);
        pairs
    }
}

impl PagedParams for SpeciesCountsParams {
    fn set_page(&mut self, page: u32) {
        self.page = Some(page);
    }
}

impl Endpoint for SpeciesCounts {
    type Params = SpeciesCountsParams;
    type Response = Paged<TaxonCount>;
    const PATH: &'static str = "/observations/species_counts";
    const CACHE_TTL_SECS: u64 = TTL_DAY;
}

// ============================================================================
// Observations
// ============================================================================

/// `/observations`: individual observation records.
pub struct Observations;

/// Parameters for [`Observations`].
#[derive(Debug, Clone, Default)]
pub struct ObservationsParams {
    /// Place to query.
    pub place_id: u64,
    /// Window start (inclusive).
    pub d1: Option<NaiveDate>,
    /// Window end (inclusive).
    pub d2: Option<NaiveDate>,
    /// Restrict to this taxon and its descendants.
    pub taxon_id: Option<u64>,
    /// Filter on the API's "expected nearby" signal.
    pub expected_nearby: Option<bool>,
    /// Restrict to one quality grade.
    pub quality_grade: Option<QualityGrade>,
    /// Field to order results by.
    pub order_by: Option<ObservationOrder>,
    /// Result ordering.
    pub order: Option<SortOrder>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Page number (1-based).
    pub page: Option<u32>,
}

impl QueryParams for ObservationsParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("place_id", self.place_id.to_string())];
        push(&mut pairs, "d1", self.d1.map(iso_date));
        push(&mut pairs, "d2", self.d2.map(iso_date));
        push(&mut pairs, "taxon_id", self.taxon_id);
        push(&mut pairs, "expected_nearby", self.expected_nearby);
        push(&mut pairs, "quality_grade", self.quality_grade);
        push(&mut pairs, "order_by", self.order_by);
        push(&mut pairs, "order", self.order);
        push(&mut pairs, "per_page", self.per_page);
        push(&mut pairs, "page", self.page);
        pairs
    }
}

impl PagedParams for ObservationsParams {
    fn set_page(&mut self, page: u32) {
        self.page = Some(page);
    }
}

impl Endpoint for Observations {
    type Params = ObservationsParams;
    type Response = Paged<Observation>;
    const PATH: &'static str = "/observations";
    const CACHE_TTL_SECS: u64 = TTL_HOUR;
}

// ============================================================================
// Histogram
// ============================================================================

/// `/observations/histogram`: bucketed observation counts for a taxon.
pub struct ObservationHistogram;

/// Parameters for [`ObservationHistogram`].
#[derive(Debug, Clone, Default)]
pub struct HistogramParams {
    /// Taxon to chart.
    pub taxon_id: u64,
    /// Place to query.
    pub place_id: u64,
    /// Place to prefer when localizing names.
    pub preferred_place_id: Option<u64>,
    /// Restrict to verifiable-grade records.
    pub verifiable: Option<bool>,
    /// Which date field to bucket on.
    pub date_field: Option<DateField>,
    /// Calendar bucketing.
    pub interval: HistogramInterval,
    /// Locale for localized names.
    pub locale: Option<String>,
}

impl QueryParams for HistogramParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("taxon_id", self.taxon_id.to_string()),
            ("place_id", self.place_id.to_string()),
            ("interval", self.interval.to_string()),
        ];
        push(&mut pairs, "preferred_place_id", self.preferred_place_id);
        push(&mut pairs, "verifiable", self.verifiable);
        push(&mut pairs, "date_field", self.date_field);
        push(&mut pairs, "locale", self.locale.clone());
        pairs
    }
}

impl Endpoint for ObservationHistogram {
    type Params = HistogramParams;
    type Response = HistogramResponse;
    const PATH: &'static str = "/observations/histogram";
    const CACHE_TTL_SECS: u64 = TTL_MONTH;
}

// ============================================================================
// Observers
// ============================================================================

/// `/observations/observers`: ranked observer leaderboard.
pub struct Observers;

/// Parameters for [`Observers`].
#[derive(Debug, Clone, Default)]
pub struct ObserversParams {
    /// Place to query.
    pub place_id: u64,
    /// Window start (inclusive).
    pub d1: Option<NaiveDate>,
    /// Ranking order.
    pub order_by: Option<ObserverOrder>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Page number (1-based).
    pub page: Option<u32>,
}

impl QueryParams for ObserversParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("place_id", self.place_id.to_string())];
        push(&mut pairs, "d1", self.d1.map(iso_date));
        push(&mut pairs, "order_by", self.order_by);
        push(&mut pairs, "per_page", self.per_page);
        push(&mut pairs, "page", self.page);
        pairs
    }
}

impl PagedParams for ObserversParams {
    fn set_page(&mut self, page: u32) {
        self.page = Some(page);
    }
}

impl Endpoint for Observers {
    type Params = ObserversParams;
    type Response = Paged<ObserverCount>;
    const PATH: &'static str = "/observations/observers";
    const CACHE_TTL_SECS: u64 = TTL_DAY;
}

// ============================================================================
// Places
// ============================================================================

/// `/places`: place details by id.
pub struct PlaceDetails;

/// Parameters for [`PlaceDetails`].
#[derive(Debug, Clone, Default)]
pub struct PlaceDetailsParams {
    /// Place id to look up.
    pub id: u64,
}

impl QueryParams for PlaceDetailsParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.to_string())]
    }
}

impl Endpoint for PlaceDetails {
    type Params = PlaceDetailsParams;
    type Response = PlaceResults;
    const PATH: &'static str = "/places";
    const CACHE_TTL_SECS: u64 = TTL_MONTH;
}

/// `/places/autocomplete`: place search by name fragment.
pub struct PlaceAutocomplete;

/// Parameters for [`PlaceAutocomplete`].
#[derive(Debug, Clone, Default)]
pub struct PlaceAutocompleteParams {
    /// Search query.
    pub q: String,
    /// Page size.
    pub per_page: Option<u32>,
}

impl QueryParams for PlaceAutocompleteParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone())];
        push(&mut pairs, "per_page", self.per_page);
        pairs
    }
}

impl Endpoint for PlaceAutocomplete {
    type Params = PlaceAutocompleteParams;
    type Response = PlaceResults;
    const PATH: &'static str = "/places/autocomplete";
    const CACHE_TTL_SECS: u64 = TTL_MONTH;
}

// ============================================================================
// Tests
// ============================================================================
