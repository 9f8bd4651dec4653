//! The rarity-detection pipeline.
//!
//! For each scanned day the detector asks which species were observed at
//! the place on exactly that day, then whether each had any covering
//! record (by taxon id or ancestry) in the preceding 365 days. Taxa with
//! no coverage are unexpected; their full observation records are fetched
//! and emitted to the sink as they are found.
//!
//! Coverage is by identity and ancestry only: a taxon seen even once in
//! the prior year is not unexpected, whatever its count.

use chrono::NaiveDate;
use futures::TryStreamExt;
use notabilis_api::endpoint::{
    Observations, ObservationsParams, Rank, SortOrder, SpeciesCounts, SpeciesCountsParams,
};
use notabilis_api::{paged, ApiClient};
use notabilis_core::dates::{iso_date, previous_day, trailing_year};
use notabilis_core::{covered_by_history, Observation, Taxon, TaxonCount};
use serde::Serialize;
use tracing::{debug, info};

use crate::cursor::DateCursor;
use crate::error::DetectError;

/// Maximum taxon ids per historical query; the API rejects longer filter
/// lists, so the detector splits them and concatenates the results.
pub const TAXON_CHUNK_SIZE: usize = 100;

/// Page size for the per-day species scans.
const SCAN_PER_PAGE: u32 = 500;

// ============================================================================
// Notable Observations
// ============================================================================

/// An unexpected sighting: a taxon with no covering record in the
/// preceding year at the scanned place.
#[derive(Debug, Clone, Serialize)]
pub struct Notable {
    /// The day the taxon showed up.
    pub day: NaiveDate,
    /// The taxon that had no historical coverage.
    pub taxon: Taxon,
    /// The full observation record.
    pub observation: Observation,
}

/// Consumer of notable observations.
pub trait NotableSink {
    /// Receives one notable observation as soon as the detector finds it.
    fn emit(&mut self, notable: &Notable) -> Result<(), DetectError>;
}

/// Totals for a finished (or stopped) scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanSummary {
    /// Days examined.
    pub days_scanned: u64,
    /// Notable observations emitted.
    pub notables_emitted: u64,
}

// ============================================================================
// Rarity Detector
// ============================================================================

/// Backward day scanner over one place.
pub struct RarityDetector {
    client: ApiClient,
    place_id: u64,
}

impl RarityDetector {
    /// Creates a detector for the given place.
    pub fn new(client: ApiClient, place_id: u64) -> Self {
        Self { client, place_id }
    }

    /// Scans the cursor's days in order, emitting into `sink`.
    ///
    /// Runs until the cursor is exhausted or stopped. An API failure
    /// aborts the scan and surfaces to the caller; each day's query
    /// sequence completes before the next day begins.
    pub async fn run<S>(&self, cursor: DateCursor, sink: &mut S) -> Result<ScanSummary, DetectError>
    where
        S: NotableSink + ?Sized,
    {
        let mut summary = ScanSummary::default();
        for day in cursor {
            summary.notables_emitted += self.scan_day(day, sink).await?;
            summary.days_scanned += 1;
        }
        Ok(summary)
    }

    /// Scans one day, returning how many notables were emitted.
    pub async fn scan_day<S>(&self, day: NaiveDate, sink: &mut S) -> Result<u64, DetectError>
    where
        S: NotableSink + ?Sized,
    {
        info!(day = %iso_date(day), place = self.place_id, "Scanning day");
        let today = self.species_on_day(day).await?;
        if today.is_empty() {
            // Without this check the chunk loop would issue a taxon-less
            // historical query matching everything at the place.
            debug!(day = %iso_date(day), "No species observed; skipping historical query");
            return Ok(0);
        }

        let history = self.history_before(day, &today).await?;

        let mut emitted = 0;
        for record in &today {
            if covered_by_history(record.taxon.id, &history) {
                continue;
            }
            info!(
                taxon = record.taxon.id,
                name = %record.taxon.name,
                day = %iso_date(day),
                "Unexpected taxon"
            );
            emitted += self.emit_observations(day, &record.taxon, sink).await?;
        }
        Ok(emitted)
    }

    /// Species observed at the place on exactly `day`: verifiable,
    /// non-captive, genus rank or finer.
    async fn species_on_day(&self, day: NaiveDate) -> Result<Vec<TaxonCount>, DetectError> {
        let params = SpeciesCountsParams {
            place_id: self.place_id,
            d1: Some(day),
            d2: Some(day),
            verifiable: Some(true),
            captive: Some(false),
            hrank: Some(Rank::Genus),
            order: Some(SortOrder::Asc),
            per_page: Some(SCAN_PER_PAGE),
            ..SpeciesCountsParams::default()
        };
        let counts = paged::<SpeciesCounts, _>(&self.client, params)
            .try_collect()
            .await?;
        Ok(counts)
    }

    /// Covering records from the 365 days ending the day before `day`,
    /// for exactly the taxa seen on `day`. Long id lists go out in
    /// bounded chunks, one paginated query per chunk.
    async fn history_before(
        &self,
        day: NaiveDate,
        today: &[TaxonCount],
    ) -> Result<Vec<TaxonCount>, DetectError> {
        let ids: Vec<u64> = today.iter().map(|record| record.taxon.id).collect();
        let (d1, d2) = trailing_year(previous_day(day));

        let mut history = Vec::new();
        for chunk in ids.chunks(TAXON_CHUNK_SIZE) {
            debug!(day = %iso_date(day), taxa = chunk.len(), "Historical chunk query");
            let params = SpeciesCountsParams {
                place_id: self.place_id,
                d1: Some(d1),
                d2: Some(d2),
                captive: Some(false),
                hrank: Some(Rank::Genus),
                order: Some(SortOrder::Asc),
                per_page: Some(SCAN_PER_PAGE),
                taxon_ids: chunk.to_vec(),
                ..SpeciesCountsParams::default()
            };
            let mut chunk_results: Vec<TaxonCount> = paged::<SpeciesCounts, _>(&self.client, params)
                .try_collect()
                .await?;
            history.append(&mut chunk_results);
        }
        Ok(history)
    }

    /// Fetches and emits every observation of `taxon` at the place on `day`.
    async fn emit_observations<S>(
        &self,
        day: NaiveDate,
        taxon: &Taxon,
        sink: &mut S,
    ) -> Result<u64, DetectError>
    where
        S: NotableSink + ?Sized,
    {
        let params = ObservationsParams {
            place_id: self.place_id,
            d1: Some(day),
            d2: Some(day),
            taxon_id: Some(taxon.id),
            ..ObservationsParams::default()
        };
        let observations: Vec<Observation> = paged::<Observations, _>(&self.client, params)
            .try_collect()
            .await?;

        let mut emitted = 0;
        for observation in observations {
            let notable = Notable {
                day,
                taxon: taxon.clone(),
                observation,
            };
            sink.emit(&notable)?;
            emitted += 1;
        }
        Ok(emitted)
    }
}

// ============================================================================
// Tests
// ============================================================================
