// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Notabilis Detect
//!
//! The rarity-detection pipeline.
//!
//! Scanning backward one calendar day at a time, the detector finds taxa
//! observed at a place that have no covering record (by taxon id or
//! ancestry) in the preceding 365 days, fetches their full observation
//! records, and emits them to a sink.
//!
//! ## Key Types
//!
//! - [`RarityDetector`] - The per-day scan pipeline
//! - [`DateCursor`] / [`StopHandle`] - Bounded or unbounded backward day
//!   iteration with cooperative cancellation
//! - [`Notable`] / [`NotableSink`] - The emitted records and their consumer

pub mod cursor;
pub mod detector;
pub mod error;

pub use cursor::{DateCursor, StopHandle};
pub use detector::{Notable, NotableSink, RarityDetector, ScanSummary, TAXON_CHUNK_SIZE};
pub use error::DetectError;
