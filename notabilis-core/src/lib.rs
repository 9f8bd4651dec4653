// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Notabilis Core
//!
//! Core domain models and date utilities for Notabilis.
//!
//! This crate provides the foundational types shared by the API client,
//! the rarity detector, and the CLI:
//!
//! - Domain models (taxa, observations, observers, places)
//! - Taxonomic ancestry containment
//! - Calendar-date arithmetic for the backward day scan
//! - Error types
//!
//! ## Key Types
//!
//! ### Taxonomy
//! - [`Taxon`] - A node in the biological classification hierarchy
//! - [`TaxonCount`] - A taxon paired with an observation count for a query window
//! - [`covered_by_history`] - Ancestry-aware containment check
//!
//! ### Observations
//! - [`Observation`] - A single recorded sighting
//! - [`QualityGrade`] - Confidence classification (casual, needs ID, research)
//! - [`Observer`] - Observer identity
//! - [`ObserverCount`] - Leaderboard row for an observer
//!
//! ### Places & Dates
//! - [`Place`] - Geographic reference data
//! - [`dates`] - Day/year arithmetic and the descending day iterator

pub mod dates;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    covered_by_history, Observation, ObservationPhoto, Observer, ObserverCount, Place,
    QualityGrade, Taxon, TaxonCount, TaxonPhoto,
};
