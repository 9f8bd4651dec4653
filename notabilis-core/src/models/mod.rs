//! Domain models for Notabilis.
//!
//! All entities here are request-scoped: they are built from a single API
//! response, consumed by the detector or a renderer, and discarded. There
//! is no persistence layer.

mod observation;
mod observer;
mod place;
mod taxon;

pub use observation::{Observation, ObservationPhoto, QualityGrade};
pub use observer::{Observer, ObserverCount};
pub use place::Place;
pub use taxon::{covered_by_history, Taxon, TaxonCount, TaxonPhoto};
