//! Taxonomy types.
//!
//! This module contains the taxonomic types and the ancestry containment
//! check used by the rarity detector:
//! - [`Taxon`] - A classification node with its ancestor lineage
//! - [`TaxonCount`] - A taxon paired with an observation count
//! - [`covered_by_history`] - Whether a taxon is already covered by a
//!   list of historical records

use serde::{Deserialize, Serialize};

/// Default taxa page URL prefix on the upstream site.
const TAXON_URL_PREFIX: &str = "https://www.inaturalist.org/taxa";

// ============================================================================
// Taxon
// ============================================================================

/// A node in the biological classification hierarchy.
///
/// `ancestor_ids` always lists every coarser-rank ancestor, ordered from
/// root to parent. A taxon A lies within taxon B's lineage iff
/// `B.id ∈ A.ancestor_ids` or `A.id == B.id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxon {
    /// Unique taxon id.
    pub id: u64,
    /// Scientific name (e.g. "Cardinalis cardinalis").
    pub name: String,
    /// Localized common name, when one exists.
    #[serde(default)]
    pub preferred_common_name: Option<String>,
    /// Taxonomic rank (e.g. "species", "genus").
    #[serde(default)]
    pub rank: String,
    /// Ancestor taxon ids, ordered from root to parent.
    #[serde(default)]
    pub ancestor_ids: Vec<u64>,
    /// Default photo for the taxon, if any.
    #[serde(default)]
    pub default_photo: Option<TaxonPhoto>,
    /// Whether the taxon is active in the upstream taxonomy.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether the taxon is extinct.
    #[serde(default)]
    pub extinct: bool,
}

fn default_true() -> bool {
    true
}

impl Taxon {
    /// Returns the common name when present, otherwise the scientific name.
    pub fn display_name(&self) -> &str {
        self.preferred_common_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if this taxon is `other` or descends from it.
    pub fn within_lineage_of(&self, other_id: u64) -> bool {
        self.id == other_id || self.ancestor_ids.contains(&other_id)
    }

    /// Returns the taxon's page URL on the upstream site.
    pub fn url(&self) -> String {
        format!("{TAXON_URL_PREFIX}/{}", self.id)
    }
}

/// Reference to a taxon's default photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonPhoto {
    /// Photo id.
    pub id: u64,
    /// Thumbnail-sized square URL.
    #[serde(default)]
    pub square_url: Option<String>,
    /// Medium-sized URL.
    #[serde(default)]
    pub medium_url: Option<String>,
    /// Attribution string required by the photo license.
    #[serde(default)]
    pub attribution: Option<String>,
}

// ============================================================================
// Taxon Count
// ============================================================================

/// A taxon paired with its observation count for one query window.
///
/// Produced per species-counts query; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonCount {
    /// Number of observations in the query window.
    pub count: u64,
    /// The observed taxon.
    pub taxon: Taxon,
}

/// Returns true if `taxon_id` is covered by any record in `history`.
///
/// A historical record covers the candidate when its taxon id equals the
/// candidate, or when the candidate appears in the record's ancestor
/// lineage. The lineage check absorbs rank mismatches: a genus-rank
/// record from last year covers a species-rank sighting today.
///
/// Coverage is by identity/ancestry only; observation counts play no
/// part. Pure function, `O(history)` with an `O(ancestors)` scan each.
pub fn covered_by_history(taxon_id: u64, history: &[TaxonCount]) -> bool {
    history.iter().any(|record| {
        record.taxon.id == taxon_id || record.taxon.ancestor_ids.contains(&taxon_id)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn taxon(id: u64, ancestor_ids: Vec<u64>) -> Taxon {
        Taxon {
            id,
            name: format!("Taxon {id}"),
            preferred_common_name: None,
            rank: "species".to_string(),
            ancestor_ids,
            default_photo: None,
            is_active: true,
            extinct: false,
        }
    }

    fn count(id: u64, ancestor_ids: Vec<u64>) -> TaxonCount {
        TaxonCount {
            count: 1,
            taxon: taxon(id, ancestor_ids),
        }
    }

    #[test]
    fn test_exact_id_match_covers() {
        let history = vec![count(42, vec![1, 2, 3])];
        assert!(covered_by_history(42, &history));
    }

    #[test]
    fn test_ancestor_match_covers() {
        // The historical record is at species rank 99, descending from
        // genus 42; a fresh genus-level sighting of 42 is covered.
        let history = vec![count(99, vec![1, 2, 42])];
        assert!(covered_by_history(42, &history));
    }

    #[test]
    fn test_unrelated_history_does_not_cover() {
        let history = vec![count(99, vec![1, 2, 3]), count(7, vec![1, 4])];
        assert!(!covered_by_history(42, &history));
    }

    #[test]
    fn test_empty_history_does_not_cover() {
        assert!(!covered_by_history(42, &[]));
    }

    #[test]
    fn test_display_name_falls_back_to_scientific() {
        let mut t = taxon(1, vec![]);
        assert_eq!(t.display_name(), "Taxon 1");
        t.preferred_common_name = Some("Northern Cardinal".to_string());
        assert_eq!(t.display_name(), "Northern Cardinal");
    }

    #[test]
    fn test_within_lineage() {
        let t = taxon(99, vec![1, 2, 42]);
        assert!(t.within_lineage_of(99));
        assert!(t.within_lineage_of(42));
        assert!(!t.within_lineage_of(7));
    }

    #[test]
    fn test_taxon_deserializes_with_missing_optionals() {
        let json = r#"{"id": 5, "name": "Corvus"}"#;
        let t: Taxon = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, 5);
        assert!(t.is_active);
        assert!(t.ancestor_ids.is_empty());
        assert!(t.preferred_common_name.is_none());
    }
}
