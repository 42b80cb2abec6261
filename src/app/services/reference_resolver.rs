//! Resolution of isotopologue ids and parameter references
//!
//! The `.par` format quotes references as two-digit ids local to each
//! molecule's bibliography. The resolver maps a `<formula>-<slot>-<ref_id>`
//! key to the persisted source identity, and a (molecule, isotopologue)
//! pair to its global isotopologue id. Reference 0 always resolves to the
//! HITRAN 1986 paper.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{HITRAN_1986_SOURCE_ID, ISOTOPOLOGUE_COUNTS, molecule_formula};
use crate::{Error, Result};

/// Build the reference-map key for a parameter reference. `'+'` is written
/// `'p'` so the key stays attribute-safe.
pub fn reference_key(molec_id: u8, slot: &str, ref_id: i32) -> Option<String> {
    let formula = molecule_formula(molec_id)?;
    Some(format!("{}-{slot}-{ref_id}", formula.replace('+', "p")))
}

/// Maps species and references to persisted identities
pub trait ReferenceResolver {
    /// The global isotopologue id of a (molecule, local isotopologue) pair
    fn global_iso_id(&self, molec_id: u8, iso_id: u8) -> Result<u32>;

    /// The source identity behind a parameter reference, `None` when the
    /// reference map has no entry for it
    fn source_id(&self, molec_id: u8, slot: &str, ref_id: i32) -> Option<i64>;
}

/// One row of the reference-map CSV: a key and its source identity
#[derive(Debug, Deserialize)]
struct SourceRow {
    key: String,
    source_id: i64,
}

/// A [`ReferenceResolver`] backed by the built-in isotopologue table and an
/// optional CSV reference map.
#[derive(Debug, Default)]
pub struct TableResolver {
    sources: HashMap<String, i64>,
    iso_table: HashMap<(u8, u8), u32>,
}

impl TableResolver {
    /// A resolver with an empty reference map: every non-zero reference is
    /// reported missing.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            iso_table: build_iso_table(),
        }
    }

    /// Load the reference map from a `key,source_id` CSV file
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file_name = path.display().to_string();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::csv_parsing(&file_name, "cannot open reference map", Some(e)))?;

        let mut sources = HashMap::new();
        for row in reader.deserialize() {
            let row: SourceRow = row
                .map_err(|e| Error::csv_parsing(&file_name, "bad reference-map row", Some(e)))?;
            sources.insert(row.key, row.source_id);
        }
        tracing::info!(
            file = %file_name,
            entries = sources.len(),
            "loaded reference map"
        );
        Ok(Self {
            sources,
            iso_table: build_iso_table(),
        })
    }

    /// Number of reference-map entries
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ReferenceResolver for TableResolver {
    fn global_iso_id(&self, molec_id: u8, iso_id: u8) -> Result<u32> {
        self.iso_table
            .get(&(molec_id, iso_id))
            .copied()
            .ok_or_else(|| {
                Error::resolver(format!(
                    "no global isotopologue id for molecule {molec_id}, isotopologue {iso_id}"
                ))
            })
    }

    fn source_id(&self, molec_id: u8, slot: &str, ref_id: i32) -> Option<i64> {
        if ref_id == 0 {
            return Some(HITRAN_1986_SOURCE_ID);
        }
        let key = reference_key(molec_id, slot, ref_id)?;
        self.sources.get(&key).copied()
    }
}

/// Global isotopologue ids count through the per-molecule isotopologue
/// table in molecule-id order.
fn build_iso_table() -> HashMap<(u8, u8), u32> {
    let mut table = HashMap::new();
    let mut next: u32 = 1;
    for &(molec_id, count) in ISOTOPOLOGUE_COUNTS {
        for iso_id in 1..=count {
            table.insert((molec_id, iso_id), next);
            next += 1;
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_iso_ids_count_through_the_table() {
        let resolver = TableResolver::new();
        assert_eq!(resolver.global_iso_id(1, 1).unwrap(), 1);
        assert_eq!(resolver.global_iso_id(1, 6).unwrap(), 6);
        // CO2 starts after the six water isotopologues
        assert_eq!(resolver.global_iso_id(2, 1).unwrap(), 7);
        assert_eq!(resolver.global_iso_id(3, 1).unwrap(), 16);
        assert!(resolver.global_iso_id(1, 7).is_err());
    }

    #[test]
    fn test_every_dispatched_species_has_a_global_iso_id() {
        // any molecule the case registry accepts must also resolve, or the
        // pipeline aborts after a record already decoded cleanly
        use crate::app::services::cases::CaseRegistry;
        let registry = CaseRegistry::new();
        let resolver = TableResolver::new();
        for molec_id in 1..=46u8 {
            if registry.resolve(molec_id, 1, 1000.0).is_err() {
                continue;
            }
            assert!(
                resolver.global_iso_id(molec_id, 1).is_ok(),
                "molecule {molec_id} dispatches but has no global isotopologue id"
            );
        }
        // the tail of the table counts on from the molecules before it
        let last_through_42: u32 = resolver.global_iso_id(42, 1).unwrap();
        assert_eq!(resolver.global_iso_id(43, 1).unwrap(), last_through_42 + 1);
        assert_eq!(resolver.global_iso_id(45, 2).unwrap(), last_through_42 + 4);
        assert_eq!(resolver.global_iso_id(46, 4).unwrap(), last_through_42 + 8);
        assert!(resolver.global_iso_id(46, 5).is_err());
    }

    #[test]
    fn test_reference_zero_is_hitran_1986() {
        let resolver = TableResolver::new();
        assert_eq!(resolver.source_id(1, "nu", 0), Some(HITRAN_1986_SOURCE_ID));
    }

    #[test]
    fn test_missing_reference_is_none() {
        let resolver = TableResolver::new();
        assert_eq!(resolver.source_id(1, "nu", 5), None);
    }

    #[test]
    fn test_key_escapes_the_cation() {
        assert_eq!(reference_key(36, "S", 3).unwrap(), "NOp-S-3");
        assert_eq!(reference_key(1, "gamma_air", 12).unwrap(), "H2O-gamma_air-12");
        assert!(reference_key(99, "nu", 1).is_none());
    }
}
