//! State deduplication and identity assignment
//!
//! Every state a record mentions is reduced to its canonical string; the
//! first occurrence is assigned the next free integer id and later
//! occurrences reuse it. Seeding the registry from an existing states file
//! keeps identities stable across incremental runs.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::app::models::State;
use crate::constants::DEFAULT_FIRST_STATE_ID;
use crate::{Error, Result};

/// Interns canonical state strings to stable integer identities
#[derive(Debug)]
pub struct StateRegistry {
    ids: HashMap<String, u64>,
    next_id: u64,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::with_first_id(DEFAULT_FIRST_STATE_ID)
    }

    pub fn with_first_id(first_id: u64) -> Self {
        Self {
            ids: HashMap::new(),
            next_id: first_id,
        }
    }

    /// Seed the registry from an existing states file, so states already
    /// persisted keep their ids and new states start above them.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| Error::states_file(&file_name, format!("cannot open: {e}")))?;

        let mut ids = HashMap::new();
        let mut next_id = DEFAULT_FIRST_STATE_ID;
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                Error::states_file(&file_name, format!("read error at row {}: {e}", i + 1))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let (id_field, repr) = line.split_once(',').ok_or_else(|| {
                Error::states_file(&file_name, format!("row {} has no id field", i + 1))
            })?;
            let id: u64 = id_field.trim().parse().map_err(|_| {
                Error::states_file(&file_name, format!("bad id '{id_field}' at row {}", i + 1))
            })?;
            ids.insert(repr.to_string(), id);
            next_id = next_id.max(id + 1);
        }
        tracing::info!(file = %file_name, states = ids.len(), "seeded state registry");
        Ok(Self { ids, next_id })
    }

    /// The identity of a state, assigning the next free id on first sight.
    /// Returns the id and whether the state is new to the registry.
    pub fn intern(&mut self, state: &State, qn_order: &[&str]) -> (u64, bool) {
        let key = state.canonical_repr(qn_order);
        if let Some(&id) = self.ids.get(&key) {
            return (id, false);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(key, id);
        (id, true)
    }

    /// Number of interned states
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{QnMap, QnValue};

    fn state(j: i64) -> State {
        let mut qns = QnMap::new();
        qns.insert("J".to_string(), QnValue::Int(j));
        State::new(5, 1, 26, Some(3.845), Some(2 * j as u32 + 1), qns)
    }

    #[test]
    fn test_identical_states_share_one_id() {
        let mut registry = StateRegistry::new();
        let order = ["J"];
        let (id1, new1) = registry.intern(&state(7), &order);
        let (id2, new2) = registry.intern(&state(7), &order);
        assert_eq!(id1, DEFAULT_FIRST_STATE_ID);
        assert!(new1);
        assert_eq!(id2, id1);
        assert!(!new2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_states_get_sequential_ids() {
        let mut registry = StateRegistry::new();
        let order = ["J"];
        let (id1, _) = registry.intern(&state(1), &order);
        let (id2, _) = registry.intern(&state(2), &order);
        assert_eq!(id2, id1 + 1);
    }

    #[test]
    fn test_seeded_registry_continues_above_existing_ids() {
        let mut registry = StateRegistry::with_first_id(1);
        let order = ["J"];
        registry.intern(&state(1), &order);
        registry.intern(&state(2), &order);

        // a fresh registry seeded at the same point continues from there
        let mut continued = StateRegistry::with_first_id(3);
        let (id, new) = continued.intern(&state(3), &order);
        assert_eq!(id, 3);
        assert!(new);
    }
}
