//! Quantum states and their canonical serialization
//!
//! A state is identified by its species, energy, statistical weight and
//! quantum-number assignment. Two `.par` records sharing all of those refer
//! to the same physical state, so the canonical string built here is the
//! deduplication key for the state registry.

use std::collections::BTreeMap;
use std::fmt;

/// A single quantum-number value. Labels cover symmetry species, parities
/// and electronic-state designations that have no numeric form.
#[derive(Debug, Clone, PartialEq)]
pub enum QnValue {
    Int(i64),
    Float(f64),
    Label(String),
}

impl QnValue {
    /// The value as a float, when it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QnValue::Int(i) => Some(*i as f64),
            QnValue::Float(f) => Some(*f),
            QnValue::Label(_) => None,
        }
    }

    /// The value as an integer, when it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QnValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a label, when it is one
    pub fn as_label(&self) -> Option<&str> {
        match self {
            QnValue::Label(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for QnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QnValue::Int(i) => write!(f, "{i}"),
            // half-integer angular momenta are the only non-integral floats
            // stored here, so one decimal place is exact
            QnValue::Float(x) => write!(f, "{x:.1}"),
            QnValue::Label(s) => write!(f, "{s}"),
        }
    }
}

/// A quantum-number assignment, keyed by qn name
pub type QnMap = BTreeMap<String, QnValue>;

/// A molecular quantum state
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// HITRAN molecule id
    pub molec_id: u8,
    /// Local isotopologue id
    pub iso_id: u8,
    /// Global isotopologue id
    pub global_iso_id: u32,
    /// State energy above the ground state, cm-1, when resolved
    pub energy: Option<f64>,
    /// Total statistical weight, when known
    pub g: Option<u32>,
    /// Quantum-number assignment
    pub qns: QnMap,
}

impl State {
    pub fn new(
        molec_id: u8,
        iso_id: u8,
        global_iso_id: u32,
        energy: Option<f64>,
        g: Option<u32>,
        qns: QnMap,
    ) -> Self {
        Self {
            molec_id,
            iso_id,
            global_iso_id,
            energy,
            g,
            qns,
        }
    }

    /// Serialize the quantum numbers as `name=value` pairs joined by `;`,
    /// following the supplied canonical name order for the state's case.
    /// Names absent from the assignment are skipped.
    pub fn serialize_qns(&self, order: &[&str]) -> String {
        let mut parts = Vec::with_capacity(self.qns.len());
        for name in order {
            if let Some(val) = self.qns.get(*name) {
                parts.push(format!("{name}={val}"));
            }
        }
        parts.join(";")
    }

    /// The deduplication key: every field that distinguishes one physical
    /// state from another, rendered exactly as the states file renders it.
    pub fn canonical_repr(&self, order: &[&str]) -> String {
        format!(
            "{:2},{:1},{:4},{},{},{}",
            self.molec_id,
            self.iso_id,
            self.global_iso_id,
            self.energy
                .map(|e| format!("{e:10.4}"))
                .unwrap_or_default(),
            self.g.map(|g| format!("{g:5}")).unwrap_or_default(),
            self.serialize_qns(order),
        )
    }
}
