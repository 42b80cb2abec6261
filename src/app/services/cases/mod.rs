//! Quantum-number case grammars and their dispatcher
//!
//! Each molecular structural class ("case") has its own fixed-column grammar
//! for the four 15-column quanta fields of a `.par` record. The registry
//! maps a (molecule, isotopologue) pair to the right grammar; methane
//! sub-dispatches on isotopologue and OH on the photon energy, which decides
//! between the rovibrational X-X bands and the electronic A-X system.

pub mod asymcs;
pub mod dcs;
pub mod globals;
pub mod hund_a;
pub mod hund_b;
pub mod lpcs;
pub mod ltcs;
pub mod nltcs;
pub mod nltos;
pub mod oh_ax;
pub mod pyrtet;
pub mod sphcs;
pub mod stcs;

use std::collections::HashMap;

use crate::app::models::{Multipole, QnMap, Transition};
use crate::constants::{OH_AX_THRESHOLD, OH_MOLEC_ID};
use crate::{Error, Result};

/// The four fixed-width quanta fields of a record, each 15 columns:
/// upper/lower global (vibronic) and upper/lower local (rotational) quanta.
#[derive(Debug, Clone)]
pub struct QuantaFields {
    pub vp: String,
    pub vpp: String,
    pub qp: String,
    pub qpp: String,
}

impl QuantaFields {
    pub fn new(vp: &str, vpp: &str, qp: &str, qpp: &str) -> Self {
        Self {
            vp: vp.to_string(),
            vpp: vpp.to_string(),
            qp: qp.to_string(),
            qpp: qpp.to_string(),
        }
    }
}

/// The closed set of case grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
    /// Closed-shell diatomics (CO, HF, HCl, HBr, HI, N2, NO+, H2, CS)
    Dcs,
    /// Closed-shell non-linear triatomics (H2O, O3, SO2, HOCl, H2S, HOBr)
    Nltcs,
    /// Closed-shell linear triatomics (CO2, N2O, OCS, HCN)
    Ltcs,
    /// Open-shell non-linear triatomics (NO2, HO2)
    Nltos,
    /// Hund's case (a) diatomics (NO, ClO and the OH X-X bands)
    HundA,
    /// Hund's case (b) diatomics (O2)
    HundB,
    /// The OH A-X electronic system
    OhAx,
    /// Closed-shell linear polyatomics (C2H2, C4H2, HC3N)
    Lpcs,
    /// Pyramidal tetratomics (NH3, PH3)
    Pyrtet,
    /// Spherical tops (CH4, SF6, CF4)
    Sphcs,
    /// Symmetric tops (CH3Cl, C2H6, CH3Br, CH3CN and the CH3D methanes)
    Stcs,
    /// Asymmetric tops (HNO3, H2CO, H2O2, COF2, HCOOH, ClONO2, C2H4, CH3OH)
    Asymcs,
}

impl CaseKind {
    /// Short label used in logs and metadata
    pub fn prefix(&self) -> &'static str {
        match self {
            CaseKind::Dcs => "dcs",
            CaseKind::Nltcs => "nltcs",
            CaseKind::Ltcs => "ltcs",
            CaseKind::Nltos => "nltos",
            CaseKind::HundA => "hunda",
            CaseKind::HundB => "hundb",
            CaseKind::OhAx => "ohax",
            CaseKind::Lpcs => "lpcs",
            CaseKind::Pyrtet => "pyrtet",
            CaseKind::Sphcs => "sphcs",
            CaseKind::Stcs => "stcs",
            CaseKind::Asymcs => "asymcs",
        }
    }

    /// Parse the quanta fields into upper and lower quantum-number maps and
    /// the transition multipole.
    pub fn parse_qns(
        &self,
        fields: &QuantaFields,
        molec_id: u8,
        iso_id: u8,
    ) -> (QnMap, QnMap, Multipole) {
        match self {
            CaseKind::Dcs => dcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Nltcs => nltcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Ltcs => ltcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Nltos => nltos::parse_qns(fields, molec_id, iso_id),
            CaseKind::HundA => hund_a::parse_qns(fields, molec_id, iso_id),
            CaseKind::HundB => hund_b::parse_qns(fields, molec_id, iso_id),
            CaseKind::OhAx => oh_ax::parse_qns(fields, molec_id, iso_id),
            CaseKind::Lpcs => lpcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Pyrtet => pyrtet::parse_qns(fields, molec_id, iso_id),
            CaseKind::Sphcs => sphcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Stcs => stcs::parse_qns(fields, molec_id, iso_id),
            CaseKind::Asymcs => asymcs::parse_qns(fields, molec_id, iso_id),
        }
    }

    /// Rebuild the four 15-column quanta fields (Vp, Vpp, Qp, Qpp) from the
    /// upper and lower quantum-number maps. The exact inverse of `parse_qns`
    /// for any record this grammar accepts.
    pub fn quanta(
        &self,
        upper: &QnMap,
        lower: &QnMap,
        multipole: Multipole,
        molec_id: u8,
        iso_id: u8,
    ) -> [String; 4] {
        match self {
            CaseKind::Dcs => dcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Nltcs => nltcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Ltcs => ltcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Nltos => nltos::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::HundA => hund_a::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::HundB => hund_b::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::OhAx => oh_ax::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Lpcs => lpcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Pyrtet => pyrtet::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Sphcs => sphcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Stcs => stcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
            CaseKind::Asymcs => asymcs::hitran_quanta(upper, lower, multipole, molec_id, iso_id),
        }
    }

    /// Rebuild the quanta fields straight from a transition
    pub fn hitran_quanta(&self, trans: &Transition) -> [String; 4] {
        self.quanta(
            &trans.upper.qns,
            &trans.lower.qns,
            trans.multipole,
            trans.molec_id,
            trans.iso_id,
        )
    }

    /// Canonical quantum-number name order for serializing states of this
    /// case. Names absent from a state are skipped on output.
    pub fn qn_order(&self) -> &'static [&'static str] {
        match self {
            CaseKind::Dcs => &["ElecStateLabel", "v", "J", "F"],
            CaseKind::Nltcs => &["ElecStateLabel", "v1", "v2", "v3", "J", "Ka", "Kc", "F"],
            CaseKind::Ltcs => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "l2",
                "v3",
                "r",
                "J",
                "kronigParity",
                "F",
            ],
            CaseKind::Nltos => &[
                "ElecStateLabel",
                "S",
                "v1",
                "v2",
                "v3",
                "N",
                "Ka",
                "Kc",
                "J",
                "F",
            ],
            CaseKind::HundA => &[
                "ElecStateLabel",
                "S",
                "Lambda",
                "Omega",
                "v",
                "N",
                "J",
                "F",
                "parity",
                "kronigParity",
            ],
            CaseKind::HundB => &["ElecStateLabel", "S", "Lambda", "v", "N", "J", "F"],
            CaseKind::OhAx => &[
                "ElecStateLabel",
                "S",
                "Lambda",
                "SpinComponentLabel",
                "Omega",
                "v",
                "N",
                "J",
                "parity",
                "kronigParity",
            ],
            CaseKind::Lpcs => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "v3",
                "v4",
                "v5",
                "v6",
                "v7",
                "l",
                "l5",
                "l6",
                "l7",
                "vibRefl",
                "r",
                "vibInv",
                "J",
                "parity",
                "kronigParity",
            ],
            CaseKind::Pyrtet => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "v3",
                "v4",
                "vibSym",
                "vibInv",
                "J",
                "K",
                "l",
            ],
            CaseKind::Sphcs => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "v3",
                "v4",
                "n",
                "vibSym",
                "J",
                "rovibSym",
                "alpha",
                "F",
            ],
            CaseKind::Stcs => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "v3",
                "v4",
                "v5",
                "v6",
                "v7",
                "v8",
                "v9",
                "v10",
                "v11",
                "v12",
                "J",
                "K",
                "l",
                "rovibSym",
                "F",
            ],
            CaseKind::Asymcs => &[
                "ElecStateLabel",
                "v1",
                "v2",
                "v3",
                "v4",
                "v5",
                "v6",
                "v7",
                "v8",
                "v9",
                "v10",
                "v11",
                "v12",
                "J",
                "Ka",
                "Kc",
                "F",
                "r",
                "n",
                "tau",
            ],
        }
    }
}

/// How a molecule id maps to a grammar
#[derive(Debug, Clone)]
enum SpeciesDispatch {
    /// One grammar for every isotopologue
    Fixed(CaseKind),
    /// Grammar depends on the isotopologue (methane)
    ByIso(&'static [(u8, CaseKind)]),
    /// Grammar depends on the photon energy (OH)
    PhotonThreshold {
        below: CaseKind,
        at_or_above: CaseKind,
        threshold: f64,
    },
}

/// The case-dispatch table: the single source of truth mapping species to
/// grammars. Built once at startup and never mutated.
#[derive(Debug)]
pub struct CaseRegistry {
    table: HashMap<u8, SpeciesDispatch>,
}

impl CaseRegistry {
    pub fn new() -> Self {
        use CaseKind::*;
        let mut table = HashMap::new();
        let mut fix = |ids: &[u8], kind: CaseKind| {
            for &id in ids {
                table.insert(id, SpeciesDispatch::Fixed(kind));
            }
        };
        fix(&[5, 14, 15, 16, 17, 22, 36, 45, 46], Dcs);
        fix(&[1, 3, 9, 21, 31, 37], Nltcs);
        fix(&[2, 4, 19, 23], Ltcs);
        fix(&[10, 33], Nltos);
        fix(&[8, 18], HundA);
        fix(&[7], HundB);
        fix(&[26, 43, 44], Lpcs);
        fix(&[11, 28], Pyrtet);
        fix(&[30, 42], Sphcs);
        fix(&[24, 27, 40, 41], Stcs);
        fix(&[12, 20, 25, 29, 32, 35, 38, 39], Asymcs);

        // CH4: the -h4 isotopologues are spherical tops, CH3D symmetric
        table.insert(
            6,
            SpeciesDispatch::ByIso(&[(1, Sphcs), (2, Sphcs), (3, Stcs), (4, Stcs)]),
        );
        // OH: above the A-X threshold the upper state is the A(2Sigma+)
        // level, described by its own grammar
        table.insert(
            OH_MOLEC_ID,
            SpeciesDispatch::PhotonThreshold {
                below: HundA,
                at_or_above: OhAx,
                threshold: OH_AX_THRESHOLD,
            },
        );

        Self { table }
    }

    /// Resolve a (molecule, isotopologue) pair to its grammar.
    /// `photon_energy` is the transition wavenumber in cm-1, needed only
    /// for OH.
    pub fn resolve(&self, molec_id: u8, iso_id: u8, photon_energy: f64) -> Result<CaseKind> {
        match self.table.get(&molec_id) {
            Some(SpeciesDispatch::Fixed(kind)) => Ok(*kind),
            Some(SpeciesDispatch::ByIso(pairs)) => pairs
                .iter()
                .find(|(id, _)| *id == iso_id)
                .map(|(_, kind)| *kind)
                .ok_or_else(|| Error::unknown_species(molec_id, iso_id)),
            Some(SpeciesDispatch::PhotonThreshold {
                below,
                at_or_above,
                threshold,
            }) => {
                if photon_energy >= *threshold {
                    Ok(*at_or_above)
                } else {
                    Ok(*below)
                }
            }
            None => Err(Error::unknown_species(molec_id, iso_id)),
        }
    }
}

impl Default for CaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Contextual metadata for a quantum number: which nucleus a hyperfine F
/// couples to, or which normal mode a `v<i>` name refers to. Labeling only;
/// round-trip correctness never depends on it.
pub fn qn_metadata(
    case: CaseKind,
    molec_id: u8,
    iso_id: u8,
    qn_name: &str,
) -> Vec<(&'static str, String)> {
    if let Some(mode) = qn_name
        .strip_prefix('v')
        .filter(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
    {
        return vec![("mode", mode.to_string())];
    }
    if molec_id == 25 && (qn_name == "n" || qn_name == "tau") {
        return vec![("name", qn_name.to_string())];
    }
    if qn_name == "F" {
        let nucleus = match (case, molec_id, iso_id) {
            (CaseKind::Dcs, 15, _) => Some("Cl1"),
            (CaseKind::Dcs, 16, _) => Some("Br1"),
            (CaseKind::Dcs, 17, _) => Some("I1"),
            (CaseKind::Nltcs, 3, 4) => Some("O3"),
            (CaseKind::Nltcs, 3, 5) => Some("O2"),
            _ => None,
        };
        if let Some(n) = nucleus {
            return vec![("nuclearSpinRef", n.to_string())];
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_known_species() {
        let registry = CaseRegistry::new();
        for molec_id in 1..=46u8 {
            if molec_id == 34 {
                // atomic oxygen has no rovibrational quanta in the line list
                continue;
            }
            assert!(
                registry.resolve(molec_id, 1, 1000.0).is_ok(),
                "molecule {molec_id} not dispatched"
            );
        }
    }

    #[test]
    fn test_methane_sub_dispatches_on_isotopologue() {
        let registry = CaseRegistry::new();
        assert_eq!(registry.resolve(6, 1, 3000.0).unwrap(), CaseKind::Sphcs);
        assert_eq!(registry.resolve(6, 2, 3000.0).unwrap(), CaseKind::Sphcs);
        assert_eq!(registry.resolve(6, 3, 3000.0).unwrap(), CaseKind::Stcs);
        assert_eq!(registry.resolve(6, 4, 3000.0).unwrap(), CaseKind::Stcs);
        assert!(registry.resolve(6, 5, 3000.0).is_err());
    }

    #[test]
    fn test_oh_photon_energy_threshold() {
        let registry = CaseRegistry::new();
        assert_eq!(registry.resolve(13, 1, 3568.4).unwrap(), CaseKind::HundA);
        assert_eq!(registry.resolve(13, 1, 32402.1).unwrap(), CaseKind::OhAx);
    }

    #[test]
    fn test_unknown_species_is_an_error() {
        let registry = CaseRegistry::new();
        let err = registry.resolve(99, 1, 1000.0).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownSpecies {
                molec_id: 99,
                iso_id: 1
            }
        ));
    }

    #[test]
    fn test_hyperfine_metadata() {
        assert_eq!(
            qn_metadata(CaseKind::Dcs, 15, 1, "F"),
            vec![("nuclearSpinRef", "Cl1".to_string())]
        );
        assert_eq!(
            qn_metadata(CaseKind::Asymcs, 25, 1, "v3"),
            vec![("mode", "3".to_string())]
        );
        assert!(qn_metadata(CaseKind::Dcs, 5, 1, "J").is_empty());
    }
}
