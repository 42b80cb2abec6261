//! The decoded transition record

use super::{HitranParam, State};
use crate::app::services::cases::CaseKind;

/// Radiative multipole of a transition. Everything in the `.par` format is
/// electric dipole unless the case grammar says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Multipole {
    #[default]
    ElectricDipole,
    MagneticDipole,
    ElectricQuadrupole,
}

impl Multipole {
    /// The short tag persisted in the transitions file
    pub fn tag(&self) -> &'static str {
        match self {
            Multipole::ElectricDipole => "E1",
            Multipole::MagneticDipole => "M1",
            Multipole::ElectricQuadrupole => "E2",
        }
    }
}

/// A fully decoded `.par` transition
#[derive(Debug, Clone)]
pub struct Transition {
    /// HITRAN molecule id
    pub molec_id: u8,
    /// Local isotopologue id
    pub iso_id: u8,
    /// Global isotopologue id
    pub global_iso_id: u32,
    /// Case grammar the quantum-number fields were parsed under
    pub case: CaseKind,

    /// Vacuum wavenumber, cm-1
    pub nu: HitranParam,
    /// Line intensity at 296 K
    pub sw: HitranParam,
    /// Einstein A-coefficient, s-1
    pub a: HitranParam,
    /// Air-broadened HWHM at 296 K
    pub gamma_air: HitranParam,
    /// Self-broadened HWHM at 296 K, absent when unreported
    pub gamma_self: Option<HitranParam>,
    /// Temperature-dependence exponent of gamma_air
    pub n_air: HitranParam,
    /// Air pressure-induced line shift, absent when unreported
    pub delta_air: Option<HitranParam>,

    /// Lower-state energy, cm-1, absent when unresolved
    pub elower: Option<f64>,
    /// Upper-state statistical weight
    pub gp: Option<u32>,
    /// Lower-state statistical weight
    pub gpp: Option<u32>,
    /// Line-mixing flag column
    pub flag: char,
    /// Radiative multipole
    pub multipole: Multipole,

    /// Upper state
    pub upper: State,
    /// Lower state
    pub lower: State,
    /// Registry identity of the upper state, assigned at normalization
    pub upper_id: Option<u64>,
    /// Registry identity of the lower state, assigned at normalization
    pub lower_id: Option<u64>,

    /// The 160-column record this transition was decoded from. Kept verbatim
    /// so the Ierr/Iref block can be re-emitted byte-for-byte and the raw
    /// line archived alongside the normalized fields.
    pub par_line: String,
    /// 1-based position in the input file
    pub line_no: usize,
}

impl Transition {
    /// Upper-state energy, derivable only when the lower-state energy is
    /// resolved.
    pub fn upper_energy(&self) -> Option<f64> {
        self.elower.map(|e| e + self.nu.val)
    }

    /// The seven measured parameters in persisted column order
    pub fn params(&self) -> [Option<&HitranParam>; 7] {
        [
            Some(&self.nu),
            Some(&self.sw),
            Some(&self.a),
            Some(&self.gamma_air),
            self.gamma_self.as_ref(),
            Some(&self.n_air),
            self.delta_air.as_ref(),
        ]
    }
}
