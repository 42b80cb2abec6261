//! Application constants for the HITRAN processor
//!
//! This module contains the fixed byte layout of the HITRAN2004+ 160-column
//! `.par` record, the missing-value sentinels, and the molecule metadata
//! used throughout the application.

use std::ops::Range;

// =============================================================================
// .par record layout (HITRAN2004+, byte offsets into the 160-column line)
// =============================================================================

/// Total length of a `.par` record, excluding the line terminator
pub const PAR_LINE_LEN: usize = 160;

/// HITRAN molecule id (right-justified, 2 columns)
pub const MOLEC_ID: Range<usize> = 0..2;

/// Local isotopologue id (1 column)
pub const ISO_ID: Range<usize> = 2..3;

/// Vacuum wavenumber, cm-1 (%12.6f)
pub const NU: Range<usize> = 3..15;

/// Line intensity at 296 K, cm-1/(molec.cm-2) (%10.3E)
pub const SW: Range<usize> = 15..25;

/// Einstein A-coefficient, s-1 (%10.3E)
pub const A: Range<usize> = 25..35;

/// Air-broadened HWHM at 296 K, cm-1.atm-1 (%5.4f, leading zero stripped)
pub const GAMMA_AIR: Range<usize> = 35..40;

/// Self-broadened HWHM at 296 K, cm-1.atm-1 (%5.3f)
pub const GAMMA_SELF: Range<usize> = 40..45;

/// Lower-state energy, cm-1 (%10.4f, negative means unresolved)
pub const ELOWER: Range<usize> = 45..55;

/// Temperature-dependence exponent for gamma_air (%4.2f)
pub const N_AIR: Range<usize> = 55..59;

/// Air pressure-induced line shift at 296 K, cm-1.atm-1 (%8.6f)
pub const DELTA_AIR: Range<usize> = 59..67;

/// Upper-state global quanta (15 columns)
pub const VP: Range<usize> = 67..82;

/// Lower-state global quanta (15 columns)
pub const VPP: Range<usize> = 82..97;

/// Upper-state local quanta (15 columns)
pub const QP: Range<usize> = 97..112;

/// Lower-state local quanta (15 columns)
pub const QPP: Range<usize> = 112..127;

/// Six one-digit parameter error codes
pub const IERR: Range<usize> = 127..133;

/// Six two-digit parameter reference ids
pub const IREF: Range<usize> = 133..145;

/// Line-mixing flag (1 column)
pub const FLAG: usize = 145;

/// Upper-state statistical weight (%7.1f)
pub const GP: Range<usize> = 146..153;

/// Lower-state statistical weight (%7.1f)
pub const GPP: Range<usize> = 153..160;

// =============================================================================
// Missing-value sentinels
// =============================================================================

/// gamma_self field content meaning "no measurement reported"
pub const GAMMA_SELF_MISSING: &str = "0.000";

/// delta_air field content meaning "no measurement reported"
pub const DELTA_AIR_MISSING: &str = "0.000000";

/// Rendering of an unresolved lower-state energy
pub const ELOWER_MISSING: &str = "   -1.0000";

/// Rendering of a missing statistical weight
pub const WEIGHT_MISSING: &str = "    0.0";

// =============================================================================
// Case dispatch
// =============================================================================

/// Wavenumber (cm-1) above which an OH transition belongs to the A-X
/// electronic system, whose upper state follows Hund's case (b) rather
/// than the case (a) scheme of the X-X rovibrational bands.
pub const OH_AX_THRESHOLD: f64 = 26_000.0;

/// HITRAN molecule id of OH, the one species whose grammar depends on
/// the photon energy.
pub const OH_MOLEC_ID: u8 = 13;

// =============================================================================
// Molecule metadata
// =============================================================================

/// Ordinary chemical formulae, indexed by HITRAN molecule id. Used to build
/// reference-map keys of the form `<formula>-<param>-<ref_id>` ('+' written
/// as 'p' because the keys also appear in XML attributes).
pub const MOLECULE_FORMULAE: &[(u8, &str)] = &[
    (1, "H2O"),
    (2, "CO2"),
    (3, "O3"),
    (4, "N2O"),
    (5, "CO"),
    (6, "CH4"),
    (7, "O2"),
    (8, "NO"),
    (9, "SO2"),
    (10, "NO2"),
    (11, "NH3"),
    (12, "HNO3"),
    (13, "OH"),
    (14, "HF"),
    (15, "HCl"),
    (16, "HBr"),
    (17, "HI"),
    (18, "ClO"),
    (19, "OCS"),
    (20, "H2CO"),
    (21, "HOCl"),
    (22, "N2"),
    (23, "HCN"),
    (24, "CH3Cl"),
    (25, "H2O2"),
    (26, "C2H2"),
    (27, "C2H6"),
    (28, "PH3"),
    (29, "COF2"),
    (30, "SF6"),
    (31, "H2S"),
    (32, "HCOOH"),
    (33, "HO2"),
    (34, "O"),
    (35, "ClONO2"),
    (36, "NO+"),
    (37, "HOBr"),
    (38, "C2H4"),
    (39, "CH3OH"),
    (40, "CH3Br"),
    (41, "CH3CN"),
    (42, "CF4"),
    (43, "C4H2"),
    (44, "HC3N"),
    (45, "H2"),
    (46, "CS"),
];

/// Look up the ordinary formula for a molecule id
pub fn molecule_formula(molec_id: u8) -> Option<&'static str> {
    MOLECULE_FORMULAE
        .iter()
        .find(|(id, _)| *id == molec_id)
        .map(|(_, f)| *f)
}

/// Number of isotopologues per molecule id, in local-id order, for the
/// built-in global-isotopologue-id table. Global ids are assigned by
/// counting through this table in molecule-id order.
pub const ISOTOPOLOGUE_COUNTS: &[(u8, u8)] = &[
    (1, 6),
    (2, 9),
    (3, 5),
    (4, 5),
    (5, 6),
    (6, 4),
    (7, 3),
    (8, 3),
    (9, 2),
    (10, 1),
    (11, 2),
    (12, 1),
    (13, 3),
    (14, 1),
    (15, 2),
    (16, 2),
    (17, 1),
    (18, 2),
    (19, 5),
    (20, 3),
    (21, 2),
    (22, 1),
    (23, 3),
    (24, 2),
    (25, 1),
    (26, 2),
    (27, 1),
    (28, 1),
    (29, 1),
    (30, 1),
    (31, 3),
    (32, 1),
    (33, 1),
    (34, 1),
    (35, 2),
    (36, 1),
    (37, 2),
    (38, 2),
    (39, 1),
    (40, 2),
    (41, 1),
    (42, 1),
    (43, 1),
    (44, 1),
    (45, 2),
    (46, 4),
];

// =============================================================================
// Parameter names
// =============================================================================

/// The six reference slots of the Iref block, in column order. The intensity
/// slot ("S") provides the source for both Sw and the Einstein A-coefficient.
pub const IREF_SLOT_NAMES: &[&str] = &["nu", "S", "gamma_air", "gamma_self", "n_air", "delta_air"];

// =============================================================================
// Defaults
// =============================================================================

/// First state identity assigned when no persisted states are supplied
pub const DEFAULT_FIRST_STATE_ID: u64 = 1;

/// Source id used for reference 0 (the HITRAN 1986 paper)
pub const HITRAN_1986_SOURCE_ID: i64 = 1;
