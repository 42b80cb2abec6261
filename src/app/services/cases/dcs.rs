//! Closed-shell diatomics: CO, HF, HCl, HBr, HI, N2, NO+, H2, CS
//!
//! The global quanta field carries only the vibrational quantum number; the
//! lower local field carries the branch letter, J" and an optional hyperfine
//! F". For N2 the symmetry slot of the lower local field doubles as the
//! multipole designation ('q' quadrupole, 'm' magnetic dipole).

use super::QuantaFields;
use super::globals::{branch_between, branch_delta, chr_at, qn_add, qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = QnMap::new();
    let mut lower = QnMap::new();
    // all dcs molecules in the line list are in their ground electronic state
    upper.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
    lower.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    if let Some(v) = parse_qn(&fields.vp) {
        upper.insert("v".into(), v);
    }
    if let Some(v) = parse_qn(&fields.vpp) {
        lower.insert("v".into(), v);
    }

    let br = chr_at(&fields.qpp, 5);
    if let Some(jpp) = parse_qn(sub(&fields.qpp, 6, 9)) {
        if let Some(delta) = branch_delta(br) {
            upper.insert("J".into(), qn_add(&jpp, delta));
        }
        lower.insert("J".into(), jpp);
    }

    if let Some(f) = parse_qn(sub(&fields.qpp, 10, 15)) {
        lower.insert("F".into(), f);
    }
    if let Some(f) = parse_qn(sub(&fields.qp, 10, 15)) {
        upper.insert("F".into(), f);
    }

    let multipole = match chr_at(&fields.qpp, 9) {
        'q' => Multipole::ElectricQuadrupole,
        'm' => Multipole::MagneticDipole,
        _ => Multipole::ElectricDipole,
    };

    (upper, lower, multipole)
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    multipole: Multipole,
    _molec_id: u8,
    _iso_id: u8,
) -> [String; 4] {
    let sympp = match multipole {
        Multipole::ElectricQuadrupole => 'q',
        Multipole::MagneticDipole => 'm',
        Multipole::ElectricDipole => ' ',
    };

    let vp = format!("             {}", qn_int(upper, "v", 2));
    let vpp = format!("             {}", qn_int(lower, "v", 2));

    let qp = format!("          {}", qn_float(upper, "F", 5, 1));

    let br = branch_between(upper, lower, "J");
    let qpp = format!(
        "     {}{}{}{}",
        br,
        qn_int(lower, "J", 3),
        sympp,
        qn_float(lower, "F", 5, 1)
    );

    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_co_line() {
        let fields = QuantaFields::new(
            "              2",
            "              1",
            "               ",
            "     P 17      ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 5, 1);
        assert_eq!(upper.get("v"), Some(&QnValue::Int(2)));
        assert_eq!(lower.get("v"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("J"), Some(&QnValue::Int(17)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(16)));
        assert_eq!(multipole, Multipole::ElectricDipole);

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 5, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_n2_quadrupole_designation() {
        let fields = QuantaFields::new(
            "              1",
            "              0",
            "               ",
            "     Q  9q     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 22, 1);
        assert_eq!(multipole, Multipole::ElectricQuadrupole);
        assert_eq!(lower.get("J"), Some(&QnValue::Int(9)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(9)));

        let [_, _, _, qpp] = hitran_quanta(&upper, &lower, multipole, 22, 1);
        assert_eq!(qpp, "     Q  9q     ");
    }

    #[test]
    fn test_hyperfine_f_survives_round_trip() {
        let fields = QuantaFields::new(
            "              1",
            "              0",
            "            3.5",
            "     R  2   2.5",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 15, 1);
        assert_eq!(upper.get("F"), Some(&QnValue::Float(3.5)));
        assert_eq!(lower.get("F"), Some(&QnValue::Float(2.5)));

        let [_, _, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 15, 1);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }
}
