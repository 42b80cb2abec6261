//! Hund's case (b): O2
//!
//! The only case with electronic excitation in the line list: the upper
//! state may be X (3Sigma-g), a (1Delta-g) or b (1Sigma+g), the lower is
//! always X. Both N and J branches appear in the lower local field, and
//! the symmetry slot names the multipole ('d' dipole, 'q' quadrupole,
//! 'm' magnetic dipole).

use super::QuantaFields;
use super::globals::{branch_between, branch_delta, chr_at, qn_add, qn_char, qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

fn insert_electronic(qns: &mut QnMap, label: char) {
    if label == ' ' {
        return;
    }
    qns.insert("ElecStateLabel".into(), QnValue::Label(label.to_string()));
    let (s, lambda) = match label {
        'X' => (1, 0),
        'a' => (0, 2),
        'b' => (0, 0),
        _ => return,
    };
    qns.insert("S".into(), QnValue::Int(s));
    qns.insert("Lambda".into(), QnValue::Int(lambda));
}

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = QnMap::new();
    let mut lower = QnMap::new();

    insert_electronic(&mut upper, chr_at(&fields.vp, 7));
    insert_electronic(&mut lower, 'X');

    if let Some(v) = parse_qn(sub(&fields.vp, 13, 15)) {
        upper.insert("v".into(), v);
    }
    if let Some(v) = parse_qn(sub(&fields.vpp, 13, 15)) {
        lower.insert("v".into(), v);
    }

    let br_n = chr_at(&fields.qpp, 1);
    if let Some(npp) = parse_qn(sub(&fields.qpp, 2, 5)) {
        if let Some(delta) = branch_delta(br_n) {
            upper.insert("N".into(), qn_add(&npp, delta));
        }
        lower.insert("N".into(), npp);
    }

    let br_j = chr_at(&fields.qpp, 5);
    if let Some(jpp) = parse_qn(sub(&fields.qpp, 6, 9)) {
        if let Some(delta) = branch_delta(br_j) {
            upper.insert("J".into(), qn_add(&jpp, delta));
        }
        lower.insert("J".into(), jpp);
    }

    if let Some(f) = parse_qn(sub(&fields.qpp, 9, 14)) {
        lower.insert("F".into(), f);
    }
    if let Some(f) = parse_qn(sub(&fields.qp, 10, 15)) {
        upper.insert("F".into(), f);
    }

    let multipole = match chr_at(&fields.qpp, 14) {
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
    let s_label = qn_char(upper, "ElecStateLabel");
    let vp = format!("       {}     {}", s_label, qn_int(upper, "v", 2));
    let vpp = format!("       X     {}", qn_int(lower, "v", 2));

    let sympp = match multipole {
        Multipole::ElectricQuadrupole => 'q',
        Multipole::MagneticDipole => 'm',
        Multipole::ElectricDipole => 'd',
    };

    let qp = format!("          {}", qn_float(upper, "F", 5, 1));
    let qpp = format!(
        " {}{}{}{}{}{}",
        branch_between(upper, lower, "N"),
        qn_int(lower, "N", 3),
        branch_between(upper, lower, "J"),
        qn_int(lower, "J", 3),
        qn_float(lower, "F", 5, 1),
        sympp
    );

    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_a_band_line() {
        let fields = QuantaFields::new(
            "       b      0",
            "       X      0",
            "               ",
            " Q 13R 12     m",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 7, 1);
        assert_eq!(multipole, Multipole::MagneticDipole);
        assert_eq!(
            upper.get("ElecStateLabel"),
            Some(&QnValue::Label("b".into()))
        );
        assert_eq!(upper.get("S"), Some(&QnValue::Int(0)));
        assert_eq!(lower.get("S"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("N"), Some(&QnValue::Int(13)));
        assert_eq!(upper.get("N"), Some(&QnValue::Int(13)));
        assert_eq!(lower.get("J"), Some(&QnValue::Int(12)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(13)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 7, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_dipole_q_branch_keeps_the_d_slot() {
        // Q branch: J' == J'' == 9, and the dipole slot re-encodes as 'd'
        let fields = QuantaFields::new(
            "       b      0",
            "       X      0",
            "               ",
            " Q  9Q  9     d",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 7, 1);
        assert_eq!(multipole, Multipole::ElectricDipole);
        assert_eq!(lower.get("J"), Some(&QnValue::Int(9)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(9)));

        let [_, _, _, qpp] = hitran_quanta(&upper, &lower, multipole, 7, 1);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_quadrupole_symmetry_slot() {
        let fields = QuantaFields::new(
            "       X      1",
            "       X      0",
            "               ",
            " P  3P  2     q",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 7, 1);
        assert_eq!(multipole, Multipole::ElectricQuadrupole);
        assert_eq!(upper.get("N"), Some(&QnValue::Int(2)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(1)));

        let [_, _, _, qpp] = hitran_quanta(&upper, &lower, multipole, 7, 1);
        assert_eq!(qpp, fields.qpp);
    }
}
