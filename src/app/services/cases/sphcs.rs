//! Spherical-top molecules: CH4 (main isotopologues), SF6, CF4
//!
//! Four vibrational modes, a multiplicity index n and a vibrational
//! symmetry species in the global quanta field; J, the rovibrational
//! symmetry species, a running index alpha and an optional F in the local
//! field. Symmetry labels are stored left-justified in their two-column
//! slots.

use super::QuantaFields;
use super::globals::{qn_int, qn_label_ljust, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

fn parse_state(v_field: &str, q_field: &str) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    for (name, start) in [("v1", 3), ("v2", 5), ("v3", 7), ("v4", 9), ("n", 11)] {
        if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
            qns.insert(name.into(), v);
        }
    }
    let vib_sym = sub(v_field, 13, 15).trim();
    if !vib_sym.is_empty() {
        qns.insert("vibSym".into(), QnValue::Label(vib_sym.to_string()));
    }

    if let Some(j) = parse_qn(sub(q_field, 2, 5)) {
        qns.insert("J".into(), j);
    }
    let rovib_sym = sub(q_field, 5, 7).trim();
    if !rovib_sym.is_empty() {
        qns.insert("rovibSym".into(), QnValue::Label(rovib_sym.to_string()));
    }
    if let Some(alpha) = parse_qn(sub(q_field, 7, 10)) {
        qns.insert("alpha".into(), alpha);
    }
    if let Some(f) = parse_qn(sub(q_field, 10, 15)) {
        qns.insert("F".into(), f);
    }
    qns
}

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let upper = parse_state(&fields.vp, &fields.qp);
    let lower = parse_state(&fields.vpp, &fields.qpp);
    (upper, lower, Multipole::ElectricDipole)
}

fn encode_state(qns: &QnMap) -> (String, String) {
    let v = format!(
        "   {}{}{}{}{}{}",
        qn_int(qns, "v1", 2),
        qn_int(qns, "v2", 2),
        qn_int(qns, "v3", 2),
        qn_int(qns, "v4", 2),
        qn_int(qns, "n", 2),
        qn_label_ljust(qns, "vibSym", 2)
    );
    let q = format!(
        "  {}{}{}{}",
        qn_int(qns, "J", 3),
        qn_label_ljust(qns, "rovibSym", 2),
        qn_int(qns, "alpha", 3),
        qn_int(qns, "F", 5)
    );
    (v, q)
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    _multipole: Multipole,
    _molec_id: u8,
    _iso_id: u8,
) -> [String; 4] {
    let (vp, qp) = encode_state(upper);
    let (vpp, qpp) = encode_state(lower);
    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_methane_line() {
        let fields = QuantaFields::new(
            "    0 0 1 0 1F2",
            "    0 0 0 0 1A1",
            "   12F2  3     ",
            "   13F1  2     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 6, 1);
        assert_eq!(upper.get("v3"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("n"), Some(&QnValue::Int(1)));
        assert_eq!(
            upper.get("vibSym"),
            Some(&QnValue::Label("F2".into()))
        );
        assert_eq!(upper.get("J"), Some(&QnValue::Int(12)));
        assert_eq!(
            lower.get("rovibSym"),
            Some(&QnValue::Label("F1".into()))
        );
        assert_eq!(lower.get("alpha"), Some(&QnValue::Int(2)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 6, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_single_letter_symmetry_is_left_justified() {
        let fields = QuantaFields::new(
            "    0 0 0 1 1E ",
            "    0 0 0 0 1A1",
            "    5E   7     ",
            "    6A2  4     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 6, 2);
        assert_eq!(upper.get("vibSym"), Some(&QnValue::Label("E".into())));
        assert_eq!(
            upper.get("rovibSym"),
            Some(&QnValue::Label("E".into()))
        );

        let [vp, _, qp, _] = hitran_quanta(&upper, &lower, multipole, 6, 2);
        assert_eq!(vp, fields.vp);
        assert_eq!(qp, fields.qp);
    }
}
