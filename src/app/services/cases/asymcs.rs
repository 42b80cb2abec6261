//! Asymmetric-top polyatomics: H2CO, HCOOH, H2O2, COF2, O3-like heavies
//! and the larger organics quoted in normal-mode notation
//!
//! H2CO, H2O2 and COF2 write explicit mode-by-mode vibrational quanta;
//! H2O2 replaces v4 with its torsional n and tau indices. Every other
//! species in this case uses the compact normal-mode notation. Rotation is
//! the asymmetric-rotor J, Ka, Kc plus an optional hyperfine F.

use super::QuantaFields;
use super::globals::{normal_modes_decode, normal_modes_encode, qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const H2CO: u8 = 20;
const H2O2: u8 = 25;
const COF2: u8 = 29;

fn parse_vib(qns: &mut QnMap, v_field: &str, molec_id: u8) {
    if matches!(molec_id, H2CO | H2O2 | COF2) {
        for (name, start) in [("v1", 3), ("v2", 5), ("v3", 7)] {
            if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
                qns.insert(name.into(), v);
            }
        }
        if molec_id == H2O2 {
            // the torsional mode is quoted as n and tau instead of v4
            if let Some(n) = parse_qn(sub(v_field, 9, 10)) {
                qns.insert("n".into(), n);
            }
            if let Some(tau) = parse_qn(sub(v_field, 10, 11)) {
                qns.insert("tau".into(), tau);
            }
        } else if let Some(v) = parse_qn(sub(v_field, 9, 11)) {
            qns.insert("v4".into(), v);
        }
        for (name, start) in [("v5", 11), ("v6", 13)] {
            if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
                qns.insert(name.into(), v);
            }
        }
    } else {
        for (name, v) in normal_modes_decode(v_field) {
            qns.insert(name, QnValue::Int(v));
        }
    }
}

fn parse_state(v_field: &str, q_field: &str, molec_id: u8) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
    parse_vib(&mut qns, v_field, molec_id);

    for (name, range) in [("J", (0, 3)), ("Ka", (3, 6)), ("Kc", (6, 9))] {
        if let Some(v) = parse_qn(sub(q_field, range.0, range.1)) {
            qns.insert(name.into(), v);
        }
    }
    if let Some(f) = parse_qn(sub(q_field, 9, 14)) {
        qns.insert("F".into(), f);
    }
    qns
}

pub fn parse_qns(fields: &QuantaFields, molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let upper = parse_state(&fields.vp, &fields.qp, molec_id);
    let lower = parse_state(&fields.vpp, &fields.qpp, molec_id);
    (upper, lower, Multipole::ElectricDipole)
}

fn encode_vib(qns: &QnMap, molec_id: u8) -> String {
    match molec_id {
        H2CO | COF2 => format!(
            "   {}{}{}{}{}{}",
            qn_int(qns, "v1", 2),
            qn_int(qns, "v2", 2),
            qn_int(qns, "v3", 2),
            qn_int(qns, "v4", 2),
            qn_int(qns, "v5", 2),
            qn_int(qns, "v6", 2)
        ),
        H2O2 => format!(
            "   {}{}{}{}{}{}{}",
            qn_int(qns, "v1", 2),
            qn_int(qns, "v2", 2),
            qn_int(qns, "v3", 2),
            qn_int(qns, "n", 1),
            qn_int(qns, "tau", 1),
            qn_int(qns, "v5", 2),
            qn_int(qns, "v6", 2)
        ),
        _ => normal_modes_encode(qns),
    }
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    _multipole: Multipole,
    molec_id: u8,
    _iso_id: u8,
) -> [String; 4] {
    let vp = encode_vib(upper, molec_id);
    let vpp = encode_vib(lower, molec_id);

    let encode_rot = |qns: &QnMap| {
        format!(
            "{}{}{}{} ",
            qn_int(qns, "J", 3),
            qn_int(qns, "Ka", 3),
            qn_int(qns, "Kc", 3),
            qn_float(qns, "F", 5, 1)
        )
    };

    [vp, vpp, encode_rot(upper), encode_rot(lower)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_h2co_line() {
        let fields = QuantaFields::new(
            "    0 0 0 0 1 0",
            "    0 0 0 0 0 0",
            " 10  1  9      ",
            " 11  1 10      ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 20, 1);
        assert_eq!(upper.get("v5"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(10)));
        assert_eq!(lower.get("Kc"), Some(&QnValue::Int(10)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 20, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_round_trip_h2o2_torsional_indices() {
        let fields = QuantaFields::new(
            "    0 0 031 0 0",
            "    0 0 010 0 0",
            "  7  2  5      ",
            "  8  2  6      ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 25, 1);
        assert_eq!(upper.get("n"), Some(&QnValue::Int(3)));
        assert_eq!(upper.get("tau"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("n"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("tau"), Some(&QnValue::Int(0)));

        let [vp, vpp, _, _] = hitran_quanta(&upper, &lower, multipole, 25, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
    }

    #[test]
    fn test_normal_mode_species_round_trip() {
        let fields = QuantaFields::new(
            "             V6",
            "         GROUND",
            " 15  3 12      ",
            " 16  3 13      ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 12, 1);
        assert_eq!(upper.get("v6"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("v1"), Some(&QnValue::Int(0)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 12, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }
}
