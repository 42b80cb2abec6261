//! Pyramidal tetratomics: NH3, PH3
//!
//! Four vibrational modes in the global quanta field. NH3 additionally
//! carries the inversion symmetry ('a'/'s') at the end of the global field
//! and repeats it inside the local field; PH3 writes a vibrational symmetry
//! label inside the local field instead.

use super::QuantaFields;
use super::globals::{chr_at, qn_int, qn_label, qn_label_ljust, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const NH3: u8 = 11;

fn parse_state(v_field: &str, q_field: &str, molec_id: u8) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    for (name, start) in [("v1", 5), ("v2", 7), ("v3", 9), ("v4", 11)] {
        if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
            qns.insert(name.into(), v);
        }
    }
    if molec_id == NH3 {
        let inv = chr_at(v_field, 14);
        if inv != ' ' {
            qns.insert("vibInv".into(), QnValue::Label(inv.to_string()));
        }
    } else {
        let sym = sub(q_field, 8, 10).trim();
        if !sym.is_empty() {
            qns.insert("vibSym".into(), QnValue::Label(sym.to_string()));
        }
    }

    for (name, range) in [("J", (0, 3)), ("K", (3, 6)), ("l", (6, 8))] {
        if let Some(v) = parse_qn(sub(q_field, range.0, range.1)) {
            qns.insert(name.into(), v);
        }
    }
    qns
}

pub fn parse_qns(fields: &QuantaFields, molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = parse_state(&fields.vp, &fields.qp, molec_id);
    let lower = parse_state(&fields.vpp, &fields.qpp, molec_id);
    if molec_id == NH3 {
        let sym = chr_at(&fields.vp, 13);
        if sym != ' ' {
            upper.insert("vibSym".into(), QnValue::Label(sym.to_string()));
        }
    }
    (upper, lower, Multipole::ElectricDipole)
}

fn encode_state(qns: &QnMap, molec_id: u8) -> (String, String) {
    let v = format!(
        "     {}{}{}{} {}",
        qn_int(qns, "v1", 2),
        qn_int(qns, "v2", 2),
        qn_int(qns, "v3", 2),
        qn_int(qns, "v4", 2),
        if molec_id == NH3 {
            qn_label(qns, "vibInv", 1)
        } else {
            " ".to_string()
        }
    );
    let q = if molec_id == NH3 {
        format!(
            "{}{}{}  {}    ",
            qn_int(qns, "J", 3),
            qn_int(qns, "K", 3),
            qn_int(qns, "l", 2),
            qn_label(qns, "vibInv", 1)
        )
    } else {
        format!(
            "{}{}{}{}     ",
            qn_int(qns, "J", 3),
            qn_int(qns, "K", 3),
            qn_int(qns, "l", 2),
            qn_label_ljust(qns, "vibSym", 2)
        )
    };
    (v, q)
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    _multipole: Multipole,
    molec_id: u8,
    _iso_id: u8,
) -> [String; 4] {
    let (vp, qp) = encode_state(upper, molec_id);
    let (vpp, mut qpp) = encode_state(lower, molec_id);
    // unassigned lower rotational states do not quote the inversion label
    if molec_id == NH3 && matches!(qpp.trim(), "a" | "s") {
        qpp = " ".repeat(15);
    }
    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_nh3_line() {
        let fields = QuantaFields::new(
            "      0 1 0 0 a",
            "      0 0 0 0 s",
            "  5  3 0  a    ",
            "  6  3 0  s    ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 11, 1);
        assert_eq!(upper.get("v2"), Some(&QnValue::Int(1)));
        assert_eq!(
            upper.get("vibInv"),
            Some(&QnValue::Label("a".into()))
        );
        assert_eq!(
            lower.get("vibInv"),
            Some(&QnValue::Label("s".into()))
        );
        assert_eq!(upper.get("J"), Some(&QnValue::Int(5)));
        assert_eq!(lower.get("K"), Some(&QnValue::Int(3)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 11, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_nh3_unassigned_lower_rotation_blanks_local_field() {
        let mut lower = QnMap::new();
        lower.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
        lower.insert("vibInv".into(), QnValue::Label("s".into()));
        let upper = lower.clone();

        let [_, _, _, qpp] = hitran_quanta(&upper, &lower, Multipole::ElectricDipole, 11, 1);
        assert_eq!(qpp, "               ");
    }

    #[test]
    fn test_round_trip_ph3_line() {
        let fields = QuantaFields::new(
            "      0 0 0 1  ",
            "      0 0 0 0  ",
            "  4  2 0E      ",
            "  3  2 0A1     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 28, 1);
        assert_eq!(
            upper.get("vibSym"),
            Some(&QnValue::Label("E".into()))
        );
        assert_eq!(
            lower.get("vibSym"),
            Some(&QnValue::Label("A1".into()))
        );

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 28, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }
}
