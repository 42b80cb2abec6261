//! Closed-shell linear polyatomics: C2H2, C4H2, HC3N
//!
//! Each species lays out its vibrational quanta differently: C2H2 packs
//! five modes plus l, the reflection and inversion symmetries and a rank;
//! HC3N writes seven single-digit modes and three l quanta; the C4H2 lines
//! in the list carry no vibrational assignment at all. Rotation follows
//! the usual branch letter, J" and Kronig parity layout.

use super::QuantaFields;
use super::globals::{
    branch_between, branch_delta, chr_at, kronig_to_parity, other_parity, parity_to_kronig,
    qn_add, qn_char, qn_int, qn_label, sub,
};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const C2H2: u8 = 26;
const HC3N: u8 = 44;

fn parse_vib(qns: &mut QnMap, v_field: &str, molec_id: u8) {
    match molec_id {
        C2H2 => {
            for (name, start) in [("v1", 0), ("v2", 2), ("v3", 4), ("v4", 6), ("v5", 8), ("l", 10)]
            {
                if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
                    qns.insert(name.into(), v);
                }
            }
            let refl = chr_at(v_field, 12);
            if refl != ' ' {
                qns.insert("vibRefl".into(), QnValue::Label(refl.to_string()));
            }
            if let Some(r) = parse_qn(sub(v_field, 13, 14)) {
                qns.insert("r".into(), r);
            }
            let inv = chr_at(v_field, 14);
            if inv != ' ' {
                qns.insert("vibInv".into(), QnValue::Label(inv.to_string()));
            }
        }
        HC3N => {
            for (i, name) in ["v1", "v2", "v3", "v4", "v5", "v6", "v7"].iter().enumerate() {
                if let Some(v) = parse_qn(sub(v_field, 2 + i, 3 + i)) {
                    qns.insert((*name).into(), v);
                }
            }
            for (name, start) in [("l5", 9), ("l6", 11), ("l7", 13)] {
                if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
                    qns.insert(name.into(), v);
                }
            }
        }
        // C4H2 lines carry no vibrational assignment
        _ => {}
    }
}

pub fn parse_qns(fields: &QuantaFields, molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = QnMap::new();
    let mut lower = QnMap::new();
    upper.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
    lower.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    parse_vib(&mut upper, &fields.vp, molec_id);
    parse_vib(&mut lower, &fields.vpp, molec_id);

    let br = chr_at(&fields.qpp, 5);
    let mut j_p = None;
    let mut j_pp = None;
    if let Some(jpp) = parse_qn(sub(&fields.qpp, 6, 9)) {
        j_pp = jpp.as_f64();
        if let Some(delta) = branch_delta(br) {
            let jp = qn_add(&jpp, delta);
            j_p = jp.as_f64();
            upper.insert("J".into(), jp);
        }
        lower.insert("J".into(), jpp);
    }

    let kp_pp = Some(chr_at(&fields.qpp, 9)).filter(|c| *c != ' ');
    if let Some(kp) = kp_pp {
        lower.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
    }
    let parity_pp = kp_pp.and_then(|kp| j_pp.and_then(|j| kronig_to_parity(kp, j)));
    if let Some(p) = parity_pp {
        lower.insert("parity".into(), QnValue::Label(p.to_string()));
    }

    // electric dipole selection: the upper state has the opposite parity
    let parity_p = parity_pp.and_then(other_parity);
    if let Some(p) = parity_p {
        upper.insert("parity".into(), QnValue::Label(p.to_string()));
        if let Some(j) = j_p {
            if let Some(kp) = parity_to_kronig(p, j) {
                upper.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
            }
        }
    }

    (upper, lower, Multipole::ElectricDipole)
}

fn encode_vib(qns: &QnMap, molec_id: u8) -> String {
    match molec_id {
        C2H2 => format!(
            "{}{}{}{}{}{}{}{}{}",
            qn_int(qns, "v1", 2),
            qn_int(qns, "v2", 2),
            qn_int(qns, "v3", 2),
            qn_int(qns, "v4", 2),
            qn_int(qns, "v5", 2),
            qn_int(qns, "l", 2),
            qn_label(qns, "vibRefl", 1),
            qn_int(qns, "r", 1),
            qn_label(qns, "vibInv", 1)
        ),
        HC3N => format!(
            "  {}{}{}{}{}{}{}{}{}{}",
            qn_int(qns, "v1", 1),
            qn_int(qns, "v2", 1),
            qn_int(qns, "v3", 1),
            qn_int(qns, "v4", 1),
            qn_int(qns, "v5", 1),
            qn_int(qns, "v6", 1),
            qn_int(qns, "v7", 1),
            qn_int(qns, "l5", 2),
            qn_int(qns, "l6", 2),
            qn_int(qns, "l7", 2)
        ),
        _ => " ".repeat(15),
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

    let qp = " ".repeat(15);
    let qpp = format!(
        "     {}{}{}     ",
        branch_between(upper, lower, "J"),
        qn_int(lower, "J", 3),
        qn_char(lower, "kronigParity")
    );

    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_c2h2_line() {
        let fields = QuantaFields::new(
            " 0 0 1 1 1 2+ u",
            " 0 0 0 0 0 0+ g",
            "               ",
            "     Q  9e     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 26, 1);
        assert_eq!(upper.get("v5"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("l"), Some(&QnValue::Int(2)));
        assert_eq!(
            upper.get("vibInv"),
            Some(&QnValue::Label("u".into()))
        );
        assert_eq!(
            lower.get("vibRefl"),
            Some(&QnValue::Label("+".into()))
        );
        assert_eq!(lower.get("J"), Some(&QnValue::Int(9)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(9)));
        // Q branch from an e lower level puts the upper level at f
        assert_eq!(
            upper.get("kronigParity"),
            Some(&QnValue::Label("f".into()))
        );

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 26, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_round_trip_hc3n_line() {
        let fields = QuantaFields::new(
            "  0000011 0 0 1",
            "  0000000 0 0 0",
            "               ",
            "     R 17e     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 44, 1);
        assert_eq!(upper.get("v6"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("v7"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("l7"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(18)));

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 44, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_c4h2_blank_vibrational_fields() {
        let fields = QuantaFields::new(
            "               ",
            "               ",
            "               ",
            "     P  8e     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 43, 1);
        assert!(!upper.contains_key("v1"));

        let [vp, vpp, _, qpp] = hitran_quanta(&upper, &lower, multipole, 43, 1);
        assert_eq!(vp, "               ");
        assert_eq!(vpp, "               ");
        assert_eq!(qpp, fields.qpp);
    }
}
