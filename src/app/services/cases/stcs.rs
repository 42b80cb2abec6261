//! Symmetric-top molecules: CH3Cl, C2H6, CH3Br, CH3CN and the CH3D
//! isotopologues of methane
//!
//! Vibrational quanta use the compact normal-mode notation; the local field
//! carries J, K, l and the rovibrational symmetry species. C2H6 widens the
//! symmetry slot to three columns and uses alias labels for its unresolved
//! symmetry pairs.

use super::QuantaFields;
use super::globals::{normal_modes_decode, normal_modes_encode, qn_float, qn_int, qn_label_ljust, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const C2H6: u8 = 27;

/// Torsional symmetry pairs C2H6 quotes unresolved
fn expand_alias(label: &str) -> &str {
    match label {
        "A12" => "A1+A2",
        "A34" => "A3+A4",
        "E34" => "E3+E4",
        other => other,
    }
}

fn contract_alias(label: &str) -> &str {
    match label {
        "A1+A2" => "A12",
        "A3+A4" => "A34",
        "E3+E4" => "E34",
        other => other,
    }
}

fn parse_state(v_field: &str, q_field: &str, molec_id: u8) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    for (name, v) in normal_modes_decode(v_field) {
        qns.insert(name, QnValue::Int(v));
    }

    if let Some(j) = parse_qn(sub(q_field, 0, 3)) {
        qns.insert("J".into(), j);
    }
    // K = -1 marks an unassigned projection
    if sub(q_field, 3, 6) != " -1" {
        if let Some(k) = parse_qn(sub(q_field, 3, 6)) {
            qns.insert("K".into(), k);
        }
    }
    if let Some(l) = parse_qn(sub(q_field, 6, 8)) {
        qns.insert("l".into(), l);
    }

    if molec_id == C2H6 {
        let sym = sub(q_field, 8, 11).trim();
        if !sym.is_empty() {
            qns.insert("rovibSym".into(), QnValue::Label(expand_alias(sym).to_string()));
        }
    } else {
        let sym = sub(q_field, 8, 10).trim();
        if !sym.is_empty() {
            qns.insert("rovibSym".into(), QnValue::Label(sym.to_string()));
        }
        if let Some(f) = parse_qn(sub(q_field, 10, 15)) {
            qns.insert("F".into(), f);
        }
    }
    qns
}

pub fn parse_qns(fields: &QuantaFields, molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let upper = parse_state(&fields.vp, &fields.qp, molec_id);
    let lower = parse_state(&fields.vpp, &fields.qpp, molec_id);
    (upper, lower, Multipole::ElectricDipole)
}

fn encode_state(qns: &QnMap, molec_id: u8) -> (String, String) {
    let v = normal_modes_encode(qns);
    let tail = if molec_id == C2H6 {
        let sym = match qns.get("rovibSym").and_then(QnValue::as_label) {
            Some(s) => format!("{:>3}", contract_alias(s)),
            None => "   ".to_string(),
        };
        format!("{sym}    ")
    } else {
        format!(
            "{}{}",
            qn_label_ljust(qns, "rovibSym", 2),
            qn_float(qns, "F", 5, 1)
        )
    };
    let q = format!(
        "{}{}{}{}",
        qn_int(qns, "J", 3),
        qn_int(qns, "K", 3),
        qn_int(qns, "l", 2),
        tail
    );
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
    let (vpp, qpp) = encode_state(lower, molec_id);
    [vp, vpp, qp, qpp]
}
