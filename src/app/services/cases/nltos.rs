//! Open-shell non-linear triatomics: NO2, HO2
//!
//! Doublet ground states: the local fields carry N, Ka, Kc and a trailing
//! '+'/'-' telling whether J = N + 1/2 or J = N - 1/2.

use super::QuantaFields;
use super::globals::{qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const NO2: u8 = 10;

fn parse_state(v_field: &str, q_field: &str) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
    qns.insert("S".into(), QnValue::Float(0.5));

    for (name, start) in [("v1", 9), ("v2", 11), ("v3", 13)] {
        if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
            qns.insert(name.into(), v);
        }
    }
    for (name, range) in [("N", (0, 3)), ("Ka", (3, 6)), ("Kc", (6, 9))] {
        if let Some(v) = parse_qn(sub(q_field, range.0, range.1)) {
            qns.insert(name.into(), v);
        }
    }
    if let Some(f) = parse_qn(sub(q_field, 9, 14)) {
        qns.insert("F".into(), f);
    }

    // the trailing sign gives the spin component: J = N +- 1/2
    let spin = match q_field.as_bytes().get(14) {
        Some(b'+') => Some(0.5),
        Some(b'-') => Some(-0.5),
        _ => None,
    };
    if let (Some(half), Some(QnValue::Int(n))) = (spin, qns.get("N")) {
        let j = *n as f64 + half;
        qns.insert("J".into(), QnValue::Float(j));
    }
    qns
}

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let upper = parse_state(&fields.vp, &fields.qp);
    let lower = parse_state(&fields.vpp, &fields.qpp);
    (upper, lower, Multipole::ElectricDipole)
}

fn spin_sign(qns: &QnMap) -> char {
    let (Some(j), Some(n)) = (
        qns.get("J").and_then(QnValue::as_f64),
        qns.get("N").and_then(QnValue::as_f64),
    ) else {
        return ' ';
    };
    if j < n {
        '-'
    } else if j > n {
        '+'
    } else {
        ' '
    }
}

fn encode_state(qns: &QnMap, molec_id: u8) -> (String, String) {
    let v = format!(
        "         {}{}{}",
        qn_int(qns, "v1", 2),
        qn_int(qns, "v2", 2),
        qn_int(qns, "v3", 2)
    );
    // NO2's hyperfine coupling is to 14N (I = 1): half-integer F;
    // HO2 couples to 1H, giving integer F
    let f = if molec_id == NO2 {
        qn_float(qns, "F", 5, 1)
    } else {
        qn_int(qns, "F", 5)
    };
    let q = format!(
        "{}{}{}{}{}",
        qn_int(qns, "N", 3),
        qn_int(qns, "Ka", 3),
        qn_int(qns, "Kc", 3),
        f,
        spin_sign(qns)
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
