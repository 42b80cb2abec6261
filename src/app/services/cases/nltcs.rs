//! Closed-shell non-linear triatomics: H2O, O3, SO2, HOCl, H2S, HOBr
//!
//! Three vibrational modes in the global quanta field; asymmetric-rotor
//! J, Ka, Kc plus an optional hyperfine F in the local fields of both
//! states.

use super::QuantaFields;
use super::globals::{qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

fn parse_state(v_field: &str, q_field: &str) -> QnMap {
    let mut qns = QnMap::new();
    qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));

    for (name, start) in [("v1", 9), ("v2", 11), ("v3", 13)] {
        if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
            qns.insert(name.into(), v);
        }
    }
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

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let upper = parse_state(&fields.vp, &fields.qp);
    let lower = parse_state(&fields.vpp, &fields.qpp);
    (upper, lower, Multipole::ElectricDipole)
}

fn encode_state(qns: &QnMap) -> (String, String) {
    let v = format!(
        "         {}{}{}",
        qn_int(qns, "v1", 2),
        qn_int(qns, "v2", 2),
        qn_int(qns, "v3", 2)
    );
    let q = format!(
        "{}{}{}{} ",
        qn_int(qns, "J", 3),
        qn_int(qns, "Ka", 3),
        qn_int(qns, "Kc", 3),
        qn_float(qns, "F", 5, 1)
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
