//! OH electronic A-X band system
//!
//! The upper A2Sigma+ state is Hund's case (b): its spin component label
//! (1 or 2) replaces Omega in the global quanta field and fixes the Kronig
//! parity ('e' for F1, 'f' for F2). The lower X2Pi state reads like the
//! case (a) layout.

use super::QuantaFields;
use super::globals::{
    branch_between, branch_delta, chr_at, kronig_to_parity, other_parity, qn_char, qn_float,
    qn_int, qn_label, sub,
};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::{format_fraction, parse_qn};

pub fn parse_qns(fields: &QuantaFields, _molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = QnMap::new();
    let mut lower = QnMap::new();

    upper.insert("ElecStateLabel".into(), QnValue::Label("A".into()));
    upper.insert("S".into(), QnValue::Float(0.5));
    upper.insert("Lambda".into(), QnValue::Int(0));
    lower.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
    lower.insert("S".into(), QnValue::Float(0.5));
    lower.insert("Lambda".into(), QnValue::Int(1));

    let scl = chr_at(&fields.vp, 8).to_digit(10).map(i64::from);
    if let Some(scl) = scl {
        upper.insert("SpinComponentLabel".into(), QnValue::Int(scl));
    }
    if let Some(v) = parse_qn(sub(&fields.vp, 13, 15)) {
        upper.insert("v".into(), v);
    }

    let omega = match sub(&fields.vpp, 8, 11) {
        "3/2" => Some(1.5),
        "1/2" => Some(0.5),
        _ => None,
    };
    if let Some(o) = omega {
        lower.insert("Omega".into(), QnValue::Float(o));
    }
    if let Some(v) = parse_qn(sub(&fields.vpp, 13, 15)) {
        lower.insert("v".into(), v);
    }

    let br_j = chr_at(&fields.qpp, 3);
    let mut j_p = None;
    let mut j_pp = None;
    if let Some(jpp) = parse_qn(sub(&fields.qpp, 4, 9)) {
        j_pp = jpp.as_f64();
        if let Some(delta) = branch_delta(br_j) {
            j_p = j_pp.map(|j| j + delta as f64);
            if let Some(j) = j_p {
                upper.insert("J".into(), QnValue::Float(j));
            }
        }
        lower.insert("J".into(), jpp);
    }

    // the spin component label fixes both the Kronig parity and N of the
    // case (b) upper state
    let kp_p = match scl {
        Some(1) => Some('e'),
        Some(2) => Some('f'),
        _ => None,
    };
    if let Some(kp) = kp_p {
        upper.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
    }
    if let (Some(scl), Some(j)) = (scl, j_p) {
        let n = match scl {
            1 => Some((j - 0.5) as i64),
            2 => Some((j + 0.5) as i64),
            _ => None,
        };
        if let Some(n) = n {
            upper.insert("N".into(), QnValue::Int(n));
        }
    }

    let kp_pp = Some(chr_at(&fields.qpp, 9)).filter(|c| *c != ' ');
    if let Some(kp) = kp_pp {
        lower.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
    }

    let parity_p = kp_p.and_then(|kp| j_p.and_then(|j| kronig_to_parity(kp, j)));
    let parity_pp = kp_pp.and_then(|kp| j_pp.and_then(|j| kronig_to_parity(kp, j)));
    if let Some(p) = parity_p {
        upper.insert("parity".into(), QnValue::Label(p.to_string()));
    }
    if let Some(p) = parity_pp {
        lower.insert("parity".into(), QnValue::Label(p.to_string()));
    }
    if let (Some(p), Some(pp)) = (parity_p, parity_pp) {
        if Some(p) != other_parity(pp) {
            tracing::warn!(
                "A-X transition between states of like parity: {} <- {}",
                p,
                pp
            );
        }
    }

    (upper, lower, Multipole::ElectricDipole)
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    _multipole: Multipole,
    _molec_id: u8,
    _iso_id: u8,
) -> [String; 4] {
    let scl = qn_int(upper, "SpinComponentLabel", 1);
    let vp = format!(
        "       {}{}    {}",
        qn_label(upper, "ElecStateLabel", 1),
        scl,
        qn_int(upper, "v", 2)
    );

    let omega = match lower.get("Omega").and_then(QnValue::as_f64) {
        Some(o) => format_fraction(o),
        None => "   ".to_string(),
    };
    let vpp = format!(
        "       {}{}  {}",
        qn_label(lower, "ElecStateLabel", 1),
        omega,
        qn_int(lower, "v", 2)
    );

    let qp = " ".repeat(15);
    let qpp = format!(
        "   {}{}{}     ",
        branch_between(upper, lower, "J"),
        qn_float(lower, "J", 5, 1),
        qn_char(lower, "kronigParity")
    );

    [vp, vpp, qp, qpp]
}
