//! Hund's case (a) diatomics: NO, ClO and the OH X-X rovibrational bands
//!
//! 2Pi ground states. The global quanta fields carry the electronic label,
//! the Omega spin component as a fraction and the vibrational quantum
//! number. OH lays out its lower local field differently from NO and ClO,
//! and its spin-orbit splitting is inverted, which flips the N derivation.

use super::QuantaFields;
use super::globals::{
    branch_between, branch_delta, chr_at, kronig_to_parity, other_parity, parity_to_kronig,
    qn_char, qn_float, qn_int, qn_label, sub,
};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::{format_fraction, parse_qn};

const NO: u8 = 8;
const OH: u8 = 13;

fn parse_omega(qns: &mut QnMap, v_field: &str) -> Option<f64> {
    let omega = match sub(v_field, 8, 11) {
        "3/2" => Some(1.5),
        "1/2" => Some(0.5),
        _ => None,
    };
    if let Some(o) = omega {
        qns.insert("Omega".into(), QnValue::Float(o));
    }
    omega
}

/// N from J and Omega. Regular spin-orbit splitting (reg = 1) puts
/// Omega = 1/2 at J = N + 1/2; inverted splitting (OH, reg = -1) swaps the
/// components. For J = 1/2, Omega = 1/2, N must be 1.
fn derive_n(qns: &mut QnMap, omega: Option<f64>, j: Option<f64>, reg: f64) {
    let (Some(omega), Some(j)) = (omega, j) else {
        return;
    };
    let mut n = if omega < 1.0 {
        (j - reg * 0.5) as i64
    } else {
        (j + reg * 0.5) as i64
    };
    if omega < 1.0 && n == 0 {
        n = 1;
    }
    qns.insert("N".into(), QnValue::Int(n));
}

fn insert_parity_pair(qns: &mut QnMap, kronig: Option<char>, j: Option<f64>) {
    let Some(kp) = kronig else { return };
    qns.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
    if let Some(j) = j {
        if let Some(p) = kronig_to_parity(kp, j) {
            qns.insert("parity".into(), QnValue::Label(p.to_string()));
        }
    }
}

pub fn parse_qns(fields: &QuantaFields, molec_id: u8, _iso_id: u8) -> (QnMap, QnMap, Multipole) {
    let mut upper = QnMap::new();
    let mut lower = QnMap::new();
    for qns in [&mut upper, &mut lower] {
        qns.insert("ElecStateLabel".into(), QnValue::Label("X".into()));
        qns.insert("S".into(), QnValue::Float(0.5));
        qns.insert("Lambda".into(), QnValue::Int(1));
    }

    let omega_p = parse_omega(&mut upper, &fields.vp);
    let omega_pp = parse_omega(&mut lower, &fields.vpp);

    if let Some(v) = parse_qn(sub(&fields.vp, 13, 15)) {
        upper.insert("v".into(), v);
    }
    if let Some(v) = parse_qn(sub(&fields.vpp, 13, 15)) {
        lower.insert("v".into(), v);
    }

    let mut multipole = Multipole::ElectricDipole;
    let mut j_p = None;
    let mut j_pp = None;

    if molec_id == OH {
        // inverted spin-orbit splitting, and OH's own Qpp layout
        let br_j = chr_at(&fields.qpp, 2);
        if let Some(jpp) = parse_qn(sub(&fields.qpp, 3, 8)) {
            j_pp = jpp.as_f64();
            if let Some(delta) = branch_delta(br_j) {
                j_p = j_pp.map(|j| j + delta as f64);
                if let Some(j) = j_p {
                    upper.insert("J".into(), QnValue::Float(j));
                }
            }
            lower.insert("J".into(), jpp);
        }
        // both Lambda-doubling symmetries live in the lower local field
        let kp_p = Some(chr_at(&fields.qpp, 8)).filter(|c| *c != ' ');
        let kp_pp = Some(chr_at(&fields.qpp, 9)).filter(|c| *c != ' ');
        insert_parity_pair(&mut upper, kp_p, j_p);
        insert_parity_pair(&mut lower, kp_pp, j_pp);
    } else {
        // NO, ClO
        let br_j = chr_at(&fields.qpp, 3);
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
        let kp_pp = Some(chr_at(&fields.qpp, 9)).filter(|c| *c != ' ');
        insert_parity_pair(&mut lower, kp_pp, j_pp);

        let parity_pp = kp_pp
            .and_then(|kp| j_pp.and_then(|j| kronig_to_parity(kp, j)));
        let parity_p = if chr_at(&fields.qp, 0) == 'm' {
            // magnetic dipole transitions connect like parities
            multipole = Multipole::MagneticDipole;
            parity_pp
        } else {
            // electric dipole transitions connect '+' with '-'
            parity_pp.and_then(other_parity)
        };
        if let Some(p) = parity_p {
            upper.insert("parity".into(), QnValue::Label(p.to_string()));
            if let Some(j) = j_p {
                if let Some(kp) = parity_to_kronig(p, j) {
                    upper.insert("kronigParity".into(), QnValue::Label(kp.to_string()));
                }
            }
        }
    }

    if let Some(f) = parse_qn(sub(&fields.qpp, 10, 15)) {
        lower.insert("F".into(), f);
    }
    if let Some(f) = parse_qn(sub(&fields.qp, 10, 15)) {
        upper.insert("F".into(), f);
    }

    let reg = if molec_id == OH { -1.0 } else { 1.0 };
    derive_n(&mut lower, omega_pp, j_pp, reg);
    derive_n(&mut upper, omega_p, j_p, reg);

    (upper, lower, multipole)
}

fn encode_vib(qns: &QnMap) -> String {
    let omega = match qns.get("Omega").and_then(QnValue::as_f64) {
        Some(o) => format_fraction(o),
        None => "   ".to_string(),
    };
    format!(
        "       {}{}  {}",
        qn_label(qns, "ElecStateLabel", 1),
        omega,
        qn_int(qns, "v", 2)
    )
}

pub fn hitran_quanta(
    upper: &QnMap,
    lower: &QnMap,
    multipole: Multipole,
    molec_id: u8,
    iso_id: u8,
) -> [String; 4] {
    let vp = encode_vib(upper);
    let vpp = encode_vib(lower);

    let br_j = branch_between(upper, lower, "J");
    let s_jpp = qn_float(lower, "J", 5, 1);
    // N is not retained for this case, so the N branch slot stays blank
    let br_n = ' ';
    let kp_pp = qn_char(lower, "kronigParity");

    let (qp, qpp) = if molec_id == OH {
        let kp_p = qn_char(upper, "kronigParity");
        // OH and OD differ in the integrality of F: I(H) = 1/2, I(D) = 1
        let (s_fp, s_fpp) = if iso_id < 3 {
            (qn_int(upper, "F", 5), qn_int(lower, "F", 5))
        } else {
            (qn_float(upper, "F", 5, 1), qn_float(lower, "F", 5, 1))
        };
        (
            format!("          {s_fp}"),
            format!(" {br_n}{br_j}{s_jpp}{kp_p}{kp_pp}{s_fpp}"),
        )
    } else {
        // hyperfine coupling is resolved for 14N (half-integer F) and for
        // the chlorine nuclei of ClO (integer F)
        let (s_fp, s_fpp) = if molec_id == NO {
            (qn_float(upper, "F", 5, 1), qn_float(lower, "F", 5, 1))
        } else {
            (qn_int(upper, "F", 5), qn_int(lower, "F", 5))
        };
        let s_multipole = if multipole == Multipole::MagneticDipole {
            'm'
        } else {
            ' '
        };
        (
            format!("{s_multipole}         {s_fp}"),
            format!("  {br_n}{br_j}{s_jpp}{kp_pp}{s_fpp}"),
        )
    };

    [vp, vpp, qp, qpp]
}
