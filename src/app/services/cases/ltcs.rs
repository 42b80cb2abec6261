//! Closed-shell linear triatomics: CO2, N2O, OCS, HCN
//!
//! CO2 carries an extra Fermi-resonance rank r after the vibrational
//! quanta; the other species use the plain v1 v2 l2 v3 layout. The lower
//! local field holds the branch letter, J" and the Kronig parity; the only
//! transitions in the line list are e-e and f-f.

use super::QuantaFields;
use super::globals::{branch_between, branch_delta, chr_at, qn_add, qn_char, qn_float, qn_int, sub};
use crate::app::models::{Multipole, QnMap, QnValue};
use crate::app::services::par_codec::field_format::parse_qn;

const CO2: u8 = 2;
const HCN: u8 = 23;

fn parse_vib(qns: &mut QnMap, v_field: &str, molec_id: u8) {
    if molec_id == CO2 {
        for (name, start, len) in [("v1", 6, 2), ("v2", 8, 2), ("l2", 10, 2), ("v3", 12, 2)] {
            if let Some(v) = parse_qn(sub(v_field, start, start + len)) {
                qns.insert(name.into(), v);
            }
        }
        if let Some(r) = parse_qn(sub(v_field, 14, 15)) {
            qns.insert("r".into(), r);
        }
    } else {
        for (name, start) in [("v1", 7), ("v2", 9), ("l2", 11), ("v3", 13)] {
            if let Some(v) = parse_qn(sub(v_field, start, start + 2)) {
                qns.insert(name.into(), v);
            }
        }
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
    if let Some(jpp) = parse_qn(sub(&fields.qpp, 6, 9)) {
        if let Some(delta) = branch_delta(br) {
            upper.insert("J".into(), qn_add(&jpp, delta));
        }
        lower.insert("J".into(), jpp);
    }

    let kronig = chr_at(&fields.qpp, 9);
    if kronig != ' ' {
        lower.insert("kronigParity".into(), QnValue::Label(kronig.to_string()));
        upper.insert("kronigParity".into(), QnValue::Label(kronig.to_string()));
    }

    if let Some(f) = parse_qn(sub(&fields.qpp, 10, 15)) {
        lower.insert("F".into(), f);
    }
    if let Some(f) = parse_qn(sub(&fields.qp, 10, 15)) {
        upper.insert("F".into(), f);
    }

    (upper, lower, Multipole::ElectricDipole)
}

fn encode_vib(qns: &QnMap, molec_id: u8) -> String {
    if molec_id == CO2 {
        format!(
            "      {}{}{}{}{}",
            qn_int(qns, "v1", 2),
            qn_int(qns, "v2", 2),
            qn_int(qns, "l2", 2),
            qn_int(qns, "v3", 2),
            qn_int(qns, "r", 1)
        )
    } else {
        format!(
            "       {}{}{}{}",
            qn_int(qns, "v1", 2),
            qn_int(qns, "v2", 2),
            qn_int(qns, "l2", 2),
            qn_int(qns, "v3", 2)
        )
    }
}

fn hyperfine(qns: &QnMap, molec_id: u8) -> String {
    // 14N has integer nuclear spin, so HCN's F is integral; the other
    // hyperfine-resolved nuclei here give half-odd-integer F
    if molec_id == HCN {
        qn_int(qns, "F", 5)
    } else {
        qn_float(qns, "F", 5, 1)
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

    let br = branch_between(upper, lower, "J");
    let kronig = qn_char(lower, "kronigParity");

    let qp = format!("          {}", hyperfine(upper, molec_id));
    let qpp = format!(
        "     {}{}{}{}",
        br,
        qn_int(lower, "J", 3),
        kronig,
        hyperfine(lower, molec_id)
    );

    [vp, vpp, qp, qpp]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_co2_with_fermi_rank() {
        let fields = QuantaFields::new(
            "       1 1 1 12",
            "       0 0 0 01",
            "               ",
            "     P 26e     ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 2, 1);
        assert_eq!(upper.get("v1"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("l2"), Some(&QnValue::Int(1)));
        assert_eq!(upper.get("r"), Some(&QnValue::Int(2)));
        assert_eq!(lower.get("r"), Some(&QnValue::Int(1)));
        assert_eq!(lower.get("J"), Some(&QnValue::Int(26)));
        assert_eq!(upper.get("J"), Some(&QnValue::Int(25)));
        assert_eq!(
            lower.get("kronigParity"),
            Some(&QnValue::Label("e".into()))
        );

        let [vp, vpp, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 2, 1);
        assert_eq!(vp, fields.vp);
        assert_eq!(vpp, fields.vpp);
        assert_eq!(qp, fields.qp);
        assert_eq!(qpp, fields.qpp);
    }

    #[test]
    fn test_hcn_integer_hyperfine() {
        let fields = QuantaFields::new(
            "        0 2 0 0",
            "        0 0 0 0",
            "            5  ",
            "     R  4    4 ",
        );
        let (upper, lower, multipole) = parse_qns(&fields, 23, 1);
        assert_eq!(upper.get("F"), Some(&QnValue::Int(5)));
        assert_eq!(lower.get("F"), Some(&QnValue::Int(4)));

        let [_, _, qp, qpp] = hitran_quanta(&upper, &lower, multipole, 23, 1);
        // integral F is written %5d, not %5.1f
        assert_eq!(qp, "              5");
        assert_eq!(qpp, "     R  4     4");
    }
}
