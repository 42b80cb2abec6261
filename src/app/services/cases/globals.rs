//! Helpers shared by every case grammar
//!
//! Branch letters, parity conversions, the compact normal-mode vibrational
//! notation, and the fixed-width renderers the grammars use to rebuild the
//! 15-column quanta fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::models::{QnMap, QnValue};
use crate::app::services::par_codec::field_format::{format_f, format_i};

/// Matches normal-mode quantum number names: v1, v2, ... v12
static VIB_QN_PATT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v(\d+)$").unwrap());

/// Branch letter for a rotational quantum number change. The extended
/// alphabet covers DeltaN up to +-6 as well as the familiar P/Q/R.
pub fn branch_letter(delta: i64) -> Option<char> {
    match delta {
        -6 => Some('K'),
        -5 => Some('L'),
        -4 => Some('M'),
        -3 => Some('N'),
        -2 => Some('O'),
        -1 => Some('P'),
        0 => Some('Q'),
        1 => Some('R'),
        2 => Some('S'),
        3 => Some('T'),
        4 => Some('U'),
        5 => Some('V'),
        6 => Some('W'),
        _ => None,
    }
}

/// DeltaJ (or DeltaN) for a branch letter
pub fn branch_delta(letter: char) -> Option<i64> {
    match letter {
        'K' => Some(-6),
        'L' => Some(-5),
        'M' => Some(-4),
        'N' => Some(-3),
        'O' => Some(-2),
        'P' => Some(-1),
        'Q' => Some(0),
        'R' => Some(1),
        'S' => Some(2),
        'T' => Some(3),
        'U' => Some(4),
        'V' => Some(5),
        'W' => Some(6),
        _ => None,
    }
}

/// The rotational phase (-1)^J, with half-integer J taken as J - 1/2
fn j_phase(j: f64) -> i64 {
    let n = (j - 0.5).round() as i64;
    let j_int = if (j.fract()).abs() < 1e-6 {
        j.round() as i64
    } else {
        n
    };
    if j_int % 2 == 0 { 1 } else { -1 }
}

/// Total parity from the Kronig (rotationless) parity and J
pub fn kronig_to_parity(kronig: char, j: f64) -> Option<char> {
    let phase = j_phase(j);
    match kronig {
        'e' => Some(if phase > 0 { '+' } else { '-' }),
        'f' => Some(if phase > 0 { '-' } else { '+' }),
        _ => None,
    }
}

/// Kronig (rotationless) parity from the total parity and J
pub fn parity_to_kronig(parity: char, j: f64) -> Option<char> {
    let phase = j_phase(j);
    match parity {
        '+' => Some(if phase > 0 { 'e' } else { 'f' }),
        '-' => Some(if phase > 0 { 'f' } else { 'e' }),
        _ => None,
    }
}

/// The opposite total parity
pub fn other_parity(parity: char) -> Option<char> {
    match parity {
        '+' => Some('-'),
        '-' => Some('+'),
        _ => None,
    }
}

/// Render the vibrational quantum numbers of a state in the compact
/// normal-mode notation used by the symmetric- and asymmetric-top global
/// quanta fields: blank when no mode is assigned, `GROUND` when every
/// assigned mode is zero, else e.g. `2V1+V3`, right-justified to 15 columns.
pub fn normal_modes_encode(qns: &QnMap) -> String {
    let mut modes: Vec<(u32, i64)> = Vec::new();
    let mut total = 0;
    for (name, val) in qns {
        let Some(caps) = VIB_QN_PATT.captures(name) else {
            continue;
        };
        let Some(v) = val.as_i64() else { continue };
        // the capture group is all digits, so this parse cannot fail
        let mode: u32 = caps[1].parse().unwrap_or(0);
        total += v;
        modes.push((mode, v));
    }
    if modes.is_empty() {
        return " ".repeat(15);
    }
    if total == 0 {
        return "         GROUND".to_string();
    }
    modes.sort_by_key(|&(mode, _)| mode);
    let parts: Vec<String> = modes
        .iter()
        .map(|&(mode, v)| {
            if v > 1 {
                format!("{v}V{mode}")
            } else {
                format!("V{mode}")
            }
        })
        .collect();
    format!("{:>15}", parts.join("+"))
}

/// Parse the compact normal-mode notation back into (name, count) pairs.
/// `GROUND` is expanded to v1..v4 = 0; a blank field yields nothing.
pub fn normal_modes_decode(field: &str) -> Vec<(String, i64)> {
    let s = field.trim();
    if s.is_empty() {
        return Vec::new();
    }
    if s == "GROUND" {
        return (1..=4).map(|i| (format!("v{i}"), 0)).collect();
    }
    let mut vqns = Vec::new();
    for part in s.split('+') {
        if let Some(mode) = part.strip_prefix('V') {
            // one quantum of vi is written Vi, not 1Vi
            vqns.push((format!("v{mode}"), 1));
        } else if part.len() >= 3 {
            let n = part[0..1].parse::<i64>().unwrap_or(0);
            vqns.push((format!("v{}", &part[2..]), n));
        }
    }
    vqns
}

/// A byte-range slice of a fixed-width field, empty when out of range
pub fn sub(s: &str, start: usize, end: usize) -> &str {
    s.get(start..end).unwrap_or("")
}

/// A single column of a fixed-width field, space when out of range
pub fn chr_at(s: &str, i: usize) -> char {
    s.as_bytes().get(i).map(|&b| b as char).unwrap_or(' ')
}

/// Shift a rotational quantum number by a branch delta, preserving its
/// integer or half-integer flavor.
pub fn qn_add(val: &QnValue, delta: i64) -> QnValue {
    match val {
        QnValue::Int(i) => QnValue::Int(i + delta),
        QnValue::Float(f) => QnValue::Float(f + delta as f64),
        QnValue::Label(s) => QnValue::Label(s.clone()),
    }
}

/// A quantum number as a right-justified integer field, blank when absent
pub fn qn_int(qns: &QnMap, name: &str, width: usize) -> String {
    match qns.get(name).and_then(QnValue::as_i64) {
        Some(v) => format_i(v, width),
        None => " ".repeat(width),
    }
}

/// A quantum number as a fixed-precision float field, blank when absent
pub fn qn_float(qns: &QnMap, name: &str, width: usize, precision: usize) -> String {
    match qns.get(name).and_then(QnValue::as_f64) {
        Some(v) => format_f(v, width, precision),
        None => " ".repeat(width),
    }
}

/// A label quantum number, right-justified, blank when absent
pub fn qn_label(qns: &QnMap, name: &str, width: usize) -> String {
    match qns.get(name).and_then(QnValue::as_label) {
        Some(s) => format!("{s:>width$}"),
        None => " ".repeat(width),
    }
}

/// A label quantum number, left-justified, blank when absent
pub fn qn_label_ljust(qns: &QnMap, name: &str, width: usize) -> String {
    match qns.get(name).and_then(QnValue::as_label) {
        Some(s) => format!("{s:<width$}"),
        None => " ".repeat(width),
    }
}

/// A single label character, space when absent
pub fn qn_char(qns: &QnMap, name: &str) -> char {
    qns.get(name)
        .and_then(QnValue::as_label)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

/// The branch letter connecting the lower and upper values of a rotational
/// quantum number, space when either is unresolved.
pub fn branch_between(qns_upper: &QnMap, qns_lower: &QnMap, name: &str) -> char {
    let (Some(upper), Some(lower)) = (
        qns_upper.get(name).and_then(QnValue::as_f64),
        qns_lower.get(name).and_then(QnValue::as_f64),
    ) else {
        return ' ';
    };
    branch_letter((upper - lower).round() as i64).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_table_is_bidirectional() {
        for delta in -6..=6 {
            let letter = branch_letter(delta).unwrap();
            assert_eq!(branch_delta(letter), Some(delta));
        }
        assert_eq!(branch_delta('P'), Some(-1));
        assert_eq!(branch_delta('Q'), Some(0));
        assert_eq!(branch_delta('R'), Some(1));
        assert_eq!(branch_delta('Z'), None);
    }

    #[test]
    fn test_parity_round_trip() {
        for &j in &[0.0, 1.0, 2.0, 0.5, 1.5, 2.5, 7.5] {
            for &kp in &['e', 'f'] {
                let p = kronig_to_parity(kp, j).unwrap();
                assert_eq!(parity_to_kronig(p, j), Some(kp));
            }
        }
        // e at even J is +, f at even J is -
        assert_eq!(kronig_to_parity('e', 2.0), Some('+'));
        assert_eq!(kronig_to_parity('f', 2.0), Some('-'));
        assert_eq!(kronig_to_parity('e', 3.0), Some('-'));
        // half-integer J uses J - 1/2
        assert_eq!(kronig_to_parity('e', 0.5), Some('+'));
        assert_eq!(kronig_to_parity('e', 1.5), Some('-'));
    }

    #[test]
    fn test_normal_modes_round_trip() {
        let mut qns = QnMap::new();
        for (name, v) in normal_modes_decode("        2V1+V3") {
            qns.insert(name, QnValue::Int(v));
        }
        assert_eq!(qns.get("v1"), Some(&QnValue::Int(2)));
        assert_eq!(qns.get("v3"), Some(&QnValue::Int(1)));
        assert_eq!(normal_modes_encode(&qns), "         2V1+V3");

        let mut ground = QnMap::new();
        for (name, v) in normal_modes_decode("         GROUND") {
            ground.insert(name, QnValue::Int(v));
        }
        assert_eq!(ground.len(), 4);
        assert_eq!(normal_modes_encode(&ground), "         GROUND");

        assert_eq!(normal_modes_encode(&QnMap::new()), " ".repeat(15));
        assert!(normal_modes_decode("               ").is_empty());
    }

    #[test]
    fn test_qn_field_renderers() {
        let mut qns = QnMap::new();
        qns.insert("J".to_string(), QnValue::Int(9));
        qns.insert("F".to_string(), QnValue::Float(10.5));
        qns.insert("vibSym".to_string(), QnValue::Label("E".to_string()));
        assert_eq!(qn_int(&qns, "J", 3), "  9");
        assert_eq!(qn_int(&qns, "Ka", 3), "   ");
        assert_eq!(qn_float(&qns, "F", 5, 1), " 10.5");
        assert_eq!(qn_label_ljust(&qns, "vibSym", 2), "E ");
        assert_eq!(qn_label(&qns, "vibSym", 2), " E");
    }
}
