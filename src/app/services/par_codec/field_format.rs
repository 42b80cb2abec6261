//! Fixed-width field formatting and permissive numeric parsing
//!
//! The `.par` format was written by Fortran-style format strings, so the
//! encoder here reproduces those exactly: right-justified fixed-precision
//! floats, upper-case exponent notation with a signed two-digit exponent,
//! and the legacy quirks (leading zero stripped from gamma_air, `-0.`
//! collapsed to `-.` in the shift and temperature-exponent fields).

use crate::app::models::QnValue;

/// Parse a fixed-width sub-field permissively: integer first, then float,
/// else `None`. Optional quantum-number fields are simply absent when the
/// text is blank or unparseable.
pub fn parse_qn(s: &str) -> Option<QnValue> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(QnValue::Int(i));
    }
    t.parse::<f64>().ok().map(QnValue::Float)
}

/// Parse a fixed-width sub-field as a label, `None` when blank
pub fn parse_label(s: &str) -> Option<QnValue> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(QnValue::Label(t.to_string()))
    }
}

/// Parse a required float sub-field
pub fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Parse a required integer sub-field
pub fn parse_i32(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

/// Fixed-width, fixed-precision float (Fortran `Fw.d`)
pub fn format_f(val: f64, width: usize, precision: usize) -> String {
    format!("{val:>width$.precision$}")
}

/// Fixed-width integer, right-justified
pub fn format_i(val: i64, width: usize) -> String {
    format!("{val:>width$}")
}

/// Upper-case exponent notation (Fortran `Ew.d`): a `d.dddE±ee` mantissa
/// and signed two-digit exponent, right-justified to `width`.
pub fn format_e(val: f64, width: usize, precision: usize) -> String {
    let s = format!("{val:.precision$e}");
    // Rust renders the exponent as e-23 / e5; normalize to E-23 / E+05
    let (mantissa, exp) = match s.split_once('e') {
        Some(pair) => pair,
        None => (s.as_str(), "0"),
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    let out = format!("{mantissa}E{sign}{digits:0>2}");
    format!("{out:>width$}")
}

/// gamma_air's five columns: `%5.4f` with the leading zero of the integer
/// part stripped, so 0.0650 prints as `.0650`.
pub fn format_gamma_air(val: f64) -> String {
    format_f(val, 5, 4).replacen("0.", ".", 1)
}

/// n_air's four columns: `%4.2f` with `-0.` collapsed to `-.`
pub fn format_n_air(val: f64) -> String {
    format_f(val, 4, 2).replacen("-0.", "-.", 1)
}

/// delta_air's eight columns: `%8.6f` with `-0.` collapsed to `-.`
pub fn format_delta_air(val: f64) -> String {
    format_f(val, 8, 6).replacen("-0.", "-.", 1)
}

/// A half-integral angular momentum as a fraction (`3/2`), integers plain
pub fn format_fraction(val: f64) -> String {
    let num = (2.0 * val).round() as i64;
    if num % 2 != 0 {
        format!("{num}/2")
    } else {
        format!("{}", num / 2)
    }
}
