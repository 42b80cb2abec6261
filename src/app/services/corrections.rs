//! Repairs for known malformed upstream records
//!
//! A handful of molecules carry systematic formatting defects in the
//! distributed line list: misjustified symmetry labels, inversion labels
//! missing from one of the two columns that should agree, stray characters
//! in unused columns. Each rule rewrites fixed columns only, so applying
//! the table twice changes nothing. The table is applied to a record only
//! after it has failed round-trip validation.

/// Apply every correction rule registered for the molecule. Returns the
/// repaired record, which equals the input when no rule fires.
pub fn apply(molec_id: u8, iso_id: u8, line: &str) -> String {
    let mut buf: Vec<u8> = line.bytes().collect();
    match molec_id {
        6 => correct_ch4(&mut buf),
        8 => correct_no(&mut buf),
        10 => correct_no2(&mut buf),
        11 => correct_nh3(&mut buf, iso_id),
        13 => correct_oh(&mut buf),
        16 | 17 => correct_gamma_self(&mut buf),
        24 | 27 | 28 => correct_unassigned_k(&mut buf),
        _ => {}
    }
    // the bytes started as ASCII and every rule writes ASCII
    String::from_utf8(buf).unwrap_or_else(|_| line.to_string())
}

fn replace_at(buf: &mut [u8], start: usize, old: &str, new: &str) {
    let end = start + old.len();
    if buf.get(start..end) == Some(old.as_bytes()) {
        buf[start..end].copy_from_slice(new.as_bytes());
    }
}

/// Misjustified symmetry labels and alpha indices in the methane quanta
fn correct_ch4(buf: &mut [u8]) {
    // vibrational symmetry species are left-justified in their slots
    replace_at(buf, 80, " E", "E ");
    replace_at(buf, 95, " E", "E ");
    replace_at(buf, 119, " 1 ", "  1");
    for sym in ["3A2", "3F2", "3F1"] {
        let old = format!("{sym}   1");
        let new = format!(" {sym}  1");
        replace_at(buf, 115, &old, &new);
    }
}

/// NO writes a stray character in an unused column of the lower local
/// field, and misjustifies half-integer hyperfine F values
fn correct_no(buf: &mut [u8]) {
    if let Some(b) = buf.get_mut(114) {
        *b = b' ';
    }
    replace_at(buf, 124, " .5", "0.5");
    replace_at(buf, 109, " .5", "0.5");
}

/// One block of NO2 lines quotes an unresolved lower-state energy as a
/// small negative number instead of the -1 sentinel
fn correct_no2(buf: &mut [u8]) {
    replace_at(buf, 48, "-0.00490", "-1.00000");
}

/// The ammonia inversion label appears in both the global and local quanta
/// fields; various blocks of lines fill only one of the two, disagree, or
/// (isotopologue 2) use '+'/'-' instead of 's'/'a'.
fn correct_nh3(buf: &mut [u8], iso_id: u8) {
    let is_inv = |b: u8| b == b'a' || b == b's';

    if buf.get(96) == Some(&b's') && buf.get(122) == Some(&b'a') {
        buf[122] = b's';
    }
    if iso_id == 2 {
        match buf.get(122) {
            Some(b'+') => buf[122] = b's',
            Some(b'-') => buf[122] = b'a',
            _ => {}
        }
    }
    if buf.get(96) == Some(&b' ') && buf.get(122).copied().is_some_and(is_inv) {
        buf[96] = buf[122];
    }
    if buf.get(107) == Some(&b' ') && buf.get(81).copied().is_some_and(is_inv) {
        buf[107] = buf[81];
    }
    if buf.get(122) == Some(&b' ') && buf.get(96).copied().is_some_and(is_inv) {
        buf[122] = buf[96];
    }
}

/// OH writes a stray character in an unused column of the lower local field
fn correct_oh(buf: &mut [u8]) {
    if let Some(b) = buf.get_mut(113) {
        *b = b' ';
    }
}

/// Some HBr and HI lines quote gamma_self to four decimals instead of
/// three; re-render the field at the canonical precision
fn correct_gamma_self(buf: &mut [u8]) {
    if buf.get(40) != Some(&b'.') {
        return;
    }
    let Some(field) = buf.get(40..45) else { return };
    let Ok(text) = std::str::from_utf8(field) else {
        return;
    };
    if let Ok(val) = text.trim().parse::<f64>() {
        let fixed = format!("{val:5.3}");
        buf[40..45].copy_from_slice(fixed.as_bytes());
    }
}

/// The symmetric tops mark an unassigned K projection as -1; blank it so
/// the slot reads as absent
fn correct_unassigned_k(buf: &mut [u8]) {
    replace_at(buf, 100, " -1", "   ");
}
