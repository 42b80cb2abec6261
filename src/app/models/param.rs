//! Measured line parameters and the HITRAN error-code tables
//!
//! Each numeric parameter of a transition carries a value, an optional
//! uncertainty, a reference id into the per-molecule bibliography, and the
//! one-digit HITRAN error code from which the uncertainty is derived.

/// Maximum absolute errors (cm-1) for the absolute error codes 0-6 used by
/// nu and delta_air. `None` means unreported or > 1 cm-1, not zero error.
pub const ABS_ERR_MAX: [Option<f64>; 7] = [
    None,
    Some(1.0),
    Some(0.1),
    Some(0.01),
    Some(0.001),
    Some(0.0001),
    Some(0.00001),
];

/// Maximum fractional errors for the relative error codes 0-8 used by Sw,
/// A, gamma_air, gamma_self and n_air. Codes 0-3 carry no numeric bound
/// (unreported / default / average / >20%).
pub const REL_ERR_MAX: [Option<f64>; 9] = [
    None,
    None,
    None,
    None,
    Some(0.2),
    Some(0.1),
    Some(0.05),
    Some(0.02),
    Some(0.01),
];

/// A measured parameter of a radiative transition: value, uncertainty,
/// reference id and HITRAN integer error code.
#[derive(Debug, Clone, PartialEq)]
pub struct HitranParam {
    /// The parameter value
    pub val: f64,
    /// Absolute uncertainty, when derivable from the error code
    pub err: Option<f64>,
    /// Fractional uncertainty, for relative-coded parameters
    pub rerr: Option<f64>,
    /// One-digit HITRAN error code
    pub ierr: u8,
    /// Two-digit reference id within the molecule's bibliography
    pub ref_id: i32,
    /// Persisted source identity, assigned by the reference resolver
    pub source_id: Option<i64>,
    /// True when ierr indexes the relative error table
    pub relative: bool,
}

impl HitranParam {
    /// Build a parameter from the raw `.par` fields, deriving the
    /// uncertainty from the error code.
    pub fn from_par(val: f64, ierr: u8, ref_id: i32, relative: bool) -> Self {
        let mut prm = Self {
            val,
            err: None,
            rerr: None,
            ierr,
            ref_id,
            source_id: None,
            relative,
        };
        if relative {
            prm.set_rel_err();
        } else {
            prm.set_abs_err();
        }
        prm
    }

    /// Set the absolute uncertainty from the error code
    fn set_abs_err(&mut self) {
        self.err = if (1..=6).contains(&self.ierr) {
            ABS_ERR_MAX[self.ierr as usize]
        } else {
            None
        };
    }

    /// Set the fractional and absolute uncertainties from the error code
    fn set_rel_err(&mut self) {
        if (4..=8).contains(&self.ierr) {
            self.rerr = REL_ERR_MAX[self.ierr as usize];
            self.err = self.rerr.map(|r| self.val.abs() * r);
        } else {
            self.rerr = None;
            self.err = None;
        }
    }
}

/// Nearest absolute error code for a known uncertainty (cm-1): the largest
/// code whose bound still exceeds the uncertainty, 0 when none does.
pub fn abs_err_code(err: f64) -> u8 {
    for code in (1..=6u8).rev() {
        if let Some(bound) = ABS_ERR_MAX[code as usize] {
            if err < bound {
                return code;
            }
        }
    }
    0
}

/// Nearest relative error code for a known fractional uncertainty: the
/// largest code whose bound still exceeds it, 0 when none does.
pub fn rel_err_code(rerr: f64) -> u8 {
    for code in (4..=8u8).rev() {
        if let Some(bound) = REL_ERR_MAX[code as usize] {
            if rerr < bound {
                return code;
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_error_from_code() {
        let prm = HitranParam::from_par(1234.5678, 4, 3, false);
        assert_eq!(prm.err, Some(0.001));
        assert_eq!(prm.rerr, None);

        // code 0: unreported, not zero
        let prm = HitranParam::from_par(1234.5678, 0, 0, false);
        assert_eq!(prm.err, None);
    }

    #[test]
    fn test_rel_error_from_code() {
        let prm = HitranParam::from_par(2.0e-20, 5, 2, true);
        assert_eq!(prm.rerr, Some(0.1));
        assert!((prm.err.unwrap() - 2.0e-21).abs() < 1.0e-30);

        // codes 1-3 carry no numeric bound
        let prm = HitranParam::from_par(2.0e-20, 2, 2, true);
        assert_eq!(prm.err, None);
        assert_eq!(prm.rerr, None);
    }

    #[test]
    fn test_inverse_code_mappings() {
        assert_eq!(abs_err_code(0.0005), 4);
        assert_eq!(abs_err_code(0.000001), 6);
        assert_eq!(abs_err_code(5.0), 0);
        assert_eq!(rel_err_code(0.005), 8);
        assert_eq!(rel_err_code(0.15), 4);
        assert_eq!(rel_err_code(0.5), 0);
    }
}
