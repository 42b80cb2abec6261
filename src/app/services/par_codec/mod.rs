//! Decoding and re-encoding of the 160-column `.par` transition record
//!
//! `decode` pulls every field of a record apart, derives the uncertainties
//! from the error-code block and hands the quanta fields to the case
//! grammar resolved for the species. `encode` is its exact inverse for any
//! well-formed record: the normalizer relies on `encode(decode(line)) ==
//! line` to prove nothing was lost.

pub mod field_format;

use crate::app::models::{HitranParam, State, Transition};
use crate::app::services::cases::{CaseRegistry, QuantaFields};
use crate::constants::{
    A, DELTA_AIR, DELTA_AIR_MISSING, ELOWER, ELOWER_MISSING, FLAG, GAMMA_AIR, GAMMA_SELF,
    GAMMA_SELF_MISSING, GP, GPP, IERR, IREF, ISO_ID, MOLEC_ID, N_AIR, NU, PAR_LINE_LEN, QP, QPP,
    SW, VP, VPP, WEIGHT_MISSING,
};
use crate::{Error, Result};
use field_format::{
    format_delta_air, format_e, format_f, format_gamma_air, format_i, format_n_air,
};

/// Decoder/encoder for `.par` records. Holds the case-dispatch registry so
/// each record's quanta fields are parsed under the right grammar.
#[derive(Debug, Default)]
pub struct ParCodec {
    registry: CaseRegistry,
}

impl ParCodec {
    pub fn new() -> Self {
        Self {
            registry: CaseRegistry::new(),
        }
    }

    /// Decode one record. Blank lines yield `Ok(None)`; anything else must
    /// be a full 160-column record.
    pub fn decode(&self, line: &str, line_no: usize) -> Result<Option<Transition>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        if line.len() < PAR_LINE_LEN {
            return Err(Error::par_malformed(
                line_no,
                format!("record is {} columns, expected {PAR_LINE_LEN}", line.len()),
            ));
        }
        // the fields are sliced by byte offset, so the record must be ASCII
        if !line.is_ascii() {
            return Err(Error::par_malformed(
                line_no,
                "record contains non-ASCII bytes".to_string(),
            ));
        }
        let line = &line[..PAR_LINE_LEN];

        let molec_id: u8 = parse_field(line, MOLEC_ID.start, MOLEC_ID.end, line_no, "molec_id")?;
        let iso_id: u8 = parse_field(line, ISO_ID.start, ISO_ID.end, line_no, "iso_id")?;

        let nu_val: f64 = parse_field(line, NU.start, NU.end, line_no, "nu")?;
        let sw_val: f64 = parse_field(line, SW.start, SW.end, line_no, "Sw")?;
        let a_val: f64 = parse_field(line, A.start, A.end, line_no, "A")?;
        let gamma_air_val: f64 =
            parse_field(line, GAMMA_AIR.start, GAMMA_AIR.end, line_no, "gamma_air")?;
        let n_air_val: f64 = parse_field(line, N_AIR.start, N_AIR.end, line_no, "n_air")?;

        // gamma_self and delta_air have no error-code slot for "absent";
        // an exact-zero field is the missing-value sentinel
        let s_gamma_self = &line[GAMMA_SELF];
        let gamma_self_val: Option<f64> = if s_gamma_self == GAMMA_SELF_MISSING {
            None
        } else {
            Some(parse_field(
                line,
                GAMMA_SELF.start,
                GAMMA_SELF.end,
                line_no,
                "gamma_self",
            )?)
        };
        let s_delta_air = &line[DELTA_AIR];
        let delta_air_val: Option<f64> = if s_delta_air.trim() == DELTA_AIR_MISSING {
            None
        } else {
            Some(parse_field(
                line,
                DELTA_AIR.start,
                DELTA_AIR.end,
                line_no,
                "delta_air",
            )?)
        };

        // a negative lower-state energy means the state is unresolved
        let elower_val: f64 = parse_field(line, ELOWER.start, ELOWER.end, line_no, "Elower")?;
        let elower = (elower_val >= 0.0).then_some(elower_val);

        let ierr = |slot: usize| -> u8 {
            line.as_bytes()[IERR.start + slot]
                .checked_sub(b'0')
                .filter(|d| *d <= 9)
                .unwrap_or(0)
        };
        let iref = |slot: usize| -> i32 {
            let start = IREF.start + 2 * slot;
            line[start..start + 2].trim().parse().unwrap_or(0)
        };

        let nu = HitranParam::from_par(nu_val, ierr(0), iref(0), false);
        // Sw and A share the intensity slot of the error and reference blocks
        let sw = HitranParam::from_par(sw_val, ierr(1), iref(1), true);
        let a = HitranParam::from_par(a_val, ierr(1), iref(1), true);
        let gamma_air = HitranParam::from_par(gamma_air_val, ierr(2), iref(2), true);
        let gamma_self = gamma_self_val.map(|v| HitranParam::from_par(v, ierr(3), iref(3), true));
        let n_air = HitranParam::from_par(n_air_val, ierr(4), iref(4), true);
        let delta_air = delta_air_val.map(|v| HitranParam::from_par(v, ierr(5), iref(5), false));

        let flag = line.as_bytes()[FLAG] as char;

        // statistical weights are written %7.1f but are integral; zero
        // means unknown
        let gp = parse_weight(line, GP.start, GP.end, line_no, "gp")?;
        let gpp = parse_weight(line, GPP.start, GPP.end, line_no, "gpp")?;

        let case = self.registry.resolve(molec_id, iso_id, nu_val)?;
        let fields = QuantaFields::new(&line[VP], &line[VPP], &line[QP], &line[QPP]);
        let (upper_qns, lower_qns, multipole) = case.parse_qns(&fields, molec_id, iso_id);

        // the global isotopologue id is filled in by the reference resolver
        let upper = State::new(
            molec_id,
            iso_id,
            0,
            elower.map(|e| e + nu_val),
            gp,
            upper_qns,
        );
        let lower = State::new(molec_id, iso_id, 0, elower, gpp, lower_qns);

        Ok(Some(Transition {
            molec_id,
            iso_id,
            global_iso_id: 0,
            case,
            nu,
            sw,
            a,
            gamma_air,
            gamma_self,
            n_air,
            delta_air,
            elower,
            gp,
            gpp,
            flag,
            multipole,
            upper,
            lower,
            upper_id: None,
            lower_id: None,
            par_line: line.to_string(),
            line_no,
        }))
    }

    /// Rebuild the 160-column record from a decoded transition. The error
    /// and reference blocks are carried verbatim from the source record;
    /// everything else is re-rendered from the decoded fields.
    pub fn encode(&self, trans: &Transition) -> String {
        let [vp, vpp, qp, qpp] = trans.case.hitran_quanta(trans);

        let s_gamma_self = match &trans.gamma_self {
            Some(p) => format_f(p.val, 5, 3),
            None => GAMMA_SELF_MISSING.to_string(),
        };
        let s_delta_air = match &trans.delta_air {
            Some(p) => format_delta_air(p.val),
            None => DELTA_AIR_MISSING.to_string(),
        };
        let s_elower = match trans.elower {
            Some(e) => format_f(e, 10, 4),
            None => ELOWER_MISSING.to_string(),
        };
        let s_gp = match trans.gp {
            Some(g) => format_f(g as f64, 7, 1),
            None => WEIGHT_MISSING.to_string(),
        };
        let s_gpp = match trans.gpp {
            Some(g) => format_f(g as f64, 7, 1),
            None => WEIGHT_MISSING.to_string(),
        };

        format!(
            "{}{}{}{}{}{}{}{}{}{}{}{}{}{}{}{}{}{}",
            format_i(trans.molec_id as i64, 2),
            format_i(trans.iso_id as i64, 1),
            format_f(trans.nu.val, 12, 6),
            format_e(trans.sw.val, 10, 3),
            format_e(trans.a.val, 10, 3),
            format_gamma_air(trans.gamma_air.val),
            s_gamma_self,
            s_elower,
            format_n_air(trans.n_air.val),
            s_delta_air,
            vp,
            vpp,
            qp,
            qpp,
            &trans.par_line[IERR.start..IREF.end],
            trans.flag,
            s_gp,
            s_gpp,
        )
    }
}

fn parse_field<T: std::str::FromStr>(
    line: &str,
    start: usize,
    end: usize,
    line_no: usize,
    name: &str,
) -> Result<T> {
    line[start..end]
        .trim()
        .parse()
        .map_err(|_| Error::par_malformed(line_no, format!("unparseable {name} field")))
}

fn parse_weight(
    line: &str,
    start: usize,
    end: usize,
    line_no: usize,
    name: &str,
) -> Result<Option<u32>> {
    let s = line[start..end].trim();
    if s.is_empty() {
        return Ok(None);
    }
    let val: f64 = s
        .parse()
        .map_err(|_| Error::par_malformed(line_no, format!("unparseable {name} field")))?;
    let g = (val + 0.1) as u32;
    Ok((g > 0).then_some(g))
}
