//! The three normalization outputs: states, transitions and corrections
//!
//! Output names are derived from the input stem and its modification date,
//! `<stem>.<YYYY-MM-DD>.{states,trans,corrections}`. Rows are fixed-width
//! fields joined by commas, so the files load as CSV but stay aligned for
//! eyeball inspection; absent values are blanks of the field's width.

use std::fs::{File, metadata};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::app::models::{State, Transition};
use crate::app::services::par_codec::field_format::{format_e, format_f, format_i};
use crate::app::services::validator::CorrectionRecord;
use crate::{Error, Result};

/// The three output paths of one normalization run
#[derive(Debug, Clone)]
pub struct OutputSet {
    pub states: PathBuf,
    pub trans: PathBuf,
    pub corrections: PathBuf,
}

impl OutputSet {
    /// Derive the output paths from the input file's stem and its
    /// modification date.
    pub fn for_input(input: &Path) -> Result<Self> {
        let meta = metadata(input)
            .map_err(|e| Error::io(format!("cannot stat {}", input.display()), e))?;
        let modified = meta
            .modified()
            .map_err(|e| Error::io(format!("no modification time on {}", input.display()), e))?;
        let date = DateTime::<Local>::from(modified).format("%Y-%m-%d");

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::configuration("input file has no usable name"))?;
        let dir = input.parent().unwrap_or_else(|| Path::new("."));

        let named = |ext: &str| dir.join(format!("{stem}.{date}.{ext}"));
        Ok(Self {
            states: named("states"),
            trans: named("trans"),
            corrections: named("corrections"),
        })
    }

    /// Paths that already exist on disk
    pub fn existing(&self) -> Vec<&Path> {
        [&self.states, &self.trans, &self.corrections]
            .into_iter()
            .map(PathBuf::as_path)
            .filter(|p| p.exists())
            .collect()
    }
}

/// Buffered writers for the three outputs
#[derive(Debug)]
pub struct NormWriter {
    states: BufWriter<File>,
    trans: BufWriter<File>,
    corrections: BufWriter<File>,
}

impl NormWriter {
    /// Create the output files. Refuses to clobber existing outputs unless
    /// `overwrite` is set.
    pub fn create(outputs: &OutputSet, overwrite: bool) -> Result<Self> {
        if !overwrite {
            let existing = outputs.existing();
            if !existing.is_empty() {
                let listing: Vec<String> =
                    existing.iter().map(|p| p.display().to_string()).collect();
                return Err(Error::configuration(format!(
                    "output file(s) already exist (pass --overwrite to replace): {}",
                    listing.join(", ")
                )));
            }
        }
        let open = |path: &Path| -> Result<BufWriter<File>> {
            File::create(path)
                .map(BufWriter::new)
                .map_err(|e| Error::io(format!("cannot create {}", path.display()), e))
        };
        Ok(Self {
            states: open(&outputs.states)?,
            trans: open(&outputs.trans)?,
            corrections: open(&outputs.corrections)?,
        })
    }

    /// Append one state row: the id followed by the state's canonical
    /// representation.
    pub fn write_state(&mut self, id: u64, state: &State, qn_order: &[&str]) -> Result<()> {
        writeln!(
            self.states,
            "{:12},{}",
            id,
            state.canonical_repr(qn_order)
        )?;
        Ok(())
    }

    /// Append one transition row
    pub fn write_transition(&mut self, trans: &Transition) -> Result<()> {
        let mut fields: Vec<String> = Vec::with_capacity(31);

        fields.push(opt_i(trans.upper_id.map(|v| v as i64), 12));
        fields.push(opt_i(trans.lower_id.map(|v| v as i64), 12));
        fields.push(format_i(trans.molec_id as i64, 2));
        fields.push(format_i(trans.iso_id as i64, 1));
        fields.push(opt_f(trans.elower, 10, 4));
        fields.push(opt_i(trans.gp.map(i64::from), 5));
        fields.push(opt_i(trans.gpp.map(i64::from), 5));
        fields.push(format!("{:>2}", trans.multipole.tag()));
        fields.push(trans.flag.to_string());

        // (value, uncertainty, source) triples in canonical parameter order
        let widths: [(usize, usize, bool); 7] = [
            (12, 6, false), // nu
            (10, 3, true),  // Sw
            (10, 3, true),  // A
            (6, 4, false),  // gamma_air
            (6, 4, false),  // gamma_self
            (5, 2, false),  // n_air
            (9, 6, false),  // delta_air
        ];
        for (prm, (width, precision, exponential)) in trans.params().iter().zip(widths) {
            match prm {
                Some(p) => {
                    fields.push(if exponential {
                        format_e(p.val, width, precision).to_lowercase()
                    } else {
                        format_f(p.val, width, precision)
                    });
                    fields.push(opt_e(p.err, 8, 1));
                    fields.push(opt_i(p.source_id, 4));
                }
                None => {
                    fields.push(" ".repeat(width));
                    fields.push(" ".repeat(8));
                    fields.push(" ".repeat(4));
                }
            }
        }

        fields.push(format!("{:>160}", trans.par_line));
        writeln!(self.trans, "{}", fields.join(","))?;
        Ok(())
    }

    /// Append a repaired record to the corrections log as a before/after
    /// pair sharing the source line number.
    pub fn write_correction(&mut self, record: &CorrectionRecord) -> Result<()> {
        writeln!(self.corrections, "{}-{}", record.line_no, record.original)?;
        writeln!(self.corrections, "{}+{}", record.line_no, record.corrected)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.states.flush()?;
        self.trans.flush()?;
        self.corrections.flush()?;
        Ok(())
    }
}

fn opt_i(val: Option<i64>, width: usize) -> String {
    match val {
        Some(v) => format_i(v, width),
        None => " ".repeat(width),
    }
}

fn opt_f(val: Option<f64>, width: usize, precision: usize) -> String {
    match val {
        Some(v) => format_f(v, width, precision),
        None => " ".repeat(width),
    }
}

fn opt_e(val: Option<f64>, width: usize, precision: usize) -> String {
    match val {
        Some(v) => format_e(v, width, precision).to_lowercase(),
        None => " ".repeat(width),
    }
}
