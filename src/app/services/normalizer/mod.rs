//! The normalization pipeline
//!
//! Streams a `.par` line list once, in order: decode each record, prove the
//! round trip (repairing via the correction table when needed), resolve the
//! species and parameter references, deduplicate the two states, and append
//! the normalized rows to the output files. Wavenumber order is an input
//! invariant; the first violation aborts the run.

pub mod state_registry;
pub mod writer;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::app::models::{HitranParam, Transition};
use crate::app::services::par_codec::ParCodec;
use crate::app::services::reference_resolver::{ReferenceResolver, reference_key};
use crate::app::services::validator;
use crate::constants::IREF_SLOT_NAMES;
use crate::{Error, Result};

use state_registry::StateRegistry;
use writer::{NormWriter, OutputSet};

/// Run options for one normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Replace existing output files instead of refusing to run
    pub overwrite: bool,
    /// Report unresolved parameter references without failing the run
    pub allow_missing_refs: bool,
    /// Existing states file to seed the registry from
    pub states_seed: Option<PathBuf>,
}

/// What one run produced
#[derive(Debug)]
pub struct NormalizeSummary {
    pub transitions: usize,
    pub new_states: usize,
    pub corrections: usize,
    pub missing_references: usize,
    pub outputs: OutputSet,
}

/// The streaming normalizer
pub struct Normalizer<R: ReferenceResolver> {
    codec: ParCodec,
    resolver: R,
}

impl<R: ReferenceResolver> Normalizer<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            codec: ParCodec::new(),
            resolver,
        }
    }

    /// Normalize one `.par` file. `progress` is called with each input line
    /// number as it completes.
    pub fn run(
        &self,
        input: &Path,
        options: &NormalizeOptions,
        mut progress: impl FnMut(usize),
    ) -> Result<NormalizeSummary> {
        if !input.exists() {
            return Err(Error::file_not_found(input.display().to_string()));
        }
        // the seed may be a previous run's states output, so it must be
        // read before the writers truncate the output files
        let mut registry = match &options.states_seed {
            Some(path) => StateRegistry::load(path)?,
            None => StateRegistry::new(),
        };
        let outputs = OutputSet::for_input(input)?;
        let mut writer = NormWriter::create(&outputs, options.overwrite)?;

        let file = File::open(input)
            .map_err(|e| Error::io(format!("cannot open {}", input.display()), e))?;
        let reader = BufReader::new(file);

        let mut summary = NormalizeSummary {
            transitions: 0,
            new_states: 0,
            corrections: 0,
            missing_references: 0,
            outputs: outputs.clone(),
        };
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut prev_nu: Option<f64> = None;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| Error::io(format!("read error at line {line_no}"), e))?;

            let Some(trans) = self.codec.decode(&line, line_no)? else {
                continue;
            };

            if let Some(prev) = prev_nu {
                if trans.nu.val < prev {
                    return Err(Error::ordering_violation(line_no, prev, trans.nu.val));
                }
            }
            prev_nu = Some(trans.nu.val);

            let (mut trans, correction) = validator::check(&self.codec, trans)?;
            if let Some(record) = &correction {
                writer.write_correction(record)?;
                summary.corrections += 1;
            }

            let global = self.resolver.global_iso_id(trans.molec_id, trans.iso_id)?;
            trans.global_iso_id = global;
            trans.upper.global_iso_id = global;
            trans.lower.global_iso_id = global;

            self.assign_sources(&mut trans, &mut missing);

            let qn_order = trans.case.qn_order();
            let (upper_id, upper_new) = registry.intern(&trans.upper, qn_order);
            if upper_new {
                writer.write_state(upper_id, &trans.upper, qn_order)?;
                summary.new_states += 1;
            }
            let (lower_id, lower_new) = registry.intern(&trans.lower, qn_order);
            if lower_new {
                writer.write_state(lower_id, &trans.lower, qn_order)?;
                summary.new_states += 1;
            }
            trans.upper_id = Some(upper_id);
            trans.lower_id = Some(lower_id);

            writer.write_transition(&trans)?;
            summary.transitions += 1;
            progress(line_no);
        }
        writer.flush()?;

        summary.missing_references = missing.len();
        if !missing.is_empty() {
            let listing = list_missing(&missing);
            if options.allow_missing_refs {
                tracing::warn!(
                    count = missing.len(),
                    %listing,
                    "unresolved parameter references"
                );
            } else {
                return Err(Error::MissingReferences {
                    count: missing.len(),
                    listing,
                });
            }
        }

        tracing::info!(
            transitions = summary.transitions,
            new_states = summary.new_states,
            corrections = summary.corrections,
            "normalization complete"
        );
        Ok(summary)
    }

    /// Resolve each reference slot to a source identity. The intensity slot
    /// sources both Sw and the Einstein A-coefficient. Unresolvable keys are
    /// aggregated; whether they fail the run is decided at the end.
    fn assign_sources(&self, trans: &mut Transition, missing: &mut BTreeSet<String>) {
        let molec_id = trans.molec_id;
        let mut resolve = |slot: &str, prm: &mut HitranParam| {
            match self.resolver.source_id(molec_id, slot, prm.ref_id) {
                Some(id) => prm.source_id = Some(id),
                None => {
                    if let Some(key) = reference_key(molec_id, slot, prm.ref_id) {
                        missing.insert(key);
                    }
                }
            }
        };

        resolve(IREF_SLOT_NAMES[0], &mut trans.nu);
        resolve(IREF_SLOT_NAMES[1], &mut trans.sw);
        resolve(IREF_SLOT_NAMES[1], &mut trans.a);
        resolve(IREF_SLOT_NAMES[2], &mut trans.gamma_air);
        if let Some(prm) = trans.gamma_self.as_mut() {
            resolve(IREF_SLOT_NAMES[3], prm);
        }
        resolve(IREF_SLOT_NAMES[4], &mut trans.n_air);
        if let Some(prm) = trans.delta_air.as_mut() {
            resolve(IREF_SLOT_NAMES[5], prm);
        }
    }
}

/// A readable digest of the missing-reference set: the first few keys and
/// a count of the rest.
fn list_missing(missing: &BTreeSet<String>) -> String {
    const SHOWN: usize = 10;
    let listing: Vec<&str> = missing.iter().take(SHOWN).map(String::as_str).collect();
    let rest = missing.len().saturating_sub(SHOWN);
    let mut out = listing.join(", ");
    if rest > 0 {
        out.push_str(&format!(" and {rest} more"));
    }
    out
}
