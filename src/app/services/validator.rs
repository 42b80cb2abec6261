//! Round-trip validation of decoded records
//!
//! Nothing a record carries may be lost in decoding, so every transition is
//! re-encoded and compared byte-for-byte against its source line. On a
//! mismatch the correction table gets one chance to repair the source line;
//! the repaired line is decoded and validated again, and a second failure
//! is fatal.

use crate::app::models::Transition;
use crate::app::services::corrections;
use crate::app::services::par_codec::ParCodec;
use crate::{Error, Result};

/// A record the correction table repaired, kept for the corrections log
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionRecord {
    pub line_no: usize,
    pub original: String,
    pub corrected: String,
}

/// True when the transition re-encodes to exactly its source line
pub fn validate(codec: &ParCodec, trans: &Transition) -> bool {
    codec.encode(trans) == trans.par_line
}

/// Validate a transition, applying the correction table once on failure.
/// Returns the (possibly re-decoded) transition and the correction record
/// when a repair was needed.
pub fn check(
    codec: &ParCodec,
    trans: Transition,
) -> Result<(Transition, Option<CorrectionRecord>)> {
    let produced = codec.encode(&trans);
    if produced == trans.par_line {
        return Ok((trans, None));
    }

    let corrected = corrections::apply(trans.molec_id, trans.iso_id, &trans.par_line);
    if corrected == trans.par_line {
        // no rule fired; the mismatch is a genuine decoding defect
        return Err(Error::round_trip(trans.line_no, trans.par_line, produced));
    }

    let line_no = trans.line_no;
    let original = trans.par_line.clone();
    let repaired = codec
        .decode(&corrected, line_no)?
        .ok_or_else(|| Error::par_malformed(line_no, "correction produced a blank record"))?;

    let reproduced = codec.encode(&repaired);
    if reproduced != corrected {
        return Err(Error::round_trip(line_no, corrected, reproduced));
    }

    tracing::debug!(line_no, "record repaired by the correction table");
    Ok((
        repaired,
        Some(CorrectionRecord {
            line_no,
            original,
            corrected,
        }),
    ))
}
