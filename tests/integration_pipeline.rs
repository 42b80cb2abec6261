//! End-to-end tests of the normalization pipeline against real files

use std::fs;
use std::path::{Path, PathBuf};

use hitran_processor::Error;
use hitran_processor::app::services::normalizer::{
    NormalizeOptions, NormalizeSummary, Normalizer,
};
use hitran_processor::app::services::reference_resolver::TableResolver;
use tempfile::TempDir;

const WATER_LINE: &str = " 11 3517.811260 1.234E-23 6.789E+00.07300.348 1045.05830.68-.008100          0 1 0          0 0 0  5  2  3        6  1  6      457644 5 212 6 4 0    33.0   39.0";

const WATER_SENTINEL_LINE: &str = " 12 3517.811260 1.234E-23 6.789E+00.07300.000   -1.00000.680.000000          0 1 0          0 0 0  5  2  3        6  1  6      457644 5 212 6 4 0     0.0    0.0";

/// A methane record with the upstream ' E' vibrational-symmetry
/// misjustification in the lower state
const METHANE_MISJUSTIFIED_LINE: &str = " 61 3028.752100 1.100E-19 2.342E+01.06200.078  219.94050.75-.004000    0 0 1 0 1F2    0 0 0 0 1 E   12F2  3        13F1  2     453332 1 2 3 4 5 6    13.0   11.0";

fn write_input(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

fn run(input: &Path, options: &NormalizeOptions) -> Result<NormalizeSummary, Error> {
    let normalizer = Normalizer::new(TableResolver::new());
    normalizer.run(input, options, |_| {})
}

fn allow_missing() -> NormalizeOptions {
    NormalizeOptions {
        allow_missing_refs: true,
        ..Default::default()
    }
}

#[test]
fn test_repeated_record_dedups_states() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE, WATER_LINE]);

    let summary = run(&input, &allow_missing()).unwrap();
    assert_eq!(summary.transitions, 2);
    // the second record reuses both interned states
    assert_eq!(summary.new_states, 2);
    assert_eq!(summary.corrections, 0);

    let states = fs::read_to_string(&summary.outputs.states).unwrap();
    assert_eq!(states.lines().count(), 2);

    let trans = fs::read_to_string(&summary.outputs.trans).unwrap();
    let rows: Vec<&str> = trans.lines().collect();
    assert_eq!(rows.len(), 2);
    // both rows cite the same state identities and carry the source record
    assert_eq!(rows[0][..25], rows[1][..25]);
    assert!(rows[0].ends_with(WATER_LINE));

    let corrections = fs::read_to_string(&summary.outputs.corrections).unwrap();
    assert!(corrections.is_empty());
}

#[test]
fn test_missing_references_fail_by_default() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE]);

    let err = run(&input, &NormalizeOptions::default()).unwrap_err();
    match err {
        Error::MissingReferences { count, listing } => {
            // nu, S, gamma_air, gamma_self and n_air cite non-zero
            // references; delta_air cites reference 0 which always resolves
            assert_eq!(count, 5);
            assert!(listing.contains("H2O-nu-5"));
            assert!(listing.contains("H2O-S-2"));
        }
        other => panic!("expected MissingReferences, got {other:?}"),
    }
}

#[test]
fn test_reference_map_resolves_all_sources() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE]);

    let refs = dir.path().join("refs.csv");
    fs::write(
        &refs,
        "key,source_id\n\
         H2O-nu-5,101\n\
         H2O-S-2,102\n\
         H2O-gamma_air-12,103\n\
         H2O-gamma_self-6,104\n\
         H2O-n_air-4,105\n",
    )
    .unwrap();

    let normalizer = Normalizer::new(TableResolver::from_csv(&refs).unwrap());
    let summary = normalizer
        .run(&input, &NormalizeOptions::default(), |_| {})
        .unwrap();
    assert_eq!(summary.transitions, 1);
    assert_eq!(summary.missing_references, 0);

    let trans = fs::read_to_string(&summary.outputs.trans).unwrap();
    assert!(trans.contains(" 101"));
    assert!(trans.contains(" 105"));
}

#[test]
fn test_wavenumber_ordering_violation_aborts() {
    let dir = TempDir::new().unwrap();
    // lower the leading digit of nu in the second record
    let mut descending = String::from(WATER_LINE);
    descending.replace_range(3..15, " 2517.811260");
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE, &descending]);

    let err = run(&input, &allow_missing()).unwrap_err();
    assert!(matches!(err, Error::OrderingViolation { line_no: 2, .. }));
}

#[test]
fn test_repaired_record_lands_in_the_corrections_log() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "CH4.par", &[METHANE_MISJUSTIFIED_LINE]);

    let summary = run(&input, &allow_missing()).unwrap();
    assert_eq!(summary.transitions, 1);
    assert_eq!(summary.corrections, 1);

    let log = fs::read_to_string(&summary.outputs.corrections).unwrap();
    let rows: Vec<&str> = log.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("1-"));
    assert!(rows[1].starts_with("1+"));
    assert_eq!(&rows[0][2..], METHANE_MISJUSTIFIED_LINE);
    // the repaired line carries the left-justified symmetry label
    assert_eq!(&rows[1][2..][95..97], "E ");

    // the transition row cites the repaired record, not the original
    let trans = fs::read_to_string(&summary.outputs.trans).unwrap();
    assert!(trans.ends_with(&format!("{}\n", &rows[1][2..])));
}

#[test]
fn test_missing_value_sentinels_flow_through() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_SENTINEL_LINE]);

    let summary = run(&input, &allow_missing()).unwrap();
    assert_eq!(summary.transitions, 1);
    // gamma_self and delta_air are absent so their references never resolve
    assert_eq!(summary.missing_references, 4);

    let trans = fs::read_to_string(&summary.outputs.trans).unwrap();
    // absent gamma_self leaves its (value, err, source) triple blank
    assert!(trans.contains(",      ,        ,    ,"));
}

#[test]
fn test_existing_outputs_are_not_clobbered() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE]);

    let first = run(&input, &allow_missing()).unwrap();
    assert!(first.outputs.states.exists());

    let err = run(&input, &allow_missing()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let overwrite = NormalizeOptions {
        overwrite: true,
        allow_missing_refs: true,
        ..Default::default()
    };
    let second = run(&input, &overwrite).unwrap();
    assert_eq!(second.transitions, 1);
}

#[test]
fn test_unknown_species_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut line = String::from(WATER_LINE);
    line.replace_range(0..2, "99");
    let input = write_input(dir.path(), "unknown.par", &[&line]);

    let err = run(&input, &allow_missing()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownSpecies {
            molec_id: 99,
            iso_id: 1
        }
    ));
}

#[test]
fn test_seeded_states_keep_their_identities() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "H2O.par", &[WATER_LINE]);

    let first = run(&input, &allow_missing()).unwrap();
    let first_states = fs::read_to_string(&first.outputs.states).unwrap();
    assert_eq!(first_states.lines().count(), 2);
    let first_trans = fs::read_to_string(&first.outputs.trans).unwrap();

    // a rerun seeded from the first output interns no new states, even
    // though --overwrite truncates that same file: the seed is read first
    let seeded = NormalizeOptions {
        overwrite: true,
        allow_missing_refs: true,
        states_seed: Some(first.outputs.states.clone()),
    };
    let second = run(&input, &seeded).unwrap();
    assert_eq!(second.new_states, 0);
    let second_states = fs::read_to_string(&second.outputs.states).unwrap();
    assert!(second_states.is_empty());

    // the transition rows cite the identities the seed assigned
    let second_trans = fs::read_to_string(&second.outputs.trans).unwrap();
    assert_eq!(
        first_trans.lines().next().unwrap()[..25],
        second_trans.lines().next().unwrap()[..25]
    );
}
