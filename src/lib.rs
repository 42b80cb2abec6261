//! HITRAN Processor Library
//!
//! A Rust library for normalizing HITRAN2004+ `.par` line lists into
//! database-friendly `.states` and `.trans` tables.
//!
//! This library provides tools for:
//! - Decoding the fixed-width, 160-column `.par` transition record
//! - Parsing quantum numbers with per-molecular-class case grammars
//! - Re-encoding transitions byte-for-byte and validating the round trip
//! - Repairing known malformed upstream records from a fixed correction table
//! - Deduplicating quantum states and assigning stable integer identities
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cases;
        pub mod corrections;
        pub mod normalizer;
        pub mod par_codec;
        pub mod reference_resolver;
        pub mod validator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{HitranParam, Multipole, QnMap, QnValue, State, Transition};
pub use app::services::cases::{CaseKind, CaseRegistry};
pub use config::ProcessorConfig;

/// Result type alias for the HITRAN processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for `.par` processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A `.par` record could not be decoded
    #[error("malformed .par record at line {line_no}: {message}")]
    ParMalformed { line_no: usize, message: String },

    /// (molecule, isotopologue) pair absent from the case-dispatch table
    #[error("no case grammar for molecule {molec_id}, isotopologue {iso_id}")]
    UnknownSpecies { molec_id: u8, iso_id: u8 },

    /// Round-trip validation failed and the correction table could not repair it
    #[error(
        "line {line_no} failed to validate after correction\n  original: {original}\n  produced: {produced}"
    )]
    RoundTrip {
        line_no: usize,
        original: String,
        produced: String,
    },

    /// Input transitions are not ordered by ascending wavenumber
    #[error(
        "wavenumber ordering violation at line {line_no}: {current} cm-1 follows {previous} cm-1"
    )]
    OrderingViolation {
        line_no: usize,
        previous: f64,
        current: f64,
    },

    /// One or more parameter references could not be resolved to sources
    #[error("{count} parameter reference(s) missing from the reference map: {listing}")]
    MissingReferences { count: usize, listing: String },

    /// Reference/isotopologue metadata error
    #[error("reference resolver error: {message}")]
    Resolver { message: String },

    /// CSV metadata parsing error
    #[error("metadata parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Existing states file could not be loaded
    #[error("states file error in '{file}': {message}")]
    StatesFile { file: String, message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed-record error with context
    pub fn par_malformed(line_no: usize, message: impl Into<String>) -> Self {
        Self::ParMalformed {
            line_no,
            message: message.into(),
        }
    }

    /// Create an unknown-species error
    pub fn unknown_species(molec_id: u8, iso_id: u8) -> Self {
        Self::UnknownSpecies { molec_id, iso_id }
    }

    /// Create a round-trip validation error
    pub fn round_trip(
        line_no: usize,
        original: impl Into<String>,
        produced: impl Into<String>,
    ) -> Self {
        Self::RoundTrip {
            line_no,
            original: original.into(),
            produced: produced.into(),
        }
    }

    /// Create an ordering-violation error
    pub fn ordering_violation(line_no: usize, previous: f64, current: f64) -> Self {
        Self::OrderingViolation {
            line_no,
            previous,
            current,
        }
    }

    /// Create a resolver error
    pub fn resolver(message: impl Into<String>) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }

    /// Create a CSV metadata parsing error
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a states file error
    pub fn states_file(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StatesFile {
            file: file.into(),
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
