//! Core data models for HITRAN processing
//!
//! Defines the transition record, the quantum state with its canonical
//! serialization, and the measured-parameter type with its error-code tables.

pub mod param;
pub mod state;
pub mod transition;

pub use param::HitranParam;
pub use state::{QnMap, QnValue, State};
pub use transition::{Multipole, Transition};
