//! Peer-matching engine for the student career platform.
//!
//! The [`matching`] module scores a requesting student against the rest of the cohort and returns
//! a ranked shortlist. Configuration, telemetry, and the application error type live alongside it
//! so the API service can wire everything together.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
