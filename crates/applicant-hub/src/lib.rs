//! Applicant tracking core for the recruitment platform.
//!
//! The crate is organised around the [`applicants`] module: a record store
//! and custom-field registry behind storage traits, a pure list query engine,
//! an edit-session state machine, and an axum router exposing the transport
//! contract. `config`, `telemetry`, and `error` carry the service plumbing.

pub mod applicants;
pub mod config;
pub mod error;
pub mod telemetry;
