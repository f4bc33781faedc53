//! Disease risk assessment engine.
//!
//! The [`assessment`] module holds the scoring pipeline; [`config`], [`telemetry`] and
//! [`error`] carry the ambient service concerns shared with the `disease-risk-api` binary.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
