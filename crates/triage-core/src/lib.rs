#![forbid(unsafe_code)]
//! triage-core: value model, callable signatures, stage specs, pipeline
//! configuration, canonical errors, stable hashing, and compile reports.
//!
//! This crate is the shared vocabulary of the pipeline compiler. It does no
//! I/O, holds no runtime state, and stays synchronous; the planner and exec
//! crates build on it.

pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod prelude;
pub mod report;
pub mod signature;
pub mod stage;
pub mod value;

/// Compiler version string for provenance (stamped into compile reports).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
