#![forbid(unsafe_code)]
//! triage-exec: compiles a declared stage set plus structural options into
//! one specialized pipeline object, then runs it.
//!
//! Compilation does all signature resolution, validation, unification, and
//! strategy selection exactly once; invocation resolves the extra arguments
//! once and loops over elements with pre-bound callbacks.

pub mod call;
pub mod pipeline;

pub use call::{Call, Input, Output};
pub use pipeline::{compile, CompiledPipeline};
