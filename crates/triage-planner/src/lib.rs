#![forbid(unsafe_code)]
//! triage-planner: from declared stages + options → unified call signature
//! → validated shape → one execution strategy.
//!
//! Everything here runs once, at definition time, before any element is
//! seen. The strategy enumeration is finite and closed: the exec crate
//! dispatches on it statically instead of interpreting "whatever stages
//! happen to exist" per call.

pub mod strategy;
pub mod unify;
pub mod validate;

pub use strategy::{select_strategy, PipelineShape, Strategy};
pub use unify::{unify, UnifiedSignature};
pub use validate::validate;
