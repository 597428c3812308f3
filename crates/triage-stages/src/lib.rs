#![forbid(unsafe_code)]
//! triage-stages: stage descriptors (predicate/ordering/transform), argument
//! binding, and the ordering primitives (stable sort, bounded top-k).
//!
//! Design intent:
//! - Keep this crate pure and synchronous (no async, no I/O).
//! - Binding happens once per invocation; the per-element path is one
//!   callback call plus, off the bare-callback fast path, one small Vec.
//! - Selection state (the top-k heap) is allocated fresh per invocation and
//!   never shared across calls.

pub mod bind;
pub mod descriptor;
pub mod ordering;
pub mod predicate;
pub mod select;
pub mod transform;

pub use bind::{BoundStage, ResolvedExtras};
pub use descriptor::StageDescriptor;
pub use ordering::OrderingStage;
pub use predicate::PredicateStage;
pub use transform::TransformStage;
