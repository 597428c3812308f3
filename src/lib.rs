#![forbid(unsafe_code)]
//! triage: a declarative pipeline compiler.
//!
//! Up to three callbacks (a selection predicate, an ordering relation as a
//! key or a comparator, and a transform), plus structural options (reverse,
//! natural order, fixed/dynamic cardinality, single-value mode), compile
//! once into a single specialized callable that runs filter, then
//! order/select, then transform over an in-memory sequence or one value.
//!
//! ```
//! use triage::prelude::*;
//!
//! let stages = StageSet {
//!     predicate: Some(StageCallback::new(
//!         "positive",
//!         CallableSignature::plain(["chosen"]),
//!         |args| Ok(Value::Bool(matches!(args[0], Value::Int(i) if i > 0))),
//!     )),
//!     ..StageSet::default()
//! };
//! let pipe = compile(stages, PipelineConfig::default()).unwrap();
//! let out = pipe
//!     .run(vec![Value::Int(-1), Value::Int(2), Value::Int(3)])
//!     .unwrap();
//! assert_eq!(out, vec![Value::Int(2), Value::Int(3)]);
//! ```

pub use triage_core;
pub use triage_exec;
pub use triage_planner;
pub use triage_stages;

pub mod prelude {
    pub use triage_core::prelude::*;
    pub use triage_exec::{compile, Call, CompiledPipeline, Input, Output};
    pub use triage_planner::{PipelineShape, Strategy, UnifiedSignature};
    pub use triage_stages::{BoundStage, ResolvedExtras, StageDescriptor};
}
