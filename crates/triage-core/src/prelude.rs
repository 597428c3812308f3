//! Convenient re-exports for downstream crates.

pub use crate::config::{Cardinality, OrderingMode, PipelineConfig, ReceiverBinding};
pub use crate::error::{Error, Result};
pub use crate::hash::{hash_serde, Hash256};
pub use crate::id::PipelineId;
pub use crate::report::{CompileReport, ReportId};
pub use crate::signature::{introspect, CallableSignature, ReturnMarker, SignatureBuilder};
pub use crate::stage::{StageCallback, StageFn, StageKind, StageSet, StageSpec};
pub use crate::value::Value;
