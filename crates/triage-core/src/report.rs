//! Compile report emitted alongside every compiled pipeline.
//!
//! Serves the same role as a run manifest: a serializable record of what was
//! compiled (strategy, unified-signature shape, plan hash) for audit and
//! logging. The report is produced once at definition time and never changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ReceiverBinding;
use crate::hash::Hash256;
use crate::id::PipelineId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub Uuid);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    pub id: ReportId,
    pub pipeline: PipelineId,

    /// Stable hash over (stage signatures, config, strategy).
    pub plan_hash: Hash256,

    /// Name of the selected execution strategy.
    pub strategy: String,

    /// Unified external signature, summarized.
    pub extra_positional: usize,
    pub keywords: Vec<String>,
    pub var_positional: bool,
    pub var_keyword: bool,
    pub receiver_binding: ReceiverBinding,

    /// Compiler version string for provenance.
    pub compiler_version: String,

    /// Milliseconds since Unix epoch (UTC) at compile time.
    pub compiled_ms: u64,
}

impl CompileReport {
    pub fn new(
        pipeline: PipelineId,
        plan_hash: Hash256,
        strategy: &str,
        receiver_binding: ReceiverBinding,
        compiled_ms: u64,
    ) -> Self {
        Self {
            id: ReportId(Uuid::new_v4()),
            pipeline,
            plan_hash,
            strategy: strategy.to_string(),
            extra_positional: 0,
            keywords: Vec::new(),
            var_positional: false,
            var_keyword: false,
            receiver_binding,
            compiler_version: crate::VERSION.to_string(),
            compiled_ms,
        }
    }

    pub fn with_signature_summary(
        mut self,
        extra_positional: usize,
        keywords: Vec<String>,
        var_positional: bool,
        var_keyword: bool,
    ) -> Self {
        self.extra_positional = extra_positional;
        self.keywords = keywords;
        self.var_positional = var_positional;
        self.var_keyword = var_keyword;
        self
    }
}
