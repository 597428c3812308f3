//! Transform stage: maps surviving elements, or runs for side effect only.

use triage_core::prelude::{Result, StageCallback, StageKind, Value};

use crate::bind::BoundStage;
use crate::descriptor::StageDescriptor;

#[derive(Debug)]
pub struct TransformStage {
    pub callback: StageCallback,
}

impl TransformStage {
    pub fn new(callback: StageCallback) -> Self {
        Self { callback }
    }

    /// Whether the callback produces a value. Side-effect-only transforms
    /// still run per element, but the pipeline's output stays the
    /// filtered/ordered input sequence.
    pub fn produces_value(&self) -> bool {
        self.callback.signature.returns().produces_value()
    }

    /// Map every element of `input` through `bound`, order-preserving.
    pub fn apply(&self, bound: &BoundStage, input: Vec<Value>) -> Result<Vec<Value>> {
        if self.produces_value() {
            let mut out = Vec::with_capacity(input.len());
            for value in &input {
                out.push(bound.call1(value)?);
            }
            Ok(out)
        } else {
            for value in &input {
                bound.call1(value)?;
            }
            Ok(input)
        }
    }

    /// Single-value mode: same specialization machinery, one element.
    pub fn apply_single(&self, bound: &BoundStage, value: Value) -> Result<Value> {
        if self.produces_value() {
            bound.call1(&value)
        } else {
            bound.call1(&value)?;
            Ok(value)
        }
    }
}

impl StageDescriptor for TransformStage {
    fn kind(&self) -> StageKind {
        StageKind::Transform
    }

    fn callback(&self) -> &StageCallback {
        &self.callback
    }
}
