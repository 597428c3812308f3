//! Predicate stage: keeps elements whose callback result is truthy.

use triage_core::prelude::{Result, StageCallback, StageKind, Value};

use crate::bind::BoundStage;
use crate::descriptor::StageDescriptor;

#[derive(Debug)]
pub struct PredicateStage {
    pub callback: StageCallback,
}

impl PredicateStage {
    pub fn new(callback: StageCallback) -> Self {
        Self { callback }
    }

    /// Filter `input` through `bound`, preserving relative order.
    ///
    /// With `limit` set (cardinality bound, no ordering active), evaluation
    /// short-circuits: input stops being consumed once `limit` elements have
    /// matched.
    pub fn apply(
        &self,
        bound: &BoundStage,
        input: Vec<Value>,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let mut kept = match limit {
            Some(k) => Vec::with_capacity(k.min(input.len())),
            None => Vec::new(),
        };
        for value in input {
            if let Some(k) = limit {
                if kept.len() == k {
                    break;
                }
            }
            if bound.call1(&value)?.truthy() {
                kept.push(value);
            }
        }
        Ok(kept)
    }
}

impl StageDescriptor for PredicateStage {
    fn kind(&self) -> StageKind {
        StageKind::Predicate
    }

    fn callback(&self) -> &StageCallback {
        &self.callback
    }
}
