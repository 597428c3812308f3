//! Stage descriptor trait: what every pipeline slot knows how to do.

use triage_core::prelude::{StageCallback, StageKind, StageSpec};

use crate::bind::{bind_stage, BoundStage, ResolvedExtras};

/// A declared stage: a callback wrapped with its slot semantics.
///
/// Descriptors are immutable after compilation; `bind` is called once per
/// invocation and the result drives the per-element loop.
pub trait StageDescriptor {
    fn kind(&self) -> StageKind;

    fn callback(&self) -> &StageCallback;

    fn required_arity(&self) -> usize {
        self.kind().required_arity()
    }

    fn spec(&self) -> StageSpec {
        StageSpec {
            kind: self.kind(),
            signature: self.callback().signature.clone(),
            required_arity: self.required_arity(),
        }
    }

    /// Specialize the callback for one invocation's extra arguments.
    fn bind(&self, extras: &ResolvedExtras) -> BoundStage {
        bind_stage(self.callback(), self.required_arity(), extras)
    }
}
