//! Stage callbacks and the declared stage set.
//!
//! A callback receives one flat `&[Value]` argument slice. Layout, in order:
//! the required arguments (element, or the `a`/`b` pair for comparator
//! ordering), then the extra positional slots, then the declared defaulted
//! keywords in declaration order, then (when declared) one `List` holding
//! the variadic-positional capture and one `Record` holding the
//! variadic-keyword capture. Binding assembles everything past the required
//! arguments once per invocation, so the per-element cost is one call.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signature::CallableSignature;
use crate::value::Value;

pub type StageFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Which pipeline slot a callback fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    Predicate,
    OrderingKey,
    OrderingCmp,
    Transform,
}

impl StageKind {
    /// Required argument count the pipeline itself supplies per element.
    pub fn required_arity(self) -> usize {
        match self {
            StageKind::OrderingCmp => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Predicate => "predicate",
            StageKind::OrderingKey => "ordering-key",
            StageKind::OrderingCmp => "ordering-comparator",
            StageKind::Transform => "transform",
        };
        write!(f, "{}", name)
    }
}

/// A user callback plus its declared signature.
#[derive(Clone)]
pub struct StageCallback {
    pub name: String,
    pub signature: CallableSignature,
    pub fun: StageFn,
}

impl StageCallback {
    pub fn new<F>(name: &str, signature: CallableSignature, fun: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            signature,
            fun: Arc::new(fun),
        }
    }
}

impl fmt::Debug for StageCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageCallback")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Serializable shape of one declared stage; feeds validation and the plan
/// hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSpec {
    pub kind: StageKind,
    pub signature: CallableSignature,
    pub required_arity: usize,
}

/// The up-to-three callbacks a pipeline definition declares.
///
/// Ordering has two mutually exclusive slots, mirroring the key-vs-comparator
/// split; declaring both is a definition-time conflict caught by validation.
#[derive(Debug, Clone, Default)]
pub struct StageSet {
    pub predicate: Option<StageCallback>,
    pub order_key: Option<StageCallback>,
    pub order_cmp: Option<StageCallback>,
    pub transform: Option<StageCallback>,
}

impl StageSet {
    pub fn is_empty(&self) -> bool {
        self.predicate.is_none()
            && self.order_key.is_none()
            && self.order_cmp.is_none()
            && self.transform.is_none()
    }

    pub fn has_ordering(&self) -> bool {
        self.order_key.is_some() || self.order_cmp.is_some()
    }

    /// Declared stages in unification precedence order:
    /// predicate, ordering, transform.
    pub fn iter(&self) -> impl Iterator<Item = (StageKind, &StageCallback)> {
        let slots = [
            (StageKind::Predicate, self.predicate.as_ref()),
            (StageKind::OrderingKey, self.order_key.as_ref()),
            (StageKind::OrderingCmp, self.order_cmp.as_ref()),
            (StageKind::Transform, self.transform.as_ref()),
        ];
        slots.into_iter().filter_map(|(k, cb)| cb.map(|cb| (k, cb)))
    }

    /// Serializable stage shapes, used for the plan hash.
    pub fn specs(&self) -> Vec<StageSpec> {
        self.iter()
            .map(|(kind, cb)| StageSpec {
                kind,
                signature: cb.signature.clone(),
                required_arity: kind.required_arity(),
            })
            .collect()
    }
}
