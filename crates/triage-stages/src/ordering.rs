//! Ordering stage: key-mode, comparator-mode, or the natural-order fallback.
//!
//! Unbounded ordering is a full stable sort; bounded ordering goes through
//! `select::bounded_select`, which matches sort-then-truncate exactly.
//! Comparator callbacks must define a strict weak ordering; violations are
//! not checked and yield an unspecified permutation.

use std::cmp::Ordering as CmpOrdering;

use triage_core::prelude::{Error, OrderingMode, Result, StageCallback, StageKind, Value};

use crate::bind::BoundStage;
use crate::descriptor::StageDescriptor;
use crate::select::{bounded_select, sort_stable_by};

#[derive(Debug)]
pub enum OrderingStage {
    /// One-argument callback producing an orderable rank per element.
    Key(StageCallback),
    /// Two-argument callback returning negative/zero/positive.
    Comparator(StageCallback),
}

impl OrderingStage {
    pub fn mode(&self) -> OrderingMode {
        match self {
            OrderingStage::Key(_) => OrderingMode::Key,
            OrderingStage::Comparator(_) => OrderingMode::Comparator,
        }
    }

    pub fn eval<'a>(&'a self, bound: &'a BoundStage) -> OrderingEval<'a> {
        match self {
            OrderingStage::Key(_) => OrderingEval::Key(bound),
            OrderingStage::Comparator(cb) => OrderingEval::Comparator {
                bound,
                name: &cb.name,
            },
        }
    }
}

impl StageDescriptor for OrderingStage {
    fn kind(&self) -> StageKind {
        match self {
            OrderingStage::Key(_) => StageKind::OrderingKey,
            OrderingStage::Comparator(_) => StageKind::OrderingCmp,
        }
    }

    fn callback(&self) -> &StageCallback {
        match self {
            OrderingStage::Key(cb) | OrderingStage::Comparator(cb) => cb,
        }
    }
}

/// How to rank elements during one invocation.
pub enum OrderingEval<'a> {
    /// Values' natural ordering (explicit fallback, no ordering stage).
    Natural,
    Key(&'a BoundStage),
    Comparator { bound: &'a BoundStage, name: &'a str },
}

/// Order `input` ascending (descending if `reverse`), stable; with `k` set,
/// bounded top-k selection instead of a full sort.
pub fn order(
    input: Vec<Value>,
    eval: OrderingEval<'_>,
    reverse: bool,
    k: Option<usize>,
) -> Result<Vec<Value>> {
    let dir = move |ord: CmpOrdering| if reverse { ord.reverse() } else { ord };

    match eval {
        OrderingEval::Key(bound) => {
            // Decorate-sort-undecorate: the key callback runs once per
            // element, never once per comparison.
            let mut decorated: Vec<(Value, Value)> = Vec::with_capacity(input.len());
            for value in input {
                decorated.push((bound.call1(&value)?, value));
            }
            let cmp = move |a: &(Value, Value), b: &(Value, Value)| -> Result<CmpOrdering> {
                Ok(dir(a.0.natural_cmp(&b.0)))
            };
            let decorated = finish(decorated, k, cmp)?;
            Ok(decorated.into_iter().map(|(_, v)| v).collect())
        }
        OrderingEval::Comparator { bound, name } => {
            let cmp = move |a: &Value, b: &Value| -> Result<CmpOrdering> {
                let rank = bound.call2(a, b)?;
                let ord = rank.to_ordering().ok_or_else(|| Error::Stage {
                    kind: StageKind::OrderingCmp,
                    name: name.to_string(),
                    message: format!("comparator returned non-numeric value {}", rank),
                })?;
                Ok(dir(ord))
            };
            finish(input, k, cmp)
        }
        OrderingEval::Natural => {
            let cmp = move |a: &Value, b: &Value| -> Result<CmpOrdering> {
                Ok(dir(a.natural_cmp(b)))
            };
            finish(input, k, cmp)
        }
    }
}

fn finish<T>(
    mut items: Vec<T>,
    k: Option<usize>,
    cmp: impl FnMut(&T, &T) -> Result<CmpOrdering>,
) -> Result<Vec<T>> {
    match k {
        Some(k) => bounded_select(items, k, cmp),
        None => {
            sort_stable_by(&mut items, cmp)?;
            Ok(items)
        }
    }
}
