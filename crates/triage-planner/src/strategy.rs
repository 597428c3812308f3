//! Execution-strategy selection.
//!
//! The strategy is decided once per pipeline from a handful of structural
//! facts, never per element and never per call. Reverse and the transform
//! stage are orthogonal modifiers the exec crate applies on top.

use std::fmt;

use serde::{Deserialize, Serialize};

use triage_core::prelude::{OrderingMode, PipelineConfig, StageSet};

/// The finite, closed set of pipeline bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// One input value, optional transform; no collection machinery.
    SingleValue,
    /// Input passes through unchanged (element-wise transform aside).
    Identity,
    /// No filter, no ordering, bounded: take the first k by original order.
    Truncate,
    /// Unbounded filter.
    FilterOnly,
    /// Bounded filter, short-circuiting after k matches.
    FilterTruncate,
    /// Full stable sort (optionally filtered first).
    Sort,
    /// Bounded top-k selection (optionally filtered first).
    TopK,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::SingleValue => "single_value",
            Strategy::Identity => "identity",
            Strategy::Truncate => "truncate",
            Strategy::FilterOnly => "filter_only",
            Strategy::FilterTruncate => "filter_truncate",
            Strategy::Sort => "sort",
            Strategy::TopK => "top_k",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The structural facts strategy selection keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineShape {
    pub has_predicate: bool,
    pub ordering: OrderingMode,
    pub natural_order: bool,
    pub bounded: bool,
    pub single_value: bool,
}

impl PipelineShape {
    pub fn of(stages: &StageSet, config: &PipelineConfig) -> Self {
        let ordering = if stages.order_key.is_some() {
            OrderingMode::Key
        } else if stages.order_cmp.is_some() {
            OrderingMode::Comparator
        } else {
            OrderingMode::None
        };
        Self {
            has_predicate: stages.predicate.is_some(),
            ordering,
            natural_order: config.natural_order,
            bounded: config.cardinality.is_bounded(),
            single_value: config.single_value,
        }
    }

    fn ordered(&self) -> bool {
        self.ordering != OrderingMode::None || self.natural_order
    }
}

pub fn select_strategy(shape: PipelineShape) -> Strategy {
    if shape.single_value {
        return Strategy::SingleValue;
    }
    match (shape.has_predicate, shape.ordered(), shape.bounded) {
        (_, true, true) => Strategy::TopK,
        (_, true, false) => Strategy::Sort,
        (true, false, true) => Strategy::FilterTruncate,
        (true, false, false) => Strategy::FilterOnly,
        (false, false, true) => Strategy::Truncate,
        (false, false, false) => Strategy::Identity,
    }
}
