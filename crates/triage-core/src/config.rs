//! Structural pipeline options supplied by the declarative surface.

use serde::{Deserialize, Serialize};

/// Bound on the surviving element count after ordering/selection.
///
/// Fixed and Dynamic are mutually exclusive by construction; `Fixed(0)` is
/// the residual invalid case and is rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// No bound; every surviving element is returned.
    Unbounded,
    /// Bound fixed at definition time.
    Fixed(usize),
    /// Bound supplied as the pipeline's first runtime argument.
    Dynamic,
}

impl Cardinality {
    pub fn is_bounded(self) -> bool {
        !matches!(self, Cardinality::Unbounded)
    }
}

/// How the compiled pipeline is exposed by the declarative surface: invoked
/// on an instance, or fused with construction itself. Changes only the
/// external binding point, never the pipeline body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiverBinding {
    Instance,
    StaticFactory,
}

/// Declared ordering flavor, derived from which ordering slot is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingMode {
    None,
    Key,
    Comparator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Descending instead of ascending order. Requires an ordering stage or
    /// the explicit natural-order fallback.
    pub reverse: bool,

    /// Order by the values' natural ordering when no ordering stage is
    /// declared.
    pub natural_order: bool,

    pub cardinality: Cardinality,

    /// Operate on one value instead of a collection. Forbids predicate,
    /// ordering, and any cardinality bound.
    pub single_value: bool,

    pub receiver_binding: ReceiverBinding,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reverse: false,
            natural_order: false,
            cardinality: Cardinality::Unbounded,
            single_value: false,
            receiver_binding: ReceiverBinding::Instance,
        }
    }
}
