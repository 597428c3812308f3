//! Parameter unification: merge every stage's extra parameters into one
//! external call signature.

use serde::{Deserialize, Serialize};

use triage_core::prelude::{
    Cardinality, Error, PipelineConfig, ReceiverBinding, Result, StageSet, Value,
};

/// The single merged call signature the compiled pipeline exposes.
///
/// Canonical parameter order: receiver, dynamic count (if any), collection
/// (unless single-value mode), anonymous positional placeholders,
/// deduplicated keywords in first-seen order, variadic positional, variadic
/// keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSignature {
    pub receiver: ReceiverBinding,
    pub dynamic_count: bool,
    pub collection: bool,
    /// Number of anonymous positional placeholders (max extra positional
    /// count across active stages; all stages read the same slots).
    pub extra_positional: usize,
    /// Deduplicated keyword parameters, first-seen order, one default each.
    pub keywords: Vec<(String, Value)>,
    pub var_positional: bool,
    pub var_keyword: bool,
}

impl UnifiedSignature {
    pub fn keyword_default(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn keyword_names(&self) -> Vec<String> {
        self.keywords.iter().map(|(n, _)| n.clone()).collect()
    }
}

/// Merge the stages' extra parameters, detecting conflicts.
///
/// Keyword precedence on first sight is predicate → ordering → transform;
/// a later occurrence of a seen keyword must carry a value-equal default or
/// unification fails.
pub fn unify(stages: &StageSet, config: &PipelineConfig) -> Result<UnifiedSignature> {
    let mut extra_positional = 0usize;
    let mut keywords: Vec<(String, Value)> = Vec::new();
    let mut var_positional = false;
    let mut var_keyword = false;

    for (kind, cb) in stages.iter() {
        let sig = &cb.signature;
        extra_positional = extra_positional.max(
            sig.positional()
                .len()
                .saturating_sub(kind.required_arity()),
        );

        for (name, default) in sig.defaulted() {
            match keywords.iter().find(|(seen, _)| seen == name) {
                None => keywords.push((name.clone(), default.clone())),
                Some((_, first)) if first == default => {}
                Some((_, first)) => {
                    return Err(Error::KeywordConflict {
                        name: name.clone(),
                        first: first.clone(),
                        second: default.clone(),
                    })
                }
            }
        }

        var_positional |= sig.var_positional().is_some();
        var_keyword |= sig.var_keyword().is_some();
    }

    Ok(UnifiedSignature {
        receiver: config.receiver_binding,
        dynamic_count: config.cardinality == Cardinality::Dynamic,
        collection: !config.single_value,
        extra_positional,
        keywords,
        var_positional,
        var_keyword,
    })
}
