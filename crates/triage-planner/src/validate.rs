//! Static validation over declared stages and options.
//!
//! Every check runs once, before synthesis; nothing here is deferred to call
//! time. Keyword-default conflicts are the one definition-time failure
//! detected elsewhere (during unification, which already walks the keyword
//! tables).

use triage_core::prelude::{Cardinality, Error, PipelineConfig, Result, StageSet};

pub fn validate(stages: &StageSet, config: &PipelineConfig) -> Result<()> {
    // An empty stage set is allowed only when a structural option gives the
    // pipeline a body of its own (natural-order sort, truncation, or
    // single-value passthrough).
    let has_structural_body =
        config.natural_order || config.cardinality.is_bounded() || config.single_value;
    if stages.is_empty() && !has_structural_body {
        return Err(Error::Definition(
            "at least one of predicate, ordering, or transform must be declared".into(),
        ));
    }

    if stages.order_key.is_some() && stages.order_cmp.is_some() {
        return Err(Error::Definition(
            "ordering cannot be both key-mode and comparator-mode".into(),
        ));
    }

    if config.natural_order && stages.has_ordering() {
        return Err(Error::Definition(
            "natural-order fallback conflicts with a declared ordering stage".into(),
        ));
    }

    if config.reverse && !stages.has_ordering() && !config.natural_order {
        return Err(Error::Definition(
            "reverse requires an ordering stage or the natural-order fallback".into(),
        ));
    }

    if let Cardinality::Fixed(n) = config.cardinality {
        if n == 0 {
            return Err(Error::Definition(
                "fixed cardinality must be a positive integer".into(),
            ));
        }
    }

    if config.single_value {
        if stages.predicate.is_some() {
            return Err(Error::Definition(
                "single-value mode does not support a predicate".into(),
            ));
        }
        if stages.has_ordering() || config.natural_order {
            return Err(Error::Definition(
                "single-value mode does not support ordering".into(),
            ));
        }
        if config.cardinality.is_bounded() {
            return Err(Error::Definition(
                "single-value mode does not support a cardinality bound".into(),
            ));
        }
    }

    for (kind, cb) in stages.iter() {
        let declared = cb.signature.positional().len();
        let required = kind.required_arity();
        if declared < required {
            return Err(Error::Arity {
                kind,
                declared,
                required,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::prelude::{CallableSignature, StageCallback, Value};

    fn cb(name: &str, sig: CallableSignature) -> StageCallback {
        StageCallback::new(name, sig, |_| Ok(Value::Null))
    }

    #[test]
    fn test_empty_stage_set_rejected() {
        let err = validate(&StageSet::default(), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Definition(_)));

        let config = PipelineConfig {
            natural_order: true,
            ..Default::default()
        };
        assert!(validate(&StageSet::default(), &config).is_ok());
    }

    #[test]
    fn test_natural_order_with_declared_ordering_rejected() {
        let config = PipelineConfig {
            natural_order: true,
            ..Default::default()
        };
        let with_key = StageSet {
            order_key: Some(cb("k", CallableSignature::plain(["chosen"]))),
            ..Default::default()
        };
        assert!(matches!(
            validate(&with_key, &config),
            Err(Error::Definition(_))
        ));

        let with_cmp = StageSet {
            order_cmp: Some(cb("c", CallableSignature::plain(["a", "b"]))),
            ..Default::default()
        };
        assert!(matches!(
            validate(&with_cmp, &config),
            Err(Error::Definition(_))
        ));
    }

    #[test]
    fn test_comparator_needs_two_params() {
        let stages = StageSet {
            order_cmp: Some(cb("c", CallableSignature::plain(["a"]))),
            ..Default::default()
        };
        let err = validate(&stages, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Arity {
                declared: 1,
                required: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_reverse_without_ordering_rejected() {
        let stages = StageSet {
            predicate: Some(cb("p", CallableSignature::plain(["chosen"]))),
            ..Default::default()
        };
        let config = PipelineConfig {
            reverse: true,
            ..Default::default()
        };
        assert!(validate(&stages, &config).is_err());

        let config = PipelineConfig {
            reverse: true,
            natural_order: true,
            ..Default::default()
        };
        assert!(validate(&stages, &config).is_ok());
    }
}
