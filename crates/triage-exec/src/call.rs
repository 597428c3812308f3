//! The unified call surface of a compiled pipeline.
//!
//! One invocation supplies: the dynamic count when the pipeline declares
//! dynamic cardinality, values for the anonymous positional placeholders,
//! and keyword overrides. Everything is resolved against the unified
//! signature once, before any element is touched.

use std::collections::BTreeMap;

use triage_core::prelude::{Error, Result, Value};
use triage_planner::UnifiedSignature;
use triage_stages::ResolvedExtras;

/// What one invocation operates on.
#[derive(Debug, Clone)]
pub enum Input {
    Collection(Vec<Value>),
    Single(Value),
}

/// What one invocation produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Sequence(Vec<Value>),
    Single(Value),
}

impl Output {
    pub fn into_sequence(self) -> Option<Vec<Value>> {
        match self {
            Output::Sequence(v) => Some(v),
            Output::Single(_) => None,
        }
    }

    pub fn into_single(self) -> Option<Value> {
        match self {
            Output::Single(v) => Some(v),
            Output::Sequence(_) => None,
        }
    }
}

/// Extra arguments for one invocation, mirroring the unified signature.
#[derive(Debug, Clone, Default)]
pub struct Call {
    pub count: Option<usize>,
    pub args: Vec<Value>,
    pub kwargs: BTreeMap<String, Value>,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leading count argument for dynamic cardinality.
    pub fn count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.to_string(), value.into());
        self
    }
}

/// Check `call` against the unified signature and split it into the extras
/// every stage binds against. Runs once per invocation.
pub(crate) fn resolve(
    unified: &UnifiedSignature,
    call: &Call,
) -> Result<(Option<usize>, ResolvedExtras)> {
    let count = match (unified.dynamic_count, call.count) {
        (true, Some(n)) => Some(n),
        (true, None) => {
            return Err(Error::Invocation(
                "missing count argument for dynamic cardinality".to_string(),
            ))
        }
        (false, Some(_)) => {
            return Err(Error::Invocation(
                "count argument given but cardinality is not dynamic".to_string(),
            ))
        }
        (false, None) => None,
    };

    if call.args.len() < unified.extra_positional {
        return Err(Error::Invocation(format!(
            "expected {} positional arguments, got {}",
            unified.extra_positional,
            call.args.len()
        )));
    }
    if call.args.len() > unified.extra_positional && !unified.var_positional {
        return Err(Error::Invocation(format!(
            "too many positional arguments: expected {}, got {}",
            unified.extra_positional,
            call.args.len()
        )));
    }
    let placeholders = call.args[..unified.extra_positional].to_vec();
    let varargs = call.args[unified.extra_positional..].to_vec();

    let mut keywords = BTreeMap::new();
    let mut varkw = BTreeMap::new();
    for (name, value) in &call.kwargs {
        if unified.keyword_default(name).is_some() {
            keywords.insert(name.clone(), value.clone());
        } else if unified.var_keyword {
            varkw.insert(name.clone(), value.clone());
        } else {
            return Err(Error::Invocation(format!(
                "unexpected keyword argument '{}'",
                name
            )));
        }
    }

    Ok((
        count,
        ResolvedExtras {
            placeholders,
            keywords,
            varargs,
            varkw,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::prelude::ReceiverBinding;

    fn unified(extra: usize, var_positional: bool, var_keyword: bool) -> UnifiedSignature {
        UnifiedSignature {
            receiver: ReceiverBinding::Instance,
            dynamic_count: false,
            collection: true,
            extra_positional: extra,
            keywords: vec![("limit".to_string(), Value::Int(10))],
            var_positional,
            var_keyword,
        }
    }

    #[test]
    fn test_overflow_positionals_need_variadic_capture() {
        let call = Call::new().arg(1).arg(2);

        let err = resolve(&unified(1, false, false), &call).unwrap_err();
        assert!(err.to_string().contains("too many positional"));

        let (_, extras) = resolve(&unified(1, true, false), &call).unwrap();
        assert_eq!(extras.placeholders, vec![Value::Int(1)]);
        assert_eq!(extras.varargs, vec![Value::Int(2)]);
    }

    #[test]
    fn test_unknown_keyword_needs_variadic_capture() {
        let call = Call::new().kwarg("limit", 3).kwarg("mystery", true);

        let err = resolve(&unified(0, false, false), &call).unwrap_err();
        assert!(err.to_string().contains("mystery"));

        let (_, extras) = resolve(&unified(0, false, true), &call).unwrap();
        assert_eq!(extras.keywords.get("limit"), Some(&Value::Int(3)));
        assert_eq!(extras.varkw.get("mystery"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_count_must_match_cardinality() {
        let mut sig = unified(0, false, false);
        assert!(resolve(&sig, &Call::new().count(4)).is_err());

        sig.dynamic_count = true;
        assert!(resolve(&sig, &Call::new()).is_err());
        let (count, _) = resolve(&sig, &Call::new().count(4)).unwrap();
        assert_eq!(count, Some(4));
    }
}
