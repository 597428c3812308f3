//! Binding a stage callback to the extra arguments of one invocation.
//!
//! The unified call site hands every stage the same flat extras; each stage
//! reads the slots its own signature declares. When a callback declares
//! exactly its required parameters and nothing else, `bind` hands it through
//! unwrapped, with no per-element assembly at all. Otherwise the tail past the
//! required arguments is assembled here, once, and spliced after the element
//! on every call.

use std::collections::BTreeMap;

use triage_core::prelude::{Result, StageCallback, StageFn, Value};

/// Extra arguments resolved once per invocation from the unified call site.
#[derive(Debug, Clone, Default)]
pub struct ResolvedExtras {
    /// Values filling the anonymous positional placeholders, shared by all
    /// stages positionally.
    pub placeholders: Vec<Value>,
    /// Keyword overrides by name; stages fall back to their declared
    /// defaults for anything absent here.
    pub keywords: BTreeMap<String, Value>,
    /// Overflow positionals, forwarded to stages declaring a
    /// variadic-positional capture.
    pub varargs: Vec<Value>,
    /// Unknown keywords, forwarded to stages declaring a variadic-keyword
    /// capture.
    pub varkw: BTreeMap<String, Value>,
}

/// A stage callback specialized for one invocation's extras.
#[derive(Clone)]
pub enum BoundStage {
    /// The raw callback, unwrapped. Taken whenever the signature is bare.
    Raw(StageFn),
    /// Callback plus the pre-assembled argument tail.
    Partial { fun: StageFn, tail: Vec<Value> },
}

impl BoundStage {
    pub fn call1(&self, v: &Value) -> Result<Value> {
        match self {
            BoundStage::Raw(fun) => fun(std::slice::from_ref(v)),
            BoundStage::Partial { fun, tail } => {
                let mut argv = Vec::with_capacity(1 + tail.len());
                argv.push(v.clone());
                argv.extend_from_slice(tail);
                fun(&argv)
            }
        }
    }

    pub fn call2(&self, a: &Value, b: &Value) -> Result<Value> {
        match self {
            BoundStage::Raw(fun) => fun(&[a.clone(), b.clone()]),
            BoundStage::Partial { fun, tail } => {
                let mut argv = Vec::with_capacity(2 + tail.len());
                argv.push(a.clone());
                argv.push(b.clone());
                argv.extend_from_slice(tail);
                fun(&argv)
            }
        }
    }
}

/// Partially apply `extras` to `callback`, leaving only the required
/// arguments for the per-element call.
pub fn bind_stage(
    callback: &StageCallback,
    required_arity: usize,
    extras: &ResolvedExtras,
) -> BoundStage {
    let sig = &callback.signature;
    if sig.is_bare(required_arity) {
        return BoundStage::Raw(callback.fun.clone());
    }

    let extra_n = sig.positional().len().saturating_sub(required_arity);
    let mut tail: Vec<Value> = Vec::with_capacity(
        extra_n
            + sig.defaulted().len()
            + sig.var_positional().is_some() as usize
            + sig.var_keyword().is_some() as usize,
    );
    tail.extend(extras.placeholders.iter().take(extra_n).cloned());
    for (name, default) in sig.defaulted() {
        let value = extras
            .keywords
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.clone());
        tail.push(value);
    }
    if sig.var_positional().is_some() {
        tail.push(Value::List(extras.varargs.clone()));
    }
    if sig.var_keyword().is_some() {
        tail.push(Value::Record(extras.varkw.clone()));
    }

    BoundStage::Partial {
        fun: callback.fun.clone(),
        tail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::prelude::{CallableSignature, StageCallback};

    #[test]
    fn test_bare_callback_binds_raw() {
        let cb = StageCallback::new("ident", CallableSignature::plain(["chosen"]), |args| {
            Ok(args[0].clone())
        });
        let bound = bind_stage(&cb, 1, &ResolvedExtras::default());
        assert!(matches!(bound, BoundStage::Raw(_)));
        assert_eq!(bound.call1(&Value::Int(7)).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_partial_tail_resolves_keywords_and_placeholders() {
        let sig = CallableSignature::builder()
            .positional("chosen")
            .positional("pos0")
            .defaulted("offset", 10)
            .build();
        let cb = StageCallback::new("sum", sig, |args| {
            let mut total = 0i64;
            for v in args {
                if let Value::Int(i) = v {
                    total += i;
                }
            }
            Ok(Value::Int(total))
        });

        let mut extras = ResolvedExtras::default();
        extras.placeholders.push(Value::Int(100));
        let bound = bind_stage(&cb, 1, &extras);
        // chosen + pos0 + default offset
        assert_eq!(bound.call1(&Value::Int(1)).unwrap(), Value::Int(111));

        extras.keywords.insert("offset".into(), Value::Int(0));
        let bound = bind_stage(&cb, 1, &extras);
        assert_eq!(bound.call1(&Value::Int(1)).unwrap(), Value::Int(101));
    }

    #[test]
    fn test_variadic_captures_forwarded() {
        let sig = CallableSignature::builder()
            .positional("chosen")
            .var_positional("args")
            .var_keyword("kwargs")
            .build();
        let cb = StageCallback::new("capture", sig, |args| {
            // args = [chosen, List(varargs), Record(varkw)]
            assert_eq!(args.len(), 3);
            Ok(args[1].clone())
        });

        let mut extras = ResolvedExtras::default();
        extras.varargs.push(Value::Int(5));
        let bound = bind_stage(&cb, 1, &extras);
        assert_eq!(
            bound.call1(&Value::Int(0)).unwrap(),
            Value::List(vec![Value::Int(5)])
        );
    }
}
