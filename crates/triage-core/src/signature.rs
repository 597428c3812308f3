//! Calling-convention metadata for stage callbacks.
//!
//! Closures carry no reflectable signature, so stage authors declare one
//! alongside the callback: parameter names, defaulted tail, variadic
//! captures, receiver binding, and an explicit return marker. `introspect`
//! normalizes a declared signature into the form the planner consumes.

use serde::{Deserialize, Serialize};

use crate::stage::StageCallback;
use crate::value::Value;

/// Whether a callback produces a value or runs purely for side effect.
///
/// `Unknown` is the degraded case (foreign/opaque callbacks); introspection
/// resolves it to `Value` with a non-fatal warning, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnMarker {
    Value,
    Void,
    Unknown,
}

impl ReturnMarker {
    /// Conservative interpretation: only an explicit `Void` marker opts a
    /// callback out of producing a value.
    pub fn produces_value(self) -> bool {
        !matches!(self, ReturnMarker::Void)
    }
}

/// Declared shape of a stage callback.
///
/// Invariant (held by construction through the builder): `positional` and
/// `defaulted` partition the declared parameter list in declaration order,
/// with every defaulted parameter after every plain positional one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableSignature {
    receiver_bound: bool,
    positional: Vec<String>,
    defaulted: Vec<(String, Value)>,
    var_positional: Option<String>,
    var_keyword: Option<String>,
    returns: ReturnMarker,
}

impl CallableSignature {
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Shorthand for the common case: the given positional parameters, no
    /// defaults, no variadics, receiver-bound, value-returning.
    pub fn plain<'a, I: IntoIterator<Item = &'a str>>(params: I) -> Self {
        let mut b = Self::builder()
            .receiver_bound(true)
            .returns(ReturnMarker::Value);
        for p in params {
            b = b.positional(p);
        }
        b.build()
    }

    pub fn receiver_bound(&self) -> bool {
        self.receiver_bound
    }

    /// Non-defaulted positional parameter names, declaration order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Defaulted (name, default) pairs, declaration order.
    pub fn defaulted(&self) -> &[(String, Value)] {
        &self.defaulted
    }

    /// Total declared non-receiver parameter count.
    pub fn declared_count(&self) -> usize {
        self.positional.len() + self.defaulted.len()
    }

    pub fn var_positional(&self) -> Option<&str> {
        self.var_positional.as_deref()
    }

    pub fn var_keyword(&self) -> Option<&str> {
        self.var_keyword.as_deref()
    }

    pub fn returns(&self) -> ReturnMarker {
        self.returns
    }

    /// True when binding can hand the callback through unwrapped: exactly the
    /// required parameters, nothing defaulted, no variadic captures.
    pub fn is_bare(&self, required_arity: usize) -> bool {
        self.positional.len() == required_arity
            && self.defaulted.is_empty()
            && self.var_positional.is_none()
            && self.var_keyword.is_none()
    }
}

#[derive(Debug, Default, Clone)]
pub struct SignatureBuilder {
    receiver_bound: bool,
    positional: Vec<String>,
    defaulted: Vec<(String, Value)>,
    var_positional: Option<String>,
    var_keyword: Option<String>,
    returns: Option<ReturnMarker>,
}

impl SignatureBuilder {
    pub fn receiver_bound(mut self, yes: bool) -> Self {
        self.receiver_bound = yes;
        self
    }

    pub fn positional(mut self, name: &str) -> Self {
        self.positional.push(name.to_string());
        self
    }

    pub fn defaulted(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.defaulted.push((name.to_string(), default.into()));
        self
    }

    pub fn var_positional(mut self, name: &str) -> Self {
        self.var_positional = Some(name.to_string());
        self
    }

    pub fn var_keyword(mut self, name: &str) -> Self {
        self.var_keyword = Some(name.to_string());
        self
    }

    pub fn returns(mut self, marker: ReturnMarker) -> Self {
        self.returns = Some(marker);
        self
    }

    pub fn returns_void(self) -> Self {
        self.returns(ReturnMarker::Void)
    }

    /// Plain positionals always precede defaulted parameters in the built
    /// signature, whatever order the builder calls came in.
    pub fn build(self) -> CallableSignature {
        CallableSignature {
            receiver_bound: self.receiver_bound,
            positional: self.positional,
            defaulted: self.defaulted,
            var_positional: self.var_positional,
            var_keyword: self.var_keyword,
            returns: self.returns.unwrap_or(ReturnMarker::Unknown),
        }
    }
}

/// Extract normalized calling-convention metadata from a callback.
///
/// Accepts any callback and never fails: an `Unknown` return marker degrades
/// to "assume a value is returned" with a warning. The assumption only
/// affects which execution strategy is chosen downstream, never filtering or
/// ordering correctness.
pub fn introspect(callback: &StageCallback) -> CallableSignature {
    let mut sig = callback.signature.clone();
    if sig.returns == ReturnMarker::Unknown {
        tracing::warn!(
            callback = %callback.name,
            "unable to determine if callback returns a value; assuming it does"
        );
        sig.returns = ReturnMarker::Value;
    }
    sig
}
