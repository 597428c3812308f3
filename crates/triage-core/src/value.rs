//! Dynamic values flowing through compiled pipelines.
//!
//! Stage callbacks are untyped at the pipeline boundary, so elements, extra
//! arguments, and keyword defaults all share this one representation.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
}

impl Value {
    /// Build a record value from (name, value) pairs.
    pub fn record<I, K, V>(pairs: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Truthiness rule used by predicate stages: `Null`, `false`, `0`, `0.0`,
    /// the empty string, and empty lists/records are falsey; everything else
    /// is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Record(fields) => !fields.is_empty(),
        }
    }

    /// Look up a record field by name; `Null` for non-records/missing fields.
    pub fn field(&self, name: &str) -> Value {
        match self {
            Value::Record(fields) => fields.get(name).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Interpret a comparator result as an ordering: negative means less,
    /// zero equal, positive greater. Only numeric results qualify.
    pub fn to_ordering(&self) -> Option<Ordering> {
        match self {
            Value::Int(i) => Some(i.cmp(&0)),
            Value::Float(f) if f.is_nan() => None,
            Value::Float(f) => f.partial_cmp(&0.0),
            _ => None,
        }
    }

    /// Total natural ordering over values.
    ///
    /// Nulls sort first, NaN sorts after all other floats, and values of
    /// different variants are ranked by variant order so the relation is
    /// total. Int/Float cross-compare numerically.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        use Value::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Bool(x), Bool(y)) => x.cmp(y),
            (Int(x), Int(y)) => x.cmp(y),
            (Float(x), Float(y)) => float_cmp(*x, *y),
            (Int(x), Float(y)) => float_cmp(*x as f64, *y),
            (Float(x), Int(y)) => float_cmp(*x, *y as f64),
            (Str(x), Str(y)) => x.cmp(y),
            (List(x), List(y)) => {
                for (a, b) in x.iter().zip(y.iter()) {
                    match a.natural_cmp(b) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                x.len().cmp(&y.len())
            }
            (Record(x), Record(y)) => {
                for ((ka, va), (kb, vb)) in x.iter().zip(y.iter()) {
                    match ka.cmp(kb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                    match va.natural_cmp(vb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                }
                x.len().cmp(&y.len())
            }
            // Mixed variants: rank by variant order
            _ => variant_order(self).cmp(&variant_order(other)),
        }
    }
}

fn float_cmp(x: f64, y: f64) -> Ordering {
    if x.is_nan() && y.is_nan() {
        Ordering::Equal
    } else if x.is_nan() {
        Ordering::Greater
    } else if y.is_nan() {
        Ordering::Less
    } else {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    }
}

/// Assign a numeric rank to variants for mixed-variant comparisons.
fn variant_order(v: &Value) -> u8 {
    use Value::*;
    match v {
        Null => 0,
        Bool(_) => 1,
        Int(_) => 2,
        Float(_) => 3,
        Str(_) => 4,
        List(_) => 5,
        Record(_) => 6,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::Int(0).truthy());
        assert!(!Value::Str(String::new()).truthy());
        assert!(!Value::List(vec![]).truthy());
        assert!(Value::Int(-3).truthy());
        assert!(Value::Str("x".into()).truthy());
    }

    #[test]
    fn test_natural_cmp_nulls_first_nan_last() {
        assert_eq!(Value::Null.natural_cmp(&Value::Int(0)), Ordering::Less);
        assert_eq!(
            Value::Float(f64::NAN).natural_cmp(&Value::Float(1.0)),
            Ordering::Greater
        );
        assert_eq!(Value::Int(2).natural_cmp(&Value::Float(2.5)), Ordering::Less);
    }

    #[test]
    fn test_to_ordering() {
        assert_eq!(Value::Int(-1).to_ordering(), Some(Ordering::Less));
        assert_eq!(Value::Int(0).to_ordering(), Some(Ordering::Equal));
        assert_eq!(Value::Float(3.5).to_ordering(), Some(Ordering::Greater));
        assert_eq!(Value::Str("x".into()).to_ordering(), None);
    }
}
