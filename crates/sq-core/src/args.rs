//! Argument normalization
//!
//! Every builder that accepts "one or more" values supports two calling forms:
//! a variadic list (`args!["a", "b"]`) and a single array (`args![vec!["a", "b"]]`).
//! Both normalize to the same ordered sequence.

use serde_json::Value;

/// An ordered list of raw builder arguments, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// No arguments at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a raw argument
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    /// Raw arguments as given
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_raw(self) -> Vec<Value> {
        self.0
    }

    /// Normalize using the variadic convention (see [`normalize`])
    pub fn normalize(self) -> Vec<Value> {
        normalize(self.0)
    }

    /// Unwrap a lone array argument, keeping everything else as given
    pub fn into_rest(self) -> Vec<Value> {
        unwrap_single_array(self.0)
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build an [`Args`] list from any values convertible into JSON
///
/// ```
/// use sq_core::{args, normalize};
///
/// assert_eq!(args!["a", "b"].normalize(), args![vec!["a", "b"]].normalize());
/// assert!(args![].normalize().is_empty());
/// assert!(normalize(vec![sq_core::Value::Null]).is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::args::Args::none()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::args::Args::new(vec![$($crate::Value::from($value)),+])
    };
}

/// Canonicalize raw arguments into a flat ordered sequence
///
/// - no arguments: empty
/// - a single null: empty
/// - a single array: its elements
/// - anything else: the arguments as given
pub fn normalize(mut args: Vec<Value>) -> Vec<Value> {
    if args.len() != 1 {
        return args;
    }
    match args.remove(0) {
        Value::Null => Vec::new(),
        Value::Array(values) => values,
        value => vec![value],
    }
}

/// Normalize a single value
pub fn normalize_value(value: Value) -> Vec<Value> {
    normalize(vec![value])
}

/// Unwrap a lone array argument; unlike [`normalize`], a lone null is kept
pub fn unwrap_single_array(mut args: Vec<Value>) -> Vec<Value> {
    if let [Value::Array(_)] = args.as_slice() {
        if let Some(Value::Array(values)) = args.pop() {
            return values;
        }
    }
    args
}
