//! Common types used throughout Structured Query RS

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A structured query: a JSON mapping with exactly one key naming the query kind
///
/// ```
/// use sq_core::Query;
/// use serde_json::json;
///
/// let query = Query::new("term-query", json!({ "text": ["foo"] }));
/// assert_eq!(query.kind(), Some("term-query"));
/// assert_eq!(query["term-query"]["text"][0], "foo");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(Value);

impl Query {
    /// Create a query of the given kind
    pub fn new(kind: impl Into<String>, body: Value) -> Self {
        let mut root = Map::new();
        root.insert(kind.into(), body);
        Self(Value::Object(root))
    }

    /// The query kind (its single top-level key)
    pub fn kind(&self) -> Option<&str> {
        self.0
            .as_object()
            .and_then(|root| root.keys().next())
            .map(String::as_str)
    }

    /// The body stored under the query kind
    pub fn body(&self) -> Option<&Value> {
        self.0.as_object().and_then(|root| root.values().next())
    }

    /// A field of the body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body().and_then(|body| body.get(name))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Query> for Value {
    fn from(query: Query) -> Self {
        query.0
    }
}

impl std::ops::Index<&str> for Query {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.0[key]
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check whether a value is a JSON mapping
pub fn is_mapping(value: &Value) -> bool {
    value.is_object()
}

/// Truthiness of a JSON value: null, false, zero and the empty string are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A field of a mapping, if present and truthy
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|field| is_truthy(field))
}

/// Check whether a mapping carries a non-null field
pub fn has_field(value: &Value, key: &str) -> bool {
    value.get(key).map(|field| !field.is_null()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_kind_and_body() {
        let query = Query::new("and-query", json!({ "queries": [] }));
        assert_eq!(query.kind(), Some("and-query"));
        assert_eq!(query.body(), Some(&json!({ "queries": [] })));
        assert_eq!(query.field("queries"), Some(&json!([])));
        assert!(query.field("missing").is_none());
    }

    #[test]
    fn test_query_serializes_transparently() {
        let query = Query::new("not-query", json!({ "term-query": { "text": ["a"] } }));
        let text = serde_json::to_string(&query).unwrap();
        assert_eq!(text, query.to_string());

        let parsed: Query = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, query);
    }

    #[test]
    fn test_query_into_value() {
        let query = Query::new("term-query", json!({ "text": ["a"] }));
        let value: Value = query.into();
        assert_eq!(value, json!({ "term-query": { "text": ["a"] } }));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!(1.5)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_field_helpers() {
        let value = json!({ "ns": null, "name": "foo", "empty": "" });
        assert!(truthy_field(&value, "ns").is_none());
        assert!(truthy_field(&value, "empty").is_none());
        assert_eq!(truthy_field(&value, "name"), Some(&json!("foo")));

        assert!(!has_field(&value, "ns"));
        assert!(has_field(&value, "empty"));
        assert!(!has_field(&json!("scalar"), "name"));
        assert!(is_mapping(&value));
        assert!(!is_mapping(&json!([1])));
    }
}
