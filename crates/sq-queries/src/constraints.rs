//! Constraint queries
//!
//! Constraints are named matching rules pre-configured in the search options
//! on the service side; these queries reference them by `constraint-name`.

use serde_json::{json, Map, Value};
use sq_core::{is_mapping, normalize, normalize_value, Args, Query, QueryError, QueryResult};
use tracing::{debug, warn};

use crate::operators::RangeOperator;

/// Signature shared by every constraint query builder
pub type ConstraintBuilder = fn(&str, Args) -> QueryResult<Query>;

/// `range-constraint-query`
///
/// Positional arguments are `[operator?, values, options?]`. When neither
/// `values` nor `options` is supplied, the first argument is the values and
/// the operator defaults to `EQ`. A null, empty or `false` operator also
/// means `EQ`; any other operator must be one of `LT`, `LE`, `GT`, `GE`,
/// `EQ`, `NE`.
pub fn range_constraint(name: &str, args: Args) -> QueryResult<Query> {
    let mut positional = args.into_raw().into_iter();
    let mut operator = positional.next();
    let mut values = positional.next().filter(|v| !v.is_null());
    let options = positional.next().filter(|v| !v.is_null());

    if values.is_none() && options.is_none() {
        values = operator.take();
    }

    let operator = match operator {
        None | Some(Value::Null) | Some(Value::Bool(false)) => RangeOperator::default(),
        Some(Value::String(op)) if op.is_empty() => RangeOperator::default(),
        Some(Value::String(op)) => RangeOperator::from_name(&op).ok_or_else(|| {
            debug!(constraint = name, operator = %op, "Rejecting range constraint operator");
            QueryError::invalid_operator(op)
        })?,
        Some(other) => {
            debug!(constraint = name, operator = %other, "Rejecting range constraint operator");
            return Err(QueryError::invalid_operator(other.to_string()));
        }
    };

    Ok(range_constraint_with(
        name,
        operator,
        values.unwrap_or(Value::Null),
        options.unwrap_or(Value::Null),
    ))
}

/// `range-constraint-query` with an explicit operator
pub fn range_constraint_with(
    name: &str,
    operator: RangeOperator,
    values: impl Into<Value>,
    options: impl Into<Value>,
) -> Query {
    Query::new(
        "range-constraint-query",
        json!({
            "constraint-name": name,
            "range-operator": operator.name(),
            "value": normalize_value(values.into()),
            "range-option": normalize_value(options.into()),
        }),
    )
}

/// `value-constraint-query`
///
/// The value field is keyed by the type of the first value: `text` for
/// strings, `number` for numbers, `boolean` for booleans, `object` for
/// anything else. A single null produces an empty `null` field.
pub fn value_constraint(name: &str, values: Args) -> Query {
    let raw = values.into_raw();

    let (key, values) = if matches!(raw.as_slice(), [Value::Null]) {
        ("null", Vec::new())
    } else {
        let values = normalize(raw);
        let key = match values.first() {
            None | Some(Value::String(_)) => "text",
            Some(Value::Number(_)) => "number",
            Some(Value::Bool(_)) => "boolean",
            Some(_) => "object",
        };
        (key, values)
    };

    let mut body = Map::new();
    body.insert("constraint-name".into(), Value::String(name.to_string()));
    body.insert(key.into(), Value::Array(values));
    Query::new("value-constraint-query", Value::Object(body))
}

/// `word-constraint-query`
pub fn word_constraint(name: &str, values: Args) -> Query {
    Query::new(
        "word-constraint-query",
        json!({
            "constraint-name": name,
            "text": values.normalize(),
        }),
    )
}

/// `collection-constraint-query`
pub fn collection_constraint(name: &str, values: Args) -> Query {
    Query::new(
        "collection-constraint-query",
        json!({
            "constraint-name": name,
            "uri": values.normalize(),
        }),
    )
}

/// `custom-constraint-query`
///
/// When every value is a mapping, the mappings are merged into the query
/// (later keys win). Otherwise the scalar values are collected as `text`
/// and any mapping or array values are discarded.
pub fn custom_constraint(name: &str, values: Args) -> Query {
    let values = values.into_rest();

    let mut body = Map::new();
    body.insert("constraint-name".into(), Value::String(name.to_string()));

    if !values.is_empty() && values.iter().all(is_mapping) {
        for value in values {
            if let Value::Object(fields) = value {
                body.extend(fields);
            }
        }
    } else {
        let total = values.len();
        let text: Vec<Value> = values
            .into_iter()
            .filter(|v| !matches!(v, Value::Object(_) | Value::Array(_)))
            .collect();
        if text.len() < total {
            warn!(
                constraint = name,
                discarded = total - text.len(),
                "Discarding mapping and array values mixed with text in custom constraint"
            );
        }
        body.insert("text".into(), Value::Array(text));
    }

    Query::new("custom-constraint-query", Value::Object(body))
}

/// Constraint kinds selectable by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    #[default]
    Range,
    Value,
    Word,
    Custom,
    Collection,
}

impl ConstraintType {
    /// `value`, `word`, `custom`, `collection`; anything else is `Range`
    pub fn from_name(kind: Option<&str>) -> Self {
        match kind {
            Some("value") => Self::Value,
            Some("word") => Self::Word,
            Some("custom") => Self::Custom,
            Some("collection") => Self::Collection,
            _ => Self::Range,
        }
    }

    pub fn builder(self) -> ConstraintBuilder {
        match self {
            Self::Range => range_constraint,
            Self::Value => |name: &str, values: Args| Ok(value_constraint(name, values)),
            Self::Word => |name: &str, values: Args| Ok(word_constraint(name, values)),
            Self::Custom => |name: &str, values: Args| Ok(custom_constraint(name, values)),
            Self::Collection => {
                |name: &str, values: Args| Ok(collection_constraint(name, values))
            }
        }
    }

    pub fn build(self, name: &str, values: Args) -> QueryResult<Query> {
        (self.builder())(name, values)
    }
}

/// Pick a constraint query builder by kind (defaults to range)
pub fn constraint(kind: Option<&str>) -> ConstraintBuilder {
    ConstraintType::from_name(kind).builder()
}

/// `operator-state` query component
pub fn operator_state(name: &str, state_name: &str) -> Query {
    Query::new(
        "operator-state",
        json!({
            "operator-name": name,
            "state-name": state_name,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geospatial::geospatial_values;
    use sq_core::args;

    #[test]
    fn test_range_constraint_one_value() {
        let query = range_constraint("n", args!["v"]).unwrap();
        assert_eq!(
            query.into_value(),
            json!({
                "range-constraint-query": {
                    "constraint-name": "n",
                    "range-operator": "EQ",
                    "value": ["v"],
                    "range-option": []
                }
            })
        );
    }

    #[test]
    fn test_range_constraint_multiple_values() {
        let query = range_constraint("test", args![vec!["value1", "value2"]]).unwrap();
        assert_eq!(query.field("value"), Some(&json!(["value1", "value2"])));
        assert_eq!(query.field("range-operator"), Some(&json!("EQ")));
    }

    #[test]
    fn test_range_constraint_with_operator() {
        let query = range_constraint("test", args!["NE", "value"]).unwrap();
        assert_eq!(query.field("range-operator"), Some(&json!("NE")));
        assert_eq!(query.field("value"), Some(&json!(["value"])));
    }

    #[test]
    fn test_range_constraint_with_options() {
        let query = range_constraint("test", args!["GT", 5, vec!["limit=3"]]).unwrap();
        assert_eq!(query.field("range-operator"), Some(&json!("GT")));
        assert_eq!(query.field("value"), Some(&json!([5])));
        assert_eq!(query.field("range-option"), Some(&json!(["limit=3"])));
    }

    #[test]
    fn test_range_constraint_blank_operator_defaults_to_eq() {
        let query = range_constraint("n", args!["", "v"]).unwrap();
        assert_eq!(query.field("range-operator"), Some(&json!("EQ")));
        assert_eq!(query.field("value"), Some(&json!(["v"])));

        let query = range_constraint("n", args![false, "v"]).unwrap();
        assert_eq!(query.field("range-operator"), Some(&json!("EQ")));
        assert_eq!(query.field("value"), Some(&json!(["v"])));
    }

    #[test]
    fn test_range_constraint_invalid_operator() {
        let err = range_constraint("test", args!["ZZ", "value"]).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperator { ref operator } if operator == "ZZ"));
        assert!(err.to_string().contains("ZZ"));
    }

    #[test]
    fn test_range_constraint_rejects_symbols() {
        assert!(range_constraint("test", args![">=", 1]).is_err());
        assert!(range_constraint("test", args![7, 1]).is_err());
    }

    #[test]
    fn test_range_constraint_with_typed_operator() {
        let query = range_constraint_with("n", RangeOperator::LessThan, vec![1, 2], Value::Null);
        assert_eq!(query.field("range-operator"), Some(&json!("LT")));
        assert_eq!(query.field("value"), Some(&json!([1, 2])));
        assert_eq!(query.field("range-option"), Some(&json!([])));
    }

    #[test]
    fn test_value_constraint_types() {
        let query = value_constraint("test", args!["value"]);
        assert_eq!(query.field("text"), Some(&json!(["value"])));

        let query = value_constraint("test", args![1]);
        assert_eq!(query.field("number"), Some(&json!([1])));

        let query = value_constraint("test", args![Value::Null]);
        assert_eq!(
            query.into_value(),
            json!({ "value-constraint-query": { "constraint-name": "test", "null": [] } })
        );

        let query = value_constraint("test", args![true]);
        assert_eq!(query.field("boolean"), Some(&json!([true])));
    }

    #[test]
    fn test_value_constraint_multiple() {
        let query = value_constraint("test", args![vec!["value1", "value2"]]);
        assert_eq!(query.field("text"), Some(&json!(["value1", "value2"])));

        let query = value_constraint("test", args![vec![1, 2]]);
        assert_eq!(query.field("number"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_value_constraint_empty() {
        let query = value_constraint("test", args![]);
        assert_eq!(query.field("text"), Some(&json!([])));
    }

    #[test]
    fn test_word_constraint() {
        let query = word_constraint("test", args!["value"]);
        assert_eq!(
            query.into_value(),
            json!({ "word-constraint-query": { "constraint-name": "test", "text": ["value"] } })
        );

        let query = word_constraint("test", args![vec!["value1", "value2"]]);
        assert_eq!(query.field("text"), Some(&json!(["value1", "value2"])));
    }

    #[test]
    fn test_collection_constraint() {
        let query = collection_constraint("name", args!["uri"]);
        assert_eq!(
            query.into_value(),
            json!({ "collection-constraint-query": { "constraint-name": "name", "uri": ["uri"] } })
        );

        let query = collection_constraint("name", args![vec!["uri1", "uri2"]]);
        assert_eq!(query.field("uri"), Some(&json!(["uri1", "uri2"])));
    }

    #[test]
    fn test_custom_constraint_text() {
        let query = custom_constraint("test", args!["value"]);
        assert_eq!(query.field("text"), Some(&json!(["value"])));

        let query = custom_constraint("test", args![vec!["value1", "value2"]]);
        assert_eq!(query.field("text"), Some(&json!(["value1", "value2"])));
    }

    #[test]
    fn test_custom_constraint_merges_mappings() {
        let query = custom_constraint(
            "name",
            args![geospatial_values(args![
                json!({ "latitude": 1, "longitude": 2 }),
                json!({ "south": 1, "west": 2, "north": 3, "east": 4 })
            ])],
        );

        assert!(query.field("text").is_none());
        assert_eq!(query.field("constraint-name"), Some(&json!("name")));
        assert_eq!(query.field("point").unwrap().as_array().unwrap().len(), 1);
        assert_eq!(query.field("box").unwrap().as_array().unwrap().len(), 1);
        assert_eq!(query.field("circle"), Some(&json!([])));
        assert_eq!(query.field("polygon"), Some(&json!([])));
    }

    #[test]
    fn test_custom_constraint_later_mappings_win() {
        let query = custom_constraint("name", args![json!({ "a": 1, "b": 1 }), json!({ "b": 2 })]);
        assert_eq!(query.field("a"), Some(&json!(1)));
        assert_eq!(query.field("b"), Some(&json!(2)));
    }

    #[test]
    fn test_custom_constraint_mixed_input_drops_mappings() {
        let query = custom_constraint("name", args![json!({ "prop": "value" }), "blah"]);
        assert_eq!(query.field("text"), Some(&json!(["blah"])));
        assert!(query.field("prop").is_none());
    }

    #[test]
    fn test_custom_constraint_drops_nested_arrays() {
        let query = custom_constraint("n", args!["a", vec!["b"]]);
        assert_eq!(
            query.into_value(),
            json!({ "custom-constraint-query": { "constraint-name": "n", "text": ["a"] } })
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_custom_constraint_mixed_input_is_logged() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            custom_constraint("name", args![json!({ "prop": "value" }), "blah"]);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Discarding mapping and array values"));
        assert!(output.contains("discarded=1"));
    }

    #[test]
    fn test_custom_constraint_empty() {
        let query = custom_constraint("name", args![]);
        assert_eq!(query.field("text"), Some(&json!([])));
    }

    #[test]
    fn test_constraint_dispatch() {
        assert_eq!(
            constraint(None)("name", args!["value"]).unwrap(),
            range_constraint("name", args!["value"]).unwrap()
        );
        assert_eq!(
            constraint(Some("range"))("name", args!["value"]).unwrap(),
            range_constraint("name", args!["value"]).unwrap()
        );
        assert_eq!(
            constraint(Some("bogus"))("name", args!["value"]).unwrap(),
            range_constraint("name", args!["value"]).unwrap()
        );
        assert_eq!(
            constraint(Some("collection"))("name", args!["value"]).unwrap(),
            collection_constraint("name", args!["value"])
        );
        assert_eq!(
            constraint(Some("custom"))("name", args!["value"]).unwrap(),
            custom_constraint("name", args!["value"])
        );
        assert_eq!(
            constraint(Some("value"))("name", args!["value"]).unwrap(),
            value_constraint("name", args!["value"])
        );
        assert_eq!(
            constraint(Some("word"))("name", args!["value"]).unwrap(),
            word_constraint("name", args!["value"])
        );
    }

    #[test]
    fn test_constraint_type_build() {
        assert_eq!(ConstraintType::from_name(Some("word")), ConstraintType::Word);
        assert_eq!(ConstraintType::default(), ConstraintType::Range);

        let query = ConstraintType::Collection.build("c", args!["uri"]).unwrap();
        assert_eq!(query.kind(), Some("collection-constraint-query"));

        assert!(ConstraintType::Range.build("r", args!["ZZ", "v"]).is_err());
    }

    #[test]
    fn test_operator_state() {
        let query = operator_state("sort", "date");
        assert_eq!(
            query.into_value(),
            json!({ "operator-state": { "operator-name": "sort", "state-name": "date" } })
        );
    }
}
