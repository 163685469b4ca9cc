//! Combined query envelope
//!
//! Pairs a structured query with query text and search options for a single
//! search request.

use serde_json::{Map, Value};
use sq_core::{is_truthy, truthy_field, Query, QueryResult, SearchOptions};

/// `{ "search": { "query", "qtext", "options"? } }`
///
/// A non-string second argument with no options is taken as the options
/// (`qtext` becomes `""`). A query or options value that is itself an
/// envelope (carries `query` / `options`) is unwrapped.
pub fn combined(query: impl Into<Value>, qtext: impl Into<Value>, options: Option<Value>) -> Query {
    let mut qtext = qtext.into();
    let mut options = options.filter(|o| !o.is_null());

    if options.is_none() && is_truthy(&qtext) && !qtext.is_string() {
        options = Some(std::mem::take(&mut qtext));
    }

    let query = query.into();
    let query = truthy_field(&query, "query").cloned().unwrap_or(query);
    let options = options.map(|o| truthy_field(&o, "options").cloned().unwrap_or(o));

    let mut search = Map::new();
    search.insert("query".into(), query);
    search.insert(
        "qtext".into(),
        if is_truthy(&qtext) {
            qtext
        } else {
            Value::String(String::new())
        },
    );
    if let Some(options) = options {
        search.insert("options".into(), options);
    }

    Query::new("search", Value::Object(search))
}

/// Combined query with typed search options
pub fn combined_with_options(
    query: impl Into<Value>,
    qtext: &str,
    options: &SearchOptions,
) -> QueryResult<Query> {
    Ok(combined(query, qtext, Some(options.to_value()?)))
}
