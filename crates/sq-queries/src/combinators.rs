//! Boolean and structural combinators
//!
//! Combinators hold their sub-queries in caller order. Single sub-query
//! wrappers (`not`, the fragment queries) embed the sub-query verbatim.

use serde_json::{json, Value};
use sq_core::{Args, Query};

/// Top-level structured query: `{ "query": { "queries": [...] } }`
pub fn where_(queries: Args) -> Query {
    Query::new("query", json!({ "queries": queries.normalize() }))
}

/// `and-query` over the given sub-queries
pub fn and(queries: Args) -> Query {
    Query::new("and-query", json!({ "queries": queries.normalize() }))
}

/// `or-query` over the given sub-queries
pub fn or(queries: Args) -> Query {
    Query::new("or-query", json!({ "queries": queries.normalize() }))
}

/// `not-query` negating a single sub-query
pub fn not(query: impl Into<Value>) -> Query {
    Query::new("not-query", query.into())
}

/// `boost-query`: matches on `matching`, scores higher when `boosting` also matches
pub fn boost(matching: impl Into<Value>, boosting: impl Into<Value>) -> Query {
    Query::new(
        "boost-query",
        json!({
            "matching-query": matching.into(),
            "boosting-query": boosting.into(),
        }),
    )
}

pub fn document_fragment(query: impl Into<Value>) -> Query {
    Query::new("document-fragment-query", query.into())
}

pub fn properties_fragment(query: impl Into<Value>) -> Query {
    Query::new("properties-fragment-query", query.into())
}

pub fn locks_fragment(query: impl Into<Value>) -> Query {
    Query::new("locks-fragment-query", query.into())
}

/// `term-query` matching any of the given terms
pub fn term(terms: Args) -> Query {
    Query::new("term-query", json!({ "text": terms.normalize() }))
}
