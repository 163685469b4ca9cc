//! # sq-queries
//!
//! Structured query builders for Structured Query RS.
//!
//! Every builder is a pure function producing a [`Query`]: a JSON mapping with a
//! single key naming the query kind, ready to be sent to the search service.
//!
//! ## Structure
//!
//! - `combinators` - where/and/or/not/boost, fragment queries, term queries
//! - `scope` - collection, directory, and document queries
//! - `range` - range queries and their qname/element/option helpers
//! - `datatypes` - range index datatypes
//! - `operators` - range comparison operators
//! - `constraints` - named constraint queries and operator state
//! - `geospatial` - geospatial shape classification and constraints
//! - `envelope` - combined query envelope
//!
//! ## Example
//!
//! ```
//! use sq_core::args;
//! use sq_queries::{and, combined, directory, range, term, value_constraint, where_};
//!
//! let query = where_(args![and(args![
//!     term(args!["rust"]),
//!     directory(args![vec!["/articles/", "/posts/"], false]),
//!     range(args!["year", ">=", 2020]),
//!     value_constraint("status", args!["published"]),
//! ])]);
//!
//! assert_eq!(query.kind(), Some("query"));
//! assert_eq!(query["query"]["queries"][0]["and-query"]["queries"].as_array().unwrap().len(), 4);
//!
//! let search = combined(query, "cats", None);
//! assert_eq!(search["search"]["qtext"], "cats");
//! ```

pub mod combinators;
pub mod constraints;
pub mod datatypes;
pub mod envelope;
pub mod geospatial;
pub mod operators;
pub mod range;
pub mod scope;

// Re-exports for convenience
pub use combinators::{
    and, boost, document_fragment, locks_fragment, not, or, properties_fragment, term, where_,
};
pub use constraints::{
    collection_constraint, constraint, custom_constraint, operator_state, range_constraint,
    range_constraint_with, value_constraint, word_constraint, ConstraintBuilder, ConstraintType,
};
pub use datatypes::{datatype, Datatype, XsType};
pub use envelope::{combined, combined_with_options};
pub use geospatial::{
    geospatial_constraint, geospatial_shapes_constraint, geospatial_values, GeoShape, GeoShapeSet,
};
pub use operators::RangeOperator;
pub use range::{element, qname, range, range_options, IndexedName, RangeQuery};
pub use scope::{collection, directory, document};

pub use sq_core::{args, Args, Query, QueryError, QueryResult, SearchOptions};
