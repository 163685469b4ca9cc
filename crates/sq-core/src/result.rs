//! Result type aliases

use crate::error::QueryError;

/// Standard Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;
