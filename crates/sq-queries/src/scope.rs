//! Scope queries
//!
//! Restrict matches to collections, directories, or individual documents.

use serde_json::{json, Value};
use sq_core::{unwrap_single_array, Args, Query};

/// `collection-query` matching documents in any of the given collections
pub fn collection(uris: Args) -> Query {
    Query::new("collection-query", json!({ "uri": uris.normalize() }))
}

/// `document-query` matching the given document URIs
pub fn document(uris: Args) -> Query {
    Query::new("document-query", json!({ "uri": uris.normalize() }))
}

/// `directory-query` matching documents under any of the given directories
///
/// A trailing boolean is taken as the `infinite` flag (default `true`), so both
/// `args!["/a/", "/b/", false]` and `args![vec!["/a/", "/b/"], false]` work.
pub fn directory(args: Args) -> Query {
    let mut uris = args.normalize();

    let infinite = if let Some(&Value::Bool(flag)) = uris.last() {
        uris.pop();
        flag
    } else {
        true
    };

    let uris = unwrap_single_array(uris);

    Query::new(
        "directory-query",
        json!({
            "uri": uris,
            "infinite": infinite,
        }),
    )
}
