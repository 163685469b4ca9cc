//! Range queries
//!
//! A `range-query` compares the values of a range index against one or more
//! values. The positional [`range`] entry point sniffs its optional middle
//! arguments by shape; [`RangeQuery`] is the explicit record it parses into.
//!
//! ```
//! use sq_core::args;
//! use sq_queries::range::{element, range, RangeQuery};
//! use sq_queries::datatypes::{Datatype, XsType};
//! use sq_queries::RangeOperator;
//!
//! let positional = range(args!["price", ">=", 10]);
//! let explicit = RangeQuery::new("price")
//!     .operator(RangeOperator::GreaterThanOrEqual)
//!     .value(10)
//!     .build();
//! assert_eq!(positional, explicit);
//!
//! let typed = RangeQuery::new(element(args!["http://example.com", "price"]))
//!     .datatype(Datatype::new(XsType::Decimal))
//!     .value(9.99)
//!     .build();
//! assert_eq!(typed["range-query"]["type"], "xs:decimal");
//! ```

use serde_json::{json, Map, Value};
use sq_core::{normalize_value, truthy_field, Args, Query};

use crate::datatypes::Datatype;
use crate::operators::RangeOperator;

/// Qualified name: one value is a bare name, two values are `(ns, name)`
pub fn qname(args: Args) -> Value {
    let mut values = args.normalize();

    if values.len() == 1 {
        return json!({ "ns": Value::Null, "name": values.remove(0) });
    }

    let mut values = values.into_iter();
    let ns = values.next().unwrap_or(Value::Null);
    let name = values.next().unwrap_or(Value::Null);
    json!({ "ns": ns, "name": name })
}

/// Element reference `{ "element": <qname> }`
///
/// Accepts a bare name, an `(ns, name)` pair, a two-element array, or an
/// existing qname mapping.
pub fn element(args: Args) -> Value {
    let mut values = args.normalize();

    let qname = if values.len() == 1 {
        let single = values.remove(0);
        if truthy_field(&single, "ns").is_some() || truthy_field(&single, "name").is_some() {
            single
        } else {
            qname(Args::new(vec![single]))
        }
    } else {
        values.truncate(2);
        qname(Args::new(values))
    };

    json!({ "element": qname })
}

/// Range options mapping `{ "range-option": [...] }`
pub fn range_options(options: Args) -> Value {
    json!({ "range-option": options.normalize() })
}

/// What a range query applies to
#[derive(Debug, Clone, PartialEq)]
pub enum IndexedName {
    /// A plain name, emitted as `json-property`
    JsonProperty(Value),
    /// An element reference mapping; its fields are merged into the query body
    Element(Map<String, Value>),
}

impl IndexedName {
    /// Mappings carrying an `element` field are element references; anything
    /// else is a JSON property name
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) if fields.get("element").is_some_and(sq_core::is_truthy) => {
                Self::Element(fields)
            }
            other => Self::JsonProperty(other),
        }
    }
}

impl From<Value> for IndexedName {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<&str> for IndexedName {
    fn from(name: &str) -> Self {
        Self::JsonProperty(Value::String(name.to_string()))
    }
}

impl From<String> for IndexedName {
    fn from(name: String) -> Self {
        Self::JsonProperty(Value::String(name))
    }
}

/// Explicit form of a `range-query`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    indexed_name: IndexedName,
    datatype: Option<Value>,
    collation: Option<Value>,
    operator: Option<RangeOperator>,
    values: Vec<Value>,
    options: Vec<Value>,
}

impl RangeQuery {
    /// Create a range query over an indexed name
    pub fn new(indexed_name: impl Into<IndexedName>) -> Self {
        Self {
            indexed_name: indexed_name.into(),
            datatype: None,
            collation: None,
            operator: None,
            values: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Set the index datatype (and collation, if any)
    pub fn datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = Some(Value::String(datatype.xs_type.qualified_name()));
        self.collation = datatype.collation.map(Value::String);
        self
    }

    pub fn operator(mut self, operator: RangeOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Add a value; arrays contribute each of their elements
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.extend(normalize_value(value.into()));
        self
    }

    /// Add a range option (e.g. `limit=10`)
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(Value::String(option.into()));
        self
    }

    pub fn indexed_name(&self) -> &IndexedName {
        &self.indexed_name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// The effective operator (`EQ` when unset)
    pub fn effective_operator(&self) -> RangeOperator {
        self.operator.unwrap_or_default()
    }

    /// Parse the positional form `(indexedName, [datatype], [operator], ...values, [rangeOptions])`
    pub fn from_args(args: Args) -> Self {
        let mut args = args.normalize().into_iter();

        let mut query = Self::new(IndexedName::from_value(args.next().unwrap_or(Value::Null)));

        let candidate = match args.next() {
            Some(datatype) if truthy_field(&datatype, "datatype").is_some() => {
                query.datatype = datatype.get("datatype").cloned();
                query.collation = datatype.get("collation").filter(|c| !c.is_null()).cloned();
                args.next()
            }
            other => other,
        };

        if let Some(candidate) = candidate {
            match candidate.as_str().and_then(RangeOperator::from_symbol) {
                Some(operator) => query.operator = Some(operator),
                None => {
                    tracing::trace!(
                        value = %candidate,
                        "Range operator candidate treated as a value"
                    );
                    query.values.extend(normalize_value(candidate));
                }
            }
        }

        for arg in args {
            match truthy_field(&arg, "range-option") {
                Some(options) => query.options.extend(normalize_value(options.clone())),
                None => query.values.extend(normalize_value(arg)),
            }
        }

        query
    }

    /// Assemble the `range-query`
    pub fn build(self) -> Query {
        let mut body = Map::new();
        body.insert(
            "range-operator".into(),
            Value::String(self.effective_operator().name().to_string()),
        );
        body.insert("value".into(), Value::Array(self.values));
        body.insert("range-option".into(), Value::Array(self.options));

        match self.indexed_name {
            IndexedName::JsonProperty(name) => {
                body.insert("json-property".into(), name);
            }
            IndexedName::Element(fields) => body.extend(fields),
        }

        if let Some(datatype) = self.datatype {
            body.insert("type".into(), datatype);
        }
        if let Some(collation) = self.collation {
            body.insert("collation".into(), collation);
        }

        Query::new("range-query", Value::Object(body))
    }
}

/// Positional `range-query` builder (see [`RangeQuery::from_args`])
pub fn range(args: Args) -> Query {
    RangeQuery::from_args(args).build()
}
