//! Range index datatypes
//!
//! The XML-Schema primitive types a range index may be declared with. Unknown
//! names are rejected, never coerced.

use serde_json::{Map, Value};
use sq_core::{QueryError, QueryResult};
use std::fmt;

/// XML-Schema primitive type of a range index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsType {
    AnyUri,
    Date,
    DateTime,
    DayTimeDuration,
    Decimal,
    Double,
    Float,
    GDay,
    GMonth,
    GMonthDay,
    GYear,
    GYearMonth,
    Int,
    Long,
    String,
    Time,
    UnsignedInt,
    UnsignedLong,
    YearMonthDuration,
}

impl XsType {
    pub const ALL: [XsType; 19] = [
        Self::AnyUri,
        Self::Date,
        Self::DateTime,
        Self::DayTimeDuration,
        Self::Decimal,
        Self::Double,
        Self::Float,
        Self::GDay,
        Self::GMonth,
        Self::GMonthDay,
        Self::GYear,
        Self::GYearMonth,
        Self::Int,
        Self::Long,
        Self::String,
        Self::Time,
        Self::UnsignedInt,
        Self::UnsignedLong,
        Self::YearMonthDuration,
    ];

    /// Unprefixed schema name (e.g. `anyURI`, `dateTime`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnyUri => "anyURI",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::DayTimeDuration => "dayTimeDuration",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::GDay => "gDay",
            Self::GMonth => "gMonth",
            Self::GMonthDay => "gMonthDay",
            Self::GYear => "gYear",
            Self::GYearMonth => "gYearMonth",
            Self::Int => "int",
            Self::Long => "long",
            Self::String => "string",
            Self::Time => "time",
            Self::UnsignedInt => "unsignedInt",
            Self::UnsignedLong => "unsignedLong",
            Self::YearMonthDuration => "yearMonthDuration",
        }
    }

    /// Look up a type by its exact, case-sensitive schema name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Prefixed name (e.g. `xs:int`)
    pub fn qualified_name(&self) -> String {
        format!("xs:{}", self.name())
    }
}

impl fmt::Display for XsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xs:{}", self.name())
    }
}

/// A range index datatype with optional collation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datatype {
    pub xs_type: XsType,
    pub collation: Option<String>,
}

impl Datatype {
    pub fn new(xs_type: XsType) -> Self {
        Self {
            xs_type,
            collation: None,
        }
    }

    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Parse a schema type name, failing on anything outside the enumeration
    pub fn parse(type_name: &str, collation: Option<&str>) -> QueryResult<Self> {
        let xs_type = XsType::from_name(type_name).ok_or_else(|| {
            tracing::debug!(datatype = type_name, "Rejecting unknown datatype");
            QueryError::unknown_datatype(type_name)
        })?;
        Ok(Self {
            xs_type,
            collation: collation.map(String::from),
        })
    }

    /// `{ "datatype": "xs:<type>", "collation"?: ... }`
    pub fn to_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("datatype".into(), Value::String(self.xs_type.qualified_name()));
        if let Some(collation) = &self.collation {
            fields.insert("collation".into(), Value::String(collation.clone()));
        }
        Value::Object(fields)
    }
}

impl From<Datatype> for Value {
    fn from(datatype: Datatype) -> Self {
        datatype.to_value()
    }
}

/// Build a datatype mapping for use with [`crate::range::range`]
pub fn datatype(type_name: &str, collation: Option<&str>) -> QueryResult<Value> {
    Datatype::parse(type_name, collation).map(|d| d.to_value())
}
