//! Range Operators
//!
//! Comparison operators shared by `range-query` (written as symbols, e.g. `>=`)
//! and `range-constraint-query` (written as names, e.g. `GE`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator applied to range index values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeOperator {
    /// Less than (<)
    #[serde(rename = "LT")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(rename = "LE")]
    LessThanOrEqual,
    /// Greater than (>)
    #[serde(rename = "GT")]
    GreaterThan,
    /// Greater than or equal (>=)
    #[serde(rename = "GE")]
    GreaterThanOrEqual,
    /// Equals (=)
    #[default]
    #[serde(rename = "EQ")]
    Equals,
    /// Not equals (!=)
    #[serde(rename = "NE")]
    NotEquals,
}

impl RangeOperator {
    pub const ALL: [RangeOperator; 6] = [
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Equals,
        Self::NotEquals,
    ];

    /// Parse a comparison symbol (`<`, `<=`, `>`, `>=`, `=`, `!=`)
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            "=" => Some(Self::Equals),
            "!=" => Some(Self::NotEquals),
            _ => None,
        }
    }

    /// Parse an operator name (`LT`, `LE`, `GT`, `GE`, `EQ`, `NE`)
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "LT" => Some(Self::LessThan),
            "LE" => Some(Self::LessThanOrEqual),
            "GT" => Some(Self::GreaterThan),
            "GE" => Some(Self::GreaterThanOrEqual),
            "EQ" => Some(Self::Equals),
            "NE" => Some(Self::NotEquals),
            _ => None,
        }
    }

    /// Name as written in the query grammar
    pub fn name(&self) -> &'static str {
        match self {
            Self::LessThan => "LT",
            Self::LessThanOrEqual => "LE",
            Self::GreaterThan => "GT",
            Self::GreaterThanOrEqual => "GE",
            Self::Equals => "EQ",
            Self::NotEquals => "NE",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equals => "=",
            Self::NotEquals => "!=",
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
