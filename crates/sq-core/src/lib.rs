//! # sq-core
//!
//! Core types, traits, and utilities for Structured Query RS.
//!
//! This crate provides the foundational building blocks used by the query builders:
//! - The variadic argument convention (`Args`, `normalize`, `args!`)
//! - The `Query` value type and JSON shape helpers
//! - Common error types and result aliases
//! - Search options configuration

pub mod args;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use args::*;
pub use config::{ConfigError, SearchOptions};
pub use error::*;
pub use result::*;
pub use types::*;

pub use serde_json::{Map, Value};
