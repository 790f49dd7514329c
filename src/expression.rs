//! # Selector Formula Expressions
//!
//! This module defines the typed representation of AppSheet selector formulas
//! and compiles it into the API's string formula language.
//!
//! ## Architecture Overview
//!
//! - **[condition]** - Boolean condition trees (`Literal`, `Not`, `And`, `Or`)
//! - **[query]** - Query shapes (`Select`, `Filter`, `OrderBy`)
//! - **[brackets]** - Bracket-balance check for selector strings
//! - **[json]** - Conversion from loosely-typed JSON shapes into the typed model
//!
//! ## Quick Start
//!
//! ```
//! use appsheet_client::{ConditionExpression, QueryExpression, SelectRow};
//!
//! let condition = ConditionExpression::and(vec![
//!     ConditionExpression::literal("[Price] > 100"),
//!     ConditionExpression::not(ConditionExpression::literal("ISBLANK([Name])")),
//! ])
//! .unwrap();
//!
//! let query = QueryExpression::filter("Products", SelectRow::Condition(condition));
//! assert_eq!(
//!     query.to_string(),
//!     "FILTER(Products, AND([Price] > 100, NOT(ISBLANK([Name]))))"
//! );
//! ```
//!
//! ## Formula Shapes
//!
//! ```text
//! NOT(c)
//! AND(c1, c2, ...)        // a single operand is emitted bare
//! OR(c1, c2, ...)
//! SELECT(Table[Column], row-condition, TRUE|FALSE)
//! FILTER(Table, row-condition)
//! ORDERBY(keys, [Column], TRUE|FALSE, ...)
//! ```
//!
//! The compiler only goes from structure to string. Hand-written selectors are
//! never parsed; [`is_query_string_valid`](brackets::is_query_string_valid)
//! only checks that their brackets nest.
pub mod brackets;
pub mod condition;
pub mod json;
pub mod query;

pub use brackets::is_query_string_valid;
pub use condition::{
    ConditionExpression, Operands, is_condition_expression, serialize_condition_expression,
};
pub use query::{QueryExpression, SelectRow, is_query_expression, serialize_query_expression};

/// Errors raised at the JSON boundary when a value does not describe an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// Value is not a string or a `Not`/`And`/`Or` object
    #[error("not a condition expression: {0}")]
    NotAConditionExpression(String),

    /// Value has no `Select`/`Filter`/`OrderBy` type tag
    #[error("not a query expression: {0}")]
    NotAQueryExpression(String),

    /// `And`/`Or` built with no operands
    #[error("{operator} requires at least one condition")]
    EmptyOperands { operator: &'static str },

    #[error("{expression} expression is missing field '{field}'")]
    MissingField {
        expression: &'static str,
        field: &'static str,
    },

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}
