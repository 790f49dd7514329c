//! CLI support for appsheet-client
//!
//! Provides programmatic access to the `appsheet` command so the same
//! operations can be embedded in other tools.

mod check;
mod find;
mod render;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use find::{FindOptions, execute_find, execute_find_with};
pub use render::{ParsedExpression, RenderOptions, execute_render, parse_expression};

use std::io;

use crate::{ClientError, ConfigError, ExpressionError};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input does not describe an expression
    #[error("Invalid expression: {0}")]
    Expression(#[from] ExpressionError),

    /// Selector brackets do not balance
    #[error("Invalid selector: number of opened and closed parentheses does not match")]
    InvalidSelector,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Only one of `--selector` and `--query` may be given
    #[error("Use either --selector or --query, not both.")]
    ConflictingSelectors,

    #[error("No input provided. Pass the expression as an argument or pipe JSON to stdin.")]
    NoInput,
}
