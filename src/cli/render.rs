//! Compile JSON expressions into formula text

use serde_json::Value;

use super::CliError;
use crate::{
    ConditionExpression, QueryExpression, is_query_expression,
    expression::json::{condition_from_json, query_from_json},
};

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// JSON query or condition expression
    pub input: Option<String>,
}

/// Expression read from JSON input
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedExpression {
    Query(QueryExpression),
    Condition(ConditionExpression),
}

/// Read a query expression, falling back to a condition expression
pub fn parse_expression(input: &str) -> Result<ParsedExpression, CliError> {
    let value: Value = serde_json::from_str(input)?;

    if is_query_expression(&value) {
        Ok(ParsedExpression::Query(query_from_json(&value)?))
    } else {
        Ok(ParsedExpression::Condition(condition_from_json(&value)?))
    }
}

/// Execute a render operation, returning the formula
pub fn execute_render(options: &RenderOptions) -> Result<String, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    let formula = match parse_expression(input)? {
        ParsedExpression::Query(query) => query.to_string(),
        ParsedExpression::Condition(condition) => condition.to_string(),
    };
    Ok(formula)
}
