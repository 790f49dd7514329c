//! JSON <-> expression conversion
//!
//! Expressions arrive from configuration files and the command line as JSON
//! objects tagged with `type`:
//!
//! ```json
//! {"type": "And", "conditions": ["[Price] > 100", {"type": "Not", "condition": "ISBLANK([Name])"}]}
//! {"type": "OrderBy", "keys": "Products[ID]", "orderBy": [["[Price]", "TRUE"]]}
//! ```

use serde_json::{Map, Value, json};

use crate::expression::{
    ConditionExpression, ExpressionError, QueryExpression, SelectRow, is_condition_expression,
    is_query_expression, query::formula_bool,
};

/// Convert a JSON value into a condition tree.
pub fn condition_from_json(value: &Value) -> Result<ConditionExpression, ExpressionError> {
    if !is_condition_expression(value) {
        return Err(ExpressionError::NotAConditionExpression(value.to_string()));
    }
    build_condition(value)
}

// Input already passed `is_condition_expression`.
fn build_condition(value: &Value) -> Result<ConditionExpression, ExpressionError> {
    match value {
        Value::String(fragment) => Ok(ConditionExpression::Literal(fragment.clone())),
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("Not") => {
                let inner = obj.get("condition").ok_or(ExpressionError::MissingField {
                    expression: "Not",
                    field: "condition",
                })?;
                Ok(ConditionExpression::not(build_condition(inner)?))
            }
            Some("And") => ConditionExpression::and(build_operands(obj, "And")?),
            Some("Or") => ConditionExpression::or(build_operands(obj, "Or")?),
            _ => Err(ExpressionError::NotAConditionExpression(value.to_string())),
        },
        _ => Err(ExpressionError::NotAConditionExpression(value.to_string())),
    }
}

fn build_operands(
    obj: &Map<String, Value>,
    expression: &'static str,
) -> Result<Vec<ConditionExpression>, ExpressionError> {
    obj.get("conditions")
        .and_then(Value::as_array)
        .ok_or(ExpressionError::MissingField {
            expression,
            field: "conditions",
        })?
        .iter()
        .map(build_condition)
        .collect()
}

/// Convert a JSON value into a query.
///
/// A `selectRow` must itself be a condition expression; any JSON string
/// qualifies, so hand-written row formulas pass straight through.
pub fn query_from_json(value: &Value) -> Result<QueryExpression, ExpressionError> {
    if !is_query_expression(value) {
        return Err(ExpressionError::NotAQueryExpression(value.to_string()));
    }

    let obj = value
        .as_object()
        .ok_or_else(|| ExpressionError::NotAQueryExpression(value.to_string()))?;

    match obj.get("type").and_then(Value::as_str) {
        Some("Select") => Ok(QueryExpression::Select {
            from_dataset_column: string_field(obj, "Select", "fromDatasetColumn")?,
            select_row: select_row_field(obj, "Select")?,
            distinct_only: flag_field(obj, "Select", "distinctOnly")?,
        }),
        Some("Filter") => Ok(QueryExpression::Filter {
            dataset: string_field(obj, "Filter", "dataset")?,
            select_row: select_row_field(obj, "Filter")?,
        }),
        Some("OrderBy") => {
            let keys = string_field(obj, "OrderBy", "keys")?;
            let pairs = obj
                .get("orderBy")
                .ok_or(ExpressionError::MissingField {
                    expression: "OrderBy",
                    field: "orderBy",
                })?
                .as_array()
                .ok_or(ExpressionError::InvalidField {
                    field: "orderBy",
                    expected: "an array of [column, TRUE|FALSE] pairs",
                })?;

            let order_by = pairs
                .iter()
                .map(order_pair)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(QueryExpression::OrderBy { keys, order_by })
        }
        _ => Err(ExpressionError::NotAQueryExpression(value.to_string())),
    }
}

fn string_field(
    obj: &Map<String, Value>,
    expression: &'static str,
    field: &'static str,
) -> Result<String, ExpressionError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ExpressionError::InvalidField {
            field,
            expected: "a string",
        }),
        None => Err(ExpressionError::MissingField { expression, field }),
    }
}

fn select_row_field(
    obj: &Map<String, Value>,
    expression: &'static str,
) -> Result<SelectRow, ExpressionError> {
    let row = obj.get("selectRow").ok_or(ExpressionError::MissingField {
        expression,
        field: "selectRow",
    })?;

    if !is_condition_expression(row) {
        return Err(ExpressionError::InvalidField {
            field: "selectRow",
            expected: "a formula string or a condition expression",
        });
    }

    match row {
        Value::String(formula) => Ok(SelectRow::Raw(formula.clone())),
        _ => Ok(SelectRow::Condition(build_condition(row)?)),
    }
}

fn flag_field(
    obj: &Map<String, Value>,
    expression: &'static str,
    field: &'static str,
) -> Result<bool, ExpressionError> {
    match obj.get(field) {
        Some(value) => parse_flag(value).ok_or(ExpressionError::InvalidField {
            field,
            expected: "\"TRUE\" or \"FALSE\"",
        }),
        None => Err(ExpressionError::MissingField { expression, field }),
    }
}

/// Accepts `"TRUE"`/`"FALSE"` as well as JSON booleans.
fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "TRUE" => Some(true),
        Value::String(s) if s == "FALSE" => Some(false),
        _ => None,
    }
}

fn order_pair(pair: &Value) -> Result<(String, bool), ExpressionError> {
    let invalid = ExpressionError::InvalidField {
        field: "orderBy",
        expected: "an array of [column, TRUE|FALSE] pairs",
    };

    match pair.as_array().map(Vec::as_slice) {
        Some([Value::String(column), direction]) => {
            let ascending = parse_flag(direction).ok_or(invalid)?;
            Ok((column.clone(), ascending))
        }
        _ => Err(invalid),
    }
}

/// Convert a condition tree back to its JSON form.
pub fn condition_to_json(condition: &ConditionExpression) -> Value {
    match condition {
        ConditionExpression::Literal(fragment) => Value::String(fragment.clone()),
        ConditionExpression::Not(inner) => json!({
            "type": "Not",
            "condition": condition_to_json(inner),
        }),
        ConditionExpression::And(conditions) | ConditionExpression::Or(conditions) => json!({
            "type": condition.type_name(),
            "conditions": conditions.iter().map(condition_to_json).collect::<Vec<_>>(),
        }),
    }
}

/// Convert a query back to its JSON form.
pub fn query_to_json(query: &QueryExpression) -> Value {
    match query {
        QueryExpression::Select {
            from_dataset_column,
            select_row,
            distinct_only,
        } => json!({
            "type": "Select",
            "fromDatasetColumn": from_dataset_column,
            "selectRow": select_row_to_json(select_row),
            "distinctOnly": formula_bool(*distinct_only),
        }),
        QueryExpression::Filter { dataset, select_row } => json!({
            "type": "Filter",
            "dataset": dataset,
            "selectRow": select_row_to_json(select_row),
        }),
        QueryExpression::OrderBy { keys, order_by } => json!({
            "type": "OrderBy",
            "keys": keys,
            "orderBy": order_by
                .iter()
                .map(|(column, ascending)| json!([column, formula_bool(*ascending)]))
                .collect::<Vec<_>>(),
        }),
    }
}

fn select_row_to_json(row: &SelectRow) -> Value {
    match row {
        SelectRow::Raw(formula) => Value::String(formula.clone()),
        SelectRow::Condition(condition) => condition_to_json(condition),
    }
}
