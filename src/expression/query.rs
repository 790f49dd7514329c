use std::fmt;

use serde_json::Value;

use crate::expression::condition::{ConditionExpression, serialize_condition_expression};

/// Row condition of a `Select` or `Filter` query.
///
/// Either a hand-written formula string or a structured condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectRow {
    /// Used verbatim
    Raw(String),
    /// Compiled through [`serialize_condition_expression`]
    Condition(ConditionExpression),
}

impl SelectRow {
    pub fn raw(formula: impl Into<String>) -> Self {
        SelectRow::Raw(formula.into())
    }

    /// Formula text for this row condition.
    pub fn resolve(&self) -> String {
        match self {
            SelectRow::Raw(formula) => formula.clone(),
            SelectRow::Condition(condition) => serialize_condition_expression(condition),
        }
    }
}

impl From<ConditionExpression> for SelectRow {
    fn from(condition: ConditionExpression) -> Self {
        SelectRow::Condition(condition)
    }
}

impl From<&str> for SelectRow {
    fn from(formula: &str) -> Self {
        SelectRow::Raw(formula.to_string())
    }
}

impl From<String> for SelectRow {
    fn from(formula: String) -> Self {
        SelectRow::Raw(formula)
    }
}

/// Query shape sent as a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    /// Column values from matching rows
    ///
    /// # Example
    /// ```text
    /// SELECT(Products[Product ID], [Price] > 100, TRUE)
    /// ```
    Select {
        from_dataset_column: String,
        select_row: SelectRow,
        distinct_only: bool,
    },

    /// Keys of matching rows
    ///
    /// # Example
    /// ```text
    /// FILTER(Products, [Price] > 100)
    /// ```
    Filter { dataset: String, select_row: SelectRow },

    /// Keys sorted by one or more columns
    ///
    /// Each pair is a column reference and whether to sort ascending.
    ///
    /// # Example
    /// ```text
    /// ORDERBY(Products[Product ID], [Price], TRUE, [Name], FALSE)
    /// ```
    OrderBy {
        keys: String,
        order_by: Vec<(String, bool)>,
    },
}

impl QueryExpression {
    pub fn select(
        from_dataset_column: impl Into<String>,
        select_row: impl Into<SelectRow>,
        distinct_only: bool,
    ) -> Self {
        QueryExpression::Select {
            from_dataset_column: from_dataset_column.into(),
            select_row: select_row.into(),
            distinct_only,
        }
    }

    pub fn filter(dataset: impl Into<String>, select_row: impl Into<SelectRow>) -> Self {
        QueryExpression::Filter {
            dataset: dataset.into(),
            select_row: select_row.into(),
        }
    }

    pub fn order_by<C: Into<String>>(
        keys: impl Into<String>,
        order_by: impl IntoIterator<Item = (C, bool)>,
    ) -> Self {
        QueryExpression::OrderBy {
            keys: keys.into(),
            order_by: order_by
                .into_iter()
                .map(|(column, ascending)| (column.into(), ascending))
                .collect(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            QueryExpression::Select { .. } => "Select",
            QueryExpression::Filter { .. } => "Filter",
            QueryExpression::OrderBy { .. } => "OrderBy",
        }
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_query_expression(self))
    }
}

/// Formula spelling of a boolean flag.
pub fn formula_bool(flag: bool) -> &'static str {
    if flag { "TRUE" } else { "FALSE" }
}

/// Checks the `type` tag of a JSON value only; fields below it are not inspected.
pub fn is_query_expression(value: &Value) -> bool {
    matches!(
        value.get("type").and_then(Value::as_str),
        Some("Select") | Some("Filter") | Some("OrderBy")
    )
}

/// Compiles a query into formula text.
///
/// # Examples
///
/// ```
/// use appsheet_client::{QueryExpression, serialize_query_expression};
///
/// let query = QueryExpression::order_by("table[col]", [("[col1]", true), ("[col2]", false)]);
/// assert_eq!(
///     serialize_query_expression(&query),
///     "ORDERBY(table[col], [col1], TRUE, [col2], FALSE)"
/// );
/// ```
pub fn serialize_query_expression(query: &QueryExpression) -> String {
    match query {
        QueryExpression::Select {
            from_dataset_column,
            select_row,
            distinct_only,
        } => format!(
            "SELECT({}, {}, {})",
            from_dataset_column,
            select_row.resolve(),
            formula_bool(*distinct_only)
        ),
        QueryExpression::Filter { dataset, select_row } => {
            format!("FILTER({}, {})", dataset, select_row.resolve())
        }
        QueryExpression::OrderBy { keys, order_by } => {
            let mut args = vec![keys.clone()];
            for (column, ascending) in order_by {
                args.push(column.clone());
                args.push(formula_bool(*ascending).to_string());
            }
            format!("ORDERBY({})", args.join(", "))
        }
    }
}
