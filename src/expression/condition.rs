use std::fmt;

use serde_json::Value;

use crate::expression::ExpressionError;

/// Operands of an `And` or `Or` node; never empty.
///
/// The only way to build one is [`Operands::new`], which refuses an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct Operands(Vec<ConditionExpression>);

impl Operands {
    pub fn new(conditions: Vec<ConditionExpression>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Operands(conditions))
        }
    }

    pub fn as_slice(&self) -> &[ConditionExpression] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConditionExpression> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ConditionExpression> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a ConditionExpression;
    type IntoIter = std::slice::Iter<'a, ConditionExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Boolean condition tree compiled into an AppSheet formula.
///
/// Each node owns its children, so a tree is always finite and acyclic.
/// `And` and `Or` hold [`Operands`], so they always have at least one operand.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionExpression {
    /// Pre-formed formula fragment, emitted as-is
    ///
    /// # Example
    /// ```text
    /// [Price] > 100
    /// ISBLANK([Name])
    /// ```
    Literal(String),

    /// Negation
    ///
    /// # Example
    /// ```text
    /// NOT(ISBLANK([Name]))
    /// ```
    Not(Box<ConditionExpression>),

    /// Conjunction, operands in order
    ///
    /// # Example
    /// ```text
    /// AND([Price] > 100, [Stock] > 0)
    /// ```
    And(Operands),

    /// Disjunction, operands in order
    Or(Operands),
}

impl ConditionExpression {
    pub fn literal(fragment: impl Into<String>) -> Self {
        ConditionExpression::Literal(fragment.into())
    }

    pub fn not(condition: ConditionExpression) -> Self {
        ConditionExpression::Not(Box::new(condition))
    }

    /// Builds an `And` node. Fails when `conditions` is empty.
    pub fn and(conditions: Vec<ConditionExpression>) -> Result<Self, ExpressionError> {
        Operands::new(conditions)
            .map(ConditionExpression::And)
            .ok_or(ExpressionError::EmptyOperands { operator: "And" })
    }

    /// Builds an `Or` node. Fails when `conditions` is empty.
    pub fn or(conditions: Vec<ConditionExpression>) -> Result<Self, ExpressionError> {
        Operands::new(conditions)
            .map(ConditionExpression::Or)
            .ok_or(ExpressionError::EmptyOperands { operator: "Or" })
    }

    /// The `type` tag used by the JSON form, `None` for literals.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            ConditionExpression::Literal(_) => None,
            ConditionExpression::Not(_) => Some("Not"),
            ConditionExpression::And(_) => Some("And"),
            ConditionExpression::Or(_) => Some("Or"),
        }
    }
}

impl From<&str> for ConditionExpression {
    fn from(fragment: &str) -> Self {
        ConditionExpression::Literal(fragment.to_string())
    }
}

impl From<String> for ConditionExpression {
    fn from(fragment: String) -> Self {
        ConditionExpression::Literal(fragment)
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_condition_expression(self))
    }
}

/// Checks whether a JSON value has the shape of a condition expression.
///
/// Any string is a literal. Objects must carry `"type": "Not"` with a valid
/// `condition`, or `"type": "And" | "Or"` with a `conditions` array whose
/// elements are all valid. An empty `conditions` array passes this check even
/// though [`condition_from_json`](crate::expression::json::condition_from_json)
/// refuses to build it.
///
/// # Examples
///
/// ```
/// use appsheet_client::is_condition_expression;
/// use serde_json::json;
///
/// assert!(is_condition_expression(&json!("[ID] = 1")));
/// assert!(is_condition_expression(&json!({"type": "Not", "condition": "C1"})));
/// assert!(!is_condition_expression(&json!({"type": "ADN", "conditions": ["C1"]})));
/// ```
pub fn is_condition_expression(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("Not") => obj.get("condition").is_some_and(is_condition_expression),
            Some("And") | Some("Or") => match obj.get("conditions") {
                Some(Value::Array(conditions)) => conditions.iter().all(is_condition_expression),
                _ => false,
            },
            _ => false,
        },
        _ => false,
    }
}

/// Compiles a condition tree into formula text.
///
/// `And`/`Or` with a single operand collapse to that operand, so
/// `Or(["C1"])` becomes `C1`. `Not` always wraps.
pub fn serialize_condition_expression(condition: &ConditionExpression) -> String {
    match condition {
        ConditionExpression::Literal(fragment) => fragment.clone(),
        ConditionExpression::Not(inner) => format!("NOT({})", serialize_condition_expression(inner)),
        ConditionExpression::And(conditions) => serialize_operands("AND", conditions),
        ConditionExpression::Or(conditions) => serialize_operands("OR", conditions),
    }
}

fn serialize_operands(function: &str, conditions: &Operands) -> String {
    if let [single] = conditions.as_slice() {
        return serialize_condition_expression(single);
    }

    let operands: Vec<String> = conditions
        .iter()
        .map(serialize_condition_expression)
        .collect();
    format!("{}({})", function, operands.join(", "))
}
