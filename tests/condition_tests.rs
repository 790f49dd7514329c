// tests/condition_tests.rs

use appsheet_client::{
    ConditionExpression, ExpressionError, Operands, QueryExpression, is_condition_expression,
    serialize_condition_expression,
};
use serde_json::json;

fn lit(s: &str) -> ConditionExpression {
    ConditionExpression::literal(s)
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_literal_is_returned_unchanged() {
    for fragment in ["C1", "[Price] > 100", "ISBLANK([ID])", ""] {
        assert_eq!(serialize_condition_expression(&lit(fragment)), fragment);
    }
}

#[test]
fn test_not_wraps_child() {
    let expr = ConditionExpression::not(lit("ISBLANK([Name])"));
    assert_eq!(serialize_condition_expression(&expr), "NOT(ISBLANK([Name]))");
}

#[test]
fn test_not_wraps_compound_child() {
    let inner = ConditionExpression::or(vec![lit("C1"), lit("C2")]).unwrap();
    let expr = ConditionExpression::not(inner);
    assert_eq!(serialize_condition_expression(&expr), "NOT(OR(C1, C2))");
}

#[test]
fn test_double_not_is_kept() {
    let expr = ConditionExpression::not(ConditionExpression::not(lit("C1")));
    assert_eq!(serialize_condition_expression(&expr), "NOT(NOT(C1))");
}

#[test]
fn test_single_or_flattens() {
    let expr = ConditionExpression::or(vec![lit("C1")]).unwrap();
    assert_eq!(serialize_condition_expression(&expr), "C1");
}

#[test]
fn test_single_and_flattens() {
    let expr = ConditionExpression::and(vec![lit("C1")]).unwrap();
    assert_eq!(serialize_condition_expression(&expr), "C1");
}

#[test]
fn test_single_child_flattening_recurses() {
    let inner = ConditionExpression::and(vec![lit("C1"), lit("C2")]).unwrap();
    let expr = ConditionExpression::or(vec![inner]).unwrap();
    assert_eq!(serialize_condition_expression(&expr), "AND(C1, C2)");
}

#[test]
fn test_nested_and_or() {
    let expr = ConditionExpression::and(vec![
        lit("C1"),
        lit("C2"),
        ConditionExpression::or(vec![lit("C3"), lit("C4")]).unwrap(),
    ])
    .unwrap();
    assert_eq!(serialize_condition_expression(&expr), "AND(C1, C2, OR(C3, C4))");
}

#[test]
fn test_operand_order_is_preserved() {
    let expr = ConditionExpression::or(vec![lit("Z"), lit("A"), lit("Z")]).unwrap();
    assert_eq!(serialize_condition_expression(&expr), "OR(Z, A, Z)");
}

#[test]
fn test_display_matches_serializer() {
    let expr = ConditionExpression::and(vec![
        ConditionExpression::not(lit("C1")),
        lit("C2"),
    ])
    .unwrap();
    assert_eq!(expr.to_string(), serialize_condition_expression(&expr));
    assert_eq!(expr.to_string(), "AND(NOT(C1), C2)");
}

// ============================================================================
// Smart constructors
// ============================================================================

#[test]
fn test_empty_and_is_rejected() {
    assert_eq!(
        ConditionExpression::and(vec![]),
        Err(ExpressionError::EmptyOperands { operator: "And" })
    );
}

#[test]
fn test_empty_or_is_rejected() {
    assert_eq!(
        ConditionExpression::or(vec![]),
        Err(ExpressionError::EmptyOperands { operator: "Or" })
    );
}

#[test]
fn test_operands_refuse_empty_list() {
    assert_eq!(Operands::new(vec![]), None);

    let operands = Operands::new(vec![lit("C1"), lit("C2")]).unwrap();
    assert_eq!(operands.as_slice(), &[lit("C1"), lit("C2")]);
    assert_eq!(operands.into_vec(), vec![lit("C1"), lit("C2")]);
}

#[test]
fn test_and_or_nodes_always_hold_operands() {
    let and = ConditionExpression::and(vec![lit("C1"), lit("C2")]).unwrap();
    match &and {
        ConditionExpression::And(operands) => assert_eq!(operands.iter().count(), 2),
        other => panic!("Expected And, got {:?}", other),
    }

    let or = ConditionExpression::Or(Operands::new(vec![lit("C3")]).unwrap());
    assert_eq!(or, ConditionExpression::or(vec![lit("C3")]).unwrap());
    assert_eq!(serialize_condition_expression(&or), "C3");
}

#[test]
fn test_empty_operands_never_reach_a_query() {
    let row = ConditionExpression::and(vec![]);
    assert!(row.is_err());

    let query = QueryExpression::filter("T", ConditionExpression::and(vec![lit("[A] = 1")]).unwrap());
    assert_eq!(query.to_string(), "FILTER(T, [A] = 1)");
}

#[test]
fn test_from_str_builds_literal() {
    let expr: ConditionExpression = "[ID] = 1".into();
    assert_eq!(expr, ConditionExpression::Literal("[ID] = 1".to_string()));
    assert_eq!(expr.type_name(), None);
}

// ============================================================================
// Membership test
// ============================================================================

#[test]
fn test_is_condition_expression_rejects_bad_shapes() {
    let cases = [
        json!(null),
        json!([]),
        json!(42),
        json!(true),
        json!({}),
        json!({"type": "ADN", "conditions": ["C1"]}),
        json!({"type": "And", "conditions": [null]}),
        json!({"type": "And", "conditions": "C1"}),
        json!({"type": "Or"}),
        json!({"type": "Not", "condition": null}),
        json!({"type": "Not"}),
        json!({"conditions": ["C1"]}),
    ];

    for case in cases {
        assert!(!is_condition_expression(&case), "expected false for {}", case);
    }
}

#[test]
fn test_is_condition_expression_accepts_valid_shapes() {
    let cases = [
        json!("C1"),
        json!(""),
        json!({"type": "And", "conditions": ["C1"]}),
        json!({"type": "Or", "conditions": ["C1", "C2"]}),
        json!({"type": "Not", "condition": "C1"}),
        json!({"type": "And", "conditions": []}),
        json!({
            "type": "And",
            "conditions": ["C1", {"type": "Not", "condition": {"type": "Or", "conditions": ["C2", "C3"]}}]
        }),
    ];

    for case in cases {
        assert!(is_condition_expression(&case), "expected true for {}", case);
    }
}

#[test]
fn test_is_condition_expression_checks_deep_children() {
    let value = json!({
        "type": "Or",
        "conditions": ["C1", {"type": "Not", "condition": {"type": "And", "conditions": [1]}}]
    });
    assert!(!is_condition_expression(&value));
}
