//! Тесты для разбора и вычисления условий WHERE

use crate::common::Error;
use crate::parser::condition::{compare, values_equal, ConditionParser};
use crate::parser::{Expression, Lexer, LogicalOperator};

fn parse_condition(text: &str) -> crate::common::Result<Expression> {
    let tokens = Lexer::new(text)?.tokenize()?;
    ConditionParser::new(&tokens).parse()
}

fn header() -> Vec<String> {
    ["id", "name", "mark", "pass"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_leaf_strips_quotes() {
    let expr = parse_condition("name == 'Simon'").unwrap();
    assert_eq!(
        expr,
        Expression::Condition {
            column: "name".to_string(),
            operator: "==".to_string(),
            literal: "Simon".to_string(),
        }
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse_condition("a == 1 OR b == 2 AND c == 3").unwrap();
    assert_eq!(
        expr,
        Expression::logical(
            LogicalOperator::Or,
            Expression::condition("a", "==", "1"),
            Expression::logical(
                LogicalOperator::And,
                Expression::condition("b", "==", "2"),
                Expression::condition("c", "==", "3"),
            ),
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_condition("(a == 1 OR b == 2) AND c == 3").unwrap();
    assert_eq!(
        expr,
        Expression::logical(
            LogicalOperator::And,
            Expression::logical(
                LogicalOperator::Or,
                Expression::condition("a", "==", "1"),
                Expression::condition("b", "==", "2"),
            ),
            Expression::condition("c", "==", "3"),
        )
    );
}

#[test]
fn test_left_associative_chain() {
    let expr = parse_condition("a == 1 AND b == 2 AND c == 3").unwrap();
    assert_eq!(
        expr,
        Expression::logical(
            LogicalOperator::And,
            Expression::logical(
                LogicalOperator::And,
                Expression::condition("a", "==", "1"),
                Expression::condition("b", "==", "2"),
            ),
            Expression::condition("c", "==", "3"),
        )
    );
}

#[test]
fn test_incomplete_condition() {
    assert!(matches!(parse_condition("a =="), Err(Error::Syntax { .. })));
    assert!(matches!(parse_condition("a == 1 AND"), Err(Error::Syntax { .. })));
    assert!(matches!(parse_condition("a == 1 b"), Err(Error::Syntax { .. })));
}

#[test]
fn test_numeric_comparison() {
    assert!(compare("10", ">", "9"));
    assert!(compare("10", ">=", "10.0"));
    assert!(compare("-3", "<", "2"));
    assert!(compare("65", "==", "65.0"));
    assert!(compare("65", "!=", "64"));
    assert!(compare("2", "<=", "+2"));
    // Лексически "10" < "9", но сравнение числовое
    assert!(!compare("10", "<", "9"));
}

#[test]
fn test_text_comparison() {
    assert!(compare("Simon", "LIKE", "si"));
    assert!(compare("Simon", "like", "MON"));
    assert!(!compare("Simon", "==", "si"));
    assert!(compare("Simon", "==", "simon"));
    assert!(compare("Simon", "!=", "Sion"));
}

#[test]
fn test_operator_invalid_for_path() {
    // Текстовый путь не поддерживает упорядочивающие операторы
    assert!(!compare("Simon", ">", "Alice"));
    // Числовой путь не поддерживает LIKE
    assert!(!compare("123", "LIKE", "2"));
    // Одиночный = не является оператором сравнения
    assert!(!compare("Simon", "=", "Simon"));
}

#[test]
fn test_values_equal_mixed() {
    assert!(values_equal("1", "1.0"));
    assert!(values_equal(" OXO ", "oxo"));
    assert!(!values_equal("1", "one"));
}

#[test]
fn test_evaluate_against_row() {
    let header = header();
    let simon = row(&["1", "Simon", "65", "TRUE"]);
    let rob = row(&["3", "Rob", "35", "FALSE"]);

    let expr = parse_condition("mark > 50 AND pass == TRUE").unwrap();
    assert!(expr.evaluate(&simon, &header));
    assert!(!expr.evaluate(&rob, &header));

    let expr = parse_condition("name LIKE 'ro' OR mark >= 60").unwrap();
    assert!(expr.evaluate(&simon, &header));
    assert!(expr.evaluate(&rob, &header));
}

#[test]
fn test_column_lookup_case_insensitive() {
    let expr = parse_condition("NAME == 'simon'").unwrap();
    assert!(expr.evaluate(&row(&["1", "Simon", "65", "TRUE"]), &header()));
}

#[test]
fn test_unknown_column_evaluates_false() {
    let expr = parse_condition("age > 1").unwrap();
    assert!(!expr.evaluate(&row(&["1", "Simon", "65", "TRUE"]), &header()));

    let expr = parse_condition("age > 1 OR mark > 1").unwrap();
    assert!(expr.evaluate(&row(&["1", "Simon", "65", "TRUE"]), &header()));
}

#[test]
fn test_logical_nodes_match_boolean_algebra() {
    let header = header();
    let rows = [
        row(&["1", "Simon", "65", "TRUE"]),
        row(&["2", "Sion", "55", "TRUE"]),
        row(&["3", "Rob", "35", "FALSE"]),
        row(&["4", "Chris", "20", "FALSE"]),
    ];
    let a = parse_condition("mark > 30").unwrap();
    let b = parse_condition("name LIKE 'si'").unwrap();
    let and = Expression::logical(LogicalOperator::And, a.clone(), b.clone());
    let or = Expression::logical(LogicalOperator::Or, a.clone(), b.clone());

    for r in &rows {
        let (ra, rb) = (a.evaluate(r, &header), b.evaluate(r, &header));
        assert_eq!(and.evaluate(r, &header), ra && rb);
        assert_eq!(or.evaluate(r, &header), ra || rb);
    }
}
