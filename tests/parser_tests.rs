// tests/parser_tests.rs

use xqr::ast::{CompareOp, Condition, ElementRef, Source};
use xqr::parser::{ParseError, parse_query};
use xqr::value::Value;

fn element(name: Option<&str>, attribute: Option<&str>) -> ElementRef {
    ElementRef {
        name: name.map(str::to_string),
        attribute: attribute.map(str::to_string),
    }
}

fn parse_err(text: &str) -> ParseError {
    parse_query(text).expect_err("query should be rejected")
}

// ============================================================================
// Clauses
// ============================================================================

#[test]
fn test_minimal_query() {
    let query = parse_query("SELECT book FROM ROOT").unwrap();
    assert_eq!(query.select, "book");
    assert_eq!(query.limit, None);
    assert_eq!(query.from, Some(Source::Root));
    assert!(query.condition.is_none());
    assert!(query.order.is_none());
}

#[test]
fn test_all_clauses() {
    let query =
        parse_query("SELECT book LIMIT 5 FROM library.id WHERE price > 10 ORDER BY title ASC")
            .unwrap();

    assert_eq!(query.select, "book");
    assert_eq!(query.limit, Some(5));
    assert_eq!(
        query.from,
        Some(Source::Element(element(Some("library"), Some("id"))))
    );

    match query.condition {
        Some(Condition::Leaf(c)) => {
            assert_eq!(c.element, element(Some("price"), None));
            assert_eq!(c.op, CompareOp::Greater);
            assert_eq!(c.literal, Value::parse("10"));
            assert!(!c.negated);
        }
        other => panic!("Expected a single comparison, got {:?}", other),
    }

    let order = query.order.unwrap();
    assert_eq!(order.element, element(Some("title"), None));
    assert!(!order.descending);
}

#[test]
fn test_order_desc() {
    let query = parse_query("SELECT a FROM ROOT ORDER BY .id DESC").unwrap();
    let order = query.order.unwrap();
    assert_eq!(order.element, element(None, Some("id")));
    assert!(order.descending);
}

#[test]
fn test_negative_limit_is_clamped() {
    let query = parse_query("SELECT a LIMIT -3 FROM ROOT").unwrap();
    assert_eq!(query.limit, Some(0));
}

#[test]
fn test_out_of_range_limits_saturate() {
    let query = parse_query("SELECT a LIMIT -99999999999999999999 FROM ROOT").unwrap();
    assert_eq!(query.limit, Some(0));
    let query = parse_query("SELECT a LIMIT 99999999999999999999999 FROM ROOT").unwrap();
    assert_eq!(query.limit, Some(usize::MAX));
    let query = parse_query("SELECT a LIMIT +4 FROM ROOT").unwrap();
    assert_eq!(query.limit, Some(4));
}

#[test]
fn test_parsing_is_deterministic() {
    let text = "SELECT a LIMIT 2 FROM r WHERE (a = 1 OR NOT b CONTAINS \"x y\") AND c < 3 ORDER BY a DESC";
    assert_eq!(parse_query(text).unwrap(), parse_query(text).unwrap());
}

// ============================================================================
// Empty FROM
// ============================================================================

#[test]
fn test_from_without_source() {
    assert_eq!(parse_query("SELECT a FROM").unwrap().from, None);
}

#[test]
fn test_from_followed_by_where() {
    let query = parse_query("SELECT a FROM WHERE a = 1").unwrap();
    assert_eq!(query.from, None);
    assert!(query.condition.is_some());
}

#[test]
fn test_from_followed_by_order_by() {
    let query = parse_query("SELECT a FROM ORDER BY a ASC").unwrap();
    assert_eq!(query.from, None);
    assert!(query.order.is_some());
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_multi_word_string_literal() {
    let query = parse_query(r#"SELECT a FROM ROOT WHERE title CONTAINS "the   old man""#).unwrap();
    match query.condition {
        Some(Condition::Leaf(c)) => {
            assert_eq!(c.op, CompareOp::Contains);
            assert_eq!(c.literal, Value::String("the old man".to_string()));
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_quoted_number_is_a_string() {
    let query = parse_query(r#"SELECT a FROM ROOT WHERE a = "5""#).unwrap();
    match query.condition {
        Some(Condition::Leaf(c)) => assert_eq!(c.literal, Value::String("5".to_string())),
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_numeric_contains_is_rejected() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a CONTAINS 5"),
        ParseError::NumericContains(_)
    ));
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        parse_err(r#"SELECT a FROM ROOT WHERE a = "open words"#),
        ParseError::UnterminatedString
    );
}

#[test]
fn test_lone_quote_is_empty_string() {
    let query = parse_query(r#"SELECT a FROM ROOT WHERE a = " OR b = 1"#).unwrap();
    match query.condition {
        Some(Condition::Or { children, .. }) => match &children[0] {
            Condition::Leaf(c) => assert_eq!(c.literal, Value::String(String::new())),
            other => panic!("Expected comparison, got {:?}", other),
        },
        other => panic!("Expected OR at the top, got {:?}", other),
    }

    assert!(matches!(
        parse_err(r#"SELECT a FROM ROOT WHERE a = " b""#),
        ParseError::UnexpectedToken(_)
    ));
}

#[test]
fn test_unquoted_word_literal() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a = word"),
        ParseError::InvalidLiteral(_)
    ));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_and_binds_tighter_than_trailing_or() {
    // a AND b OR c  ==  (a AND b) OR c
    let query = parse_query("SELECT x FROM ROOT WHERE a = 1 AND b = 2 OR c = 3").unwrap();
    match query.condition {
        Some(Condition::Or { children, .. }) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(&children[0], Condition::And { children, .. } if children.len() == 2));
            assert!(matches!(children[1], Condition::Leaf(_)));
        }
        other => panic!("Expected OR at the top, got {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_leading_or() {
    // a OR b AND c  ==  a OR (b AND c)
    let query = parse_query("SELECT x FROM ROOT WHERE a = 1 OR b = 2 AND c = 3").unwrap();
    match query.condition {
        Some(Condition::Or { children, .. }) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(children[0], Condition::Leaf(_)));
            assert!(matches!(&children[1], Condition::And { children, .. } if children.len() == 2));
        }
        other => panic!("Expected OR at the top, got {:?}", other),
    }
}

#[test]
fn test_same_operator_chains_flatten() {
    let query = parse_query("SELECT x FROM ROOT WHERE a = 1 AND b = 2 AND c = 3").unwrap();
    assert!(matches!(
        query.condition,
        Some(Condition::And { ref children, .. }) if children.len() == 3
    ));
}

#[test]
fn test_brackets_group() {
    let query =
        parse_query(r#"SELECT x FROM ROOT WHERE (a = 1 OR a = 5) AND b.x = "2""#).unwrap();
    match query.condition {
        Some(Condition::And { children, .. }) => {
            assert!(matches!(&children[0], Condition::Group { child, .. } if matches!(**child, Condition::Or { .. })));
            assert!(matches!(children[1], Condition::Leaf(_)));
        }
        other => panic!("Expected AND at the top, got {:?}", other),
    }
}

#[test]
fn test_double_not_cancels() {
    let query = parse_query("SELECT x FROM ROOT WHERE NOT NOT a = 1").unwrap();
    assert!(matches!(query.condition, Some(Condition::Leaf(ref c)) if !c.negated));
}

#[test]
fn test_not_before_group() {
    let query = parse_query("SELECT x FROM ROOT WHERE NOT (a = 1)").unwrap();
    assert!(matches!(query.condition, Some(Condition::Group { negated: true, .. })));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_select() {
    assert!(matches!(
        parse_err("PICK a FROM ROOT"),
        ParseError::Expected { expected: "SELECT", .. }
    ));
}

#[test]
fn test_missing_from() {
    assert!(matches!(
        parse_err("SELECT a WHERE a = 1"),
        ParseError::Expected { expected: "FROM", .. }
    ));
}

#[test]
fn test_incomplete_queries() {
    for text in [
        "",
        "SELECT",
        "SELECT a",
        "SELECT a LIMIT",
        "SELECT a FROM ROOT ORDER BY a",
        "SELECT a FROM ORDER",
        "SELECT a FROM ROOT ORDER",
        "SELECT a FROM ROOT WHERE a = 1 ORDER",
    ] {
        assert_eq!(parse_err(text), ParseError::Incomplete, "Failed for: {}", text);
    }
}

#[test]
fn test_invalid_select_identifier() {
    assert!(matches!(
        parse_err("SELECT 1a FROM ROOT"),
        ParseError::InvalidIdentifier(_)
    ));
}

#[test]
fn test_invalid_limit() {
    assert!(matches!(
        parse_err("SELECT a LIMIT many FROM ROOT"),
        ParseError::InvalidLimit(_)
    ));
}

#[test]
fn test_invalid_from_reference() {
    assert!(matches!(
        parse_err("SELECT a FROM a.b.c"),
        ParseError::InvalidElement { clause: "FROM", .. }
    ));
}

#[test]
fn test_bad_ordering_keyword() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT ORDER BY a UP"),
        ParseError::Expected { expected: "ASC or DESC", .. }
    ));
}

#[test]
fn test_trailing_tokens() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT ORDER BY a ASC extra"),
        ParseError::TrailingInput(_)
    ));
    assert!(matches!(
        parse_err("SELECT a FROM ROOT garbage"),
        ParseError::TrailingInput(_)
    ));
}

#[test]
fn test_unbalanced_brackets() {
    assert_eq!(
        parse_err("SELECT a FROM ROOT WHERE (a = 1"),
        ParseError::UnbalancedBrackets
    );
    assert_eq!(
        parse_err("SELECT a FROM ROOT WHERE a = 1)"),
        ParseError::UnbalancedBrackets
    );
}

#[test]
fn test_empty_brackets() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE ()"),
        ParseError::UnexpectedToken(_)
    ));
}

#[test]
fn test_dangling_operator() {
    assert_eq!(
        parse_err("SELECT a FROM ROOT WHERE a = 1 AND"),
        ParseError::IncompleteCondition
    );
    assert_eq!(
        parse_err("SELECT a FROM ROOT WHERE a = 1 OR ORDER BY a ASC"),
        ParseError::IncompleteCondition
    );
}

#[test]
fn test_empty_where() {
    assert_eq!(
        parse_err("SELECT a FROM ROOT WHERE"),
        ParseError::IncompleteCondition
    );
}

#[test]
fn test_misplaced_keywords_in_where() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE AND a = 1"),
        ParseError::UnexpectedToken(_)
    ));
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a = 1 NOT b = 2"),
        ParseError::UnexpectedToken(_)
    ));
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a = 1 b = 2"),
        ParseError::UnexpectedToken(_)
    ));
}

#[test]
fn test_missing_relational_operator() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a"),
        ParseError::Expected { expected: "relational operator", .. }
    ));
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a LIKE 1"),
        ParseError::Expected { expected: "relational operator", .. }
    ));
}

#[test]
fn test_missing_literal() {
    assert!(matches!(
        parse_err("SELECT a FROM ROOT WHERE a ="),
        ParseError::Expected { expected: "literal", .. }
    ));
}
