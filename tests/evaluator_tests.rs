// tests/evaluator_tests.rs

use roxmltree::Document;
use xqr::{EvalError, Evaluator, parser::parse_query};

const ITEM: &str = r#"<item id="7" kind="tool"><name>hammer drill</name><price>25</price><stock>0</stock><tags><tag>power</tag></tags></item>"#;

fn eval(condition: &str, xml: &str) -> Result<bool, EvalError> {
    let query = parse_query(&format!("SELECT item FROM ROOT WHERE {}", condition))
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", condition, e));
    let doc = Document::parse(xml).unwrap();
    Evaluator::new().matches(query.condition.as_ref().unwrap(), doc.root_element())
}

fn holds(condition: &str) -> bool {
    eval(condition, ITEM).unwrap()
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_numeric_comparisons() {
    assert!(holds("price = 25"));
    assert!(holds("price = 25.0"));
    assert!(holds("price > 9"));
    assert!(holds("price < 100"));
    assert!(!holds("price < 25"));
    assert!(!holds("price > 25"));
}

#[test]
fn test_numbers_compare_numerically_not_lexically() {
    // "25" < "9" as strings, but 25 > 9 as numbers
    assert!(holds("price > 9"));
}

#[test]
fn test_string_comparisons() {
    assert!(holds(r#"name = "hammer drill""#));
    assert!(holds(r#"name > "hammer""#));
    assert!(holds(r#"name < "i""#));
    assert!(holds(r#"name CONTAINS "mer d""#));
    assert!(!holds(r#"name CONTAINS "saw""#));
}

#[test]
fn test_attribute_comparisons() {
    assert!(holds("item.id = 7"));
    assert!(holds(r#".kind = "tool""#));
    assert!(!holds("item.missing = 7"));
}

#[test]
fn test_mixed_types_are_always_false() {
    for op in ["=", ">", "<"] {
        assert!(!holds(&format!(r#"price {} "25""#, op)), "op {}", op);
        assert!(!holds(&format!("name {} 5", op)), "op {}", op);
    }
    assert!(!holds(r#"price CONTAINS "2""#));
}

#[test]
fn test_missing_element_is_false_even_under_not() {
    assert!(!holds("weight > 1"));
    assert!(holds("NOT weight > 1"));
}

#[test]
fn test_descendant_lookup() {
    assert!(holds(r#"tag = "power""#));
}

#[test]
fn test_text_of_element_with_children_is_format_error() {
    assert!(matches!(
        eval(r#"tags = "power""#, ITEM),
        Err(EvalError::NotText { ref element }) if element == "tags"
    ));
}

// ============================================================================
// Connectives
// ============================================================================

#[test]
fn test_and_or() {
    assert!(holds("price > 10 AND stock = 0"));
    assert!(!holds("price > 10 AND stock > 0"));
    assert!(holds("price > 100 OR stock = 0"));
    assert!(!holds("price > 100 OR stock > 0"));
}

#[test]
fn test_precedence_matches_explicit_brackets() {
    // Every combination of truth values for A, B, C
    let atoms = [("price > 100", false), ("price = 25", true)];
    for (a, va) in atoms {
        for (b, vb) in atoms {
            for (c, vc) in atoms {
                let implicit = holds(&format!("{} AND {} OR {}", a, b, c));
                let explicit = holds(&format!("({} AND {}) OR {}", a, b, c));
                assert_eq!(implicit, explicit);
                assert_eq!(implicit, (va && vb) || vc);

                let implicit = holds(&format!("{} OR {} AND {}", a, b, c));
                let explicit = holds(&format!("{} OR ({} AND {})", a, b, c));
                assert_eq!(implicit, explicit);
                assert_eq!(implicit, va || (vb && vc));
            }
        }
    }
}

#[test]
fn test_double_negation() {
    for condition in ["price = 25", "price = 26", "weight = 1"] {
        assert_eq!(holds(condition), holds(&format!("NOT NOT {}", condition)));
    }
}

#[test]
fn test_negated_group() {
    assert!(!holds("NOT (price = 25 OR stock = 1)"));
    assert!(holds("NOT (price = 26 OR stock = 1)"));
    assert!(holds("NOT (price = 25 AND stock = 1) AND NOT stock = 3"));
}

#[test]
fn test_nested_groups() {
    assert!(holds("((price = 25) AND (stock = 0 OR stock = 1))"));
    assert!(!holds("price = 25 AND (stock = 1 OR (name CONTAINS \"saw\"))"));
}

#[test]
fn test_short_circuit_skips_format_errors() {
    // The second operand would fail on <tags>, but is never evaluated
    assert!(eval(r#"price = 25 OR tags = "x""#, ITEM).unwrap());
    assert!(!eval(r#"price = 1 AND tags = "x""#, ITEM).unwrap());
    assert!(eval(r#"price = 1 OR tags = "x""#, ITEM).is_err());
}
