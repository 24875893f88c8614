//! Tests for equation classification and token tagging.

use inkline_core::classify::{EquationKind, TokenKind, classify_line, classify_token};
use inkline_core::geometry::BBox;
use inkline_core::layout::{Line, Token};

fn analyze(texts: &[&str]) -> inkline_core::classify::ClassifiedLine {
    let tokens = texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = 30.0 * i as f64;
            Token::from_rect(*t, x, 40.0, x + 20.0, 70.0).unwrap()
        })
        .collect();
    classify_line(Line::from_tokens(tokens))
}

#[test]
fn test_linear_equation() {
    let c = analyze(&["3", "x", "+", "2", "=", "10"]);
    assert_eq!(c.kind, EquationKind::Equation);
    assert_eq!(c.components.numbers, vec!["3", "2", "10"]);
    assert_eq!(c.components.operators, vec!["+", "="]);
    assert_eq!(c.bounding_box, BBox::new(0.0, 40.0, 170.0, 70.0).unwrap());
}

#[test]
fn test_equals_alone_is_equation() {
    assert_eq!(analyze(&["3", "x", "=", "8"]).kind, EquationKind::Equation);
}

#[test]
fn test_number_sequence() {
    let c = analyze(&["5", "7"]);
    assert_eq!(c.kind, EquationKind::NumberSequence);
    assert!(c.components.operators.is_empty());
}

#[test]
fn test_expression_and_unknown() {
    assert_eq!(analyze(&["12", "/", "4"]).kind, EquationKind::Expression);
    assert_eq!(analyze(&["-", "x"]).kind, EquationKind::Expression);
    assert_eq!(analyze(&["x_1", "≥", "y"]).kind, EquationKind::Unknown);
}

#[test]
fn test_rule_sets_diverge() {
    // The equation extractor ignores subscripted variables and Unicode
    // operators; the token tagger accepts both.
    let c = analyze(&["x_1", "×", "3"]);
    assert!(c.components.variables.is_empty());
    assert!(c.components.operators.is_empty());
    assert_eq!(c.kind, EquationKind::NumberSequence);
    assert_eq!(classify_token("x_1"), TokenKind::Variable);
    assert_eq!(classify_token("×"), TokenKind::Operator);
}

#[test]
fn test_classified_line_json_shape() {
    let c = analyze(&["a", "=", "1"]);
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["reconstructedText"], "a = 1");
    assert_eq!(json["type"], "equation");
    assert_eq!(json["components"]["variables"][0], "a");
    assert_eq!(json["boundingBox"]["xMax"], 80.0);
    assert_eq!(json["tokens"][1]["box"]["xMin"], 30.0);
    assert_eq!(json["tokens"][1]["center"]["y"], 55.0);
}
