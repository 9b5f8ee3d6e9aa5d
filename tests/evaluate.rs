use dimcalc::calc_engine::{CalcError, Calculator, Operand};
use dimcalc::units::{Dimension, PhysicalValue, UnitRegistry};
use dimcalc::evaluate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn arithmetic_with_precedence() {
    assert_eq!(evaluate("1+2^9*3+4/5-6^2", None), "1501.8");
    assert_eq!(evaluate("7*(2+3)", None), "35");
    assert_eq!(evaluate("2^3^2", None), "64");
    assert_eq!(evaluate("-2 * -3", None), "6");
}

#[test]
fn quantities_add_within_a_dimension() {
    assert_eq!(evaluate("1km + 200m", None), "1200");
    assert_eq!(evaluate("1km + 200m * (3 - 1)", None), "1400");
    assert_eq!(evaluate("1km + 200m", Some("km")), "1.2 km");
}

#[test]
fn offset_units_round_trip() {
    assert_eq!(evaluate("0 degC", Some("degF")), "32 degF");
    assert_eq!(evaluate("100 degC", Some("K")), "373.15 K");
}

#[test]
fn derived_dimensions() {
    assert_eq!(evaluate("100 m / 10 s", Some("km/h")), "36 km/h");
    assert_eq!(evaluate("2 N * 3 m", Some("J")), "6 J");
    assert_eq!(evaluate("(3-1) m", Some("cm")), "200 cm");
    assert_eq!(evaluate("2 * m", Some("m")), "2 m");
}

#[test]
fn mismatched_dimensions_are_rejected() {
    assert_eq!(evaluate("1m + 1s", None), "Unknown object at 3");
    let calc = Calculator::default();
    assert_eq!(calc.evaluate_value("1m + 1s"), Err(CalcError::UnknownObject(3)));
    assert_eq!(calc.evaluate_value("1 + 1 m"), Err(CalcError::UnknownObject(2)));
}

#[test]
fn unbalanced_parentheses() {
    assert_eq!(
        evaluate(")", None),
        "Right parenthesis without left parenthesis at 0"
    );
    assert_eq!(
        evaluate("(", None),
        "Left parenthesis without right parenthesis at 0"
    );
    let calc = Calculator::default();
    assert_eq!(
        calc.evaluate_value("(1 + 2"),
        Err(CalcError::UnmatchedLeftParenthesis(0))
    );
}

#[test]
fn whitespace_only_has_nothing_to_evaluate() {
    assert_eq!(evaluate("", None), "Nothing to calculate at 0");
    assert_eq!(evaluate(" \t  ", None), "Nothing to calculate at 0");
}

#[test]
fn unknown_units() {
    assert_eq!(evaluate("3 parsec", None), "Unknown unit 'parsec' at 2");
    assert_eq!(evaluate("3 m", Some("parsec")), "Unknown display unit 'parsec'");
    assert_eq!(evaluate("3 m", Some("s")), "Result cannot be shown in 's'");
}

#[test]
fn exponent_of_quantity_is_placeholder() {
    let calc = Calculator::default();
    assert_eq!(
        calc.evaluate_value("2 m ^ 2"),
        Ok(Operand::Physical(PhysicalValue::new(0.0, Dimension::Unitless)))
    );
}

#[test]
fn division_by_zero_yields_infinity() {
    assert_eq!(evaluate("1/0", None), "inf");
    assert_eq!(evaluate("0/0", None), "NaN");
}

#[test]
fn extra_units_from_json() {
    let mut registry = UnitRegistry::default();
    let added = registry
        .extend_from_json(r#"[{"symbol": "mi", "dimension": "length", "scale": 1609.344}]"#)
        .unwrap();
    assert_eq!(added, 1);

    let calc = Calculator::new(&registry);
    assert_eq!(calc.evaluate("1 mi - 609.344 m", Some("km")), "1 km");
}

const TOKENS: [&str; 15] = [
    "1", "+", "2", "^", "9", "*", "3", "+", "4", "/", "5", "-", "6", "^", "2",
];

proptest! {
    #[test]
    fn interior_whitespace_does_not_matter(gaps in prop::collection::vec("[ \t]{0,3}", TOKENS.len() + 1)) {
        let mut expression = String::new();
        for (gap, token) in gaps.iter().zip(TOKENS.iter()) {
            expression.push_str(gap);
            expression.push_str(token);
        }
        expression.push_str(&gaps[TOKENS.len()]);
        prop_assert_eq!(evaluate(&expression, None), "1501.8");
    }

    #[test]
    fn evaluation_is_idempotent(expression in "[0-9a-zA-Z+*/^() .-]{0,24}") {
        let calc = Calculator::default();
        let first = calc.evaluate(&expression, None);
        let second = calc.evaluate(&expression, None);
        prop_assert_eq!(first, second);
    }
}
