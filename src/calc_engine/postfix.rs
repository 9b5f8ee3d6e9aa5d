//! Infix to postfix conversion (shunting-yard).
//!
//! Numeric literals wait on a small pending stack instead of going straight
//! to the output: a unit that follows folds the most recent literal into a
//! physical value, and any operator flushes the literals as plain numbers.

use tracing::{debug, trace};

use super::error::{CalcError, Result};
use super::operator::Operator;
use super::token::{Offset, Token};
use crate::units::PhysicalValue;

pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<(Operator, Offset)> = Vec::new();
    let mut pending: Vec<(f64, Offset)> = Vec::new();
    let mut after_group = false;

    for token in tokens {
        if token.is_whitespace() {
            continue;
        }
        let closes_group = matches!(token, Token::Operator(Operator::RightParen, _));

        match token {
            Token::Whitespace(..) => {}
            Token::Physical(..) => output.push(token),
            Token::Numeric(value, at) => pending.push((value, at)),
            Token::Unit(unit, at) => match pending.pop() {
                Some((value, literal_at)) => {
                    output.push(Token::Physical(PhysicalValue::from_unit(value, &unit), literal_at));
                }
                None if output.is_empty() => return Err(CalcError::SyntaxError(at)),
                // `(3-1) m`: the evaluator applies the unit to the group's result.
                None if after_group => output.push(Token::Unit(unit, at)),
                None => output.push(Token::Physical(PhysicalValue::from_unit(1.0, &unit), at)),
            },
            Token::Operator(op, at) => {
                flush_pending(&mut pending, &mut output);
                match op {
                    Operator::LeftParen => operators.push((op, at)),
                    Operator::RightParen => close_group(&mut operators, &mut output, at)?,
                    _ => {
                        while let Some(&(top, top_at)) = operators.last() {
                            if top.is_paren() || top.precedence() < op.precedence() {
                                break;
                            }
                            operators.pop();
                            output.push(Token::Operator(top, top_at));
                        }
                        operators.push((op, at));
                    }
                }
            }
        }
        after_group = closes_group;
    }

    flush_pending(&mut pending, &mut output);
    while let Some((op, at)) = operators.pop() {
        if op == Operator::LeftParen {
            return Err(CalcError::UnmatchedLeftParenthesis(at));
        }
        output.push(Token::Operator(op, at));
    }

    debug!(len = output.len(), "converted to postfix");
    trace!(postfix = %render(&output));
    Ok(output)
}

fn flush_pending(pending: &mut Vec<(f64, Offset)>, output: &mut Vec<Token>) {
    output.extend(pending.drain(..).map(|(value, at)| Token::Numeric(value, at)));
}

fn close_group(
    operators: &mut Vec<(Operator, Offset)>,
    output: &mut Vec<Token>,
    at: Offset,
) -> Result<()> {
    while let Some((op, op_at)) = operators.pop() {
        if op == Operator::LeftParen {
            return Ok(());
        }
        output.push(Token::Operator(op, op_at));
    }
    Err(CalcError::UnmatchedRightParenthesis(at))
}

/// Space-separated rendering of a token sequence.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::lexer::tokenize;
    use crate::units::{Dimension, UnitRegistry};
    use pretty_assertions::assert_eq;

    fn postfix(input: &str) -> Result<Vec<Token>> {
        to_postfix(tokenize(input, UnitRegistry::builtin())?)
    }

    fn rendered(input: &str) -> String {
        render(&postfix(input).unwrap())
    }

    #[test]
    fn precedence_reorders_operators() {
        assert_eq!(rendered("1+2^9*3+4/5-6^2"), "1 2 9 ^ 3 * + 4 5 / + 6 2 ^ -");
        assert_eq!(rendered("7*(2+3)"), "7 2 3 + *");
    }

    #[test]
    fn whitespace_is_dropped() {
        assert_eq!(
            rendered("1 + 2 ^ 9 * 3 + 4 / 5 - 6 ^ 2"),
            rendered("1+2^9*3+4/5-6^2")
        );
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(rendered("8-3-2"), "8 3 - 2 -");
        assert_eq!(rendered("2^3^2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn literal_and_unit_fold_into_physical_value() {
        assert_eq!(
            postfix("1km + 200m").unwrap(),
            vec![
                Token::Physical(PhysicalValue::new(1000.0, Dimension::Length), 0),
                Token::Physical(PhysicalValue::new(200.0, Dimension::Length), 6),
                Token::Operator(Operator::Add, 4),
            ]
        );
    }

    #[test]
    fn unit_after_operator_gets_implicit_magnitude() {
        assert_eq!(
            postfix("2 * m").unwrap(),
            vec![
                Token::Numeric(2.0, 0),
                Token::Physical(PhysicalValue::new(1.0, Dimension::Length), 4),
                Token::Operator(Operator::Multiply, 2),
            ]
        );
    }

    #[test]
    fn unit_after_group_applies_to_the_group() {
        let tokens = postfix("(3-1) m").unwrap();
        assert_eq!(render(&tokens), "3 1 - m");
        assert!(matches!(tokens[3], Token::Unit(ref u, 6) if u.symbol == "m"));
    }

    #[test]
    fn bare_unit_is_a_syntax_error() {
        assert_eq!(postfix("m"), Err(CalcError::SyntaxError(0)));
        assert_eq!(postfix(" (km)"), Err(CalcError::SyntaxError(2)));
    }

    #[test]
    fn right_parenthesis_without_left() {
        assert_eq!(postfix(")"), Err(CalcError::UnmatchedRightParenthesis(0)));
        assert_eq!(postfix("1 + 2)"), Err(CalcError::UnmatchedRightParenthesis(5)));
    }

    #[test]
    fn left_parenthesis_without_right() {
        assert_eq!(postfix("("), Err(CalcError::UnmatchedLeftParenthesis(0)));
        assert_eq!(postfix("2 * (1 + (3)"), Err(CalcError::UnmatchedLeftParenthesis(4)));
    }

    #[test]
    fn pending_literals_flush_in_input_order() {
        assert_eq!(rendered("2 3"), "2 3");
    }

    #[test]
    fn physical_tokens_pass_through() {
        let value = Token::Physical(PhysicalValue::new(5.0, Dimension::Mass), 0);
        assert_eq!(to_postfix(vec![value.clone()]).unwrap(), vec![value]);
    }
}
