//! Postfix evaluation over a stack of plain numbers and physical values.

use std::fmt;
use tracing::{debug, trace};

use super::error::{CalcError, Result};
use super::format::format_number;
use super::operator::Operator;
use super::token::{Offset, Token};
use crate::units::{Dimension, PhysicalValue, Unit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Number(f64),
    Physical(PhysicalValue),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(value) => write!(f, "{}", format_number(*value)),
            Operand::Physical(value) => write!(f, "{}", value),
        }
    }
}

pub struct Step {
    pub operation: String,
    pub result: String,
}

/// Records every operator and unit application when `detailed_mode` is on.
pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: &Operand) {
        trace!(%operation, %result, "step");
        if self.detailed_mode {
            self.steps.push(Step {
                operation,
                result: result.to_string(),
            });
        }
    }
}

pub fn evaluate(postfix: Vec<Token>, trace: &mut EvaluationTrace) -> Result<Operand> {
    let mut stack: Vec<(Operand, Offset)> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Whitespace(..) => {}
            Token::Numeric(value, at) => stack.push((Operand::Number(value), at)),
            Token::Physical(value, at) => stack.push((Operand::Physical(value), at)),
            Token::Unit(unit, at) => {
                let popped = stack.pop();
                let operation = match &popped {
                    Some((operand, _)) => format!("{} {}", operand, unit.symbol),
                    None => format!("1 {}", unit.symbol),
                };
                let entry = apply_unit(popped, &unit, at)?;
                trace.add_step(operation, &entry.0);
                stack.push(entry);
            }
            Token::Operator(op, at) => {
                if op.is_paren() {
                    return Err(CalcError::UnknownOperator(at));
                }
                let (right, _) = stack
                    .pop()
                    .ok_or(CalcError::EmptyStackPoppingRightOperand(at))?;
                let (left, _) = stack
                    .pop()
                    .ok_or(CalcError::EmptyStackPoppingLeftOperand(at))?;
                let result = combine(op, left, right).ok_or(CalcError::UnknownObject(at))?;
                trace.add_step(format!("{} {} {}", left, op, right), &result);
                stack.push((result, at));
            }
        }
    }

    let mut remaining = stack.into_iter();
    match (remaining.next(), remaining.next()) {
        (None, _) => Err(CalcError::EmptyExpression(0)),
        (Some((result, _)), None) => {
            debug!(%result, "evaluated");
            Ok(result)
        }
        (Some(_), Some((_, at))) => Err(CalcError::TooManyOperands(at)),
    }
}

fn apply_unit(popped: Option<(Operand, Offset)>, unit: &Unit, at: Offset) -> Result<(Operand, Offset)> {
    match popped {
        Some((Operand::Number(value), from)) => {
            Ok((Operand::Physical(PhysicalValue::from_unit(value, unit)), from))
        }
        None => Ok((Operand::Physical(PhysicalValue::from_unit(1.0, unit)), at)),
        Some((Operand::Physical(_), _)) => Err(CalcError::UnknownObject(at)),
    }
}

/// Applies a binary operator; `None` when the operand kinds or dimensions
/// do not allow it.
fn combine(op: Operator, left: Operand, right: Operand) -> Option<Operand> {
    use Operand::{Number, Physical};

    // Exponentiation of physical values is not supported yet.
    let placeholder = Physical(PhysicalValue::new(0.0, Dimension::Unitless));

    match (left, right) {
        (Number(l), Number(r)) => match op {
            Operator::Power => Some(Number(l.powf(r))),
            Operator::Multiply => Some(Number(l * r)),
            Operator::Divide => Some(Number(l / r)),
            Operator::Add => Some(Number(l + r)),
            Operator::Subtract => Some(Number(l - r)),
            Operator::LeftParen | Operator::RightParen => None,
        },
        (Physical(l), Number(r)) => match op {
            Operator::Power => Some(placeholder),
            Operator::Multiply => Some(Physical(l.scale(r))),
            Operator::Divide => Some(Physical(l.divide_by(r))),
            Operator::Add => l.add_number(r).map(Number),
            Operator::Subtract => l.sub_number(r).map(Number),
            Operator::LeftParen | Operator::RightParen => None,
        },
        (Number(l), Physical(r)) => match op {
            Operator::Power => Some(placeholder),
            Operator::Multiply => Some(Physical(r.scale(l))),
            Operator::Divide => r.reciprocal_times(l).map(Physical),
            Operator::Add => r.add_number(l).map(Number),
            Operator::Subtract => r.number_sub(l).map(Number),
            Operator::LeftParen | Operator::RightParen => None,
        },
        (Physical(l), Physical(r)) => match op {
            Operator::Power => Some(placeholder),
            Operator::Multiply => l.checked_mul(r).map(Physical),
            Operator::Divide => l.checked_div(r).map(Physical),
            Operator::Add => l.checked_add(r).map(Physical),
            Operator::Subtract => l.checked_sub(r).map(Physical),
            Operator::LeftParen | Operator::RightParen => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitRegistry;

    fn num(value: f64, at: Offset) -> Token {
        Token::Numeric(value, at)
    }

    fn op(op: Operator, at: Offset) -> Token {
        Token::Operator(op, at)
    }

    fn phys(value: f64, symbol: &str, at: Offset) -> Token {
        let unit = UnitRegistry::builtin().get(symbol).unwrap();
        Token::Physical(PhysicalValue::from_unit(value, unit), at)
    }

    fn unit(symbol: &str, at: Offset) -> Token {
        Token::Unit(UnitRegistry::builtin().get(symbol).unwrap().clone(), at)
    }

    fn eval(postfix: Vec<Token>) -> Result<Operand> {
        evaluate(postfix, &mut EvaluationTrace::new(false))
    }

    #[test]
    fn right_operand_is_popped_first() {
        let result = eval(vec![num(8.0, 0), num(2.0, 2), op(Operator::Subtract, 1)]);
        assert_eq!(result, Ok(Operand::Number(6.0)));
        let result = eval(vec![num(2.0, 0), num(3.0, 2), op(Operator::Power, 1)]);
        assert_eq!(result, Ok(Operand::Number(8.0)));
    }

    #[test]
    fn missing_operands_are_reported_separately() {
        assert_eq!(
            eval(vec![op(Operator::Add, 3)]),
            Err(CalcError::EmptyStackPoppingRightOperand(3))
        );
        assert_eq!(
            eval(vec![num(1.0, 0), op(Operator::Add, 1)]),
            Err(CalcError::EmptyStackPoppingLeftOperand(1))
        );
    }

    #[test]
    fn parenthesis_in_postfix_is_unknown() {
        assert_eq!(
            eval(vec![num(1.0, 1), op(Operator::LeftParen, 0)]),
            Err(CalcError::UnknownOperator(0))
        );
    }

    #[test]
    fn exactly_one_operand_must_remain() {
        assert_eq!(eval(vec![]), Err(CalcError::EmptyExpression(0)));
        assert_eq!(
            eval(vec![num(2.0, 0), num(3.0, 2)]),
            Err(CalcError::TooManyOperands(2))
        );
    }

    #[test]
    fn same_dimension_adds() {
        let result = eval(vec![phys(1.0, "km", 0), phys(200.0, "m", 5), op(Operator::Add, 4)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(1200.0, Dimension::Length)))
        );
    }

    #[test]
    fn mismatched_dimensions_fail() {
        let result = eval(vec![phys(1.0, "m", 0), phys(1.0, "s", 5), op(Operator::Add, 3)]);
        assert_eq!(result, Err(CalcError::UnknownObject(3)));
    }

    #[test]
    fn multiplication_resolves_dimension() {
        let result = eval(vec![phys(3.0, "N", 0), phys(2.0, "m", 5), op(Operator::Multiply, 3)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(6.0, Dimension::Energy)))
        );
        let result = eval(vec![phys(2.0, "m^3", 0), phys(2.0, "m^3", 5), op(Operator::Multiply, 3)]);
        assert_eq!(result, Err(CalcError::UnknownObject(3)));
    }

    #[test]
    fn number_scales_physical_value() {
        let result = eval(vec![num(3.0, 0), phys(2.0, "m", 4), op(Operator::Multiply, 2)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(6.0, Dimension::Length)))
        );
        let result = eval(vec![phys(6.0, "m", 0), num(3.0, 4), op(Operator::Divide, 2)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(2.0, Dimension::Length)))
        );
        let result = eval(vec![num(1.0, 0), phys(2.0, "s", 4), op(Operator::Divide, 2)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(0.5, Dimension::Frequency)))
        );
    }

    #[test]
    fn number_plus_physical_needs_unitless() {
        let result = eval(vec![phys(50.0, "percent", 0), num(1.0, 4), op(Operator::Add, 2)]);
        assert_eq!(result, Ok(Operand::Number(1.5)));
        let result = eval(vec![num(1.0, 0), phys(1.0, "m", 4), op(Operator::Subtract, 2)]);
        assert_eq!(result, Err(CalcError::UnknownObject(2)));
    }

    #[test]
    fn power_of_physical_value_is_placeholder() {
        let result = eval(vec![phys(2.0, "m", 0), num(2.0, 4), op(Operator::Power, 2)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(0.0, Dimension::Unitless)))
        );
    }

    #[test]
    fn unit_token_converts_number_on_stack() {
        let result = eval(vec![num(3.0, 1), num(1.0, 3), op(Operator::Subtract, 2), unit("km", 6)]);
        assert_eq!(
            result,
            Ok(Operand::Physical(PhysicalValue::new(2000.0, Dimension::Length)))
        );
        assert_eq!(
            eval(vec![unit("s", 0)]),
            Ok(Operand::Physical(PhysicalValue::new(1.0, Dimension::Time)))
        );
        assert_eq!(
            eval(vec![phys(1.0, "m", 0), unit("s", 3)]),
            Err(CalcError::UnknownObject(3))
        );
    }

    #[test]
    fn division_by_zero_is_not_special_cased() {
        let result = eval(vec![num(1.0, 0), num(0.0, 2), op(Operator::Divide, 1)]);
        assert_eq!(result, Ok(Operand::Number(f64::INFINITY)));
    }

    #[test]
    fn trace_records_steps_when_detailed() {
        let mut trace = EvaluationTrace::new(true);
        let postfix = vec![num(2.0, 0), num(9.0, 2), op(Operator::Power, 1)];
        evaluate(postfix, &mut trace).unwrap();
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].operation, "2 ^ 9");
        assert_eq!(trace.steps[0].result, "512");

        let mut quiet = EvaluationTrace::new(false);
        evaluate(vec![num(1.0, 0), num(1.0, 2), op(Operator::Add, 1)], &mut quiet).unwrap();
        assert!(quiet.steps.is_empty());
    }
}
