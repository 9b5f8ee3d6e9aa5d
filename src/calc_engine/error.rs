use thiserror::Error;

use super::token::Offset;

pub type Result<T> = std::result::Result<T, CalcError>;

/// Why an expression could not be evaluated.
///
/// Expression errors carry the character offset they refer to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Syntax error at {0}")]
    SyntaxError(Offset),

    #[error("Unknown unit '{symbol}' at {offset}")]
    UnknownUnit { symbol: String, offset: Offset },

    #[error("Right parenthesis without left parenthesis at {0}")]
    UnmatchedRightParenthesis(Offset),

    #[error("Left parenthesis without right parenthesis at {0}")]
    UnmatchedLeftParenthesis(Offset),

    /// Reserved: float division by zero currently yields inf or NaN.
    #[error("Division by zero at {0}")]
    DivisionByZero(Offset),

    #[error("Stack is empty while popping right operand at {0}")]
    EmptyStackPoppingRightOperand(Offset),

    #[error("Stack is empty while popping left operand at {0}")]
    EmptyStackPoppingLeftOperand(Offset),

    /// Reserved.
    #[error("Stack is empty while popping operator at {0}")]
    EmptyStackPoppingOperator(Offset),

    #[error("Unknown operator at {0}")]
    UnknownOperator(Offset),

    #[error("Unknown object at {0}")]
    UnknownObject(Offset),

    #[error("Too many operands at {0}")]
    TooManyOperands(Offset),

    #[error("Nothing to calculate at {0}")]
    EmptyExpression(Offset),

    #[error("Unknown display unit '{0}'")]
    UnknownDisplayUnit(String),

    #[error("Result cannot be shown in '{0}'")]
    IncompatibleDisplayUnit(String),
}

impl CalcError {
    /// Position in the expression this error refers to, if any.
    pub fn offset(&self) -> Option<Offset> {
        match self {
            CalcError::SyntaxError(at)
            | CalcError::UnknownUnit { offset: at, .. }
            | CalcError::UnmatchedRightParenthesis(at)
            | CalcError::UnmatchedLeftParenthesis(at)
            | CalcError::DivisionByZero(at)
            | CalcError::EmptyStackPoppingRightOperand(at)
            | CalcError::EmptyStackPoppingLeftOperand(at)
            | CalcError::EmptyStackPoppingOperator(at)
            | CalcError::UnknownOperator(at)
            | CalcError::UnknownObject(at)
            | CalcError::TooManyOperands(at)
            | CalcError::EmptyExpression(at) => Some(*at),
            CalcError::UnknownDisplayUnit(_) | CalcError::IncompatibleDisplayUnit(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offset() {
        assert_eq!(CalcError::SyntaxError(3).to_string(), "Syntax error at 3");
        assert_eq!(
            CalcError::UnmatchedRightParenthesis(0).to_string(),
            "Right parenthesis without left parenthesis at 0"
        );
        assert_eq!(
            CalcError::UnknownUnit {
                symbol: "MB".into(),
                offset: 2
            }
            .to_string(),
            "Unknown unit 'MB' at 2"
        );
    }

    #[test]
    fn offsets() {
        assert_eq!(CalcError::UnknownObject(7).offset(), Some(7));
        assert_eq!(CalcError::UnknownDisplayUnit("x".into()).offset(), None);
    }
}
