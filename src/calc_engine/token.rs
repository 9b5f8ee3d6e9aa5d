use std::fmt;

use super::operator::Operator;
use crate::units::{PhysicalValue, Unit};

/// Zero-based character position in the input expression.
pub type Offset = usize;

/// A classified fragment of the input, tagged with where it starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Whitespace(String, Offset),
    Numeric(f64, Offset),
    Unit(Unit, Offset),
    Operator(Operator, Offset),
    /// A literal folded with its unit by the postfix converter.
    Physical(PhysicalValue, Offset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Numeric,
    Unit,
    Operator,
    Physical,
}

impl Token {
    pub fn offset(&self) -> Offset {
        match self {
            Token::Whitespace(_, at)
            | Token::Numeric(_, at)
            | Token::Unit(_, at)
            | Token::Operator(_, at)
            | Token::Physical(_, at) => *at,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Whitespace(..) => TokenKind::Whitespace,
            Token::Numeric(..) => TokenKind::Numeric,
            Token::Unit(..) => TokenKind::Unit,
            Token::Operator(..) => TokenKind::Operator,
            Token::Physical(..) => TokenKind::Physical,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind() == TokenKind::Whitespace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace(text, _) => write!(f, "{:?}", text),
            Token::Numeric(value, _) => write!(f, "{}", value),
            Token::Unit(unit, _) => write!(f, "{}", unit.symbol),
            Token::Operator(op, _) => write!(f, "{}", op),
            Token::Physical(value, _) => write!(f, "{}", value),
        }
    }
}
