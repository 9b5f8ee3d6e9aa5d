use std::fmt;

/// Binding strength of an operator. Variants are ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Group,
    Additive,
    Multiplicative,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    LeftParen,
    RightParen,
    Power,
    Multiply,
    Divide,
    Add,
    Subtract,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::LeftParen,
        Operator::RightParen,
        Operator::Power,
        Operator::Multiply,
        Operator::Divide,
        Operator::Add,
        Operator::Subtract,
    ];

    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '(' => Some(Operator::LeftParen),
            ')' => Some(Operator::RightParen),
            '^' => Some(Operator::Power),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::LeftParen => '(',
            Operator::RightParen => ')',
            Operator::Power => '^',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Operator::LeftParen | Operator::RightParen => Precedence::Group,
            Operator::Add | Operator::Subtract => Precedence::Additive,
            Operator::Multiply | Operator::Divide => Precedence::Multiplicative,
            Operator::Power => Precedence::Power,
        }
    }

    pub fn is_paren(self) -> bool {
        self.precedence() == Precedence::Group
    }

    pub fn describe(self) -> &'static str {
        match self {
            Operator::LeftParen => "Open group",
            Operator::RightParen => "Close group",
            Operator::Power => "Exponentiation",
            Operator::Multiply => "Multiplication",
            Operator::Divide => "Division",
            Operator::Add => "Addition",
            Operator::Subtract => "Subtraction",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_char(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_char('%'), None);
    }

    #[test]
    fn precedence_order() {
        assert_eq!(Operator::LeftParen.precedence(), Precedence::Group);
        assert!(Operator::Add.precedence() < Operator::Multiply.precedence());
        assert!(Operator::Divide.precedence() < Operator::Power.precedence());
        assert_eq!(Operator::Add.precedence(), Operator::Subtract.precedence());
        assert!(Operator::RightParen.is_paren());
    }
}
