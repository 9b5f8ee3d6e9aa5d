//! Splits an expression into whitespace, numeric, unit and operator tokens.
//!
//! Classes are tried in that order at every position and the first match
//! wins. A whitespace, numeric or unit token is never followed directly by
//! another token of its own class, so `2m` reads as a number with an attached
//! unit rather than something else.

use tracing::{debug, trace};

use super::error::{CalcError, Result};
use super::operator::Operator;
use super::token::{Offset, Token, TokenKind};
use crate::units::unit::spelling_len;
use crate::units::UnitRegistry;

pub fn tokenize(input: &str, registry: &UnitRegistry) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input;
    let mut offset: Offset = 0;
    let mut previous: Option<TokenKind> = None;
    // A sign belongs to a literal only where an operand is expected.
    let mut expects_operand = true;

    while !rest.is_empty() {
        let (token, len) = next_token(rest, offset, previous, expects_operand, registry)?;
        trace!(%token, offset, "lexed token");

        match &token {
            Token::Whitespace(..) => {}
            Token::Operator(op, _) => expects_operand = *op != Operator::RightParen,
            _ => expects_operand = false,
        }
        previous = Some(token.kind());
        tokens.push(token);

        // Every token is ASCII, so bytes and characters agree.
        rest = &rest[len..];
        offset += len;
    }

    debug!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

fn next_token(
    rest: &str,
    offset: Offset,
    previous: Option<TokenKind>,
    expects_operand: bool,
    registry: &UnitRegistry,
) -> Result<(Token, usize)> {
    if previous != Some(TokenKind::Whitespace) {
        let len = whitespace_len(rest);
        if len > 0 {
            return Ok((Token::Whitespace(rest[..len].to_string(), offset), len));
        }
    }

    if previous != Some(TokenKind::Numeric) {
        let len = numeric_len(rest, expects_operand);
        if len > 0 {
            let value = rest[..len]
                .parse::<f64>()
                .map_err(|_| CalcError::SyntaxError(offset))?;
            return Ok((Token::Numeric(value, offset), len));
        }
    }

    if previous != Some(TokenKind::Unit) {
        let len = spelling_len(rest);
        if len > 0 {
            let symbol = &rest[..len];
            let unit = registry.get(symbol).ok_or_else(|| CalcError::UnknownUnit {
                symbol: symbol.to_string(),
                offset,
            })?;
            return Ok((Token::Unit(unit.clone(), offset), len));
        }
    }

    match rest.chars().next().and_then(Operator::from_char) {
        Some(op) => Ok((Token::Operator(op, offset), 1)),
        None => Err(CalcError::SyntaxError(offset)),
    }
}

fn whitespace_len(input: &str) -> usize {
    input
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count()
}

/// `[+-]?(\d+(\.\d+)?|\.\d+)([eE][+-]?\d+)?`, the sign only when `signed`.
fn numeric_len(input: &str, signed: bool) -> usize {
    let bytes = input.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if signed && matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let integer = digits(end);
    end += integer;
    if bytes.get(end) == Some(&b'.') && digits(end + 1) > 0 {
        end += 1 + digits(end + 1);
    } else if integer == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+') | Some(b'-')));
        let exponent = digits(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
