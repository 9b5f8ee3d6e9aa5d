use super::error::{CalcError, Result};
use super::evaluator::Operand;
use super::lexer::tokenize;
use super::token::Token;
use crate::units::{Dimension, UnitRegistry};

/// Six decimals with trailing zeros trimmed; scientific notation for very
/// large or very small magnitudes.
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.abs() > 1e10 || x.abs() < 1e-5 {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}

/// Renders an evaluation result, converted to `display_unit` when one is named.
///
/// Without a display unit a physical value shows its magnitude in base units.
pub fn render_result(
    result: &Operand,
    display_unit: Option<&str>,
    registry: &UnitRegistry,
) -> Result<String> {
    let symbol = match display_unit.map(str::trim) {
        None | Some("") => {
            return Ok(match result {
                Operand::Number(value) => format_number(*value),
                Operand::Physical(value) => format_number(value.magnitude),
            })
        }
        Some(symbol) => symbol,
    };

    let unit = registry
        .get(symbol)
        .ok_or_else(|| CalcError::UnknownDisplayUnit(symbol.to_string()))?;
    let value = match result {
        Operand::Number(value) if unit.dimension == Dimension::Unitless => {
            Some(unit.from_base(*value))
        }
        Operand::Number(_) => None,
        Operand::Physical(value) => value.to_unit(unit),
    }
    .ok_or_else(|| CalcError::IncompatibleDisplayUnit(symbol.to_string()))?;

    Ok(format!("{} {}", format_number(value), unit.symbol))
}

/// Re-spaces an expression one blank between tokens, for history echo.
/// Input that does not lex comes back trimmed.
pub fn format_with_spaces(expr: &str, registry: &UnitRegistry) -> String {
    match tokenize(expr, registry) {
        Ok(tokens) => {
            let ends = tokens
                .iter()
                .skip(1)
                .map(Token::offset)
                .chain(std::iter::once(expr.len()));
            tokens
                .iter()
                .zip(ends)
                .filter(|(token, _)| !token.is_whitespace())
                .map(|(token, end)| &expr[token.offset()..end])
                .collect::<Vec<_>>()
                .join(" ")
        }
        Err(_) => expr.trim().to_string(),
    }
}
