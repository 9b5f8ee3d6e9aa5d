//! Input handling shared by the one-shot and interactive front-ends.

use std::time::{Duration, Instant};

use dimcalc::calc_engine::{format_with_spaces, CalcError, Calculator, EvaluationTrace, Operand, Step};
use dimcalc::units::UnitRegistry;

/// What a line of user input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Request<'a> {
    Quit,
    Clear,
    Help,
    Units,
    /// `details` with nothing to evaluate.
    MissingExpression,
    Evaluate {
        expression: &'a str,
        display_unit: Option<&'a str>,
        detailed: bool,
    },
}

const DETAILS: &str = "details";

/// Classifies a line of input; `None` for a blank line.
pub fn parse_request(input: &str) -> Option<Request<'_>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let command = match input.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Some(Request::Quit),
        "clear" | "reset" => Some(Request::Clear),
        "help" => Some(Request::Help),
        "units" => Some(Request::Units),
        DETAILS => Some(Request::MissingExpression),
        _ => None,
    };
    if command.is_some() {
        return command;
    }

    let (detailed, input) = match strip_details(input) {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    if input.is_empty() {
        return Some(Request::MissingExpression);
    }

    let (expression, display_unit) = match input.split_once("->") {
        Some((expression, unit)) => {
            let unit = unit.trim();
            (expression.trim(), (!unit.is_empty()).then_some(unit))
        }
        None => (input, None),
    };
    if expression.is_empty() {
        return Some(Request::MissingExpression);
    }

    Some(Request::Evaluate {
        expression,
        display_unit,
        detailed,
    })
}

/// Removes a leading `details ` or trailing ` details`, ignoring case.
fn strip_details(input: &str) -> Option<&str> {
    let n = DETAILS.len();
    let bytes = input.as_bytes();
    if bytes.len() > n && bytes[..n].eq_ignore_ascii_case(DETAILS.as_bytes()) && bytes[n] == b' ' {
        return Some(input[n..].trim());
    }
    let split = bytes.len().checked_sub(n + 1)?;
    if bytes[split] == b' ' && bytes[split + 1..].eq_ignore_ascii_case(DETAILS.as_bytes()) {
        return Some(input[..split].trim());
    }
    None
}

/// One evaluated expression, ready for display.
pub struct Outcome {
    /// The expression re-spaced one blank between tokens.
    pub expression: String,
    pub display_unit: Option<String>,
    pub result: Result<String, CalcError>,
    /// The result in its dimension's favorite unit, when no display unit was asked for.
    pub favorite: Option<String>,
    pub steps: Vec<Step>,
    pub detailed: bool,
    pub duration: Duration,
}

impl Outcome {
    /// `expr = result`, with the favorite-unit rendering in parentheses.
    pub fn summary(&self) -> String {
        let target = match &self.display_unit {
            Some(unit) => format!("{} -> {}", self.expression, unit),
            None => self.expression.clone(),
        };
        match (&self.result, &self.favorite) {
            (Ok(value), Some(favorite)) => format!("{} = {} ({})", target, value, favorite),
            (Ok(value), None) => format!("{} = {}", target, value),
            (Err(e), _) => format!("{} = Error: {}", target, e),
        }
    }
}

pub fn run(
    calc: &Calculator<'_>,
    expression: &str,
    display_unit: Option<&str>,
    detailed: bool,
) -> Outcome {
    let start = Instant::now();
    let mut trace = EvaluationTrace::new(detailed);
    let value = calc.evaluate_traced(expression, &mut trace);
    let result = value
        .as_ref()
        .map_err(Clone::clone)
        .and_then(|value| calc.render(value, display_unit));
    let duration = start.elapsed();

    let favorite = match (&value, display_unit) {
        (Ok(Operand::Physical(value)), None) => value.in_favorite_unit(calc.registry()),
        _ => None,
    };

    Outcome {
        expression: format_with_spaces(expression, calc.registry()),
        display_unit: display_unit.map(str::to_string),
        result,
        favorite,
        steps: trace.steps,
        detailed,
        duration,
    }
}

/// One line per dimension: `length: cm, km, m*, mm`, the favorite starred.
pub fn unit_listing(registry: &UnitRegistry) -> Vec<String> {
    registry
        .by_dimension()
        .into_iter()
        .map(|(dimension, units)| {
            let symbols: Vec<String> = units
                .iter()
                .map(|unit| {
                    if unit.favorite {
                        format!("{}*", unit.symbol)
                    } else {
                        unit.symbol.clone()
                    }
                })
                .collect();
            format!("{}: {}", dimension, symbols.join(", "))
        })
        .collect()
}
