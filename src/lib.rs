//! Unit-aware expression calculator.
//!
//! Expressions mix plain numbers, physical quantities written as a literal
//! followed by a unit (`1km`, `3 m/s^2`, `20 degC`) and the operators
//! `+ - * / ^` with parentheses. Quantities carry their dimension through the
//! arithmetic, so `1km + 200m` is `1200` (metres) while `1m + 1s` is an error.
//!
//! ```
//! assert_eq!(dimcalc::evaluate("1km + 200m", Some("km")), "1.2 km");
//! assert_eq!(dimcalc::evaluate("7*(2+3)", None), "35");
//! ```

pub mod calc_engine;
pub mod units;

pub use calc_engine::{CalcError, Calculator, Operand};
pub use units::{Dimension, PhysicalValue, Unit, UnitRegistry};

/// Evaluates `expression` with the built-in unit table.
///
/// Never fails: errors are returned as their message, e.g.
/// `"Right parenthesis without left parenthesis at 0"`.
pub fn evaluate(expression: &str, display_unit: Option<&str>) -> String {
    Calculator::default().evaluate(expression, display_unit)
}
