//! Expression engine: lexing, infix to postfix conversion and evaluation of
//! unit-aware arithmetic.

pub mod error;
pub mod evaluator;
pub mod format;
pub mod lexer;
pub mod operator;
pub mod postfix;
pub mod token;

pub use error::{CalcError, Result};
pub use evaluator::{EvaluationTrace, Operand, Step};
pub use format::{format_number, format_with_spaces, render_result};
pub use operator::{Operator, Precedence};
pub use token::{Offset, Token};

use tracing::instrument;

use crate::units::UnitRegistry;

/// Evaluates expressions against one unit registry.
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'r> {
    registry: &'r UnitRegistry,
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Calculator::new(UnitRegistry::builtin())
    }
}

impl<'r> Calculator<'r> {
    pub fn new(registry: &'r UnitRegistry) -> Self {
        Calculator { registry }
    }

    pub fn registry(&self) -> &'r UnitRegistry {
        self.registry
    }

    /// Evaluates `expression` and renders the result, or the error message.
    #[instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, expression: &str, display_unit: Option<&str>) -> String {
        self.evaluate_value(expression)
            .and_then(|result| render_result(&result, display_unit, self.registry))
            .unwrap_or_else(|err| err.to_string())
    }

    pub fn evaluate_value(&self, expression: &str) -> Result<Operand> {
        self.evaluate_traced(expression, &mut EvaluationTrace::new(false))
    }

    /// Like [`Calculator::evaluate_value`], recording each operator and unit
    /// application into `trace`.
    #[instrument(level = "debug", skip(self, trace))]
    pub fn evaluate_traced(&self, expression: &str, trace: &mut EvaluationTrace) -> Result<Operand> {
        let tokens = lexer::tokenize(expression, self.registry)?;
        let postfix = postfix::to_postfix(tokens)?;
        evaluator::evaluate(postfix, trace)
    }

    pub fn render(&self, result: &Operand, display_unit: Option<&str>) -> Result<String> {
        render_result(result, display_unit, self.registry)
    }
}
