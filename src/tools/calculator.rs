use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::Tool;
use crate::context::UserContext;
use crate::expr;

const INVALID_EQUATION: &str = "Invalid equation";

/// Tool evaluating arithmetic expressions.
///
/// Uses the restricted parser in [`crate::expr`]; the input is never executed.
pub struct CalculatorTool;

/// Evaluate `equation`, returning `"<equation> = <result>"` or `"Invalid equation"`
pub fn calculate(equation: &str) -> String {
    match expr::evaluate(equation) {
        Ok(result) => format!("{} = {}", equation, result),
        Err(e) => {
            debug!(equation, error = %e, "equation rejected");
            INVALID_EQUATION.to_string()
        }
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Calculate the result of an equation."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "equation": {
                    "type": "string",
                    "description": "The mathematical equation to calculate."
                }
            },
            "required": ["equation"]
        })
    }

    async fn execute(&self, params: Value, _user: Option<&UserContext>) -> Result<String> {
        let equation = params["equation"]
            .as_str()
            .context("missing 'equation' parameter")?;

        Ok(calculate(equation))
    }
}
