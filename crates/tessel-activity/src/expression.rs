//! Expression evaluation using minijinja.
//!
//! Expressions are evaluated against the scope produced by
//! [`WorkflowExecutionContext::expression_scope`]:
//!
//! ```text
//! input.amount * 2                  -> 42        (typed value)
//! output.greeting | upper           -> "HELLO"   (typed value)
//! Hello {{ input.name | title }}!   -> "Hello Ada!" (template, always a string)
//! ```

use async_trait::async_trait;
use minijinja::{Environment, UndefinedBehavior, Value};
use tessel_config::Expression;
use tokio_util::sync::CancellationToken;

use crate::context::WorkflowExecutionContext;
use crate::error::EvaluationError;

/// Evaluates deferred property expressions.
#[async_trait]
pub trait ExpressionEvaluator: Send + Sync {
  /// Evaluate `expression` against the current workflow state.
  async fn evaluate(
    &self,
    expression: &Expression,
    context: &WorkflowExecutionContext,
    cancel: &CancellationToken,
  ) -> Result<serde_json::Value, EvaluationError>;
}

/// Configuration for [`TemplateEvaluator`].
#[derive(Debug, Clone, Default)]
pub struct EvaluatorConfig {
  /// Fail on undefined variables and attributes instead of yielding null.
  pub strict_undefined: bool,
}

/// Minijinja-backed evaluator.
pub struct TemplateEvaluator {
  env: Environment<'static>,
}

impl TemplateEvaluator {
  pub fn new(config: EvaluatorConfig) -> Self {
    let mut env = Environment::new();
    if config.strict_undefined {
      env.set_undefined_behavior(UndefinedBehavior::Strict);
    }
    Self { env }
  }

  fn evaluate_in_scope(
    &self,
    expression: &Expression,
    scope: &Value,
  ) -> Result<serde_json::Value, EvaluationError> {
    let failed = |message: String| EvaluationError::Failed {
      expression: expression.source().to_string(),
      message,
    };

    if expression.is_template() {
      let rendered = self
        .env
        .render_str(expression.source(), scope.clone())
        .map_err(|e| failed(e.to_string()))?;
      return Ok(serde_json::Value::String(rendered));
    }

    let compiled = self
      .env
      .compile_expression(expression.source())
      .map_err(|e| failed(e.to_string()))?;
    let value = compiled
      .eval(scope.clone())
      .map_err(|e| failed(e.to_string()))?;

    serde_json::to_value(&value).map_err(|e| failed(format!("unrepresentable result: {}", e)))
  }
}

impl Default for TemplateEvaluator {
  fn default() -> Self {
    Self::new(EvaluatorConfig::default())
  }
}

#[async_trait]
impl ExpressionEvaluator for TemplateEvaluator {
  async fn evaluate(
    &self,
    expression: &Expression,
    context: &WorkflowExecutionContext,
    cancel: &CancellationToken,
  ) -> Result<serde_json::Value, EvaluationError> {
    if cancel.is_cancelled() {
      return Err(EvaluationError::Cancelled);
    }

    let scope = Value::from_serialize(context.expression_scope());
    self.evaluate_in_scope(expression, &scope)
  }
}
