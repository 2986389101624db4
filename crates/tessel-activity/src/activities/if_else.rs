use async_trait::async_trait;
use serde_json::Value;
use tessel_config::{Properties, PropertyValue};
use tessel_workflow::Outcome;

use crate::activity::{Activity, ActivityKind};
use crate::context::{ActivityExecutionContext, WorkflowExecutionContext};
use crate::error::ActivityError;
use crate::result::ActivityExecutionResult;

pub const TRUE: &str = "True";
pub const FALSE: &str = "False";

/// Evaluates `condition` and branches on its truthiness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IfElse {
  pub condition: PropertyValue,
}

impl ActivityKind for IfElse {
  const TYPE_NAME: &'static str = "if_else";
}

/// Jinja-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}

#[async_trait]
impl Activity for IfElse {
  fn activity_type(&self) -> &str {
    Self::TYPE_NAME
  }

  fn properties(&self) -> Properties {
    Properties::new().with("condition", self.condition.clone())
  }

  fn apply_properties(&mut self, properties: &Properties) -> Result<(), ActivityError> {
    if let Some(condition) = properties.get("condition") {
      self.condition = condition.clone();
    }
    Ok(())
  }

  fn possible_outcomes(
    &self,
    _workflow: &WorkflowExecutionContext,
    _activity: &ActivityExecutionContext,
  ) -> Vec<Outcome> {
    Outcome::list([TRUE, FALSE])
  }

  async fn execute(
    &self,
    workflow: &mut WorkflowExecutionContext,
    activity: &ActivityExecutionContext,
  ) -> Result<ActivityExecutionResult, ActivityError> {
    let value = activity.evaluate(&self.condition, workflow).await?;
    let taken = if is_truthy(&value) { TRUE } else { FALSE };
    workflow.set_last_result(Value::Bool(taken == TRUE));
    Ok(ActivityExecutionResult::outcomes([taken]))
  }
}
