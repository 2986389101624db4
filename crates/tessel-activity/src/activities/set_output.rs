use async_trait::async_trait;
use tessel_config::{Properties, PropertyValue};
use tessel_workflow::Outcome;
use tracing::debug;

use super::{DONE, literal_property, require_name};
use crate::activity::{Activity, ActivityKind};
use crate::context::{ActivityExecutionContext, WorkflowExecutionContext};
use crate::error::ActivityError;
use crate::result::ActivityExecutionResult;

/// Evaluates `value` and publishes it under `output_name` in the workflow
/// output mapping. Always finishes with `Done`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOutput {
  pub output_name: String,
  pub value: PropertyValue,
}

impl ActivityKind for SetOutput {
  const TYPE_NAME: &'static str = "set_output";
}

#[async_trait]
impl Activity for SetOutput {
  fn activity_type(&self) -> &str {
    Self::TYPE_NAME
  }

  fn properties(&self) -> Properties {
    Properties::new()
      .with("output_name", PropertyValue::literal(self.output_name.clone()))
      .with("value", self.value.clone())
  }

  fn apply_properties(&mut self, properties: &Properties) -> Result<(), ActivityError> {
    if let Some(name) = literal_property(properties, Self::TYPE_NAME, "output_name")? {
      self.output_name = name;
    }
    if let Some(value) = properties.get("value") {
      self.value = value.clone();
    }
    Ok(())
  }

  fn possible_outcomes(
    &self,
    _workflow: &WorkflowExecutionContext,
    _activity: &ActivityExecutionContext,
  ) -> Vec<Outcome> {
    Outcome::list([DONE])
  }

  async fn execute(
    &self,
    workflow: &mut WorkflowExecutionContext,
    activity: &ActivityExecutionContext,
  ) -> Result<ActivityExecutionResult, ActivityError> {
    let output_name = require_name(&self.output_name, Self::TYPE_NAME, "output_name")?;
    let value = activity.evaluate(&self.value, workflow).await?;

    debug!(activity_id = %activity.activity_id(), output_name, "output set");
    workflow.set_output(output_name, value);

    Ok(ActivityExecutionResult::outcomes([DONE]))
  }
}
