use async_trait::async_trait;
use tessel_config::{Properties, PropertyValue};
use tessel_workflow::Outcome;

use super::{DONE, literal_property, require_name};
use crate::activity::{Activity, ActivityKind};
use crate::context::{ActivityExecutionContext, WorkflowExecutionContext};
use crate::error::ActivityError;
use crate::result::ActivityExecutionResult;

/// Evaluates `value` and stores it as a workflow-level property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetProperty {
  pub property_name: String,
  pub value: PropertyValue,
}

impl ActivityKind for SetProperty {
  const TYPE_NAME: &'static str = "set_property";
}

#[async_trait]
impl Activity for SetProperty {
  fn activity_type(&self) -> &str {
    Self::TYPE_NAME
  }

  fn properties(&self) -> Properties {
    Properties::new()
      .with("property_name", PropertyValue::literal(self.property_name.clone()))
      .with("value", self.value.clone())
  }

  fn apply_properties(&mut self, properties: &Properties) -> Result<(), ActivityError> {
    if let Some(name) = literal_property(properties, Self::TYPE_NAME, "property_name")? {
      self.property_name = name;
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
    let name = require_name(&self.property_name, Self::TYPE_NAME, "property_name")?;
    let value = activity.evaluate(&self.value, workflow).await?;
    workflow.set_property(name, value);
    Ok(ActivityExecutionResult::outcomes([DONE]))
  }
}
