//! Execution contexts handed to activities.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tessel_config::{Properties, PropertyValue};
use tessel_workflow::ActivityRecord;
use tokio_util::sync::CancellationToken;

use crate::error::ActivityError;
use crate::expression::ExpressionEvaluator;

/// Mutable state shared by every activity of one workflow run.
///
/// Only one activity executes against a context at a time; the engine owning
/// the context guarantees that exclusivity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExecutionContext {
  workflow_type_id: String,
  execution_id: String,
  input: Map<String, Value>,
  output: Map<String, Value>,
  properties: Map<String, Value>,
  last_result: Option<Value>,
}

impl WorkflowExecutionContext {
  pub fn new(
    workflow_type_id: impl Into<String>,
    execution_id: impl Into<String>,
    input: Map<String, Value>,
  ) -> Self {
    Self {
      workflow_type_id: workflow_type_id.into(),
      execution_id: execution_id.into(),
      input,
      ..Default::default()
    }
  }

  pub fn workflow_type_id(&self) -> &str {
    &self.workflow_type_id
  }

  pub fn execution_id(&self) -> &str {
    &self.execution_id
  }

  /// Payload the run was started with.
  pub fn input(&self) -> &Map<String, Value> {
    &self.input
  }

  /// Results published for the caller and for downstream expressions.
  pub fn output(&self) -> &Map<String, Value> {
    &self.output
  }

  pub fn set_output(&mut self, name: impl Into<String>, value: Value) {
    self.output.insert(name.into(), value);
  }

  /// Consume the context, keeping only the output mapping.
  pub fn into_output(self) -> Map<String, Value> {
    self.output
  }

  /// Workflow-level variables.
  pub fn properties(&self) -> &Map<String, Value> {
    &self.properties
  }

  pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
    self.properties.insert(name.into(), value);
  }

  /// Value produced by the most recently executed activity, if it recorded one.
  pub fn last_result(&self) -> Option<&Value> {
    self.last_result.as_ref()
  }

  pub fn set_last_result(&mut self, value: Value) {
    self.last_result = Some(value);
  }

  /// The variables visible to expressions.
  pub fn expression_scope(&self) -> Value {
    json!({
      "workflow_type_id": self.workflow_type_id,
      "execution_id": self.execution_id,
      "input": self.input,
      "output": self.output,
      "properties": self.properties,
      "last_result": self.last_result,
    })
  }
}

/// Per-invocation state of a single activity execution.
#[derive(Clone)]
pub struct ActivityExecutionContext {
  activity_id: String,
  activity_type: String,
  properties: Properties,
  evaluator: Arc<dyn ExpressionEvaluator>,
  cancel: CancellationToken,
}

impl ActivityExecutionContext {
  pub fn new(
    activity_id: impl Into<String>,
    activity_type: impl Into<String>,
    properties: Properties,
    evaluator: Arc<dyn ExpressionEvaluator>,
    cancel: CancellationToken,
  ) -> Self {
    Self {
      activity_id: activity_id.into(),
      activity_type: activity_type.into(),
      properties,
      evaluator,
      cancel,
    }
  }

  /// Context for executing the activity frozen in `record`.
  pub fn from_record(
    record: &ActivityRecord,
    evaluator: Arc<dyn ExpressionEvaluator>,
    cancel: CancellationToken,
  ) -> Self {
    Self::new(
      record.activity_id.clone(),
      record.activity_type.clone(),
      record.properties.clone(),
      evaluator,
      cancel,
    )
  }

  pub fn activity_id(&self) -> &str {
    &self.activity_id
  }

  pub fn activity_type(&self) -> &str {
    &self.activity_type
  }

  /// Configured properties, unevaluated.
  pub fn properties(&self) -> &Properties {
    &self.properties
  }

  /// Resolve a property value: literals are returned as-is, expressions are
  /// evaluated against `workflow`.
  pub async fn evaluate(
    &self,
    value: &PropertyValue,
    workflow: &WorkflowExecutionContext,
  ) -> Result<Value, ActivityError> {
    match value {
      PropertyValue::Literal(value) => Ok(value.clone()),
      PropertyValue::Expression(expression) => Ok(
        self
          .evaluator
          .evaluate(expression, workflow, &self.cancel)
          .await?,
      ),
    }
  }
}

impl std::fmt::Debug for ActivityExecutionContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActivityExecutionContext")
      .field("activity_id", &self.activity_id)
      .field("activity_type", &self.activity_type)
      .field("properties", &self.properties)
      .finish_non_exhaustive()
  }
}
