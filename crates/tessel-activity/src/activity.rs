//! The activity capability set.

use std::any::Any;

use async_trait::async_trait;
use tessel_config::Properties;
use tessel_workflow::Outcome;

use crate::context::{ActivityExecutionContext, WorkflowExecutionContext};
use crate::error::ActivityError;
use crate::result::ActivityExecutionResult;

/// Lets a boxed activity be downcast back to its concrete type.
pub trait AsAny: Any + Send + Sync {
  fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
  fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
    self
  }
}

/// A configurable, named unit of work.
#[async_trait]
pub trait Activity: AsAny {
  /// Catalog key identifying this activity kind.
  fn activity_type(&self) -> &str;

  /// Snapshot of the configured properties, as frozen into a record.
  fn properties(&self) -> Properties;

  /// Configure this instance from a frozen property bag.
  ///
  /// Properties absent from the bag keep their current value.
  fn apply_properties(&mut self, properties: &Properties) -> Result<(), ActivityError>;

  /// Outcomes this activity may finish with, in declaration order.
  ///
  /// Must not perform the activity's work; the shared context is read-only here.
  fn possible_outcomes(
    &self,
    workflow: &WorkflowExecutionContext,
    activity: &ActivityExecutionContext,
  ) -> Vec<Outcome>;

  /// Perform the activity's effect and report the outcomes taken.
  async fn execute(
    &self,
    workflow: &mut WorkflowExecutionContext,
    activity: &ActivityExecutionContext,
  ) -> Result<ActivityExecutionResult, ActivityError>;
}

/// An activity with a statically known catalog key.
pub trait ActivityKind: Activity + Sized {
  const TYPE_NAME: &'static str;
}
