//! Declarative workflow descriptions.

use tessel_config::WorkflowDef;

use crate::builder::WorkflowBuilder;
use crate::error::BuildError;

/// A workflow that knows how to register its own activities and transitions.
///
/// Implemented for [`WorkflowDef`] so JSON definitions can be assembled
/// directly; code-defined workflows implement it by hand.
pub trait WorkflowDescription {
  fn id(&self) -> &str;

  /// Fixed workflow-type key. A key is generated when `None`.
  fn workflow_type_id(&self) -> Option<&str> {
    None
  }

  fn name(&self) -> &str;

  fn is_enabled(&self) -> bool {
    true
  }

  fn is_singleton(&self) -> bool {
    false
  }

  fn delete_finished_workflows(&self) -> bool {
    false
  }

  /// Register this workflow's activities and transitions on `builder`.
  fn populate(&self, builder: &mut WorkflowBuilder) -> Result<(), BuildError>;
}

impl WorkflowDescription for WorkflowDef {
  fn id(&self) -> &str {
    &self.workflow_id
  }

  fn workflow_type_id(&self) -> Option<&str> {
    self.workflow_type_id.as_deref()
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn is_enabled(&self) -> bool {
    self.is_enabled
  }

  fn is_singleton(&self) -> bool {
    self.is_singleton
  }

  fn delete_finished_workflows(&self) -> bool {
    self.delete_finished_workflows
  }

  fn populate(&self, builder: &mut WorkflowBuilder) -> Result<(), BuildError> {
    for def in &self.activities {
      let record = builder.build_activity_by_type(
        &def.activity_type,
        &def.properties,
        def.activity_id.as_deref(),
        true,
      )?;
      if def.is_start {
        builder.set_start(&record.activity_id)?;
      }
    }

    for def in &self.transitions {
      builder.add_transition(def.clone().into());
    }

    Ok(())
  }
}
