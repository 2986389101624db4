//! Runtime error types.

use tessel_activity::{ActivityError, CatalogError};
use tessel_workflow::WorkflowError;

/// Errors that can occur while running a workflow type.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// Execution was cancelled.
  #[error("execution cancelled")]
  Cancelled,

  #[error("workflow type '{workflow_type_id}' has no start activity")]
  NoStartActivity { workflow_type_id: String },

  #[error("workflow type '{workflow_type_id}' is disabled")]
  WorkflowDisabled { workflow_type_id: String },

  /// A transition routed to an identity the workflow does not contain.
  #[error("activity not found: {activity_id}")]
  ActivityNotFound { activity_id: String },

  /// The activity could not be reconstructed from its record.
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error("activity '{activity_id}' failed: {source}")]
  Activity {
    activity_id: String,
    #[source]
    source: ActivityError,
  },

  /// The run executed more activities than the configured limit.
  #[error("step limit of {max_steps} exceeded")]
  StepLimitExceeded { max_steps: usize },
}

impl From<WorkflowError> for RuntimeError {
  fn from(e: WorkflowError) -> Self {
    match e {
      WorkflowError::ActivityNotFound(activity_id) => Self::ActivityNotFound { activity_id },
      WorkflowError::NoStartActivity(workflow_type_id) => {
        Self::NoStartActivity { workflow_type_id }
      }
      WorkflowError::DanglingTransition {
        destination_activity_id,
        ..
      } => Self::ActivityNotFound {
        activity_id: destination_activity_id,
      },
    }
  }
}
