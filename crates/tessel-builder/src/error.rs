use tessel_activity::{ActivityError, CatalogError};
use tessel_workflow::WorkflowError;
use thiserror::Error;

/// Errors that can occur while building a workflow type.
#[derive(Debug, Error)]
pub enum BuildError {
  /// An explicit activity id is already registered.
  #[error("activity id already exists: {activity_id}")]
  DuplicateActivityId { activity_id: String },

  /// A required argument is missing or empty.
  #[error("argument required: {argument}")]
  ArgumentRequired { argument: &'static str },

  /// No registered activity has this id.
  #[error("activity not found: {activity_id}")]
  ActivityNotFound { activity_id: String },

  /// The activity catalog could not provide the requested activity.
  #[error("activity catalog error: {0}")]
  Catalog(#[from] CatalogError),

  /// Configured properties could not be applied to an activity.
  #[error("failed to configure activity: {0}")]
  Activity(#[from] ActivityError),

  /// The assembled graph violated a workflow type invariant.
  #[error(transparent)]
  Workflow(#[from] WorkflowError),
}
