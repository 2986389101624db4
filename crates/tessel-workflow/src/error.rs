use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("activity not found: {0}")]
  ActivityNotFound(String),

  #[error("no start activity in workflow type '{0}'")]
  NoStartActivity(String),

  #[error(
    "transition {source_activity_id}:{source_outcome_name} points at unknown activity '{destination_activity_id}'"
  )]
  DanglingTransition {
    source_activity_id: String,
    source_outcome_name: String,
    destination_activity_id: String,
  },
}
