use serde::{Deserialize, Serialize};

/// A declared transition: (source activity, outcome) -> destination activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDef {
  pub source_activity_id: String,
  pub source_outcome_name: String,
  /// May be empty while a graph is being edited; such transitions are dropped
  /// when the workflow is assembled.
  #[serde(default)]
  pub destination_activity_id: String,
}
