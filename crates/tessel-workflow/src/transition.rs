use serde::{Deserialize, Serialize};
use tessel_config::TransitionDef;

/// A directed edge from (source activity, outcome) to a destination activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
  pub source_activity_id: String,
  pub source_outcome_name: String,
  pub destination_activity_id: String,
}

impl Transition {
  pub fn new(
    source_activity_id: impl Into<String>,
    source_outcome_name: impl Into<String>,
    destination_activity_id: impl Into<String>,
  ) -> Self {
    Self {
      source_activity_id: source_activity_id.into(),
      source_outcome_name: source_outcome_name.into(),
      destination_activity_id: destination_activity_id.into(),
    }
  }
}

impl From<TransitionDef> for Transition {
  fn from(def: TransitionDef) -> Self {
    Self {
      source_activity_id: def.source_activity_id,
      source_outcome_name: def.source_outcome_name,
      destination_activity_id: def.destination_activity_id,
    }
  }
}
