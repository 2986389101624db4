use serde::{Deserialize, Serialize};
use tessel_config::Properties;

/// Frozen, graph-addressable snapshot of a configured activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
  pub activity_id: String,
  /// Catalog key used to reconstruct the activity at run time.
  pub activity_type: String,
  pub is_start: bool,
  pub properties: Properties,
}

impl ActivityRecord {
  /// Create a record without an identity; the builder assigns one.
  pub fn new(activity_type: impl Into<String>, properties: Properties) -> Self {
    Self {
      activity_id: String::new(),
      activity_type: activity_type.into(),
      is_start: false,
      properties,
    }
  }
}
