use serde::{Deserialize, Serialize};

use crate::property::Properties;

/// A declared activity within a workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDef {
  /// Explicit identity. A random identity is generated when omitted, which
  /// also means no transition in the same document can refer to it.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity_id: Option<String>,

  /// Catalog key of the activity kind, e.g. "set_output".
  pub activity_type: String,

  #[serde(default)]
  pub is_start: bool,

  #[serde(default)]
  pub properties: Properties,
}
