use serde::{Deserialize, Serialize};

use crate::activity::ActivityDef;
use crate::transition::TransitionDef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  pub workflow_id: String,
  /// Human-typable key of the workflow type. Generated when omitted.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub workflow_type_id: Option<String>,
  pub name: String,
  #[serde(default = "default_true")]
  pub is_enabled: bool,
  #[serde(default)]
  pub is_singleton: bool,
  #[serde(default)]
  pub delete_finished_workflows: bool,
  pub activities: Vec<ActivityDef>,
  #[serde(default)]
  pub transitions: Vec<TransitionDef>,
}

fn default_true() -> bool {
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::PropertyValue;
  use serde_json::json;

  #[test]
  fn test_workflow_def_defaults() {
    let def: WorkflowDef = serde_json::from_value(json!({
      "workflow_id": "wf-1",
      "name": "Greeting",
      "activities": [
        {
          "activity_id": "greet",
          "activity_type": "set_output",
          "is_start": true,
          "properties": {
            "output_name": { "literal": "greeting" },
            "value": { "expression": "Hello {{ input.name }}" }
          }
        },
        { "activity_type": "set_output" }
      ],
      "transitions": [
        { "source_activity_id": "greet", "source_outcome_name": "Done" }
      ]
    }))
    .unwrap();

    assert!(def.is_enabled);
    assert!(!def.is_singleton);
    assert!(!def.delete_finished_workflows);
    assert_eq!(def.workflow_type_id, None);

    assert_eq!(def.activities[0].activity_id.as_deref(), Some("greet"));
    assert!(def.activities[0].is_start);
    assert_eq!(
      def.activities[0].properties.get("value"),
      Some(&PropertyValue::expression("Hello {{ input.name }}"))
    );

    assert_eq!(def.activities[1].activity_id, None);
    assert!(!def.activities[1].is_start);
    assert!(def.activities[1].properties.is_empty());

    assert_eq!(def.transitions[0].destination_activity_id, "");
  }
}
