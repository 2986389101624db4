use std::collections::HashMap;

use crate::{ActivityRecord, Transition};

/// Outcome routing table of a workflow type.
#[derive(Debug, Clone)]
pub struct Graph {
  /// (activity_id, outcome) -> destination activity_ids, in transition order.
  routes: HashMap<(String, String), Vec<String>>,
  /// Start-flagged activities, in registration order.
  start_points: Vec<String>,
}

impl Graph {
  /// Build a graph from activity records and transitions.
  pub fn new(activities: &[ActivityRecord], transitions: &[Transition]) -> Self {
    let mut routes: HashMap<(String, String), Vec<String>> = HashMap::new();
    for t in transitions {
      routes
        .entry((t.source_activity_id.clone(), t.source_outcome_name.clone()))
        .or_default()
        .push(t.destination_activity_id.clone());
    }

    let start_points = activities
      .iter()
      .filter(|a| a.is_start)
      .map(|a| a.activity_id.clone())
      .collect();

    Self {
      routes,
      start_points,
    }
  }

  /// Every destination leaving `activity_id` on `outcome`, in transition order.
  /// A runner schedules all of them.
  pub fn destinations(&self, activity_id: &str, outcome: &str) -> &[String] {
    self
      .routes
      .get(&(activity_id.to_string(), outcome.to_string()))
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Start-flagged activities. Zero or several are representable.
  pub fn start_points(&self) -> &[String] {
    &self.start_points
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tessel_config::Properties;

  fn record(id: &str, is_start: bool) -> ActivityRecord {
    ActivityRecord {
      activity_id: id.to_string(),
      activity_type: "set_output".to_string(),
      is_start,
      properties: Properties::new(),
    }
  }

  #[test]
  fn test_routing_by_outcome() {
    let activities = vec![record("check", true), record("yes", false), record("no", false)];
    let transitions = vec![
      Transition::new("check", "True", "yes"),
      Transition::new("check", "False", "no"),
    ];
    let graph = Graph::new(&activities, &transitions);

    assert_eq!(graph.destinations("check", "True"), ["yes"]);
    assert_eq!(graph.destinations("check", "False"), ["no"]);
    assert!(graph.destinations("check", "Done").is_empty());
    assert!(graph.destinations("yes", "Done").is_empty());
  }

  #[test]
  fn test_all_destinations_kept_in_transition_order() {
    let activities = vec![record("a", true), record("b", false), record("c", false)];
    let transitions = vec![Transition::new("a", "Done", "c"), Transition::new("a", "Done", "b")];
    let graph = Graph::new(&activities, &transitions);

    assert_eq!(graph.destinations("a", "Done"), ["c", "b"]);
  }

  #[test]
  fn test_start_points_in_registration_order() {
    let activities = vec![record("a", false), record("b", true), record("c", true)];
    let graph = Graph::new(&activities, &[]);

    assert_eq!(graph.start_points(), ["b", "c"]);
  }
}
