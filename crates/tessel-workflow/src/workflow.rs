use serde::Serialize;

use crate::error::WorkflowError;
use crate::graph::Graph;
use crate::{ActivityRecord, Transition};

/// A frozen workflow type ready for execution.
///
/// Activities and transitions are only reachable through accessors. Every
/// transition points at an existing activity: [`WorkflowType::new`] rejects
/// anything else and nothing can add a transition afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowType {
  pub id: String,
  pub workflow_type_id: String,
  pub name: String,
  pub is_enabled: bool,
  pub is_singleton: bool,
  pub delete_finished_workflows: bool,
  activities: Vec<ActivityRecord>,
  transitions: Vec<Transition>,
}

impl WorkflowType {
  /// Create a workflow type with default flags.
  ///
  /// Fails with [`WorkflowError::DanglingTransition`] when a transition's
  /// destination is empty or not among `activities`.
  pub fn new(
    id: String,
    workflow_type_id: String,
    name: String,
    activities: Vec<ActivityRecord>,
    transitions: Vec<Transition>,
  ) -> Result<Self, WorkflowError> {
    if let Some(t) = transitions.iter().find(|t| {
      !activities
        .iter()
        .any(|a| a.activity_id == t.destination_activity_id)
    }) {
      return Err(WorkflowError::DanglingTransition {
        source_activity_id: t.source_activity_id.clone(),
        source_outcome_name: t.source_outcome_name.clone(),
        destination_activity_id: t.destination_activity_id.clone(),
      });
    }

    Ok(Self {
      id,
      workflow_type_id,
      name,
      is_enabled: true,
      is_singleton: false,
      delete_finished_workflows: false,
      activities,
      transitions,
    })
  }

  pub fn activities(&self) -> &[ActivityRecord] {
    &self.activities
  }

  pub fn transitions(&self) -> &[Transition] {
    &self.transitions
  }

  /// Get an activity record by ID.
  pub fn get_activity(&self, activity_id: &str) -> Option<&ActivityRecord> {
    self
      .activities
      .iter()
      .find(|a| a.activity_id == activity_id)
  }

  /// Like [`get_activity`](Self::get_activity) but fails when absent.
  pub fn activity(&self, activity_id: &str) -> Result<&ActivityRecord, WorkflowError> {
    self
      .get_activity(activity_id)
      .ok_or_else(|| WorkflowError::ActivityNotFound(activity_id.to_string()))
  }

  /// The activity execution begins at.
  ///
  /// Several start-flagged records are representable; the first registered one
  /// wins.
  pub fn start_activity(&self) -> Result<&ActivityRecord, WorkflowError> {
    self
      .activities
      .iter()
      .find(|a| a.is_start)
      .ok_or_else(|| WorkflowError::NoStartActivity(self.workflow_type_id.clone()))
  }

  /// Build the graph structure for routing.
  pub fn graph(&self) -> Graph {
    Graph::new(&self.activities, &self.transitions)
  }
}
