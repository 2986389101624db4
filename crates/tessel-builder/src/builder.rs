use std::sync::Arc;

use tessel_activity::{Activity, ActivityCatalog, ActivityKind, resolve_as};
use tessel_config::Properties;
use tessel_workflow::{ActivityRecord, Transition, WorkflowType, unique_id};
use tracing::{debug, info, instrument};

use crate::description::WorkflowDescription;
use crate::error::BuildError;

/// Assembles activity records and transitions into a [`WorkflowType`].
///
/// One builder per workflow definition. The builder owns its working lists
/// until [`build`](Self::build) consumes it.
pub struct WorkflowBuilder {
  catalog: Arc<dyn ActivityCatalog>,
  activities: Vec<ActivityRecord>,
  transitions: Vec<Transition>,
}

impl WorkflowBuilder {
  /// Create a builder resolving activity types through `catalog`.
  pub fn new(catalog: Arc<dyn ActivityCatalog>) -> Self {
    Self {
      catalog,
      activities: Vec::new(),
      transitions: Vec::new(),
    }
  }

  /// Activity records registered so far, in registration order.
  pub fn activities(&self) -> &[ActivityRecord] {
    &self.activities
  }

  /// Register an activity of kind `T`.
  ///
  /// When `activity` is `None` a fresh instance is resolved from the catalog.
  /// `setup` configures the live instance before it is frozen. Without an
  /// explicit `id` a random identity is generated; an explicit `id` must not
  /// already be registered. The record is appended to the working set only
  /// when `add_to_workflow` is true.
  pub fn build_activity<T: ActivityKind>(
    &mut self,
    activity: Option<T>,
    setup: impl FnOnce(&mut T),
    id: Option<&str>,
    add_to_workflow: bool,
  ) -> Result<ActivityRecord, BuildError> {
    let mut activity = match activity {
      Some(activity) => activity,
      None => resolve_as::<T>(self.catalog.as_ref())?,
    };
    setup(&mut activity);
    self.register(&activity, id, add_to_workflow)
  }

  /// Register an activity by catalog key, configured from a property bag.
  pub fn build_activity_by_type(
    &mut self,
    activity_type: &str,
    properties: &Properties,
    id: Option<&str>,
    add_to_workflow: bool,
  ) -> Result<ActivityRecord, BuildError> {
    let mut activity = self.catalog.resolve(activity_type)?;
    activity.apply_properties(properties)?;
    self.register(activity.as_ref(), id, add_to_workflow)
  }

  /// Register and add an activity of kind `T`.
  pub fn add_activity<T: ActivityKind>(
    &mut self,
    setup: impl FnOnce(&mut T),
    id: Option<&str>,
  ) -> Result<ActivityRecord, BuildError> {
    self.build_activity(None, setup, id, true)
  }

  /// Register and add an activity of kind `T`, flagged as the start node.
  pub fn start_with<T: ActivityKind>(
    &mut self,
    setup: impl FnOnce(&mut T),
    id: Option<&str>,
  ) -> Result<ActivityRecord, BuildError> {
    let mut record = self.add_activity(setup, id)?;
    self.set_start(&record.activity_id)?;
    record.is_start = true;
    Ok(record)
  }

  /// Flag a registered activity as a start node.
  ///
  /// No check is made against other start-flagged activities.
  pub fn set_start(&mut self, activity_id: &str) -> Result<(), BuildError> {
    let record = self
      .activities
      .iter_mut()
      .find(|a| a.activity_id == activity_id)
      .ok_or_else(|| BuildError::ActivityNotFound {
        activity_id: activity_id.to_string(),
      })?;
    record.is_start = true;
    Ok(())
  }

  /// Wire `source` on `outcome` to `destination`. Validated at build time.
  pub fn connect(
    &mut self,
    source_activity_id: impl Into<String>,
    outcome: impl Into<String>,
    destination_activity_id: impl Into<String>,
  ) -> &mut Self {
    self.add_transition(Transition::new(
      source_activity_id,
      outcome,
      destination_activity_id,
    ))
  }

  pub fn add_transition(&mut self, transition: Transition) -> &mut Self {
    self.transitions.push(transition);
    self
  }

  /// Assemble the workflow type.
  ///
  /// `setup` runs last and may override any metadata. Transitions whose
  /// destination is empty or not registered are dropped.
  #[instrument(name = "workflow_build", skip(self, setup), fields(name = %name))]
  pub fn build(
    self,
    name: &str,
    setup: impl FnOnce(&mut WorkflowType),
  ) -> Result<WorkflowType, BuildError> {
    if name.trim().is_empty() {
      return Err(BuildError::ArgumentRequired { argument: "name" });
    }

    let transitions = self.cleanup_transitions();
    let mut workflow_type = WorkflowType::new(
      uuid::Uuid::new_v4().to_string(),
      unique_id(),
      name.to_string(),
      self.activities,
      transitions,
    )?;

    setup(&mut workflow_type);

    info!(
      workflow_type_id = %workflow_type.workflow_type_id,
      activities = workflow_type.activities().len(),
      transitions = workflow_type.transitions().len(),
      "workflow type assembled"
    );

    Ok(workflow_type)
  }

  /// Let `description` populate this builder, then assemble with its metadata.
  pub fn build_from<D: WorkflowDescription + ?Sized>(
    mut self,
    description: &D,
    setup: impl FnOnce(&mut WorkflowType),
  ) -> Result<WorkflowType, BuildError> {
    description.populate(&mut self)?;

    self.build(description.name(), |workflow_type| {
      workflow_type.id = description.id().to_string();
      if let Some(key) = description.workflow_type_id() {
        workflow_type.workflow_type_id = key.to_string();
      }
      workflow_type.is_enabled = description.is_enabled();
      workflow_type.is_singleton = description.is_singleton();
      workflow_type.delete_finished_workflows = description.delete_finished_workflows();

      setup(workflow_type);
    })
  }

  /// Like [`build_from`](Self::build_from) with a default-constructed description.
  pub fn build_described<D: WorkflowDescription + Default>(
    self,
    setup: impl FnOnce(&mut WorkflowType),
  ) -> Result<WorkflowType, BuildError> {
    let description = D::default();
    self.build_from(&description, setup)
  }

  /// Freeze `activity` into a record and assign its identity.
  fn register(
    &mut self,
    activity: &dyn Activity,
    id: Option<&str>,
    add_to_workflow: bool,
  ) -> Result<ActivityRecord, BuildError> {
    let mut record = ActivityRecord::new(activity.activity_type(), activity.properties());

    record.activity_id = match id.filter(|id| !id.trim().is_empty()) {
      Some(id) => {
        if self.contains(id) {
          return Err(BuildError::DuplicateActivityId {
            activity_id: id.to_string(),
          });
        }
        id.to_string()
      }
      None => self.generate_id(),
    };

    if add_to_workflow {
      self.activities.push(record.clone());
    }

    Ok(record)
  }

  fn contains(&self, activity_id: &str) -> bool {
    self.activities.iter().any(|a| a.activity_id == activity_id)
  }

  fn generate_id(&self) -> String {
    loop {
      let id = unique_id();
      if !self.contains(&id) {
        return id;
      }
    }
  }

  /// Keep transitions pointing at a registered activity, in insertion order.
  fn cleanup_transitions(&self) -> Vec<Transition> {
    self
      .transitions
      .iter()
      .filter(|t| {
        let valid =
          !t.destination_activity_id.is_empty() && self.contains(&t.destination_activity_id);
        if !valid {
          debug!(
            source = %t.source_activity_id,
            outcome = %t.source_outcome_name,
            destination = %t.destination_activity_id,
            "dropping dangling transition"
          );
        }
        valid
      })
      .cloned()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;
  use tessel_activity::StandardCatalog;
  use tessel_activity::activities::{IfElse, SetOutput};
  use tessel_config::PropertyValue;

  fn builder() -> WorkflowBuilder {
    WorkflowBuilder::new(Arc::new(StandardCatalog::with_builtins()))
  }

  fn noop(_: &mut SetOutput) {}

  #[test]
  fn test_duplicate_explicit_id() {
    let mut b = builder();
    let first = b
      .add_activity(
        |a: &mut SetOutput| a.output_name = "first".to_string(),
        Some("a"),
      )
      .unwrap();

    let err = b.add_activity(noop, Some("a")).unwrap_err();
    assert!(matches!(
      err,
      BuildError::DuplicateActivityId { activity_id } if activity_id == "a"
    ));

    assert_eq!(b.activities(), [first]);
  }

  #[test]
  fn test_generated_ids_are_unique() {
    let mut b = builder();
    for _ in 0..10_000 {
      b.add_activity(noop, None).unwrap();
    }

    let ids: HashSet<&str> = b
      .activities()
      .iter()
      .map(|a| a.activity_id.as_str())
      .collect();
    assert_eq!(ids.len(), 10_000);
  }

  #[test]
  fn test_blank_id_is_generated() {
    let mut b = builder();
    let record = b.add_activity(noop, Some("  ")).unwrap();
    assert_eq!(record.activity_id.len(), 26);
  }

  #[test]
  fn test_dangling_transitions_dropped_in_order() {
    let mut b = builder();
    for id in ["A", "B", "C"] {
      b.add_activity(noop, Some(id)).unwrap();
    }
    b.connect("A", "Done", "B")
      .connect("A", "Done", "D")
      .connect("B", "Done", "")
      .connect("C", "Done", "A");

    let wf = b.build("Filter", |_| {}).unwrap();

    assert_eq!(
      wf.transitions(),
      [
        Transition::new("A", "Done", "B"),
        Transition::new("C", "Done", "A"),
      ]
    );
    assert_eq!(wf.activities().len(), 3);
  }

  #[test]
  fn test_source_side_not_validated() {
    let mut b = builder();
    b.add_activity(noop, Some("A")).unwrap();
    b.connect("ghost", "Whatever", "A");

    let wf = b.build("Lenient", |_| {}).unwrap();
    assert_eq!(wf.transitions(), [Transition::new("ghost", "Whatever", "A")]);
  }

  #[test]
  fn test_build_requires_name() {
    assert!(matches!(
      builder().build("", |_| {}),
      Err(BuildError::ArgumentRequired { argument: "name" })
    ));
    assert!(matches!(
      builder().build("   ", |_| {}),
      Err(BuildError::ArgumentRequired { .. })
    ));
  }

  #[test]
  fn test_build_defaults_and_setup_override() {
    let wf = builder().build("Defaults", |_| {}).unwrap();
    assert_eq!(wf.name, "Defaults");
    assert!(wf.is_enabled);
    assert!(!wf.is_singleton);
    assert!(!wf.delete_finished_workflows);
    assert_eq!(wf.workflow_type_id.len(), 26);
    assert!(!wf.id.is_empty());

    let wf = builder()
      .build("Overridden", |wf| {
        wf.is_enabled = false;
        wf.is_singleton = true;
        wf.delete_finished_workflows = true;
      })
      .unwrap();
    assert!(!wf.is_enabled);
    assert!(wf.is_singleton);
    assert!(wf.delete_finished_workflows);
  }

  #[test]
  fn test_setup_callback_is_frozen_into_record() {
    let mut b = builder();
    let record = b
      .start_with(
        |a: &mut SetOutput| {
          a.output_name = "result".to_string();
          a.value = PropertyValue::expression("input.x");
        },
        Some("set"),
      )
      .unwrap();

    assert!(record.is_start);
    assert_eq!(record.activity_type, "set_output");
    assert_eq!(
      record.properties.get("value"),
      Some(&PropertyValue::expression("input.x"))
    );
    assert_eq!(b.activities()[0], record);
  }

  #[test]
  fn test_not_added_to_workflow() {
    let mut b = builder();
    let record = b.build_activity(None, noop, Some("detached"), false).unwrap();
    assert_eq!(record.activity_id, "detached");
    assert!(b.activities().is_empty());
  }

  #[test]
  fn test_supplied_instance_skips_catalog() {
    let mut b = WorkflowBuilder::new(Arc::new(StandardCatalog::new()));
    let instance = IfElse {
      condition: PropertyValue::literal(true),
    };

    let record = b
      .build_activity(Some(instance), |_| {}, Some("branch"), true)
      .unwrap();
    assert_eq!(record.activity_type, "if_else");

    assert!(matches!(
      b.add_activity(noop, None),
      Err(BuildError::Catalog(_))
    ));
  }

  #[test]
  fn test_start_flags_are_not_exclusive() {
    let mut b = builder();
    b.start_with(noop, Some("a")).unwrap();
    b.add_activity(noop, Some("b")).unwrap();
    b.set_start("b").unwrap();

    assert!(matches!(
      b.set_start("zzz"),
      Err(BuildError::ActivityNotFound { activity_id }) if activity_id == "zzz"
    ));

    let wf = b.build("Two starts", |_| {}).unwrap();
    assert_eq!(wf.graph().start_points(), ["a", "b"]);
    assert_eq!(wf.start_activity().unwrap().activity_id, "a");
  }
}
