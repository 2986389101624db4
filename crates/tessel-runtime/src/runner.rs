//! Sequential workflow runner.
//!
//! Starting from the start activity, each activity executes against the shared
//! workflow context. The destinations of every outcome it takes are scheduled
//! in transition order; an outcome without a transition ends that path. The run
//! finishes when nothing remains scheduled, or halts when an activity suspends;
//! activities still scheduled at that point are reported as pending.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tessel_activity::{
  ActivityCatalog, ActivityError, ActivityExecutionContext, ActivityExecutionResult,
  EvaluationError, ExpressionEvaluator, WorkflowExecutionContext, instantiate,
};
use tessel_workflow::{ActivityRecord, WorkflowType};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::error::RuntimeError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};

/// Configuration for [`WorkflowRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
  /// Maximum number of activity executions in a single run.
  pub max_steps: usize,
}

impl Default for RunnerConfig {
  fn default() -> Self {
    Self { max_steps: 1000 }
  }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
  /// No activity remains scheduled.
  Finished,
  /// The named activity suspended the run. `pending` lists the activities
  /// that were still scheduled, in the order they would have run.
  Halted {
    activity_id: String,
    pending: Vec<String>,
  },
}

/// Result of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
  pub execution_id: String,
  pub status: RunStatus,
  /// The workflow output mapping at the end of the run.
  pub output: Map<String, Value>,
  /// Activity identities in execution order.
  pub executed: Vec<String>,
}

/// Runs assembled workflow types.
///
/// Generic over `N: ExecutionNotifier`. Use [`WorkflowRunner::new`] for a
/// runner that discards events, or [`WorkflowRunner::with_notifier`] to
/// observe them.
pub struct WorkflowRunner<N: ExecutionNotifier = NoopNotifier> {
  catalog: Arc<dyn ActivityCatalog>,
  evaluator: Arc<dyn ExpressionEvaluator>,
  notifier: N,
  config: RunnerConfig,
}

impl WorkflowRunner<NoopNotifier> {
  pub fn new(
    catalog: Arc<dyn ActivityCatalog>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    config: RunnerConfig,
  ) -> Self {
    Self::with_notifier(catalog, evaluator, config, NoopNotifier)
  }
}

impl<N: ExecutionNotifier> WorkflowRunner<N> {
  pub fn with_notifier(
    catalog: Arc<dyn ActivityCatalog>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    config: RunnerConfig,
    notifier: N,
  ) -> Self {
    Self {
      catalog,
      evaluator,
      notifier,
      config,
    }
  }

  /// Run `workflow` with the given input payload.
  #[instrument(
    name = "workflow_run",
    skip(self, workflow, input, cancel),
    fields(workflow_type_id = %workflow.workflow_type_id)
  )]
  pub async fn run(
    &self,
    workflow: &WorkflowType,
    input: Map<String, Value>,
    cancel: CancellationToken,
  ) -> Result<RunResult, RuntimeError> {
    if !workflow.is_enabled {
      return Err(RuntimeError::WorkflowDisabled {
        workflow_type_id: workflow.workflow_type_id.clone(),
      });
    }
    let start = workflow.start_activity()?;

    let execution_id = uuid::Uuid::new_v4().to_string();
    let mut context =
      WorkflowExecutionContext::new(workflow.workflow_type_id.clone(), execution_id.clone(), input);

    info!(%execution_id, start = %start.activity_id, "workflow started");
    self.notifier.notify(ExecutionEvent::WorkflowStarted {
      execution_id: execution_id.clone(),
      workflow_type_id: workflow.workflow_type_id.clone(),
    });

    let result = self
      .run_loop(workflow, start, &mut context, &cancel)
      .await;

    match &result {
      Ok((RunStatus::Finished, executed)) => {
        info!(%execution_id, steps = executed.len(), "workflow completed");
        self.notifier.notify(ExecutionEvent::WorkflowCompleted {
          execution_id: execution_id.clone(),
        });
      }
      Ok((RunStatus::Halted { activity_id, pending }, _)) => {
        info!(%execution_id, %activity_id, ?pending, "workflow halted");
        self.notifier.notify(ExecutionEvent::WorkflowHalted {
          execution_id: execution_id.clone(),
          activity_id: activity_id.clone(),
          pending: pending.clone(),
        });
      }
      Err(e) => {
        error!(%execution_id, error = %e, "workflow failed");
        self.notifier.notify(ExecutionEvent::WorkflowFailed {
          execution_id: execution_id.clone(),
          error: e.to_string(),
        });
      }
    }

    let (status, executed) = result?;
    Ok(RunResult {
      execution_id,
      status,
      output: context.into_output(),
      executed,
    })
  }

  async fn run_loop(
    &self,
    workflow: &WorkflowType,
    start: &ActivityRecord,
    context: &mut WorkflowExecutionContext,
    cancel: &CancellationToken,
  ) -> Result<(RunStatus, Vec<String>), RuntimeError> {
    let graph = workflow.graph();
    let mut scheduled = VecDeque::from([start.activity_id.clone()]);
    let mut executed = Vec::new();

    while let Some(activity_id) = scheduled.pop_front() {
      if cancel.is_cancelled() {
        return Err(RuntimeError::Cancelled);
      }
      if executed.len() >= self.config.max_steps {
        return Err(RuntimeError::StepLimitExceeded {
          max_steps: self.config.max_steps,
        });
      }

      let record = workflow.activity(&activity_id)?;
      let result = self.execute_activity(record, context, cancel).await?;
      executed.push(activity_id.clone());

      if result.is_halted() {
        let pending = scheduled.into_iter().collect();
        return Ok((RunStatus::Halted { activity_id, pending }, executed));
      }

      for outcome in result.taken() {
        let destinations = graph.destinations(&activity_id, &outcome.name);
        if destinations.is_empty() {
          debug!(%activity_id, outcome = %outcome.name, "no transition, path ends");
        }
        scheduled.extend(destinations.iter().cloned());
      }
    }

    Ok((RunStatus::Finished, executed))
  }

  /// Reconstruct the activity frozen in `record` and execute it once.
  #[instrument(
    name = "activity_execute",
    skip(self, record, context, cancel),
    fields(
      execution_id = %context.execution_id(),
      activity_id = %record.activity_id,
      activity_type = %record.activity_type,
    )
  )]
  pub async fn execute_activity(
    &self,
    record: &ActivityRecord,
    context: &mut WorkflowExecutionContext,
    cancel: &CancellationToken,
  ) -> Result<ActivityExecutionResult, RuntimeError> {
    let execution_id = context.execution_id().to_string();
    self.notifier.notify(ExecutionEvent::ActivityStarted {
      execution_id: execution_id.clone(),
      activity_id: record.activity_id.clone(),
      activity_type: record.activity_type.clone(),
    });

    let result = self.execute_inner(record, context, cancel).await;

    match &result {
      Ok(result) => {
        let outcomes: Vec<String> = result.taken().iter().map(|o| o.name.clone()).collect();
        debug!(?outcomes, halted = result.is_halted(), "activity completed");
        self.notifier.notify(ExecutionEvent::ActivityCompleted {
          execution_id,
          activity_id: record.activity_id.clone(),
          outcomes,
        });
      }
      Err(e) => {
        error!(error = %e, "activity failed");
        self.notifier.notify(ExecutionEvent::ActivityFailed {
          execution_id,
          activity_id: record.activity_id.clone(),
          error: e.to_string(),
        });
      }
    }

    result
  }

  async fn execute_inner(
    &self,
    record: &ActivityRecord,
    context: &mut WorkflowExecutionContext,
    cancel: &CancellationToken,
  ) -> Result<ActivityExecutionResult, RuntimeError> {
    let activity = instantiate(self.catalog.as_ref(), record)?;
    let activity_context =
      ActivityExecutionContext::from_record(record, self.evaluator.clone(), cancel.clone());

    activity
      .execute(context, &activity_context)
      .await
      .map_err(|source| match source {
        ActivityError::Evaluation(EvaluationError::Cancelled) => RuntimeError::Cancelled,
        source => RuntimeError::Activity {
          activity_id: record.activity_id.clone(),
          source,
        },
      })
  }
}
