//! Execution events and notifiers for observability.
//!
//! The runner emits an event at each step of a run so consumers can observe
//! progress, persist state or stream it elsewhere.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  WorkflowStarted {
    execution_id: String,
    workflow_type_id: String,
  },

  ActivityStarted {
    execution_id: String,
    activity_id: String,
    activity_type: String,
  },

  /// An activity completed, taking the listed outcomes.
  ActivityCompleted {
    execution_id: String,
    activity_id: String,
    outcomes: Vec<String>,
  },

  ActivityFailed {
    execution_id: String,
    activity_id: String,
    error: String,
  },

  /// No activity remains scheduled.
  WorkflowCompleted { execution_id: String },

  /// An activity suspended the run before `pending` could execute.
  WorkflowHalted {
    execution_id: String,
    activity_id: String,
    pending: Vec<String>,
  },

  WorkflowFailed { execution_id: String, error: String },
}

/// Receives execution events.
///
/// The runner calls `notify` synchronously for each event; implementations
/// decide what to do with them.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// Forwards events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded so a slow consumer never blocks the runner.
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped.
    let _ = self.sender.send(event);
  }
}
