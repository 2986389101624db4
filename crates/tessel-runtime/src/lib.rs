//! Tessel Runtime
//!
//! A sequential reference runner for assembled workflow types. One run owns a
//! single [`WorkflowExecutionContext`](tessel_activity::WorkflowExecutionContext);
//! activities execute one at a time and their outcomes are routed through the
//! workflow's transitions.

mod error;
mod events;
mod runner;

pub use error::RuntimeError;
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use runner::{RunResult, RunStatus, RunnerConfig, WorkflowRunner};
