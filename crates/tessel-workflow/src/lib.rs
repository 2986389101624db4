//! Tessel Workflow
//!
//! This crate provides the frozen workflow representation for Tessel.
//! A workflow type is the validated, immutable form of a workflow graph that
//! an execution engine walks at run time.
//!
//! Key differences from `tessel-config`:
//! - Every activity has a concrete, unique identity
//! - Every transition points at an activity that exists in the graph
//! - Properties are captured from live activity instances, not hand-written
//! - Routing by (activity, outcome) is available through [`Graph`]

mod error;
mod graph;
mod id;
mod outcome;
mod record;
mod transition;
mod workflow;

pub use error::WorkflowError;
pub use graph::Graph;
pub use id::unique_id;
pub use outcome::Outcome;
pub use record::ActivityRecord;
pub use tessel_config::{Expression, Properties, PropertyValue};
pub use transition::Transition;
pub use workflow::WorkflowType;
