//! Tessel Config
//!
//! This crate contains the serializable workflow configuration types for Tessel.
//! These types describe a workflow before it is assembled by the builder into a
//! frozen workflow type.
//!
//! Configuration can be loaded from:
//! - JSON files (via CLI with `tessel build workflow.json`)
//! - Any other serde source (database blobs, embedded strings)
//!
//! The builder takes these definitions, resolves every activity type against the
//! activity catalog and produces the validated graph used at run time.

mod activity;
mod property;
mod transition;
mod workflow;

pub use activity::ActivityDef;
pub use property::{Expression, Properties, PropertyValue};
pub use transition::TransitionDef;
pub use workflow::WorkflowDef;
