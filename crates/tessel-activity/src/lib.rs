//! Tessel Activity
//!
//! This crate defines the contract every activity implements so an execution
//! engine can drive it uniformly:
//!
//! - [`Activity::possible_outcomes`] declares, without side effects, which
//!   outcomes an activity may finish with
//! - [`Activity::execute`] performs the work, may mutate the
//!   [`WorkflowExecutionContext`] and returns the outcomes actually taken
//! - configured properties are [`PropertyValue`]s; expressions are evaluated
//!   through an [`ExpressionEvaluator`] only when read
//!
//! Activities are constructed by an [`ActivityCatalog`], which maps a stable
//! type key to a factory. [`StandardCatalog::with_builtins`] registers the
//! primitive activities in [`activities`].

pub mod activities;
mod activity;
mod catalog;
mod context;
mod error;
mod expression;
mod result;

pub use activity::{Activity, ActivityKind, AsAny};
pub use catalog::{ActivityCatalog, StandardCatalog, instantiate, resolve_as};
pub use context::{ActivityExecutionContext, WorkflowExecutionContext};
pub use error::{ActivityError, CatalogError, EvaluationError};
pub use expression::{EvaluatorConfig, ExpressionEvaluator, TemplateEvaluator};
pub use result::ActivityExecutionResult;
pub use tessel_config::{Expression, Properties, PropertyValue};
pub use tessel_workflow::Outcome;
