//! Activity error types.

use thiserror::Error;

/// Errors raised by an [`ExpressionEvaluator`](crate::ExpressionEvaluator).
#[derive(Debug, Error)]
pub enum EvaluationError {
  /// The expression failed to compile, render or evaluate.
  #[error("failed to evaluate expression '{expression}': {message}")]
  Failed { expression: String, message: String },

  /// Evaluation was cancelled before it started.
  #[error("evaluation cancelled")]
  Cancelled,
}

/// Errors raised while configuring or executing an activity.
#[derive(Debug, Error)]
pub enum ActivityError {
  /// An expression could not be evaluated. Never masked as an outcome.
  #[error("expression evaluation failed: {0}")]
  Evaluation(#[from] EvaluationError),

  /// A property holds a value of the wrong shape.
  #[error("invalid property '{property}' on activity '{activity_type}': {message}")]
  InvalidProperty {
    activity_type: String,
    property: String,
    message: String,
  },

  /// A property required to execute is not configured.
  #[error("missing required property '{property}' on activity '{activity_type}'")]
  MissingProperty {
    activity_type: String,
    property: String,
  },
}

/// Errors raised by an [`ActivityCatalog`](crate::ActivityCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("activity type not found: {0}")]
  ActivityTypeNotFound(String),

  #[error("activity type '{activity_type}' did not resolve to {expected}")]
  TypeMismatch {
    activity_type: String,
    expected: &'static str,
  },

  #[error("failed to apply properties to activity '{activity_id}'")]
  Properties {
    activity_id: String,
    #[source]
    source: ActivityError,
  },
}
