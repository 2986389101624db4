//! Execution result types.

use serde::{Deserialize, Serialize};
use tessel_workflow::Outcome;

/// What an activity reports back after [`execute`](crate::Activity::execute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "outcomes", rename_all = "snake_case")]
pub enum ActivityExecutionResult {
  /// The activity finished, taking these outcomes.
  Outcomes(Vec<Outcome>),
  /// The activity suspended the run; it does not take any outcome yet.
  Halted,
}

impl ActivityExecutionResult {
  /// Finish with the given outcome names.
  pub fn outcomes<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::Outcomes(Outcome::list(names))
  }

  /// Outcomes taken, empty when halted.
  pub fn taken(&self) -> &[Outcome] {
    match self {
      Self::Outcomes(outcomes) => outcomes,
      Self::Halted => &[],
    }
  }

  pub fn is_halted(&self) -> bool {
    matches!(self, Self::Halted)
  }
}
