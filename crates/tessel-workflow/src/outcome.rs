use std::fmt;

use serde::{Deserialize, Serialize};

/// A named exit condition an activity may finish with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome {
  pub name: String,
}

impl Outcome {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  /// Build an ordered outcome list from names.
  pub fn list<I, S>(names: I) -> Vec<Outcome>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    names.into_iter().map(Outcome::new).collect()
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

impl From<&str> for Outcome {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}
