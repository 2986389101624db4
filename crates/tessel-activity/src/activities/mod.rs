//! Primitive activities.

mod if_else;
mod set_output;
mod set_property;

pub use if_else::IfElse;
pub use set_output::SetOutput;
pub use set_property::SetProperty;

use serde::de::DeserializeOwned;
use tessel_config::{Properties, PropertyValue};

use crate::error::ActivityError;

/// Outcome taken by activities that cannot branch.
pub const DONE: &str = "Done";

/// Read a property that must be configured as a literal.
pub(crate) fn literal_property<T: DeserializeOwned>(
  properties: &Properties,
  activity_type: &str,
  name: &str,
) -> Result<Option<T>, ActivityError> {
  let invalid = |message: String| ActivityError::InvalidProperty {
    activity_type: activity_type.to_string(),
    property: name.to_string(),
    message,
  };

  match properties.get(name) {
    None => Ok(None),
    Some(PropertyValue::Literal(value)) => serde_json::from_value(value.clone())
      .map(Some)
      .map_err(|e| invalid(e.to_string())),
    Some(PropertyValue::Expression(_)) => Err(invalid(
      "expected a literal value, got an expression".to_string(),
    )),
  }
}

/// Fail with `MissingProperty` when a required name is empty.
pub(crate) fn require_name<'a>(
  value: &'a str,
  activity_type: &str,
  property: &str,
) -> Result<&'a str, ActivityError> {
  if value.is_empty() {
    return Err(ActivityError::MissingProperty {
      activity_type: activity_type.to_string(),
      property: property.to_string(),
    });
  }
  Ok(value)
}
