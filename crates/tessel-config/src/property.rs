//! Property values for activity configuration.
//!
//! Every configured activity property is either a literal JSON value or a
//! deferred expression that is evaluated against the workflow execution context
//! only when the activity reads it.
//!
//! # Examples
//!
//! ```json
//! {
//!   "output_name": { "literal": "result" },
//!   "value": { "expression": "input.amount * 2" },
//!   "greeting": { "expression": "Hello {{ input.name | title }}!" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An unevaluated expression source.
///
/// Sources containing `{{` or `{%` are rendered as templates and always produce
/// a string. Anything else is compiled as a bare expression and produces a typed
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression(String);

impl Expression {
  pub fn new(source: impl Into<String>) -> Self {
    Self(source.into())
  }

  /// The raw expression source.
  pub fn source(&self) -> &str {
    &self.0
  }

  /// Whether the source should be rendered as a template rather than
  /// evaluated as a bare expression.
  pub fn is_template(&self) -> bool {
    self.0.contains("{{") || self.0.contains("{%")
  }
}

impl fmt::Display for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Expression {
  fn from(source: &str) -> Self {
    Self::new(source)
  }
}

impl From<String> for Expression {
  fn from(source: String) -> Self {
    Self(source)
  }
}

/// A single configured property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
  /// A raw value, returned as-is.
  Literal(serde_json::Value),
  /// A deferred expression, evaluated when read.
  Expression(Expression),
}

impl PropertyValue {
  pub fn literal(value: impl Into<serde_json::Value>) -> Self {
    Self::Literal(value.into())
  }

  pub fn expression(source: impl Into<String>) -> Self {
    Self::Expression(Expression::new(source))
  }

  /// The literal value, if this property is not an expression.
  pub fn as_literal(&self) -> Option<&serde_json::Value> {
    match self {
      Self::Literal(value) => Some(value),
      Self::Expression(_) => None,
    }
  }
}

impl Default for PropertyValue {
  fn default() -> Self {
    Self::Literal(serde_json::Value::Null)
  }
}

/// Named property bag of an activity, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&PropertyValue> {
    self.0.get(name)
  }

  pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
    self.0.insert(name.into(), value)
  }

  /// Builder-style insert.
  pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
    self.insert(name, value);
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
    self.0.iter()
  }
}

impl FromIterator<(String, PropertyValue)> for Properties {
  fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_property_value_json_shape() {
    let literal: PropertyValue = serde_json::from_value(json!({ "literal": 42 })).unwrap();
    assert_eq!(literal, PropertyValue::literal(42));

    let expr: PropertyValue =
      serde_json::from_value(json!({ "expression": "input.amount" })).unwrap();
    assert_eq!(expr, PropertyValue::expression("input.amount"));

    assert_eq!(
      serde_json::to_value(PropertyValue::expression("1 + 1")).unwrap(),
      json!({ "expression": "1 + 1" })
    );
  }

  #[test]
  fn test_expression_template_detection() {
    assert!(Expression::new("Hello {{ name }}").is_template());
    assert!(Expression::new("{% if x %}y{% endif %}").is_template());
    assert!(!Expression::new("input.count + 1").is_template());
  }

  #[test]
  fn test_properties_builder_and_lookup() {
    let props = Properties::new()
      .with("name", PropertyValue::literal("result"))
      .with("value", PropertyValue::expression("1 + 2"));

    assert_eq!(props.len(), 2);
    assert!(props.contains("name"));
    assert_eq!(
      props.get("name").and_then(PropertyValue::as_literal),
      Some(&serde_json::Value::from("result"))
    );
    assert_eq!(props.get("value").and_then(PropertyValue::as_literal), None);
    assert!(props.get("missing").is_none());
  }

  #[test]
  fn test_properties_serialize_in_name_order() {
    let props = Properties::new()
      .with("zeta", PropertyValue::literal(1))
      .with("alpha", PropertyValue::literal(2))
      .with("mid", PropertyValue::expression("x"));

    assert_eq!(
      serde_json::to_string(&props).unwrap(),
      r#"{"alpha":{"literal":2},"mid":{"expression":"x"},"zeta":{"literal":1}}"#
    );
    let names: Vec<&String> = props.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["alpha", "mid", "zeta"]);
  }
}
