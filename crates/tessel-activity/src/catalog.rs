//! Activity catalog: type key -> fresh activity instance.

use std::collections::HashMap;
use std::sync::Arc;

use tessel_workflow::ActivityRecord;

use crate::activities::{IfElse, SetOutput, SetProperty};
use crate::activity::{Activity, ActivityKind, AsAny};
use crate::error::CatalogError;

type Factory = Arc<dyn Fn() -> Box<dyn Activity> + Send + Sync>;

/// Resolves an activity type key to a fresh, independently configurable
/// instance.
pub trait ActivityCatalog: Send + Sync {
  fn resolve(&self, activity_type: &str) -> Result<Box<dyn Activity>, CatalogError>;

  /// Registered type keys, sorted.
  fn activity_types(&self) -> Vec<String>;
}

/// Catalog backed by factories registered at startup.
#[derive(Clone, Default)]
pub struct StandardCatalog {
  factories: HashMap<String, Factory>,
}

impl StandardCatalog {
  /// Create an empty catalog.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a catalog with the primitive activities registered.
  pub fn with_builtins() -> Self {
    let mut catalog = Self::new();
    catalog
      .register_default::<SetOutput>()
      .register_default::<SetProperty>()
      .register_default::<IfElse>();
    catalog
  }

  /// Register a factory under `T::TYPE_NAME`, replacing any previous one.
  pub fn register<T, F>(&mut self, factory: F) -> &mut Self
  where
    T: ActivityKind,
    F: Fn() -> T + Send + Sync + 'static,
  {
    self.factories.insert(
      T::TYPE_NAME.to_string(),
      Arc::new(move || Box::new(factory()) as Box<dyn Activity>),
    );
    self
  }

  pub fn register_default<T: ActivityKind + Default>(&mut self) -> &mut Self {
    self.register(T::default)
  }
}

impl ActivityCatalog for StandardCatalog {
  fn resolve(&self, activity_type: &str) -> Result<Box<dyn Activity>, CatalogError> {
    self
      .factories
      .get(activity_type)
      .map(|factory| factory())
      .ok_or_else(|| CatalogError::ActivityTypeNotFound(activity_type.to_string()))
  }

  fn activity_types(&self) -> Vec<String> {
    let mut types: Vec<String> = self.factories.keys().cloned().collect();
    types.sort();
    types
  }
}

/// Resolve a fresh instance of a statically known activity kind.
pub fn resolve_as<T: ActivityKind>(catalog: &dyn ActivityCatalog) -> Result<T, CatalogError> {
  let activity = catalog.resolve(T::TYPE_NAME)?;
  AsAny::into_any(activity)
    .downcast::<T>()
    .map(|activity| *activity)
    .map_err(|_| CatalogError::TypeMismatch {
      activity_type: T::TYPE_NAME.to_string(),
      expected: std::any::type_name::<T>(),
    })
}

/// Reconstruct the activity frozen in `record`: resolve its type, then apply
/// its properties.
pub fn instantiate(
  catalog: &dyn ActivityCatalog,
  record: &ActivityRecord,
) -> Result<Box<dyn Activity>, CatalogError> {
  let mut activity = catalog.resolve(&record.activity_type)?;
  activity
    .apply_properties(&record.properties)
    .map_err(|source| CatalogError::Properties {
      activity_id: record.activity_id.clone(),
      source,
    })?;
  Ok(activity)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tessel_config::{Properties, PropertyValue};

  #[test]
  fn test_builtin_types() {
    let catalog = StandardCatalog::with_builtins();
    assert_eq!(
      catalog.activity_types(),
      vec!["if_else", "set_output", "set_property"]
    );
  }

  #[test]
  fn test_resolve_returns_fresh_instances() {
    let mut catalog = StandardCatalog::new();
    catalog.register(|| SetOutput {
      output_name: "default".to_string(),
      ..Default::default()
    });

    let mut first = resolve_as::<SetOutput>(&catalog).unwrap();
    first.output_name = "changed".to_string();

    let second = resolve_as::<SetOutput>(&catalog).unwrap();
    assert_eq!(second.output_name, "default");
  }

  #[test]
  fn test_resolve_unknown_type() {
    let catalog = StandardCatalog::new();
    assert!(matches!(
      catalog.resolve("nope"),
      Err(CatalogError::ActivityTypeNotFound(name)) if name == "nope"
    ));
    assert!(matches!(
      resolve_as::<SetOutput>(&catalog),
      Err(CatalogError::ActivityTypeNotFound(_))
    ));
  }

  #[test]
  fn test_resolve_as_wrong_concrete_type() {
    let mut catalog = StandardCatalog::new();
    // A factory registered under set_output that builds something else.
    catalog.factories.insert(
      SetOutput::TYPE_NAME.to_string(),
      Arc::new(|| Box::new(SetProperty::default()) as Box<dyn Activity>),
    );

    assert!(matches!(
      resolve_as::<SetOutput>(&catalog),
      Err(CatalogError::TypeMismatch { .. })
    ));
  }

  #[test]
  fn test_instantiate_applies_properties() {
    let catalog = StandardCatalog::with_builtins();
    let record = ActivityRecord {
      activity_id: "a1".to_string(),
      activity_type: "set_output".to_string(),
      is_start: true,
      properties: Properties::new()
        .with("output_name", PropertyValue::literal("result"))
        .with("value", PropertyValue::expression("input.x")),
    };

    let activity = instantiate(&catalog, &record).unwrap();
    assert_eq!(activity.activity_type(), "set_output");
    assert_eq!(activity.properties(), record.properties);
  }

  #[test]
  fn test_instantiate_rejects_bad_properties() {
    let catalog = StandardCatalog::with_builtins();
    let record = ActivityRecord {
      activity_id: "a1".to_string(),
      activity_type: "set_output".to_string(),
      is_start: false,
      properties: Properties::new().with("output_name", PropertyValue::literal(7)),
    };

    assert!(matches!(
      instantiate(&catalog, &record),
      Err(CatalogError::Properties { activity_id, .. }) if activity_id == "a1"
    ));
  }
}
