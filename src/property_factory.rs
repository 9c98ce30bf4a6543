// Copyright 2025 Cowboy AI, LLC.

//! Interning registry for properties
//!
//! There is one registry per process, shared by every [`PropertyFactory`], so
//! an equal declaration resolves to the same property whichever factory made
//! it. The registry is unbounded: properties are expected to be declared up
//! front, so nothing is ever evicted. A factory only remembers which
//! properties were declared through it. The instance behind
//! [`PropertyFactory::global`] is what the free functions [`create_property`],
//! [`create_property_with_value`] and [`create_property_variant`] use.

use crate::comparator::PropertyValue;
use crate::errors::{PropertyError, PropertyResult};
use crate::property::{Property, PropertyId, TypeTag};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

type Declarations = Vec<Box<dyn Any + Send + Sync>>;

static REGISTRY: Lazy<Mutex<HashMap<(TypeTag, String), Declarations>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static GLOBAL: Lazy<PropertyFactory> = Lazy::new(PropertyFactory::new);

/// Creates properties, returning the cached instance for repeated declarations
///
/// The shared registry is guarded by a mutex, so concurrent declarations of
/// the same property still resolve to a single identity.
///
/// # Examples
///
/// ```rust
/// use cim_progress::PropertyFactory;
///
/// let factory = PropertyFactory::new();
/// let users = factory.create("users", Some(0u64)).unwrap();
/// let again = factory.create("users", Some(0u64)).unwrap();
/// assert!(users.ptr_eq(&again));
///
/// // A different default is a different declaration
/// let other = factory.create("users", Some(10u64)).unwrap();
/// assert_ne!(users, other);
///
/// // Another factory hands out the same instance
/// let elsewhere = PropertyFactory::new().create("users", Some(0u64)).unwrap();
/// assert!(users.ptr_eq(&elsewhere));
/// ```
pub struct PropertyFactory {
    declared: Mutex<HashSet<PropertyId>>,
}

impl PropertyFactory {
    /// Create a factory that has declared nothing yet
    pub fn new() -> Self {
        Self {
            declared: Mutex::new(HashSet::new()),
        }
    }

    /// The process-wide factory
    pub fn global() -> &'static PropertyFactory {
        &GLOBAL
    }

    /// Create a property, or return the cached one with the same declaration
    pub fn create<T: PropertyValue>(
        &self,
        name: impl Into<String>,
        default_value: Option<T>,
    ) -> PropertyResult<Property<T>> {
        let name = name.into();
        if name.is_empty() {
            return Err(PropertyError::EmptyName);
        }

        let type_tag = TypeTag::of::<T>();
        let mut registry = REGISTRY.lock();
        let declarations = registry.entry((type_tag, name.clone())).or_default();

        let cached = declarations
            .iter()
            .filter_map(|entry| entry.downcast_ref::<Property<T>>())
            .find(|property| property.is_declared_as(&name, default_value.as_ref()));

        if let Some(property) = cached {
            debug!(property = %name, type_name = %type_tag, "Reusing interned property");
            self.declared.lock().insert(property.id());
            return Ok(property.clone());
        }

        let property = Property::new(name, default_value);
        declarations.push(Box::new(property.clone()));
        self.declared.lock().insert(property.id());
        debug!(
            property = %property.name(),
            type_name = %type_tag,
            id = %property.id(),
            "Interned new property"
        );
        Ok(property)
    }

    /// Create a property whose default value is always present
    pub fn create_with_value<T: PropertyValue>(
        &self,
        name: impl Into<String>,
        default_value: T,
    ) -> PropertyResult<Property<T>> {
        self.create(name, Some(default_value))
    }

    /// Create a sibling of `property` that only differs by name
    pub fn create_variant<T: PropertyValue>(
        &self,
        property: &Property<T>,
        name: impl Into<String>,
    ) -> PropertyResult<Property<T>> {
        self.create(name, property.default_value().cloned())
    }

    /// Number of distinct properties declared through this factory
    pub fn len(&self) -> usize {
        self.declared.lock().len()
    }

    /// Whether nothing has been declared through this factory yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PropertyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertyFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyFactory")
            .field("declared", &self.len())
            .finish()
    }
}

/// Create a property in the process-wide factory
pub fn create_property<T: PropertyValue>(
    name: impl Into<String>,
    default_value: Option<T>,
) -> PropertyResult<Property<T>> {
    PropertyFactory::global().create(name, default_value)
}

/// Create a property with a present default in the process-wide factory
pub fn create_property_with_value<T: PropertyValue>(
    name: impl Into<String>,
    default_value: T,
) -> PropertyResult<Property<T>> {
    PropertyFactory::global().create_with_value(name, default_value)
}

/// Create a renamed sibling of `property` in the process-wide factory
pub fn create_property_variant<T: PropertyValue>(
    property: &Property<T>,
    name: impl Into<String>,
) -> PropertyResult<Property<T>> {
    PropertyFactory::global().create_variant(property, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ReachValue;
    use crate::values::Values;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_equal_declarations_are_interned() {
        let factory = PropertyFactory::new();
        let a = factory.create("users", Some(0i32)).unwrap();
        let b = factory.create("users", Some(0i32)).unwrap();

        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_declarations_differ_by_type_name_and_default() {
        let factory = PropertyFactory::new();
        let base = factory.create("users", Some(0i32)).unwrap();

        let other_default = factory.create("users", Some(1i32)).unwrap();
        let no_default = factory.create::<i32>("users", None).unwrap();
        let other_name = factory.create("admins", Some(0i32)).unwrap();
        let other_type = factory.create("users", Some(0i64)).unwrap();

        assert_ne!(base, other_default);
        assert_ne!(base, no_default);
        assert_ne!(base, other_name);
        assert_ne!(base.id(), other_type.id());
        assert_eq!(factory.len(), 5);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let factory = PropertyFactory::new();
        let err = factory.create::<bool>("", None).unwrap_err();
        assert!(matches!(err, PropertyError::EmptyName));
        assert!(factory.is_empty());
    }

    #[test]
    fn test_variant_shares_type_and_default() {
        let factory = PropertyFactory::new();
        let base = factory.create_with_value("users", 5u32).unwrap();
        let variant = factory.create_variant(&base, "users_target").unwrap();

        assert_eq!(variant.name(), "users_target");
        assert_eq!(variant.default_value(), Some(&5));
        assert_eq!(variant.type_tag(), base.type_tag());
        assert_ne!(variant, base);

        // Variants are interned like any other declaration
        let again = factory.create_variant(&base, "users_target").unwrap();
        assert!(variant.ptr_eq(&again));
    }

    #[test]
    fn test_factories_share_one_registry() {
        let left = PropertyFactory::new();
        let right = PropertyFactory::new();
        let a = left.create_with_value("shared_registry_users", 0i32).unwrap();
        let b = right.create_with_value("shared_registry_users", 0i32).unwrap();

        assert_eq!(a, b);
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);

        // Values built with one handle answer lookups made with the other
        let reach = Values::builder()
            .with(ReachValue::new(a, 100))
            .build()
            .unwrap();
        assert_eq!(reach.get_reach_value(&b).map(|v| *v.value()), Some(100));
    }

    #[test]
    fn test_concurrent_declarations_share_identity() {
        let factory = Arc::new(PropertyFactory::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let factory = Arc::clone(&factory);
                thread::spawn(move || factory.create_with_value("shared", 42u64).unwrap().id())
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_global_free_functions() {
        let a = create_property_with_value("global_factory_test_users", 0i32).unwrap();
        let b = create_property("global_factory_test_users", Some(0i32)).unwrap();
        assert!(a.ptr_eq(&b));

        let variant = create_property_variant(&a, "global_factory_test_admins").unwrap();
        assert_eq!(variant.default_value(), Some(&0));
    }
}
