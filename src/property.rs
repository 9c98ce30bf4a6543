// Copyright 2025 Cowboy AI, LLC.

//! Property identities
//!
//! A property is an immutable `(type, name, default)` triple. Instances are
//! only handed out by a [`PropertyFactory`](crate::PropertyFactory), and every
//! factory interns into one process-wide registry: equal declarations yield
//! the same instance and therefore the same [`PropertyId`].

use crate::comparator::PropertyValue;
use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Opaque tag describing the payload type of a property
///
/// Used only for equality and hashing of declarations; it carries the type
/// name for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for the type `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Fully qualified name of the tagged type
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity of an interned property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(Uuid);

impl PropertyId {
    /// Create a new random property ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PropertyId> for Uuid {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

struct PropertyInner<T> {
    id: PropertyId,
    type_tag: TypeTag,
    name: String,
    default_value: Option<T>,
}

/// A typed, named property, e.g. the amount of users in a system
///
/// Cloning is cheap and preserves identity. Two properties are equal when
/// their type, name and default are equal, which for interned properties
/// means they are the same instance.
///
/// # Examples
///
/// ```rust
/// use cim_progress::PropertyFactory;
///
/// let factory = PropertyFactory::new();
/// let users = factory.create_with_value("users", 0i32).unwrap();
///
/// assert_eq!(users.name(), "users");
/// assert_eq!(users.default_value(), Some(&0));
/// assert_eq!(users, factory.create_with_value("users", 0i32).unwrap());
/// ```
pub struct Property<T> {
    inner: Arc<PropertyInner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PropertyValue> Property<T> {
    pub(crate) fn new(name: String, default_value: Option<T>) -> Self {
        Self {
            inner: Arc::new(PropertyInner {
                id: PropertyId::new(),
                type_tag: TypeTag::of::<T>(),
                name,
                default_value,
            }),
        }
    }

    /// Whether this property was declared with exactly `name` and `default_value`
    pub(crate) fn is_declared_as(&self, name: &str, default_value: Option<&T>) -> bool {
        self.inner.name == name && self.inner.default_value.as_ref() == default_value
    }

    /// Value a freshly derived current value starts from
    ///
    /// The declared default wins; otherwise the zero of the payload kind.
    pub fn seed(&self) -> Option<T> {
        self.inner.default_value.clone().or_else(T::zero)
    }
}

impl<T> Property<T> {
    /// Identity of this property
    pub fn id(&self) -> PropertyId {
        self.inner.id
    }

    /// Payload type tag
    pub fn type_tag(&self) -> TypeTag {
        self.inner.type_tag
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Declared default value, if any
    pub fn default_value(&self) -> Option<&T> {
        self.inner.default_value.as_ref()
    }

    /// Whether both handles are the same interned instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: PartialEq> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
            || (self.inner.type_tag == other.inner.type_tag
                && self.inner.name == other.inner.name
                && self.inner.default_value == other.inner.default_value)
    }
}

impl<T: PartialEq> Eq for Property<T> {}

// The default is left out so equal declarations always hash alike
impl<T> Hash for Property<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.type_tag.hash(state);
        self.inner.name.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("type", &self.inner.type_tag)
            .field("name", &self.inner.name)
            .field("default_value", &self.inner.default_value)
            .finish()
    }
}

impl<T> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    #[test]
    fn test_type_tag_equality() {
        assert_eq!(TypeTag::of::<i32>(), TypeTag::of::<i32>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i64>());
        assert_eq!(TypeTag::of::<u8>().name(), "u8");
    }

    #[test]
    fn test_seed_prefers_default() {
        let with_default = Property::new("users".to_string(), Some(7i32));
        assert_eq!(with_default.seed(), Some(7));

        let without_default = Property::<i32>::new("users".to_string(), None);
        assert_eq!(without_default.seed(), Some(0));

        let flag = Property::<bool>::new("enabled".to_string(), None);
        assert_eq!(flag.seed(), Some(false));
    }

    fn hash_of<T>(property: &Property<T>) -> u64 {
        let mut hasher = DefaultHasher::new();
        property.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_follows_the_declaration() {
        let a = Property::new("users".to_string(), Some(0i32));
        let b = Property::new("users".to_string(), Some(0i32));

        // Same declaration, separate instances
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Property::new("users".to_string(), Some(1i32)));
        assert_ne!(a, Property::new("users".to_string(), None));
        assert_ne!(a, Property::new("admins".to_string(), Some(0i32)));
        assert_eq!(a, a.clone());
        assert!(a.ptr_eq(&a.clone()));
        assert!(a.is_declared_as("users", Some(&0)));
        assert!(!a.is_declared_as("users", None));
    }

    #[test]
    fn test_display_and_debug() {
        let property = Property::new("users".to_string(), Some(3u32));
        assert_eq!(property.to_string(), "users");
        let debug = format!("{property:?}");
        assert!(debug.contains("users"));
        assert!(debug.contains("u32"));
    }
}
