// Copyright 2025 Cowboy AI, LLC.

//! Property values and their kinds
//!
//! A value binds a [`Property`] to a payload and tags it with a [`ValueType`]:
//!
//! - **Constant**: immutable, usually a precondition ("system is A")
//! - **Current**: mutable progress, changed in place through [`CurrentValue::apply`]
//! - **Reach**: immutable target the current value should reach
//!
//! All kinds share one definition of "reached": the held payload compared to a
//! probe with the value's [`Comparator`] is not `Less`. The kinds only differ
//! in mutability.

use crate::comparator::{Comparator, PropertyValue};
use crate::property::Property;
use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// Immutable value
    Constant,
    /// Mutable, tracked value
    Current,
    /// Immutable target
    Reach,
}

impl ValueType {
    /// Every kind, in declaration order
    pub const ALL: [ValueType; 3] = [ValueType::Constant, ValueType::Current, ValueType::Reach];

    /// Create the value of this kind for `property`
    ///
    /// ```rust
    /// use cim_progress::{PropertyFactory, ValueType};
    ///
    /// let users = PropertyFactory::new().create_with_value("users", 0i32).unwrap();
    /// for kind in ValueType::ALL {
    ///     assert_eq!(kind.create(&users, 10).value_type(), kind);
    /// }
    /// ```
    pub fn create<T: PropertyValue>(self, property: &Property<T>, value: T) -> Value<T> {
        self.create_with_comparator(property, value, T::default_comparator())
    }

    /// Create the value of this kind with an explicit comparator
    pub fn create_with_comparator<T: PropertyValue>(
        self,
        property: &Property<T>,
        value: T,
        comparator: Comparator<T>,
    ) -> Value<T> {
        match self {
            ValueType::Constant => {
                ConstantValue::with_comparator(property.clone(), value, comparator).into()
            }
            ValueType::Current => {
                CurrentValue::with_comparator(property.clone(), value, comparator).into()
            }
            ValueType::Reach => {
                ReachValue::with_comparator(property.clone(), value, comparator).into()
            }
        }
    }

    /// Display name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Constant => "CONSTANT",
            ValueType::Current => "CURRENT",
            ValueType::Reach => "REACH",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable value of a property
#[derive(Clone)]
pub struct ConstantValue<T> {
    property: Property<T>,
    value: T,
    comparator: Comparator<T>,
}

impl<T: PropertyValue> ConstantValue<T> {
    /// Create a constant using the payload's default comparator
    pub fn new(property: Property<T>, value: T) -> Self {
        Self::with_comparator(property, value, T::default_comparator())
    }

    /// Create a constant with an explicit comparator
    pub fn with_comparator(property: Property<T>, value: T, comparator: Comparator<T>) -> Self {
        Self {
            property,
            value,
            comparator,
        }
    }

    /// Owning property
    pub fn property(&self) -> &Property<T> {
        &self.property
    }

    /// Held payload
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Comparator used by [`reached`](Self::reached)
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Whether the held payload reached `probe`
    pub fn reached(&self, probe: &T) -> bool {
        self.comparator.reached(&self.value, probe)
    }
}

/// An immutable target value of a property
#[derive(Clone)]
pub struct ReachValue<T> {
    property: Property<T>,
    value: T,
    comparator: Comparator<T>,
}

impl<T: PropertyValue> ReachValue<T> {
    /// Create a target using the payload's default comparator
    pub fn new(property: Property<T>, value_to_reach: T) -> Self {
        Self::with_comparator(property, value_to_reach, T::default_comparator())
    }

    /// Create a target with an explicit comparator
    pub fn with_comparator(
        property: Property<T>,
        value_to_reach: T,
        comparator: Comparator<T>,
    ) -> Self {
        Self {
            property,
            value: value_to_reach,
            comparator,
        }
    }

    /// Owning property
    pub fn property(&self) -> &Property<T> {
        &self.property
    }

    /// Value to reach
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Comparator used by [`reached`](Self::reached)
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Whether the target itself is at least `probe`
    pub fn reached(&self, probe: &T) -> bool {
        self.comparator.reached(&self.value, probe)
    }
}

/// A mutable, tracked value of a property
///
/// Clones share the same cell: mutating one clone is visible through every
/// other clone, the way a container hands out its current values. The cell is
/// behind a read-write lock, so a concurrent reader observes either the old or
/// the new payload, never a torn one. Containers themselves stay
/// single-writer.
#[derive(Clone)]
pub struct CurrentValue<T> {
    property: Property<T>,
    cell: Arc<RwLock<T>>,
    comparator: Comparator<T>,
}

impl<T: PropertyValue> CurrentValue<T> {
    /// Create a current value using the payload's default comparator
    pub fn new(property: Property<T>, value: T) -> Self {
        Self::with_comparator(property, value, T::default_comparator())
    }

    /// Create a current value with an explicit comparator
    pub fn with_comparator(property: Property<T>, value: T, comparator: Comparator<T>) -> Self {
        Self {
            property,
            cell: Arc::new(RwLock::new(value)),
            comparator,
        }
    }

    /// Current value seeded from the property's default, or its kind zero
    pub fn seeded(property: Property<T>) -> Option<Self> {
        let seed = property.seed()?;
        Some(Self::new(property, seed))
    }

    /// Current value seeded with the target itself
    pub fn seeded_with_target(target: &ReachValue<T>) -> Self {
        Self::with_comparator(
            target.property.clone(),
            target.value.clone(),
            target.comparator.clone(),
        )
    }

    /// Owning property
    pub fn property(&self) -> &Property<T> {
        &self.property
    }

    /// Snapshot of the held payload
    pub fn get(&self) -> T {
        self.cell.read().clone()
    }

    /// Comparator used by [`reached`](Self::reached)
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Whether the held payload reached `probe`
    pub fn reached(&self, probe: &T) -> bool {
        let held = self.cell.read();
        self.comparator.reached(&held, probe)
    }

    /// Replace the held payload with `op(held)`
    ///
    /// `op` runs on a snapshot with no lock held, so it may read this cell
    /// through any handle. Concurrent `apply` calls on one cell are
    /// last-writer-wins.
    ///
    /// ```rust
    /// use cim_progress::{CurrentValue, PropertyFactory};
    ///
    /// let users = PropertyFactory::new().create_with_value("users", 0i32).unwrap();
    /// let current = CurrentValue::new(users, 1);
    /// current.apply(|n| n + 41);
    /// assert_eq!(current.get(), 42);
    /// ```
    pub fn apply<F>(&self, op: F)
    where
        F: FnOnce(T) -> T,
    {
        let snapshot = self.get();
        let next = op(snapshot);
        *self.cell.write() = next;
    }

    /// An independent copy that no longer shares the cell
    pub fn detached(&self) -> Self {
        Self::with_comparator(self.property.clone(), self.get(), self.comparator.clone())
    }

    /// Whether both handles share the same cell
    pub fn shares_cell(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

/// A value of any kind
///
/// ```rust
/// use cim_progress::{PropertyFactory, Value, ValueType};
///
/// let users = PropertyFactory::new().create_with_value("users", 0i32).unwrap();
/// let target = ValueType::Reach.create(&users, 100);
/// let current = ValueType::Current.create(&users, 100);
///
/// assert!(current.reached_value(&target));
/// assert!(target.as_reach().is_some());
/// assert!(target.as_current().is_none());
/// ```
#[derive(Clone)]
pub enum Value<T> {
    /// Immutable value
    Constant(ConstantValue<T>),
    /// Mutable, tracked value
    Current(CurrentValue<T>),
    /// Immutable target
    Reach(ReachValue<T>),
}

impl<T: PropertyValue> Value<T> {
    /// Owning property
    pub fn property(&self) -> &Property<T> {
        match self {
            Value::Constant(v) => v.property(),
            Value::Current(v) => v.property(),
            Value::Reach(v) => v.property(),
        }
    }

    /// Snapshot of the held payload
    pub fn get(&self) -> T {
        match self {
            Value::Constant(v) => v.value().clone(),
            Value::Current(v) => v.get(),
            Value::Reach(v) => v.value().clone(),
        }
    }

    /// Kind tag, always matching the variant
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Constant(_) => ValueType::Constant,
            Value::Current(_) => ValueType::Current,
            Value::Reach(_) => ValueType::Reach,
        }
    }

    /// Comparator attached to the value
    pub fn comparator(&self) -> &Comparator<T> {
        match self {
            Value::Constant(v) => v.comparator(),
            Value::Current(v) => v.comparator(),
            Value::Reach(v) => v.comparator(),
        }
    }

    /// Whether the held payload reached `probe`
    pub fn reached(&self, probe: &T) -> bool {
        match self {
            Value::Constant(v) => v.reached(probe),
            Value::Current(v) => v.reached(probe),
            Value::Reach(v) => v.reached(probe),
        }
    }

    /// Whether the held payload reached the payload held by `other`
    pub fn reached_value(&self, other: &Value<T>) -> bool {
        self.reached(&other.get())
    }

    /// The constant variant, if this is one
    pub fn as_constant(&self) -> Option<&ConstantValue<T>> {
        match self {
            Value::Constant(v) => Some(v),
            _ => None,
        }
    }

    /// The current variant, if this is one
    pub fn as_current(&self) -> Option<&CurrentValue<T>> {
        match self {
            Value::Current(v) => Some(v),
            _ => None,
        }
    }

    /// The reach variant, if this is one
    pub fn as_reach(&self) -> Option<&ReachValue<T>> {
        match self {
            Value::Reach(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<ConstantValue<T>> for Value<T> {
    fn from(value: ConstantValue<T>) -> Self {
        Value::Constant(value)
    }
}

impl<T> From<CurrentValue<T>> for Value<T> {
    fn from(value: CurrentValue<T>) -> Self {
        Value::Current(value)
    }
}

impl<T> From<ReachValue<T>> for Value<T> {
    fn from(value: ReachValue<T>) -> Self {
        Value::Reach(value)
    }
}

impl<T: PropertyValue> PartialEq for Value<T> {
    fn eq(&self, other: &Self) -> bool {
        self.property() == other.property()
            && self.value_type() == other.value_type()
            && self.get() == other.get()
    }
}

impl<T: PropertyValue> fmt::Debug for ConstantValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantValue")
            .field("property", &self.property.name())
            .field("value", &self.value)
            .finish()
    }
}

impl<T: PropertyValue> fmt::Debug for ReachValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachValue")
            .field("property", &self.property.name())
            .field("value", &self.value)
            .finish()
    }
}

impl<T: PropertyValue> fmt::Debug for CurrentValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentValue")
            .field("property", &self.property.name())
            .field("value", &*self.cell.read())
            .finish()
    }
}

impl<T: PropertyValue> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Constant(v) => fmt::Debug::fmt(v, f),
            Value::Current(v) => fmt::Debug::fmt(v, f),
            Value::Reach(v) => fmt::Debug::fmt(v, f),
        }
    }
}

/// A property paired with the kind of value it is used for
///
/// ```rust
/// use cim_progress::{PropertyFactory, ValueType, ValueTypedProperty};
///
/// let users = PropertyFactory::new().create_with_value("users", 0i32).unwrap();
/// let target = ValueTypedProperty::new(users, ValueType::Reach);
/// assert_eq!(target.create_value(100).value_type(), ValueType::Reach);
/// ```
pub struct ValueTypedProperty<T> {
    property: Property<T>,
    value_type: ValueType,
}

impl<T> ValueTypedProperty<T> {
    /// Pair `property` with `value_type`
    pub fn new(property: Property<T>, value_type: ValueType) -> Self {
        Self {
            property,
            value_type,
        }
    }

    /// The property
    pub fn property(&self) -> &Property<T> {
        &self.property
    }

    /// The kind of value created for the property
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl<T: PropertyValue> ValueTypedProperty<T> {
    /// Create a value of the paired kind
    pub fn create_value(&self, value: T) -> Value<T> {
        self.value_type.create(&self.property, value)
    }
}

impl<T> Clone for ValueTypedProperty<T> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            value_type: self.value_type,
        }
    }
}

impl<T: PartialEq> PartialEq for ValueTypedProperty<T> {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.value_type == other.value_type
    }
}

impl<T: PartialEq> Eq for ValueTypedProperty<T> {}

impl<T> Hash for ValueTypedProperty<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
        self.value_type.hash(state);
    }
}

impl<T> fmt::Debug for ValueTypedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTypedProperty")
            .field("property", &self.property.name())
            .field("value_type", &self.value_type)
            .finish()
    }
}
