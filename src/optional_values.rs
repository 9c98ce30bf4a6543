// Copyright 2025 Cowboy AI, LLC.

//! Precondition chains over a [`Values`] container
//!
//! A chain starts alive and dies on the first failed `match_*` call. A dead
//! chain answers every query with `None` whatever the container holds, and it
//! never comes back to life:
//!
//! ```text
//! Alive --match ok--> Alive
//! Alive --match fails--> Dead
//! Dead  --anything--> Dead
//! ```

use crate::comparator::PropertyValue;
use crate::property::Property;
use crate::value::{ConstantValue, CurrentValue, ReachValue, Value, ValueType};
use crate::values::Values;
use tracing::trace;

/// A short-circuiting guard over a borrowed [`Values`] container
///
/// # Examples
///
/// ```rust
/// use cim_progress::{value_ops, ConstantValue, CurrentValue, PropertyFactory, Values};
///
/// let factory = PropertyFactory::new();
/// let online = factory.create_with_value("online", false).unwrap();
/// let users = factory.create_with_value("users", 0i32).unwrap();
/// let values = Values::builder()
///     .with(ConstantValue::new(online.clone(), true))
///     .with(CurrentValue::new(users.clone(), 0))
///     .build()
///     .unwrap();
///
/// // Only count a user while the system is online
/// values
///     .optional()
///     .match_constant(&online, &true)
///     .get_current_value(&users)
///     .into_iter()
///     .for_each(value_ops::apply(value_ops::increment_i32()));
///
/// assert_eq!(values.get_current_value(&users).unwrap().get(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum OptionalValues<'a> {
    /// Every precondition so far held; queries see the container
    Alive(&'a Values),
    /// A precondition failed; queries see nothing
    Dead(&'a Values),
}

impl<'a> OptionalValues<'a> {
    /// An alive chain over `values`
    pub fn some(values: &'a Values) -> Self {
        OptionalValues::Alive(values)
    }

    /// A dead chain over `values`
    pub fn empty(values: &'a Values) -> Self {
        OptionalValues::Dead(values)
    }

    /// The wrapped container, regardless of state
    pub fn values(&self) -> &'a Values {
        match self {
            OptionalValues::Alive(values) | OptionalValues::Dead(values) => *values,
        }
    }

    /// Whether every precondition so far held
    pub fn is_alive(&self) -> bool {
        matches!(self, OptionalValues::Alive(_))
    }

    /// Whether a precondition failed
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    fn alive(&self) -> Option<&'a Values> {
        match self {
            OptionalValues::Alive(values) => Some(*values),
            OptionalValues::Dead(_) => None,
        }
    }

    /// The value of `property`, if alive and present
    pub fn get_value<T: PropertyValue>(&self, property: &Property<T>) -> Option<&'a Value<T>> {
        self.alive()?.get_value(property)
    }

    /// The constant value of `property`, if alive and present
    pub fn get_constant_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&'a ConstantValue<T>> {
        self.alive()?.get_constant_value(property)
    }

    /// The current value of `property`, if alive and present
    pub fn get_current_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&'a CurrentValue<T>> {
        self.alive()?.get_current_value(property)
    }

    /// The reach value of `property`, if alive and present
    pub fn get_reach_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&'a ReachValue<T>> {
        self.alive()?.get_reach_value(property)
    }

    /// Stay alive only if the value of `property`, of any kind, reached `value`
    pub fn match_any<T: PropertyValue>(self, property: &Property<T>, value: &T) -> Self {
        self.match_where(property, |present| present.reached(value))
    }

    /// Stay alive only if the value of `property` is of `kind` and reached `value`
    pub fn match_kind<T: PropertyValue>(
        self,
        property: &Property<T>,
        value: &T,
        kind: ValueType,
    ) -> Self {
        self.match_where(property, |present| {
            present.value_type() == kind && present.reached(value)
        })
    }

    /// Stay alive only if `property` holds a constant that reached `value`
    pub fn match_constant<T: PropertyValue>(self, property: &Property<T>, value: &T) -> Self {
        self.match_kind(property, value, ValueType::Constant)
    }

    /// Stay alive only if `property` holds a current value that reached `value`
    pub fn match_current<T: PropertyValue>(self, property: &Property<T>, value: &T) -> Self {
        self.match_kind(property, value, ValueType::Current)
    }

    /// Stay alive only if `property` holds a target that reached `value`
    pub fn match_reach<T: PropertyValue>(self, property: &Property<T>, value: &T) -> Self {
        self.match_kind(property, value, ValueType::Reach)
    }

    fn match_where<T, F>(self, property: &Property<T>, predicate: F) -> Self
    where
        T: PropertyValue,
        F: FnOnce(&Value<T>) -> bool,
    {
        let Some(values) = self.alive() else {
            return self;
        };
        match values.get_value(property) {
            Some(present) if predicate(present) => self,
            _ => {
                trace!(property = property.name(), "Precondition failed; chain is dead");
                OptionalValues::Dead(values)
            }
        }
    }
}
