// Copyright 2025 Cowboy AI, LLC.

//! Value containers
//!
//! [`Values`] holds at most one value per property, of any payload type and
//! kind. It is indexed by property identity and partitioned by [`ValueType`],
//! so typed lookups are constant time. A container of reach targets derives
//! its matching container of current values with
//! [`Values::create_current_values`], and the current container is checked
//! against the targets with [`Values::is_complete`].

use crate::comparator::PropertyValue;
use crate::config::SeedStrategy;
use crate::errors::{PropertyError, PropertyResult};
use crate::optional_values::OptionalValues;
use crate::property::{Property, PropertyId};
use crate::value::{ConstantValue, CurrentValue, ReachValue, Value, ValueType};
use indexmap::{IndexMap, IndexSet};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, trace, warn};

/// Type-erased operations a container needs from a `Value<T>`
trait ErasedValue: Send + Sync {
    fn property_id(&self) -> PropertyId;
    fn property_name(&self) -> &str;
    fn value_type(&self) -> ValueType;
    fn as_any(&self) -> &dyn Any;
    /// Whether `candidate` (same property) reached the payload held here
    fn is_reached_by(&self, candidate: &dyn ErasedValue) -> bool;
    fn derive_current(&self, seed: SeedStrategy) -> PropertyResult<AnyValue>;
    fn to_json(&self) -> serde_json::Value;
    fn clone_erased(&self) -> Box<dyn ErasedValue>;
    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: PropertyValue> ErasedValue for Value<T> {
    fn property_id(&self) -> PropertyId {
        self.property().id()
    }

    fn property_name(&self) -> &str {
        self.property().name()
    }

    fn value_type(&self) -> ValueType {
        Value::value_type(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_reached_by(&self, candidate: &dyn ErasedValue) -> bool {
        candidate
            .as_any()
            .downcast_ref::<Value<T>>()
            .is_some_and(|candidate| candidate.reached(&self.get()))
    }

    fn derive_current(&self, seed: SeedStrategy) -> PropertyResult<AnyValue> {
        let derived = match self {
            Value::Reach(target) => {
                let current = match seed {
                    SeedStrategy::Default => {
                        let property = target.property();
                        let start = property.seed().ok_or_else(|| PropertyError::MissingSeed {
                            property: property.name().to_string(),
                        })?;
                        CurrentValue::with_comparator(
                            property.clone(),
                            start,
                            target.comparator().clone(),
                        )
                    }
                    SeedStrategy::Target => CurrentValue::seeded_with_target(target),
                };
                Value::Current(current)
            }
            Value::Constant(constant) => Value::Constant(constant.clone()),
            Value::Current(current) => Value::Current(current.detached()),
        };
        Ok(derived.into())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.get()).unwrap_or_else(|err| {
            warn!(
                property = self.property().name(),
                error = %err,
                "Payload could not be rendered as JSON"
            );
            serde_json::Value::Null
        })
    }

    fn clone_erased(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A value of any payload type, as stored in a [`Values`] container
///
/// Built from any typed value with `into()`.
pub struct AnyValue(Box<dyn ErasedValue>);

impl AnyValue {
    /// Identity of the owning property
    pub fn property_id(&self) -> PropertyId {
        self.0.property_id()
    }

    /// Name of the owning property
    pub fn property_name(&self) -> &str {
        self.0.property_name()
    }

    /// Kind of the value
    pub fn value_type(&self) -> ValueType {
        self.0.value_type()
    }

    /// Payload rendered as JSON; `null` (with a warning) if it cannot be
    pub fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }

    /// The typed value, if the payload type is `T`
    pub fn downcast_ref<T: PropertyValue>(&self) -> Option<&Value<T>> {
        self.0.as_any().downcast_ref::<Value<T>>()
    }

    /// Whether `candidate` reached the payload held by this value
    ///
    /// Always false when the two belong to different properties.
    pub fn is_reached_by(&self, candidate: &AnyValue) -> bool {
        self.property_id() == candidate.property_id() && self.0.is_reached_by(&*candidate.0)
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        AnyValue(self.0.clone_erased())
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_erased(f)
    }
}

impl<T: PropertyValue> From<Value<T>> for AnyValue {
    fn from(value: Value<T>) -> Self {
        AnyValue(Box::new(value))
    }
}

impl<T: PropertyValue> From<ConstantValue<T>> for AnyValue {
    fn from(value: ConstantValue<T>) -> Self {
        Value::Constant(value).into()
    }
}

impl<T: PropertyValue> From<CurrentValue<T>> for AnyValue {
    fn from(value: CurrentValue<T>) -> Self {
        Value::Current(value).into()
    }
}

impl<T: PropertyValue> From<ReachValue<T>> for AnyValue {
    fn from(value: ReachValue<T>) -> Self {
        Value::Reach(value).into()
    }
}

/// A set of values, at most one per property
///
/// Cloning a container shares the cells of its current values; use
/// [`create_current_values`](Self::create_current_values) for an independent
/// tracking set.
///
/// # Examples
///
/// ```rust
/// use cim_progress::{PropertyFactory, ReachValue, Values};
///
/// let factory = PropertyFactory::new();
/// let users = factory.create_with_value("users", 0i32).unwrap();
///
/// let targets = Values::builder()
///     .with(ReachValue::new(users.clone(), 2))
///     .build()
///     .unwrap();
/// let current = targets.create_current_values().unwrap();
/// assert!(!current.is_complete(&targets));
///
/// current.get_current_value(&users).unwrap().apply(|n| n + 2);
/// assert!(current.is_complete(&targets));
/// ```
#[derive(Clone, Default)]
pub struct Values {
    entries: IndexMap<PropertyId, AnyValue>,
    by_kind: HashMap<ValueType, IndexSet<PropertyId>>,
}

impl Values {
    /// An empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a container value by value
    pub fn builder() -> ValuesBuilder {
        ValuesBuilder::default()
    }

    /// Build a container from `values`, rejecting a second value for any property
    pub fn of<I>(values: I) -> PropertyResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<AnyValue>,
    {
        let mut container = Self::new();
        for value in values {
            container.insert(value.into())?;
        }
        Ok(container)
    }

    fn insert(&mut self, value: AnyValue) -> PropertyResult<()> {
        let id = value.property_id();
        if self.entries.contains_key(&id) {
            warn!(
                property = value.property_name(),
                "Rejected a second value for a property"
            );
            return Err(PropertyError::duplicate(value.property_name()));
        }
        self.by_kind.entry(value.value_type()).or_default().insert(id);
        self.entries.insert(id, value);
        Ok(())
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container holds no values
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of values of `kind`
    pub fn count(&self, kind: ValueType) -> usize {
        self.by_kind.get(&kind).map_or(0, IndexSet::len)
    }

    /// Whether a value of any kind is present for `property`
    pub fn contains<T>(&self, property: &Property<T>) -> bool {
        self.entries.contains_key(&property.id())
    }

    /// Every value, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AnyValue> {
        self.entries.values()
    }

    /// Every value of `kind`, in insertion order
    pub fn iter_kind(&self, kind: ValueType) -> impl Iterator<Item = &AnyValue> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.entries.get(id))
    }

    /// Names of the properties present, in insertion order
    pub fn property_names(&self) -> Vec<&str> {
        self.iter().map(AnyValue::property_name).collect()
    }

    /// The value of `property`, whatever its kind
    pub fn get_value<T: PropertyValue>(&self, property: &Property<T>) -> Option<&Value<T>> {
        self.entries
            .get(&property.id())
            .and_then(AnyValue::downcast_ref::<T>)
    }

    fn get_of_kind<T: PropertyValue>(
        &self,
        property: &Property<T>,
        kind: ValueType,
    ) -> Option<&Value<T>> {
        let present = self
            .by_kind
            .get(&kind)
            .is_some_and(|ids| ids.contains(&property.id()));
        if !present {
            return None;
        }
        self.get_value(property)
    }

    /// The constant value of `property`; absent if missing or of another kind
    pub fn get_constant_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&ConstantValue<T>> {
        self.get_of_kind(property, ValueType::Constant)
            .and_then(Value::as_constant)
    }

    /// The current value of `property`; absent if missing or of another kind
    pub fn get_current_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&CurrentValue<T>> {
        self.get_of_kind(property, ValueType::Current)
            .and_then(Value::as_current)
    }

    /// The reach value of `property`; absent if missing or of another kind
    pub fn get_reach_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&ReachValue<T>> {
        self.get_of_kind(property, ValueType::Reach)
            .and_then(Value::as_reach)
    }

    /// `Some(self)` if a value for `property` is present
    pub fn if_value_present<T>(&self, property: &Property<T>) -> Option<&Self> {
        self.contains(property).then_some(self)
    }

    /// Start a precondition chain over this container
    ///
    /// ```rust
    /// use cim_progress::{ConstantValue, CurrentValue, PropertyFactory, Values};
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
    /// assert!(values.optional().match_constant(&online, &true).is_alive());
    /// // Zero users have not reached one
    /// assert!(values.optional().match_current(&users, &1).is_dead());
    /// // `true` is past `false`, so a `false` probe is reached
    /// assert!(values.optional().match_constant(&online, &false).is_alive());
    /// ```
    pub fn optional(&self) -> OptionalValues<'_> {
        OptionalValues::some(self)
    }

    /// Derive the current values tracking every reach target in `self`
    ///
    /// Each reach value becomes a current value seeded from its property's
    /// default, or the zero of its kind. Values of other kinds are carried over
    /// as independent copies.
    pub fn create_current_values(&self) -> PropertyResult<Values> {
        self.create_current_values_with(SeedStrategy::Default)
    }

    /// Derive the current values with an explicit seeding strategy
    pub fn create_current_values_with(&self, seed: SeedStrategy) -> PropertyResult<Values> {
        let mut current = Values::new();
        for value in self.iter() {
            current.insert(value.0.derive_current(seed)?)?;
        }
        debug!(
            targets = self.count(ValueType::Reach),
            carried = self.len() - self.count(ValueType::Reach),
            ?seed,
            "Derived current values"
        );
        Ok(current)
    }

    /// Whether every reach target in `reach_values` has been reached here
    ///
    /// A target without a current value in `self` is simply not reached.
    /// Without targets the result is vacuously true.
    pub fn is_complete(&self, reach_values: &Values) -> bool {
        let complete = reach_values
            .iter_kind(ValueType::Reach)
            .all(|target| self.has_reached(target));
        debug!(
            complete,
            targets = reach_values.count(ValueType::Reach),
            "Evaluated completion"
        );
        complete
    }

    /// Names of the targets in `reach_values` not yet reached here
    pub fn missing_targets<'r>(&self, reach_values: &'r Values) -> Vec<&'r str> {
        reach_values
            .iter_kind(ValueType::Reach)
            .filter(|target| !self.has_reached(target))
            .map(AnyValue::property_name)
            .collect()
    }

    /// The current value tracking `target`, if any
    pub(crate) fn current_for(&self, target: &AnyValue) -> Option<&AnyValue> {
        self.entries
            .get(&target.property_id())
            .filter(|candidate| candidate.value_type() == ValueType::Current)
    }

    fn has_reached(&self, target: &AnyValue) -> bool {
        match self.current_for(target) {
            Some(current) => target.is_reached_by(current),
            None => {
                trace!(
                    property = target.property_name(),
                    "No current value tracks this target"
                );
                false
            }
        }
    }

    /// Property name to payload, as JSON
    pub fn args(&self) -> BTreeMap<String, serde_json::Value> {
        self.iter()
            .map(|value| (value.property_name().to_string(), value.to_json()))
            .collect()
    }

    /// Property name to payload, as display text
    pub fn text_args(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|value| {
                let text = match value.to_json() {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                (value.property_name().to_string(), text)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = &'a AnyValue;
    type IntoIter = indexmap::map::Values<'a, PropertyId, AnyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}

/// Fluent construction of a [`Values`] container
#[derive(Debug, Default)]
pub struct ValuesBuilder {
    values: Vec<AnyValue>,
}

impl ValuesBuilder {
    /// Add a value of any kind
    pub fn with(mut self, value: impl Into<AnyValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Build the container; fails on a second value for the same property
    pub fn build(self) -> PropertyResult<Values> {
        Values::of(self.values)
    }
}

/// Something that holds a [`Values`] container
///
/// Implementors get the typed lookups and the precondition chain for free.
pub trait ValuesHolder {
    /// The held container
    fn values(&self) -> &Values;

    /// Start a precondition chain over the held container
    fn optional(&self) -> OptionalValues<'_> {
        self.values().optional()
    }

    /// The value of `property`, whatever its kind
    fn get_value<T: PropertyValue>(&self, property: &Property<T>) -> Option<&Value<T>> {
        self.values().get_value(property)
    }

    /// The constant value of `property`
    fn get_constant_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&ConstantValue<T>> {
        self.values().get_constant_value(property)
    }

    /// The current value of `property`
    fn get_current_value<T: PropertyValue>(
        &self,
        property: &Property<T>,
    ) -> Option<&CurrentValue<T>> {
        self.values().get_current_value(property)
    }

    /// The reach value of `property`
    fn get_reach_value<T: PropertyValue>(&self, property: &Property<T>) -> Option<&ReachValue<T>> {
        self.values().get_reach_value(property)
    }
}
