// Copyright 2025 Cowboy AI, LLC.

//! # CIM Progress
//!
//! Typed properties and progress tracking for the Composable Information Machine.
//!
//! This crate tracks how far a set of values has come towards a set of targets:
//! - **Property**: An interned, typed name such as "users: i32"
//! - **Values**: Property-indexed containers, at most one value per property
//! - **Value Types**: Constants (preconditions), current values (progress)
//!   and reach values (targets)
//! - **Precondition Chains**: [`OptionalValues`] guards that short-circuit
//!   on the first failed match
//! - **Operators**: Pure increment and negation functions in [`value_ops`]
//! - **Tracking**: [`ProgressTracker`] and its serializable [`ProgressReport`]
//!
//! ## Design Principles
//!
//! 1. **Identity**: Interning makes equal declarations the same property
//! 2. **Type Safety**: A `Property<T>` only ever yields `Value<T>`
//! 3. **Controlled Mutation**: Only current values change, and only through operators
//!
//! ## Example
//!
//! ```rust
//! use cim_progress::{value_ops, ConstantValue, PropertyFactory, ReachValue, Values};
//!
//! let factory = PropertyFactory::new();
//! let online = factory.create_with_value("online", false).unwrap();
//! let users = factory.create_with_value("users", 0i32).unwrap();
//!
//! let targets = Values::builder()
//!     .with(ConstantValue::new(online.clone(), true))
//!     .with(ReachValue::new(users.clone(), 3))
//!     .build()
//!     .unwrap();
//! let current = targets.create_current_values().unwrap();
//!
//! current
//!     .optional()
//!     .match_constant(&online, &true)
//!     .get_current_value(&users)
//!     .into_iter()
//!     .for_each(value_ops::apply(value_ops::increment_i32_by(3)));
//!
//! assert!(current.is_complete(&targets));
//! ```

#![warn(missing_docs)]

mod comparator;
mod config;
mod errors;
mod optional_values;
mod property;
mod property_factory;
mod tracker;
mod value;
mod values;
pub mod value_ops;

// Re-export core types
pub use comparator::{Comparator, PropertyValue};
pub use config::{SeedStrategy, TrackerConfig};
pub use errors::{PropertyError, PropertyResult};
pub use optional_values::OptionalValues;
pub use property::{Property, PropertyId, TypeTag};
pub use property_factory::{
    create_property, create_property_variant, create_property_with_value, PropertyFactory,
};
pub use tracker::{ProgressEntry, ProgressReport, ProgressTracker};
pub use value::{ConstantValue, CurrentValue, ReachValue, Value, ValueType, ValueTypedProperty};
pub use values::{AnyValue, Values, ValuesBuilder, ValuesHolder};
