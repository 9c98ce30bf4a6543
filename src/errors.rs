// Copyright 2025 Cowboy AI, LLC.

//! Error types for property and value operations

use thiserror::Error;

/// Errors that can occur while declaring properties or building value sets
///
/// Only programmer errors live here. Data-shape conditions (a value of the wrong
/// kind, a missing current value, a dead match chain) are answered with
/// `Option`/`bool` and never surface as errors.
#[derive(Debug, Clone, Error)]
pub enum PropertyError {
    /// A property was declared without a name
    #[error("Property name cannot be empty")]
    EmptyName,

    /// A second value was supplied for a property already present in a `Values`
    #[error("Duplicate property: a value for '{property}' is already present")]
    DuplicateProperty {
        /// Name of the property that was supplied twice
        property: String,
    },

    /// A current value had to be derived but nothing could seed it
    #[error("Missing seed: property '{property}' has no default value and its kind has no zero")]
    MissingSeed {
        /// Name of the property that could not be seeded
        property: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for property operations
pub type PropertyResult<T> = Result<T, PropertyError>;

impl From<serde_json::Error> for PropertyError {
    fn from(err: serde_json::Error) -> Self {
        PropertyError::SerializationError(err.to_string())
    }
}

impl PropertyError {
    /// Create a duplicate property error for `property`
    pub fn duplicate(property: impl Into<String>) -> Self {
        PropertyError::DuplicateProperty {
            property: property.into(),
        }
    }

    /// Check if this is a duplicate property error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, PropertyError::DuplicateProperty { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            PropertyError::EmptyName
                | PropertyError::ValidationError(_)
                | PropertyError::MissingSeed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            PropertyError::EmptyName.to_string(),
            "Property name cannot be empty"
        );

        let err = PropertyError::duplicate("users");
        assert_eq!(
            err.to_string(),
            "Duplicate property: a value for 'users' is already present"
        );

        let err = PropertyError::MissingSeed {
            property: "system".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing seed: property 'system' has no default value and its kind has no zero"
        );

        let err = PropertyError::ValidationError("bad label".to_string());
        assert_eq!(err.to_string(), "Validation error: bad label");
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let duplicate = PropertyError::duplicate("users");
        assert!(duplicate.is_duplicate());
        assert!(!duplicate.is_validation_error());

        let empty = PropertyError::EmptyName;
        assert!(!empty.is_duplicate());
        assert!(empty.is_validation_error());

        let serialization = PropertyError::SerializationError("eof".to_string());
        assert!(!serialization.is_duplicate());
        assert!(!serialization.is_validation_error());
    }

    /// Test serde_json error conversion
    #[test]
    fn test_serde_json_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let err: PropertyError = serde_err.into();

        match err {
            PropertyError::SerializationError(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected SerializationError"),
        }
    }
}
