//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure of the inventory core is returned as one of these values;
/// none of them is fatal to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Empty name, non-positive quantity or unknown unit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A conversion across categories (or involving an unknown unit) was attempted.
    #[error("unit '{from}' is incompatible with unit '{to}'")]
    IncompatibleUnits { from: String, to: String },

    /// The named ingredient has never been added.
    #[error("ingredient not found: {0}")]
    NotFound(String),

    /// A consumption exceeds the quantity on hand.
    #[error("not enough {name} in stock (requested: {requested}, available: {available})")]
    InsufficientStock {
        name: String,
        requested: String,
        available: String,
    },
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn incompatible(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IncompatibleUnits {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn insufficient(
        name: impl Into<String>,
        requested: impl Into<String>,
        available: impl Into<String>,
    ) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            requested: requested.into(),
            available: available.into(),
        }
    }
}
