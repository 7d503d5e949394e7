//! Errors raised while defining, registering and converting units
//!
//! Every construction error names the unit identifier it was raised for, so a
//! failed registry build can be traced back to one declaration.

use thiserror::Error;
use crate::Dimension;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// A definition reads a unit that has not been constructed yet
    #[error("unit '{unit}' references '{reference}' before it has been constructed")]
    ForwardReference { unit: String, reference: String },

    /// A combination includes a component whose conversion is not linear
    #[error("unit '{unit}' cannot combine '{component}': offset conversions cannot be raised to a power")]
    UnsupportedComposition { unit: String, component: String },

    /// Declared shape differs from the shape the definition produces
    #[error("unit '{unit}' has dimension {actual}, expected {expected}")]
    DimensionMismatch { unit: String, expected: Dimension, actual: Dimension },

    /// Definitions depend on each other in a loop
    #[error("circular unit definition: {}", .cycle.join(" -> "))]
    CircularReference { cycle: Vec<String> },

    #[error("unit '{0}' is defined more than once")]
    DuplicateIdentifier(String),

    /// Scale factors, and the resulting factor into the base unit, must be
    /// finite and non-zero
    #[error("unit '{unit}' has invalid scale factor {factor}")]
    InvalidFactor { unit: String, factor: f64 },

    /// A combination pushes a dimension exponent out of the `i32` range
    #[error("unit '{unit}' has a dimension exponent out of range")]
    ExponentOverflow { unit: String },

    /// `from` and `to` are the units' display labels (symbol, else name)
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid registry configuration: {0}")]
    Config(String),
}

impl UnitError {
    /// The unit the error was raised for, when there is one.
    ///
    /// Construction errors carry the registry identifier. Conversion errors
    /// (`IncompatibleDimensions`) carry the source unit's display label.
    pub fn unit(&self) -> Option<&str> {
        match self {
            UnitError::ForwardReference { unit, .. }
            | UnitError::UnsupportedComposition { unit, .. }
            | UnitError::DimensionMismatch { unit, .. }
            | UnitError::InvalidFactor { unit, .. }
            | UnitError::ExponentOverflow { unit } => Some(unit),
            UnitError::DuplicateIdentifier(unit) | UnitError::UnknownUnit(unit) => Some(unit),
            UnitError::IncompatibleDimensions { from, .. } => Some(from),
            UnitError::CircularReference { cycle } => cycle.first().map(String::as_str),
            UnitError::Config(_) => None,
        }
    }

    /// Re-attribute a construction error to a registry identifier
    pub(crate) fn for_unit(self, id: &str) -> Self {
        match self {
            UnitError::InvalidFactor { factor, .. } => UnitError::InvalidFactor { unit: id.to_string(), factor },
            UnitError::UnsupportedComposition { component, .. } => {
                UnitError::UnsupportedComposition { unit: id.to_string(), component }
            }
            UnitError::ExponentOverflow { .. } => UnitError::ExponentOverflow { unit: id.to_string() },
            other => other,
        }
    }
}
