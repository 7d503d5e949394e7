//! Unit System - Unit Algebra and Registries
//!
//! Defines units as relationships over SI base units and collects them into
//! immutable registries.
//!
//! - `Dimension`: exponents over the seven base dimensions
//! - `Unit`: base, relative, combination or custom unit with
//!   `to_base`/`from_base` conversions
//! - `Naming`: canonical name, symbol and aliases
//! - `RegistryBuilder`: two-phase, dependency-checked registry construction
//! - `UnitRegistry`: read-only identifier → unit mapping
//!
//! ```
//! use unit_system::{Dimension, Naming, RegistryBuilder, RegistryConfig};
//!
//! let registry = RegistryBuilder::new("demo", RegistryConfig::default())
//!     .base("meter", Naming::new("meter").with_symbol("m"), Dimension::LENGTH)
//!     .multiple_of("yard", Naming::new("yard").with_symbol("yd"), "meter", 0.9144)
//!     .build()?;
//!
//! assert_eq!(registry.convert(2.0, "yard", "meter")?, 1.8288);
//! # Ok::<(), unit_system::UnitError>(())
//! ```

mod dimension;
mod naming;
mod unit;
mod error;
mod config;
mod registry;
mod builder;

pub use dimension::{Dimension, BaseDimension};
pub use naming::Naming;
pub use unit::{Unit, UnitKind, Scale, Conversion};
pub use error::UnitError;
pub use config::{RegistryConfig, Resolution, RESOLUTION_VAR, STRICT_VAR, WEIGHT_UNITS_VAR};
pub use registry::{UnitRegistry, UnitInfo};
pub use builder::{RegistryBuilder, UnitRef};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Dimension, Naming, Unit, UnitError,
        RegistryBuilder, RegistryConfig, UnitRegistry,
    };
}
