//! Unit System USCS - United States Customary Units
//!
//! USCS units declared as exact relationships over SI units:
//!
//! - Length: yard, foot, inch, mile
//! - Mass: poundMass, ounce, shortTon
//! - Volume: cubicInch, cubicFoot, gallon, quart, pint, cup, fluidOunce,
//!   tablespoon, teaspoon
//! - Temperature: Rankine, Fahrenheit
//! - Weight (optional): gravity, poundForce, slug
//!
//! `USCS_UNITS` is built on first use from the environment configuration
//! (see [`RegistryConfig::from_env`]). Build failure aborts with a message
//! naming the offending unit.

mod units;

use std::sync::{Arc, LazyLock};
use tracing::debug;
use unit_system::{RegistryBuilder, RegistryConfig, Unit, UnitError, UnitRegistry};

pub use units::STANDARD_GRAVITY;

/// Global USCS registry
pub static USCS_UNITS: LazyLock<UnitRegistry> = LazyLock::new(|| {
    let config = RegistryConfig::from_env()
        .unwrap_or_else(|e| panic!("failed to configure USCS unit registry: {}", e));
    uscs_units(config).unwrap_or_else(|e| panic!("failed to build USCS unit registry: {}", e))
});

/// The process-wide USCS registry
pub fn default_units() -> &'static UnitRegistry {
    &USCS_UNITS
}

/// Build a USCS registry with the given configuration
pub fn uscs_units(config: RegistryConfig) -> Result<UnitRegistry, UnitError> {
    debug!(?config, "building USCS unit registry");

    let builder = RegistryBuilder::new("uscs", config);
    let builder = units::register_length_units(builder)?;
    let builder = units::register_mass_units(builder)?;
    let builder = units::register_volume_units(builder);
    let builder = units::register_temperature_units(builder)?;
    let builder = if config.weight_units {
        units::register_weight_units(builder)?
    } else {
        builder
    };

    builder.build()
}

/// Identifiers of every unit the USCS registry can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UscsUnit {
    Yard,
    Foot,
    Inch,
    Mile,
    PoundMass,
    Ounce,
    ShortTon,
    CubicInch,
    CubicFoot,
    Gallon,
    Quart,
    Pint,
    Cup,
    FluidOunce,
    Tablespoon,
    Teaspoon,
    Rankine,
    Fahrenheit,
    Gravity,
    PoundForce,
    Slug,
}

impl UscsUnit {
    pub const ALL: [UscsUnit; 21] = [
        UscsUnit::Yard,
        UscsUnit::Foot,
        UscsUnit::Inch,
        UscsUnit::Mile,
        UscsUnit::PoundMass,
        UscsUnit::Ounce,
        UscsUnit::ShortTon,
        UscsUnit::CubicInch,
        UscsUnit::CubicFoot,
        UscsUnit::Gallon,
        UscsUnit::Quart,
        UscsUnit::Pint,
        UscsUnit::Cup,
        UscsUnit::FluidOunce,
        UscsUnit::Tablespoon,
        UscsUnit::Teaspoon,
        UscsUnit::Rankine,
        UscsUnit::Fahrenheit,
        UscsUnit::Gravity,
        UscsUnit::PoundForce,
        UscsUnit::Slug,
    ];

    /// Registry identifier
    pub fn id(self) -> &'static str {
        match self {
            UscsUnit::Yard => "yard",
            UscsUnit::Foot => "foot",
            UscsUnit::Inch => "inch",
            UscsUnit::Mile => "mile",
            UscsUnit::PoundMass => "poundMass",
            UscsUnit::Ounce => "ounce",
            UscsUnit::ShortTon => "shortTon",
            UscsUnit::CubicInch => "cubicInch",
            UscsUnit::CubicFoot => "cubicFoot",
            UscsUnit::Gallon => "gallon",
            UscsUnit::Quart => "quart",
            UscsUnit::Pint => "pint",
            UscsUnit::Cup => "cup",
            UscsUnit::FluidOunce => "fluidOunce",
            UscsUnit::Tablespoon => "tablespoon",
            UscsUnit::Teaspoon => "teaspoon",
            UscsUnit::Rankine => "Rankine",
            UscsUnit::Fahrenheit => "Fahrenheit",
            UscsUnit::Gravity => "gravity",
            UscsUnit::PoundForce => "poundForce",
            UscsUnit::Slug => "slug",
        }
    }

    /// Only present when weight units are enabled
    pub fn is_weight_unit(self) -> bool {
        matches!(self, UscsUnit::Gravity | UscsUnit::PoundForce | UscsUnit::Slug)
    }

    /// The unit in the global registry, if it was built
    pub fn unit(self) -> Option<&'static Arc<Unit>> {
        USCS_UNITS.get(self.id())
    }
}

impl std::str::FromStr for UscsUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UscsUnit::ALL
            .into_iter()
            .find(|u| u.id() == s)
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

impl std::fmt::Display for UscsUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
