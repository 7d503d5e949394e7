//! Unit System SI - International System base units
//!
//! The seven SI base units are the reference points every other unit system
//! is defined against. A few coherent derived units are included so that
//! other registries can reference them directly:
//!
//! - squareMeter, cubicMeter
//! - meterPerSecondSquared
//! - newton

use std::sync::{Arc, LazyLock};
use unit_system::{Dimension, Naming, RegistryBuilder, RegistryConfig, Unit, UnitError, UnitRegistry};

/// Global SI registry
pub static SI_UNITS: LazyLock<UnitRegistry> = LazyLock::new(|| {
    si_units().unwrap_or_else(|e| panic!("failed to build SI unit registry: {}", e))
});

/// Build the SI registry
pub fn si_units() -> Result<UnitRegistry, UnitError> {
    let builder = RegistryBuilder::new("si", RegistryConfig::default());
    let builder = register_base_units(builder);
    let builder = register_derived_units(builder);
    builder.build()
}

fn register_base_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .base("meter", Naming::new("meter").with_symbol("m").with_aliases(["metre"]), Dimension::LENGTH)
        .base("kilogram", Naming::new("kilogram").with_symbol("kg"), Dimension::MASS)
        .base("second", Naming::new("second").with_symbol("s"), Dimension::TIME)
        .base("ampere", Naming::new("ampere").with_symbol("A").with_aliases(["amp"]), Dimension::CURRENT)
        .base("kelvin", Naming::new("kelvin").with_symbol("K"), Dimension::TEMPERATURE)
        .base("mole", Naming::new("mole").with_symbol("mol"), Dimension::AMOUNT)
        .base("candela", Naming::new("candela").with_symbol("cd"), Dimension::LUMINOSITY)
}

fn register_derived_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .combination("squareMeter", Naming::new("square meter").with_symbol("m²"), [("meter", 2)])
        .expecting(Dimension::AREA)
        .combination("cubicMeter", Naming::new("cubic meter").with_symbol("m³"), [("meter", 3)])
        .expecting(Dimension::VOLUME)
        .combination(
            "meterPerSecondSquared",
            Naming::new("meter per second squared").with_symbol("m/s²"),
            [("meter", 1), ("second", -2)],
        )
        .expecting(Dimension::ACCELERATION)
        .combination(
            "newton",
            Naming::new("newton").with_symbol("N"),
            [("kilogram", 1), ("meter", 1), ("second", -2)],
        )
        .expecting(Dimension::FORCE)
}

/// Shared handle to an SI unit
pub fn unit(id: &str) -> Result<Arc<Unit>, UnitError> {
    SI_UNITS.unit(id)
}
