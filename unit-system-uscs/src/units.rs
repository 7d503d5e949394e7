//! USCS unit declarations, organized by category
//!
//! Exact definitions follow NIST Handbook 44, Appendix B: the yard is
//! 0.9144 m and the avoirdupois pound is 0.45359237 kg. Everything else is
//! derived from those two and from the SI kelvin and second.

use unit_system::{Dimension, Naming, RegistryBuilder, UnitError, UnitRef};
use unit_system_si as si;

/// Standard acceleration of gravity, m/s²
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Kelvin per degree Rankine (and per degree Fahrenheit)
const KELVIN_PER_RANKINE: f64 = 5.0 / 9.0;
const RANKINE_PER_KELVIN: f64 = 9.0 / 5.0;

/// Offset of absolute zero on the Fahrenheit scale
const FAHRENHEIT_ZERO_RANKINE: f64 = 459.67;

pub(crate) fn register_length_units(builder: RegistryBuilder) -> Result<RegistryBuilder, UnitError> {
    Ok(builder
        .multiple_of("yard", Naming::new("yard").with_symbol("yd").with_aliases(["yards"]), si::unit("meter")?, 0.9144)
        .fraction_of("foot", Naming::new("foot").with_symbol("ft").with_aliases(["'", "feet"]), "yard", 3.0)
        .fraction_of("inch", Naming::new("inch").with_symbol("in").with_aliases(["\"", "inches"]), "foot", 12.0)
        .multiple_of("mile", Naming::new("mile").with_symbol("mi").with_aliases(["miles"]), "foot", 5280.0))
}

pub(crate) fn register_mass_units(builder: RegistryBuilder) -> Result<RegistryBuilder, UnitError> {
    Ok(builder
        .multiple_of(
            "poundMass",
            Naming::new("pound").with_symbol("lbm").with_aliases(["lb", "pounds", "pound-mass"]),
            si::unit("kilogram")?,
            0.45359237,
        )
        .fraction_of("ounce", Naming::new("ounce").with_symbol("oz").with_aliases(["ounces"]), "poundMass", 16.0)
        .multiple_of("shortTon", Naming::new("short ton").with_symbol("ton").with_aliases(["tons"]), "poundMass", 2000.0))
}

pub(crate) fn register_volume_units(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .combination_of("cubicInch", [("inch", 3)])
        .expecting(Dimension::VOLUME)
        .combination("cubicFoot", Naming::new("cubic foot").with_symbol("ft³"), [("foot", 3)])
        .expecting(Dimension::VOLUME)
        // Liquid measure
        .multiple_of("gallon", Naming::new("gallon").with_symbol("gal").with_aliases(["gallons"]), "cubicInch", 231.0)
        .fraction_of("quart", Naming::new("quart").with_symbol("qt").with_aliases(["quarts"]), "gallon", 4.0)
        .fraction_of("pint", Naming::new("pint").with_symbol("pt").with_aliases(["pints"]), "quart", 2.0)
        .fraction_of("cup", Naming::new("cup").with_symbol("c").with_aliases(["cups"]), "pint", 2.0)
        .fraction_of("fluidOunce", Naming::new("fluid ounce").with_symbol("fl oz"), "cup", 8.0)
        .fraction_of("tablespoon", Naming::new("tablespoon").with_symbol("Tbsp").with_aliases(["tbsp"]), "fluidOunce", 2.0)
        .fraction_of("teaspoon", Naming::new("teaspoon").with_symbol("tsp"), "tablespoon", 3.0)
}

pub(crate) fn register_temperature_units(builder: RegistryBuilder) -> Result<RegistryBuilder, UnitError> {
    let kelvin = si::unit("kelvin")?;
    let fahrenheit = Naming::new("degrees Fahrenheit")
        .with_symbol("°F")
        .with_aliases(["degF"]);

    Ok(builder
        .multiple_of(
            "Rankine",
            Naming::new("degrees Rankine").with_symbol("°R").with_aliases(["°Ra", "degR"]),
            &kelvin,
            KELVIN_PER_RANKINE,
        )
        .custom(
            "Fahrenheit",
            fahrenheit,
            kelvin.dimension(),
            |degrees_f| KELVIN_PER_RANKINE * (degrees_f + FAHRENHEIT_ZERO_RANKINE),
            |kelvins| RANKINE_PER_KELVIN * kelvins - FAHRENHEIT_ZERO_RANKINE,
        ))
}

/// Gravitational (weight) units: standard gravity, pound-force, slug
pub(crate) fn register_weight_units(builder: RegistryBuilder) -> Result<RegistryBuilder, UnitError> {
    Ok(builder
        .multiple_of(
            "gravity",
            Naming::new("standard gravity").with_symbol("g0").with_aliases(["gn"]),
            si::unit("meterPerSecondSquared")?,
            STANDARD_GRAVITY,
        )
        .combination(
            "poundForce",
            Naming::new("pound-force").with_symbol("lbf"),
            [("poundMass", 1), ("gravity", 1)],
        )
        .expecting(Dimension::FORCE)
        // lbf·s²/ft
        .combination(
            "slug",
            Naming::new("slug").with_symbol("slug").with_aliases(["slugs"]),
            [
                (UnitRef::from("poundForce"), 1),
                (UnitRef::from(si::unit("second")?), 2),
                (UnitRef::from("foot"), -1),
            ],
        )
        .expecting(Dimension::MASS))
}
