//! End-to-end conversions through the USCS registry

use std::sync::Once;

use approx::{assert_relative_eq, relative_eq};
use proptest::prelude::*;
use unit_system::{Dimension, Naming, RegistryBuilder, RegistryConfig, Resolution, UnitError, UnitRegistry};
use unit_system_si::SI_UNITS;
use unit_system_uscs::{uscs_units, UscsUnit, USCS_UNITS};

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn registry() -> UnitRegistry {
    init_logging();
    uscs_units(RegistryConfig::default()).unwrap()
}

fn to_si(registry: &UnitRegistry, value: f64, from: &str, to: &str) -> f64 {
    registry.get(from).unwrap().convert_to(value, SI_UNITS.get(to).unwrap()).unwrap()
}

fn from_si(registry: &UnitRegistry, value: f64, from: &str, to: &str) -> f64 {
    SI_UNITS.get(from).unwrap().convert_to(value, registry.get(to).unwrap()).unwrap()
}

#[test]
fn test_yard_to_meter() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 1.0, "yard", "meter"), 0.9144, max_relative = 1e-12);
    assert_relative_eq!(from_si(&units, 0.9144, "meter", "yard"), 1.0, max_relative = 1e-12);
}

#[test]
fn test_foot_and_inch() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 1.0, "foot", "meter"), 0.3048, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, 1.0, "inch", "meter"), 0.0254, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "yard", "inch").unwrap(), 36.0, max_relative = 1e-12);
}

#[test]
fn test_mile_to_meter() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 1.0, "mile", "meter"), 1609.344, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "mile", "yard").unwrap(), 1760.0, max_relative = 1e-12);
}

#[test]
fn test_gallon_to_cubic_inches() {
    let units = registry();
    assert_relative_eq!(units.convert(1.0, "gallon", "cubicInch").unwrap(), 231.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "quart", "gallon").unwrap(), 0.25, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, 1.0, "gallon", "cubicMeter"), 0.003785411784, max_relative = 1e-12);
}

#[test]
fn test_kitchen_measures() {
    let units = registry();
    assert_relative_eq!(units.convert(1.0, "gallon", "fluidOunce").unwrap(), 128.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "cup", "fluidOunce").unwrap(), 8.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "pint", "cup").unwrap(), 2.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "tablespoon", "teaspoon").unwrap(), 3.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "cubicFoot", "cubicInch").unwrap(), 1728.0, max_relative = 1e-12);
}

#[test]
fn test_mass_units() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 1.0, "poundMass", "kilogram"), 0.45359237, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "poundMass", "ounce").unwrap(), 16.0, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "shortTon", "poundMass").unwrap(), 2000.0, max_relative = 1e-12);
}

#[test]
fn test_fahrenheit_and_kelvin() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 32.0, "Fahrenheit", "kelvin"), 273.15, max_relative = 1e-12);
    assert_relative_eq!(from_si(&units, 273.15, "kelvin", "Fahrenheit"), 32.0, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, 212.0, "Fahrenheit", "kelvin"), 373.15, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, -459.67, "Fahrenheit", "kelvin"), 0.0, epsilon = 1e-12);
}

#[test]
fn test_rankine() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 491.67, "Rankine", "kelvin"), 273.15, max_relative = 1e-12);
    // Rankine and Fahrenheit degrees have the same size
    assert_relative_eq!(units.convert(491.67, "Rankine", "Fahrenheit").unwrap(), 32.0, max_relative = 1e-12);
}

#[test]
fn test_weight_units() {
    let units = registry();
    assert_relative_eq!(to_si(&units, 1.0, "gravity", "meterPerSecondSquared"), 9.80665, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, 1.0, "poundForce", "newton"), 4.4482216152605, max_relative = 1e-12);
    assert_relative_eq!(to_si(&units, 1.0, "slug", "kilogram"), 14.593902937206364, max_relative = 1e-12);
    assert_relative_eq!(units.convert(1.0, "slug", "poundMass").unwrap(), 32.17404855643044, max_relative = 1e-12);
}

#[test]
fn test_every_unit_round_trips() {
    let units = registry();
    for (id, unit) in &units {
        for x in [0.0, 1.0, -1.0, 1e6, 1e-6] {
            let back = unit.from_base(unit.to_base(x));
            assert!(
                relative_eq!(back, x, epsilon = 1e-9, max_relative = 1e-9),
                "{} did not round-trip {}: got {}",
                id, x, back
            );
        }
    }
}

#[test]
fn test_incompatible_conversion() {
    let units = registry();
    let err = units.convert(1.0, "gallon", "mile").unwrap_err();
    assert_eq!(err.to_string(), "cannot convert gal (L^3) to mi (L): incompatible dimensions");
}

#[test]
fn test_fahrenheit_cannot_be_combined() {
    init_logging();
    let fahrenheit = USCS_UNITS.unit("Fahrenheit").unwrap();
    let err = RegistryBuilder::new("broken", RegistryConfig::default())
        .combination_of("degFPerFoot", [(&fahrenheit, 1), (&USCS_UNITS.unit("foot").unwrap(), -1)])
        .build()
        .unwrap_err();

    assert!(matches!(err, UnitError::UnsupportedComposition { ref unit, .. } if unit == "degFPerFoot"));
}

#[test]
fn test_self_referencing_inch_is_rejected() {
    init_logging();
    let meter = SI_UNITS.unit("meter").unwrap();
    let result = RegistryBuilder::new("broken", RegistryConfig::default())
        .multiple_of("yard", Naming::new("yard").with_symbol("yd"), &meter, 0.9144)
        .fraction_of("foot", Naming::new("foot").with_symbol("ft"), "yard", 3.0)
        .fraction_of("inch", Naming::new("inch").with_symbol("in"), "inch", 12.0)
        .multiple_of("mile", Naming::new("mile").with_symbol("mi"), "foot", 5280.0)
        .build();

    match result {
        Err(UnitError::ForwardReference { unit, reference }) => {
            assert_eq!(unit, "inch");
            assert_eq!(reference, "inch");
        }
        other => panic!("expected forward reference, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_undeclared_reference_is_rejected() {
    init_logging();
    let err = RegistryBuilder::new("broken", RegistryConfig::default().with_resolution(Resolution::Topological))
        .combination_of("cubicInch", [("in", 3)])
        .build()
        .unwrap_err();

    assert_eq!(err, UnitError::ForwardReference {
        unit: "cubicInch".to_string(),
        reference: "in".to_string(),
    });
}

#[test]
fn test_combination_shape_law() {
    let units = registry();
    let gallon = units.unit("gallon").unwrap();
    let pound = units.unit("poundMass").unwrap();

    let registry = RegistryBuilder::new("product", RegistryConfig::default())
        .combination_of("gallonPound", [(&gallon, 1), (&pound, 1)])
        .build()
        .unwrap();

    let product = registry.get("gallonPound").unwrap();
    assert_eq!(product.dimension(), Dimension::new([3, 1, 0, 0, 0, 0, 0]));
    assert_eq!(product.dimension(), gallon.dimension().multiply(&pound.dimension()));
    assert_eq!(product.name(), "gallon pound");
}

#[test]
fn test_describe_serializes() {
    let units = registry();
    let json = serde_json::to_value(units.describe()).unwrap();
    let rows = json.as_array().unwrap();

    let fahrenheit = rows.iter().find(|row| row["id"] == "Fahrenheit").unwrap();
    assert_eq!(fahrenheit["symbol"], "°F");
    assert_eq!(fahrenheit["kind"], "custom");
    assert!(fahrenheit.get("base_factor").is_none());

    let cubic_inch = rows.iter().find(|row| row["id"] == "cubicInch").unwrap();
    assert_eq!(cubic_inch["name"], "inch^3");
    assert_eq!(cubic_inch["dimension_name"], "volume");
}

#[test]
fn test_typed_identifiers_resolve() {
    for unit in UscsUnit::ALL {
        assert!(unit.unit().is_some(), "{} missing from global registry", unit);
    }
}

proptest! {
    #[test]
    fn prop_length_chain_is_consistent(miles in -1e4f64..1e4) {
        let units = registry();
        let feet = units.convert(miles, "mile", "foot").unwrap();
        let inches = units.convert(feet, "foot", "inch").unwrap();
        let back = units.convert(inches, "inch", "mile").unwrap();
        prop_assert!(relative_eq!(back, miles, epsilon = 1e-9, max_relative = 1e-9));
    }

    #[test]
    fn prop_fahrenheit_round_trip(degrees in -500f64..5000.0) {
        let units = registry();
        let rankine = units.convert(degrees, "Fahrenheit", "Rankine").unwrap();
        let back = units.convert(rankine, "Rankine", "Fahrenheit").unwrap();
        prop_assert!(relative_eq!(back, degrees, epsilon = 1e-9, max_relative = 1e-9));
    }
}
