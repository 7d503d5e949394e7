//! Unit variants and their conversions to the base unit of their shape
//!
//! Every unit converts a value into the coherent SI unit of its dimension
//! (`to_base`) and back (`from_base`). The four construction strategies are
//! the variants of [`UnitKind`]:
//!
//! - `Base`: the reference point of a dimension, identity conversions
//! - `Relative`: a multiple or fraction of another unit
//! - `Combination`: a product of integer powers of other units
//! - `Custom`: explicit forward/inverse functions (affine scales)

use std::fmt;
use std::sync::Arc;
use crate::{Dimension, Naming, UnitError};

/// A shareable `f64 -> f64` conversion function
#[derive(Clone)]
pub struct Conversion(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Conversion {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Conversion(Arc::new(f))
    }

    pub fn apply(&self, value: f64) -> f64 {
        (self.0)(value)
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Conversion(..)")
    }
}

/// How a relative unit scales its reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// One of this unit is `k` of the reference
    MultipleOf(f64),
    /// One of this unit is `1/d` of the reference
    FractionOf(f64),
}

impl Scale {
    /// Multiplier from this unit into the reference unit
    pub fn factor(&self) -> f64 {
        match *self {
            Scale::MultipleOf(k) => k,
            Scale::FractionOf(d) => 1.0 / d,
        }
    }

    fn raw(&self) -> f64 {
        match *self {
            Scale::MultipleOf(v) | Scale::FractionOf(v) => v,
        }
    }

    fn apply(&self, value: f64) -> f64 {
        match *self {
            Scale::MultipleOf(k) => value * k,
            Scale::FractionOf(d) => value / d,
        }
    }

    fn invert(&self, value: f64) -> f64 {
        match *self {
            Scale::MultipleOf(k) => value / k,
            Scale::FractionOf(d) => value * d,
        }
    }
}

#[derive(Debug, Clone)]
pub enum UnitKind {
    Base,
    Relative {
        reference: Arc<Unit>,
        scale: Scale,
    },
    Combination {
        components: Vec<(Arc<Unit>, i32)>,
        /// Product of `component.to_base(1)^exp`, fixed at construction
        factor: f64,
    },
    Custom {
        to_base: Conversion,
        from_base: Conversion,
    },
}

/// A unit of measurement
#[derive(Debug, Clone)]
pub struct Unit {
    naming: Naming,
    dimension: Dimension,
    kind: UnitKind,
}

impl Unit {
    /// Reference unit of a dimension; converts by identity
    pub fn base(naming: Naming, dimension: Dimension) -> Self {
        Unit { naming, dimension, kind: UnitKind::Base }
    }

    /// `factor` of `reference`, e.g. a yard is 0.9144 meters
    pub fn multiple_of(naming: Naming, reference: &Arc<Unit>, factor: f64) -> Result<Self, UnitError> {
        Self::relative(naming, reference, Scale::MultipleOf(factor))
    }

    /// `1/divisor` of `reference`, e.g. a foot is a third of a yard
    pub fn fraction_of(naming: Naming, reference: &Arc<Unit>, divisor: f64) -> Result<Self, UnitError> {
        Self::relative(naming, reference, Scale::FractionOf(divisor))
    }

    fn relative(naming: Naming, reference: &Arc<Unit>, scale: Scale) -> Result<Self, UnitError> {
        let raw = scale.raw();
        if !raw.is_finite() || raw == 0.0 {
            return Err(UnitError::InvalidFactor { unit: naming.name, factor: raw });
        }
        if let Some(reference_factor) = reference.base_factor() {
            let factor = reference_factor * scale.factor();
            if !factor.is_finite() || factor == 0.0 {
                return Err(UnitError::InvalidFactor { unit: naming.name, factor });
            }
        }

        Ok(Unit {
            naming,
            dimension: reference.dimension,
            kind: UnitKind::Relative { reference: Arc::clone(reference), scale },
        })
    }

    /// Product of integer powers of other units, e.g. `[(inch, 3)]`.
    ///
    /// Every component must convert linearly through the origin; offset
    /// scales such as Fahrenheit are rejected, naming the component by its
    /// display name. The product of factors must stay finite and non-zero,
    /// and the exponents must stay within `i32`.
    pub fn combination(naming: Naming, components: Vec<(Arc<Unit>, i32)>) -> Result<Self, UnitError> {
        let mut dimension = Dimension::DIMENSIONLESS;
        let mut factor = 1.0;

        for (unit, exp) in &components {
            let Some(base_factor) = unit.base_factor() else {
                return Err(UnitError::UnsupportedComposition {
                    unit: naming.name,
                    component: unit.name().to_string(),
                });
            };
            dimension = unit
                .dimension
                .checked_power(*exp)
                .and_then(|shape| dimension.checked_multiply(&shape))
                .ok_or_else(|| UnitError::ExponentOverflow { unit: naming.name.clone() })?;
            factor *= base_factor.powi(*exp);
        }

        if !factor.is_finite() || factor == 0.0 {
            return Err(UnitError::InvalidFactor { unit: naming.name, factor });
        }

        Ok(Unit {
            naming,
            dimension,
            kind: UnitKind::Combination { components, factor },
        })
    }

    /// Unit with explicit conversions. The two functions must be inverses.
    pub fn custom(
        naming: Naming,
        dimension: Dimension,
        to_base: impl Fn(f64) -> f64 + Send + Sync + 'static,
        from_base: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::with_conversions(naming, dimension, Conversion::new(to_base), Conversion::new(from_base))
    }

    /// Custom unit from already shared conversion functions
    pub fn with_conversions(naming: Naming, dimension: Dimension, to_base: Conversion, from_base: Conversion) -> Self {
        Unit {
            naming,
            dimension,
            kind: UnitKind::Custom { to_base, from_base },
        }
    }

    pub fn name(&self) -> &str {
        &self.naming.name
    }

    pub fn symbol(&self) -> Option<&str> {
        self.naming.symbol.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.naming.aliases
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// Variant name, for summaries and logs
    pub fn variant(&self) -> &'static str {
        match self.kind {
            UnitKind::Base => "base",
            UnitKind::Relative { .. } => "relative",
            UnitKind::Combination { .. } => "combination",
            UnitKind::Custom { .. } => "custom",
        }
    }

    /// Whether conversion is a pure multiplication (no offset)
    pub fn is_linear(&self) -> bool {
        match &self.kind {
            UnitKind::Base | UnitKind::Combination { .. } => true,
            UnitKind::Relative { reference, .. } => reference.is_linear(),
            UnitKind::Custom { .. } => false,
        }
    }

    /// Multiplier into the base unit, for linear units only
    pub fn base_factor(&self) -> Option<f64> {
        self.is_linear().then(|| self.to_base(1.0))
    }

    /// Convert a value in this unit to the base unit of its dimension
    pub fn to_base(&self, value: f64) -> f64 {
        match &self.kind {
            UnitKind::Base => value,
            UnitKind::Relative { reference, scale } => reference.to_base(scale.apply(value)),
            UnitKind::Combination { factor, .. } => value * factor,
            UnitKind::Custom { to_base, .. } => to_base.apply(value),
        }
    }

    /// Convert a value in the base unit of this dimension to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        match &self.kind {
            UnitKind::Base => value,
            UnitKind::Relative { reference, scale } => scale.invert(reference.from_base(value)),
            UnitKind::Combination { factor, .. } => value / factor,
            UnitKind::Custom { from_base, .. } => from_base.apply(value),
        }
    }

    /// Two units are commensurable when they share a dimension
    pub fn is_commensurable(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to `target`
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, UnitError> {
        if !self.is_commensurable(target) {
            return Err(UnitError::IncompatibleDimensions {
                from: self.naming.label().to_string(),
                to: target.naming.label().to_string(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        Ok(target.from_base(self.to_base(value)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.naming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, relative_eq};
    use proptest::prelude::*;

    fn meter() -> Arc<Unit> {
        Arc::new(Unit::base(Naming::new("meter").with_symbol("m"), Dimension::LENGTH))
    }

    fn second() -> Arc<Unit> {
        Arc::new(Unit::base(Naming::new("second").with_symbol("s"), Dimension::TIME))
    }

    fn kelvin() -> Arc<Unit> {
        Arc::new(Unit::base(Naming::new("kelvin").with_symbol("K"), Dimension::TEMPERATURE))
    }

    fn fahrenheit() -> Arc<Unit> {
        Arc::new(Unit::custom(
            Naming::new("degrees Fahrenheit").with_symbol("°F"),
            Dimension::TEMPERATURE,
            |f| (5.0 / 9.0) * (f + 459.67),
            |k| (9.0 / 5.0) * k - 459.67,
        ))
    }

    #[test]
    fn test_base_is_identity() {
        let m = meter();
        assert_eq!(m.to_base(42.5), 42.5);
        assert_eq!(m.from_base(42.5), 42.5);
        assert_eq!(m.variant(), "base");
        assert_eq!(m.base_factor(), Some(1.0));
    }

    #[test]
    fn test_multiple_of() {
        let yard = Unit::multiple_of(Naming::new("yard"), &meter(), 0.9144).unwrap();
        assert_eq!(yard.dimension(), Dimension::LENGTH);
        assert_relative_eq!(yard.to_base(1.0), 0.9144);
        assert_relative_eq!(yard.from_base(0.9144), 1.0);
    }

    #[test]
    fn test_fraction_chain() {
        let yard = Arc::new(Unit::multiple_of(Naming::new("yard"), &meter(), 0.9144).unwrap());
        let foot = Arc::new(Unit::fraction_of(Naming::new("foot"), &yard, 3.0).unwrap());
        let inch = Unit::fraction_of(Naming::new("inch"), &foot, 12.0).unwrap();

        assert_relative_eq!(foot.to_base(1.0), 0.3048, max_relative = 1e-12);
        assert_relative_eq!(inch.to_base(1.0), 0.0254, max_relative = 1e-12);
        assert_relative_eq!(inch.convert_to(36.0, &yard).unwrap(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_factor() {
        let err = Unit::fraction_of(Naming::new("broken"), &meter(), 0.0).unwrap_err();
        assert_eq!(err, UnitError::InvalidFactor { unit: "broken".to_string(), factor: 0.0 });

        assert!(Unit::multiple_of(Naming::new("nan"), &meter(), f64::NAN).is_err());
        assert!(Unit::multiple_of(Naming::new("inf"), &meter(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_relative_factor_into_base_must_be_representable() {
        let tiny = Arc::new(Unit::multiple_of(Naming::new("tiny"), &meter(), 1e-200).unwrap());
        let err = Unit::multiple_of(Naming::new("tinier"), &tiny, 1e-200).unwrap_err();
        assert_eq!(err, UnitError::InvalidFactor { unit: "tinier".to_string(), factor: 0.0 });

        let err = Unit::fraction_of(Naming::new("vast"), &meter(), 1e-320).unwrap_err();
        assert!(matches!(err, UnitError::InvalidFactor { factor, .. } if factor.is_infinite()));
    }

    #[test]
    fn test_combination_factor_underflow() {
        let inch = Arc::new(Unit::fraction_of(Naming::new("inch"), &meter(), 39.37007874015748).unwrap());
        let err = Unit::combination(Naming::new("hyper inch"), vec![(inch, 300)]).unwrap_err();
        assert_eq!(err, UnitError::InvalidFactor { unit: "hyper inch".to_string(), factor: 0.0 });
    }

    #[test]
    fn test_combination_factor_overflow() {
        let league = Arc::new(Unit::multiple_of(Naming::new("league"), &meter(), 4828.032).unwrap());
        let err = Unit::combination(Naming::new("hyper league"), vec![(league, 100)]).unwrap_err();
        assert!(matches!(err, UnitError::InvalidFactor { factor, .. } if factor.is_infinite()));
    }

    #[test]
    fn test_combination_exponent_overflow() {
        let m = meter();
        let err = Unit::combination(Naming::new("huge"), vec![(m.clone(), i32::MAX), (m, 1)]).unwrap_err();
        assert_eq!(err, UnitError::ExponentOverflow { unit: "huge".to_string() });
    }

    #[test]
    fn test_combination_factor_and_shape() {
        let centimeter = Arc::new(Unit::fraction_of(Naming::new("centimeter"), &meter(), 100.0).unwrap());
        let cc = Unit::combination(Naming::new("cubic centimeter"), vec![(centimeter, 3)]).unwrap();

        assert_eq!(cc.dimension(), Dimension::VOLUME);
        assert_relative_eq!(cc.to_base(1.0), 1e-6, max_relative = 1e-12);
        assert_relative_eq!(cc.from_base(1e-6), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_combination_shape_is_sum_of_shapes() {
        let (m, s) = (meter(), second());
        let product = Unit::combination(Naming::new("m s"), vec![(m.clone(), 1), (s.clone(), 1)]).unwrap();
        assert_eq!(product.dimension(), m.dimension().multiply(&s.dimension()));

        let accel = Unit::combination(Naming::new("m/s²"), vec![(m, 1), (s, -2)]).unwrap();
        assert_eq!(accel.dimension(), Dimension::ACCELERATION);
    }

    #[test]
    fn test_empty_combination_is_dimensionless() {
        let unity = Unit::combination(Naming::new("one"), Vec::new()).unwrap();
        assert!(unity.dimension().is_dimensionless());
        assert_eq!(unity.to_base(3.0), 3.0);
    }

    #[test]
    fn test_custom_fahrenheit() {
        let f = fahrenheit();
        assert!(!f.is_linear());
        assert_eq!(f.base_factor(), None);
        assert_relative_eq!(f.to_base(32.0), 273.15, max_relative = 1e-12);
        assert_relative_eq!(f.from_base(273.15), 32.0, max_relative = 1e-12);
        assert_relative_eq!(f.convert_to(212.0, &kelvin()).unwrap(), 373.15, max_relative = 1e-12);
    }

    #[test]
    fn test_combination_rejects_custom_component() {
        let err = Unit::combination(Naming::new("square fahrenheit"), vec![(fahrenheit(), 2)]).unwrap_err();
        assert_eq!(err, UnitError::UnsupportedComposition {
            unit: "square fahrenheit".to_string(),
            component: "degrees Fahrenheit".to_string(),
        });
    }

    #[test]
    fn test_relative_of_custom_is_not_linear() {
        let tenths = Arc::new(Unit::fraction_of(Naming::new("tenth °F"), &fahrenheit(), 10.0).unwrap());
        assert!(!tenths.is_linear());
        assert!(Unit::combination(Naming::new("bad"), vec![(tenths, 1)]).is_err());
    }

    #[test]
    fn test_incompatible_conversion() {
        let err = meter().convert_to(1.0, &second()).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleDimensions { ref from, ref to, .. } if from == "m" && to == "s"));
    }

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(meter().to_string(), "m");
        assert_eq!(Unit::base(Naming::new("thing"), Dimension::DIMENSIONLESS).to_string(), "thing");
    }

    proptest! {
        #[test]
        fn prop_fraction_undoes_multiple(k in 1e-3f64..1e3, x in -1e6f64..1e6) {
            let m = meter();
            let scaled = Arc::new(Unit::multiple_of(Naming::new("scaled"), &m, k).unwrap());
            let back = Unit::fraction_of(Naming::new("back"), &scaled, k).unwrap();

            prop_assert!(relative_eq!(back.to_base(x), m.to_base(x), epsilon = 1e-9, max_relative = 1e-9));
            prop_assert!(relative_eq!(back.from_base(x), m.from_base(x), epsilon = 1e-9, max_relative = 1e-9));
        }

        #[test]
        fn prop_relative_round_trip(k in 1e-3f64..1e3, x in -1e6f64..1e6) {
            let unit = Unit::multiple_of(Naming::new("scaled"), &meter(), k).unwrap();
            prop_assert!(relative_eq!(unit.from_base(unit.to_base(x)), x, epsilon = 1e-9, max_relative = 1e-9));
        }
    }
}
