//! Dimensional shapes
//!
//! A shape is a vector of integer exponents over the seven SI base
//! dimensions. Zero exponents are implicit, so two shapes are equal exactly
//! when their non-zero exponents agree.

use std::fmt;
use serde::{Serialize, Deserialize};

/// The seven base dimensions, in exponent-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::Luminosity,
    ];

    /// Short symbol used when rendering a shape
    pub fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Current => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Amount => "N",
            BaseDimension::Luminosity => "J",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Physical shape of a unit as exponents of the base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i32; 7],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0] };
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0] };
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0] };
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0] };
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0] };
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0] };
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0] };
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1] };

    /// Area [L^2]
    pub const AREA: Dimension = Dimension { exponents: [2, 0, 0, 0, 0, 0, 0] };

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension { exponents: [3, 0, 0, 0, 0, 0, 0] };

    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension { exponents: [1, 0, -2, 0, 0, 0, 0] };

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0] };

    pub fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    /// Shape with a single base dimension raised to `exponent`
    pub fn of(base: BaseDimension, exponent: i32) -> Self {
        let mut exponents = [0i32; 7];
        exponents[base.index()] = exponent;
        Dimension { exponents }
    }

    pub fn exponent(&self, base: BaseDimension) -> i32 {
        self.exponents[base.index()]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Non-zero `(base, exponent)` pairs, in base-dimension order
    pub fn components(&self) -> impl Iterator<Item = (BaseDimension, i32)> + '_ {
        BaseDimension::ALL
            .into_iter()
            .map(move |base| (base, self.exponent(base)))
            .filter(|&(_, exp)| exp != 0)
    }

    /// Product of two shapes: exponents add
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a + b)
    }

    /// Quotient of two shapes: exponents subtract
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a - b)
    }

    /// Integer power: every exponent is multiplied by `exp`
    pub fn power(&self, exp: i32) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| e * exp) }
    }

    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// `multiply`, or `None` when an exponent leaves the `i32` range
    pub fn checked_multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.checked_zip_with(other, i32::checked_add)
    }

    /// `power`, or `None` when an exponent leaves the `i32` range
    pub fn checked_power(&self, exp: i32) -> Option<Dimension> {
        let mut exponents = [0i32; 7];
        for (slot, &e) in exponents.iter_mut().zip(&self.exponents) {
            *slot = e.checked_mul(exp)?;
        }
        Some(Dimension { exponents })
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> i32) -> Dimension {
        let mut exponents = [0i32; 7];
        for (slot, (&a, &b)) in exponents.iter_mut().zip(self.exponents.iter().zip(&other.exponents)) {
            *slot = f(a, b);
        }
        Dimension { exponents }
    }

    fn checked_zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut exponents = [0i32; 7];
        for (slot, (&a, &b)) in exponents.iter_mut().zip(self.exponents.iter().zip(&other.exponents)) {
            *slot = f(a, b)?;
        }
        Some(Dimension { exponents })
    }

    /// Common name for the shape, if it has one
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0] => Some("current"),
            [0, 0, 0, 0, 1, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0] => Some("amount"),
            [0, 0, 0, 0, 0, 0, 1] => Some("luminosity"),
            [2, 0, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0, 0] => Some("volume"),
            [1, 0, -2, 0, 0, 0, 0] => Some("acceleration"),
            [1, 1, -2, 0, 0, 0, 0] => Some("force"),
            _ => None,
        }
    }
}

impl std::ops::Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        self.multiply(&rhs)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .components()
            .map(|(base, exp)| match exp {
                1 => base.symbol().to_string(),
                _ => format!("{}^{}", base.symbol(), exp),
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
