//! Read-only collection of named units

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use crate::{Dimension, Naming, Unit, UnitError};

/// Registry of constructed units, keyed by identifier.
///
/// Only [`RegistryBuilder`](crate::RegistryBuilder) creates registries; once
/// built there is no way to add, replace or remove a unit. Iteration follows
/// declaration order.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    name: String,
    units: Vec<(String, Arc<Unit>)>,
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    pub(crate) fn from_entries(name: String, units: Vec<(String, Arc<Unit>)>) -> Self {
        let index = units
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();
        UnitRegistry { name, units, index }
    }

    /// Name given to the registry at build time (e.g., "uscs")
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Unit>> {
        self.index.get(id).map(|&i| &self.units[i].1)
    }

    /// Shared handle to a unit, or `UnknownUnit`
    pub fn unit(&self, id: &str) -> Result<Arc<Unit>, UnitError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| UnitError::UnknownUnit(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Unit>)> {
        self.units.iter().map(|(id, unit)| (id.as_str(), unit))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units of the given dimension
    pub fn by_dimension(&self, dimension: Dimension) -> Vec<(&str, &Arc<Unit>)> {
        self.iter()
            .filter(|(_, unit)| unit.dimension() == dimension)
            .collect()
    }

    /// Convert `value` between two registered units
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let source = self.get(from).ok_or_else(|| UnitError::UnknownUnit(from.to_string()))?;
        let target = self.get(to).ok_or_else(|| UnitError::UnknownUnit(to.to_string()))?;
        source.convert_to(value, target)
    }

    /// Serializable summary of every unit, in declaration order
    pub fn describe(&self) -> Vec<UnitInfo> {
        self.iter().map(|(id, unit)| UnitInfo::new(id, unit)).collect()
    }
}

impl<'a> IntoIterator for &'a UnitRegistry {
    type Item = (&'a str, &'a Arc<Unit>);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Arc<Unit>)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One registry entry, flattened for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub id: String,
    #[serde(flatten)]
    pub naming: Naming,
    pub dimension: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dimension_name: Option<String>,
    pub kind: String,
    /// Multiplier into the base unit; absent for offset scales
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_factor: Option<f64>,
}

impl UnitInfo {
    pub fn new(id: &str, unit: &Unit) -> Self {
        let dimension = unit.dimension();
        UnitInfo {
            id: id.to_string(),
            naming: unit.naming().clone(),
            dimension: dimension.to_string(),
            dimension_name: dimension.name().map(str::to_string),
            kind: unit.variant().to_string(),
            base_factor: unit.base_factor(),
        }
    }
}
