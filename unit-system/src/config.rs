//! Registry build configuration
//!
//! Read from JSON or from the environment:
//! - `UNIT_SYSTEM_RESOLUTION`: `sequential` (default) or `topological`
//! - `UNIT_SYSTEM_STRICT`: check declared dimensions (default `true`)
//! - `UNIT_SYSTEM_WEIGHT_UNITS`: include gravity-derived weight units (default `true`)

use std::env;
use serde::{Serialize, Deserialize};
use crate::UnitError;

pub const RESOLUTION_VAR: &str = "UNIT_SYSTEM_RESOLUTION";
pub const STRICT_VAR: &str = "UNIT_SYSTEM_STRICT";
pub const WEIGHT_UNITS_VAR: &str = "UNIT_SYSTEM_WEIGHT_UNITS";

/// How declarations are bound to each other at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Declarations may only reference identifiers declared before them
    #[default]
    Sequential,
    /// Declarations are sorted by their dependencies before binding
    Topological,
}

impl std::str::FromStr for Resolution {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Resolution::Sequential),
            "topological" => Ok(Resolution::Topological),
            other => Err(UnitError::Config(format!("unknown resolution mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub resolution: Resolution,
    /// Reject declarations whose dimension differs from the expected one
    pub strict_dimensions: bool,
    /// Include units derived from standard gravity (poundForce, slug, gravity)
    pub weight_units: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::Sequential,
            strict_dimensions: true,
            weight_units: true,
        }
    }
}

impl RegistryConfig {
    /// Builder: set resolution mode
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Builder: toggle dimension checks
    pub fn with_strict_dimensions(mut self, strict: bool) -> Self {
        self.strict_dimensions = strict;
        self
    }

    /// Builder: toggle weight units
    pub fn with_weight_units(mut self, enabled: bool) -> Self {
        self.weight_units = enabled;
        self
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, UnitError> {
        serde_json::from_str(json).map_err(|e| UnitError::Config(e.to_string()))
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, UnitError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup`, which returns a variable's value if set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, UnitError> {
        let mut config = Self::default();

        if let Some(value) = lookup(RESOLUTION_VAR) {
            config.resolution = value.parse()?;
        }
        if let Some(value) = lookup(STRICT_VAR) {
            config.strict_dimensions = parse_flag(STRICT_VAR, &value)?;
        }
        if let Some(value) = lookup(WEIGHT_UNITS_VAR) {
            config.weight_units = parse_flag(WEIGHT_UNITS_VAR, &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, UnitError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(UnitError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}
