//! Display and lookup metadata attached to every unit

use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use crate::Unit;

/// Canonical name, optional short symbol and alternative spellings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Naming {
    /// Canonical name (e.g., "foot")
    pub name: String,
    /// Short symbol (e.g., "ft")
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub aliases: Vec<String>,
}

impl Naming {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            aliases: Vec::new(),
        }
    }

    /// Builder: set short symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Builder: append aliases
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Symbol if present, otherwise the canonical name
    pub fn label(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.name)
    }

    /// Every spelling this unit answers to: name, symbol, then aliases
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.symbol.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Derive a name and symbol for a product of powers,
    /// e.g. `[(inch, 3)]` becomes "inch^3" / "in^3".
    pub fn for_components(components: &[(Arc<Unit>, i32)]) -> Self {
        Naming {
            name: render_powers(components, |u| u.name(), " "),
            symbol: Some(render_powers(components, |u| u.symbol().unwrap_or(u.name()), "·")),
            aliases: Vec::new(),
        }
    }
}

fn render_powers(components: &[(Arc<Unit>, i32)], label: impl Fn(&Unit) -> &str, sep: &str) -> String {
    components
        .iter()
        .map(|(unit, exp)| match exp {
            1 => label(unit.as_ref()).to_string(),
            _ => format!("{}^{}", label(unit.as_ref()), exp),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

impl From<&str> for Naming {
    fn from(name: &str) -> Self {
        Naming::new(name)
    }
}

impl fmt::Display for Naming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
