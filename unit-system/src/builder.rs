//! Two-phase registry construction
//!
//! Phase one declares identifiers with their definitions; nothing is
//! constructed yet. Phase two (`build`) binds the declarations in dependency
//! order. A reference that cannot be bound fails the whole build, so a
//! registry is either complete or not returned at all.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use crate::unit::{Conversion, Scale};
use crate::{Dimension, Naming, RegistryConfig, Resolution, Unit, UnitError, UnitRegistry};

/// What a definition is built from: another declaration in the same
/// builder, or a unit constructed elsewhere (e.g., an SI base unit)
#[derive(Debug, Clone)]
pub enum UnitRef {
    Local(String),
    External(Arc<Unit>),
}

impl From<&str> for UnitRef {
    fn from(id: &str) -> Self {
        UnitRef::Local(id.to_string())
    }
}

impl From<String> for UnitRef {
    fn from(id: String) -> Self {
        UnitRef::Local(id)
    }
}

impl From<Arc<Unit>> for UnitRef {
    fn from(unit: Arc<Unit>) -> Self {
        UnitRef::External(unit)
    }
}

impl From<&Arc<Unit>> for UnitRef {
    fn from(unit: &Arc<Unit>) -> Self {
        UnitRef::External(Arc::clone(unit))
    }
}

#[derive(Debug, Clone)]
enum Definition {
    Base(Dimension),
    Relative { reference: UnitRef, scale: Scale },
    Combination(Vec<(UnitRef, i32)>),
    Custom { dimension: Dimension, to_base: Conversion, from_base: Conversion },
}

#[derive(Debug, Clone)]
struct Declaration {
    id: String,
    /// `None` derives a name from the combination's components
    naming: Option<Naming>,
    definition: Definition,
    expected: Option<Dimension>,
}

impl Declaration {
    fn references(&self) -> Vec<&UnitRef> {
        match &self.definition {
            Definition::Relative { reference, .. } => vec![reference],
            Definition::Combination(components) => components.iter().map(|(r, _)| r).collect(),
            Definition::Base(_) | Definition::Custom { .. } => Vec::new(),
        }
    }

    fn local_references(&self) -> impl Iterator<Item = &str> {
        self.references().into_iter().filter_map(|r| match r {
            UnitRef::Local(id) => Some(id.as_str()),
            UnitRef::External(_) => None,
        })
    }

    fn resolve(&self, reference: &UnitRef, bound: &HashMap<&str, Arc<Unit>>) -> Result<Arc<Unit>, UnitError> {
        match reference {
            UnitRef::External(unit) => Ok(Arc::clone(unit)),
            UnitRef::Local(id) => bound.get(id.as_str()).cloned().ok_or_else(|| UnitError::ForwardReference {
                unit: self.id.clone(),
                reference: id.clone(),
            }),
        }
    }

    fn naming(&self) -> Naming {
        self.naming.clone().unwrap_or_else(|| Naming::new(self.id.as_str()))
    }

    fn bind(&self, bound: &HashMap<&str, Arc<Unit>>) -> Result<Unit, UnitError> {
        let unit = match &self.definition {
            Definition::Base(dimension) => Unit::base(self.naming(), *dimension),
            Definition::Relative { reference, scale } => {
                let reference = self.resolve(reference, bound)?;
                let unit = match *scale {
                    Scale::MultipleOf(factor) => Unit::multiple_of(self.naming(), &reference, factor),
                    Scale::FractionOf(divisor) => Unit::fraction_of(self.naming(), &reference, divisor),
                };
                unit.map_err(|e| e.for_unit(&self.id))?
            }
            Definition::Combination(refs) => {
                let mut components = Vec::with_capacity(refs.len());
                for (reference, exp) in refs {
                    components.push((self.resolve(reference, bound)?, *exp));
                }
                let naming = match &self.naming {
                    Some(naming) => naming.clone(),
                    None => Naming::for_components(&components),
                };
                Unit::combination(naming, components).map_err(|e| e.for_unit(&self.id))?
            }
            Definition::Custom { dimension, to_base, from_base } => {
                Unit::with_conversions(self.naming(), *dimension, to_base.clone(), from_base.clone())
            }
        };
        Ok(unit)
    }
}

/// Collects unit declarations, then binds them into a [`UnitRegistry`]
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    name: String,
    config: RegistryConfig,
    declarations: Vec<Declaration>,
}

impl RegistryBuilder {
    pub fn new(name: impl Into<String>, config: RegistryConfig) -> Self {
        Self {
            name: name.into(),
            config,
            declarations: Vec::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn declare(mut self, id: &str, naming: Option<Naming>, definition: Definition) -> Self {
        self.declarations.push(Declaration {
            id: id.to_string(),
            naming,
            definition,
            expected: None,
        });
        self
    }

    /// Declare the reference unit of a dimension
    pub fn base(self, id: &str, naming: impl Into<Naming>, dimension: Dimension) -> Self {
        self.declare(id, Some(naming.into()), Definition::Base(dimension))
    }

    /// Declare `id` as `factor` times `reference`
    pub fn multiple_of(self, id: &str, naming: impl Into<Naming>, reference: impl Into<UnitRef>, factor: f64) -> Self {
        let definition = Definition::Relative { reference: reference.into(), scale: Scale::MultipleOf(factor) };
        self.declare(id, Some(naming.into()), definition)
    }

    /// Declare `id` as `reference` divided by `divisor`
    pub fn fraction_of(self, id: &str, naming: impl Into<Naming>, reference: impl Into<UnitRef>, divisor: f64) -> Self {
        let definition = Definition::Relative { reference: reference.into(), scale: Scale::FractionOf(divisor) };
        self.declare(id, Some(naming.into()), definition)
    }

    /// Declare a named product of powers
    pub fn combination<R>(self, id: &str, naming: impl Into<Naming>, components: impl IntoIterator<Item = (R, i32)>) -> Self
    where
        R: Into<UnitRef>,
    {
        let components = components.into_iter().map(|(r, exp)| (r.into(), exp)).collect();
        self.declare(id, Some(naming.into()), Definition::Combination(components))
    }

    /// Declare a product of powers named after its components ("inch^3")
    pub fn combination_of<R>(self, id: &str, components: impl IntoIterator<Item = (R, i32)>) -> Self
    where
        R: Into<UnitRef>,
    {
        let components = components.into_iter().map(|(r, exp)| (r.into(), exp)).collect();
        self.declare(id, None, Definition::Combination(components))
    }

    /// Declare a unit with explicit conversions
    pub fn custom(
        self,
        id: &str,
        naming: impl Into<Naming>,
        dimension: Dimension,
        to_base: impl Fn(f64) -> f64 + Send + Sync + 'static,
        from_base: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        let definition = Definition::Custom {
            dimension,
            to_base: Conversion::new(to_base),
            from_base: Conversion::new(from_base),
        };
        self.declare(id, Some(naming.into()), definition)
    }

    /// Expected dimension of the most recent declaration, checked in
    /// strict mode. Ignored, with a warning, before any declaration.
    pub fn expecting(mut self, dimension: Dimension) -> Self {
        match self.declarations.last_mut() {
            Some(last) => last.expected = Some(dimension),
            None => warn!(registry = %self.name, expected = %dimension, "expected dimension has no declaration to apply to"),
        }
        self
    }

    /// Bind every declaration. Fails on the first unresolvable one.
    pub fn build(self) -> Result<UnitRegistry, UnitError> {
        let result = self.bind_all();
        match &result {
            Ok(registry) => info!(registry = %registry.name(), units = registry.len(), "unit registry built"),
            Err(e) => error!(registry = %self.name, unit = e.unit().unwrap_or("-"), error = %e, "unit registry build failed"),
        }
        result
    }

    fn bind_all(&self) -> Result<UnitRegistry, UnitError> {
        let mut seen = HashSet::new();
        for decl in &self.declarations {
            if !seen.insert(decl.id.as_str()) {
                return Err(UnitError::DuplicateIdentifier(decl.id.clone()));
            }
        }

        let order = match self.config.resolution {
            Resolution::Sequential => (0..self.declarations.len()).collect(),
            Resolution::Topological => TopologicalSort::new(&self.declarations).run()?,
        };

        let mut bound: HashMap<&str, Arc<Unit>> = HashMap::with_capacity(self.declarations.len());
        for idx in order {
            let decl = &self.declarations[idx];
            let unit = decl.bind(&bound)?;
            self.check_dimension(decl, &unit)?;

            debug!(
                registry = %self.name,
                unit = %decl.id,
                kind = unit.variant(),
                dimension = %unit.dimension(),
                "registered unit"
            );
            bound.insert(decl.id.as_str(), Arc::new(unit));
        }

        let entries = self
            .declarations
            .iter()
            .filter_map(|decl| bound.remove(decl.id.as_str()).map(|unit| (decl.id.clone(), unit)))
            .collect();
        Ok(UnitRegistry::from_entries(self.name.clone(), entries))
    }

    fn check_dimension(&self, decl: &Declaration, unit: &Unit) -> Result<(), UnitError> {
        let Some(expected) = decl.expected else {
            return Ok(());
        };
        if expected == unit.dimension() {
            return Ok(());
        }
        if self.config.strict_dimensions {
            return Err(UnitError::DimensionMismatch {
                unit: decl.id.clone(),
                expected,
                actual: unit.dimension(),
            });
        }
        warn!(unit = %decl.id, expected = %expected, actual = %unit.dimension(), "unit dimension differs from declaration");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first ordering of declarations so dependencies bind first
struct TopologicalSort<'a> {
    declarations: &'a [Declaration],
    positions: HashMap<&'a str, usize>,
    marks: Vec<Mark>,
    path: Vec<usize>,
    order: Vec<usize>,
}

impl<'a> TopologicalSort<'a> {
    fn new(declarations: &'a [Declaration]) -> Self {
        let positions = declarations
            .iter()
            .enumerate()
            .map(|(i, decl)| (decl.id.as_str(), i))
            .collect();
        Self {
            declarations,
            positions,
            marks: vec![Mark::Unvisited; declarations.len()],
            path: Vec::new(),
            order: Vec::with_capacity(declarations.len()),
        }
    }

    fn run(mut self) -> Result<Vec<usize>, UnitError> {
        for idx in 0..self.declarations.len() {
            self.visit(idx)?;
        }
        Ok(self.order)
    }

    fn visit(&mut self, idx: usize) -> Result<(), UnitError> {
        match self.marks[idx] {
            Mark::Done => return Ok(()),
            Mark::InProgress => return Err(self.cycle_through(idx)),
            Mark::Unvisited => {}
        }

        self.marks[idx] = Mark::InProgress;
        self.path.push(idx);

        let decl: &'a Declaration = &self.declarations[idx];
        for reference in decl.local_references() {
            let Some(&dep) = self.positions.get(reference) else {
                return Err(UnitError::ForwardReference {
                    unit: decl.id.clone(),
                    reference: reference.to_string(),
                });
            };
            self.visit(dep)?;
        }

        self.path.pop();
        self.marks[idx] = Mark::Done;
        trace!(unit = %decl.id, position = self.order.len(), "resolved binding order");
        self.order.push(idx);
        Ok(())
    }

    fn cycle_through(&self, idx: usize) -> UnitError {
        let start = self.path.iter().position(|&i| i == idx).unwrap_or(0);
        let cycle = self.path[start..]
            .iter()
            .chain(std::iter::once(&idx))
            .map(|&i| self.declarations[i].id.clone())
            .collect();
        UnitError::CircularReference { cycle }
    }
}
