//! Dimensions, unit descriptors, the unit registry and physical values.

pub mod dimension;
pub mod physical;
pub mod registry;
mod table;
pub mod unit;

pub use dimension::{Dimension, DimensionVector};
pub use physical::PhysicalValue;
pub use registry::{RegistryError, UnitRegistry};
pub use unit::Unit;
