use std::fmt;

use super::dimension::Dimension;
use super::registry::UnitRegistry;
use super::unit::Unit;

/// A magnitude in base units tagged with its dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalValue {
    pub magnitude: f64,
    pub dimension: Dimension,
}

impl PhysicalValue {
    pub fn new(magnitude: f64, dimension: Dimension) -> Self {
        PhysicalValue {
            magnitude,
            dimension,
        }
    }

    /// `value` expressed in `unit`, converted to base units.
    pub fn from_unit(value: f64, unit: &Unit) -> Self {
        PhysicalValue::new(unit.to_base(value), unit.dimension)
    }

    /// The magnitude expressed in `unit`, if the dimensions agree.
    pub fn to_unit(&self, unit: &Unit) -> Option<f64> {
        self.dimension
            .is_compatible(unit.dimension)
            .then(|| unit.from_base(self.magnitude))
    }

    /// Renders the value in the favorite unit of its dimension, if there is one.
    pub fn in_favorite_unit(&self, registry: &UnitRegistry) -> Option<String> {
        let unit = registry.favorite(self.dimension)?;
        let value = self.to_unit(unit)?;
        Some(format!("{} {}", crate::calc_engine::format_number(value), unit.symbol))
    }

    pub fn is_unitless(&self) -> bool {
        self.dimension.is_compatible(Dimension::Unitless)
    }

    pub fn checked_add(self, rhs: PhysicalValue) -> Option<PhysicalValue> {
        self.dimension
            .is_compatible(rhs.dimension)
            .then(|| PhysicalValue::new(self.magnitude + rhs.magnitude, self.dimension))
    }

    pub fn checked_sub(self, rhs: PhysicalValue) -> Option<PhysicalValue> {
        self.dimension
            .is_compatible(rhs.dimension)
            .then(|| PhysicalValue::new(self.magnitude - rhs.magnitude, self.dimension))
    }

    /// Product of two quantities; `None` when the combined exponents name no
    /// known dimension.
    pub fn checked_mul(self, rhs: PhysicalValue) -> Option<PhysicalValue> {
        let dimension = Dimension::from_vector(self.dimension.vector() + rhs.dimension.vector())?;
        Some(PhysicalValue::new(self.magnitude * rhs.magnitude, dimension))
    }

    pub fn checked_div(self, rhs: PhysicalValue) -> Option<PhysicalValue> {
        let dimension = Dimension::from_vector(self.dimension.vector() - rhs.dimension.vector())?;
        Some(PhysicalValue::new(self.magnitude / rhs.magnitude, dimension))
    }

    /// `self + number`, defined only while `self` is unitless.
    pub fn add_number(self, rhs: f64) -> Option<f64> {
        self.is_unitless().then(|| self.magnitude + rhs)
    }

    pub fn sub_number(self, rhs: f64) -> Option<f64> {
        self.is_unitless().then(|| self.magnitude - rhs)
    }

    /// `number - self`, defined only while `self` is unitless.
    pub fn number_sub(self, lhs: f64) -> Option<f64> {
        self.is_unitless().then(|| lhs - self.magnitude)
    }

    pub fn scale(self, factor: f64) -> PhysicalValue {
        PhysicalValue::new(self.magnitude * factor, self.dimension)
    }

    pub fn divide_by(self, divisor: f64) -> PhysicalValue {
        PhysicalValue::new(self.magnitude / divisor, self.dimension)
    }

    /// `number / self`: the dimension is inverted.
    pub fn reciprocal_times(self, numerator: f64) -> Option<PhysicalValue> {
        let dimension = Dimension::from_vector(-self.dimension.vector())?;
        Some(PhysicalValue::new(numerator / self.magnitude, dimension))
    }
}

impl fmt::Display for PhysicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            crate::calc_engine::format_number(self.magnitude),
            self.dimension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(symbol: &str) -> &'static Unit {
        UnitRegistry::builtin().get(symbol).unwrap()
    }

    #[test]
    fn adds_within_one_dimension() {
        let a = PhysicalValue::from_unit(1.0, unit("km"));
        let b = PhysicalValue::from_unit(200.0, unit("m"));
        let c = PhysicalValue::new(1200.0, Dimension::Length);
        assert_eq!(a.checked_add(b), Some(c));
        assert_eq!(c.to_unit(unit("km")), Some(1.2));
        assert_eq!(c.to_unit(unit("m")), Some(1200.0));
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let m = PhysicalValue::from_unit(1.0, unit("m"));
        let s = PhysicalValue::from_unit(1.0, unit("s"));
        assert_eq!(m.checked_add(s), None);
        assert_eq!(m.checked_sub(s), None);
        assert_eq!(m.to_unit(unit("s")), None);
    }

    #[test]
    fn multiplies_into_derived_dimension() {
        let a = PhysicalValue::from_unit(1.0, unit("km"));
        let b = PhysicalValue::from_unit(200.0, unit("m"));
        assert_eq!(
            a.checked_mul(b),
            Some(PhysicalValue::new(200_000.0, Dimension::Area))
        );

        let speed = PhysicalValue::from_unit(100.0, unit("m"))
            .checked_div(PhysicalValue::from_unit(10.0, unit("s")))
            .unwrap();
        assert_eq!(speed, PhysicalValue::new(10.0, Dimension::Velocity));
    }

    #[test]
    fn unknown_product_dimension_fails() {
        let v = PhysicalValue::from_unit(1.0, unit("m^3"));
        assert_eq!(v.checked_mul(v), None);
    }

    #[test]
    fn number_and_unitless_value() {
        let half = PhysicalValue::from_unit(50.0, unit("percent"));
        assert_eq!(half.add_number(1.0), Some(1.5));
        assert_eq!(half.number_sub(1.0), Some(0.5));

        let m = PhysicalValue::from_unit(1.0, unit("m"));
        assert_eq!(m.add_number(1.0), None);
        assert_eq!(m.sub_number(1.0), None);
    }

    #[test]
    fn reciprocal_inverts_dimension() {
        let period = PhysicalValue::from_unit(2.0, unit("s"));
        assert_eq!(
            period.reciprocal_times(1.0),
            Some(PhysicalValue::new(0.5, Dimension::Frequency))
        );
        let area = PhysicalValue::from_unit(2.0, unit("m^2"));
        assert_eq!(area.reciprocal_times(1.0), None);
    }

    #[test]
    fn renders_in_favorite_unit() {
        let registry = UnitRegistry::builtin();
        let t = PhysicalValue::from_unit(212.0, unit("degF"));
        assert_eq!(t.in_favorite_unit(registry).as_deref(), Some("100 degC"));
        let d = PhysicalValue::from_unit(1.5, unit("km"));
        assert_eq!(d.in_favorite_unit(registry).as_deref(), Some("1500 m"));
    }
}
