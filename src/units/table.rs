//! Built-in unit table.

use std::f64::consts::PI;

use super::dimension::Dimension::{self, *};
use super::unit::Unit;

// (symbol, dimension, scale, offset, favorite)
const UNITS: &[(&str, Dimension, f64, f64, bool)] = &[
    ("percent", Unitless, 0.01, 0.0, false),
    ("m", Length, 1.0, 0.0, true),
    ("km", Length, 1000.0, 0.0, false),
    ("cm", Length, 0.01, 0.0, false),
    ("mm", Length, 0.001, 0.0, false),
    ("kg", Mass, 1.0, 0.0, true),
    ("g", Mass, 0.001, 0.0, false),
    ("t", Mass, 1000.0, 0.0, false),
    ("s", Time, 1.0, 0.0, true),
    ("min", Time, 60.0, 0.0, false),
    ("h", Time, 3600.0, 0.0, false),
    ("A", ElectricCurrent, 1.0, 0.0, true),
    ("K", Temperature, 1.0, 0.0, false),
    ("degC", Temperature, 1.0, 273.15, true),
    ("degF", Temperature, 5.0 / 9.0, 459.67 * 5.0 / 9.0, false),
    ("mol", AmountOfSubstance, 1.0, 0.0, true),
    ("cd", LuminousIntensity, 1.0, 0.0, true),
    ("m^2", Area, 1.0, 0.0, true),
    ("km^2", Area, 1.0e6, 0.0, false),
    ("m^3", Volume, 1.0, 0.0, true),
    ("L", Volume, 0.001, 0.0, false),
    ("Hz", Frequency, 1.0, 0.0, true),
    ("J", Energy, 1.0, 0.0, true),
    ("kJ", Energy, 1000.0, 0.0, false),
    ("W", Power, 1.0, 0.0, true),
    ("kW", Power, 1000.0, 0.0, false),
    ("m/s", Velocity, 1.0, 0.0, true),
    ("km/h", Velocity, 1000.0 / 3600.0, 0.0, false),
    ("m/s^2", Acceleration, 1.0, 0.0, true),
    ("N", Force, 1.0, 0.0, true),
    ("Pa", Pressure, 1.0, 0.0, true),
    ("kPa", Pressure, 1000.0, 0.0, false),
    ("bar", Pressure, 1.0e5, 0.0, false),
    ("rad", PlaneAngle, 1.0, 0.0, true),
    ("deg", PlaneAngle, PI / 180.0, 0.0, false),
    ("sr", SolidAngle, 1.0, 0.0, true),
    ("rad/s", AngularVelocity, 1.0, 0.0, true),
    ("rad/s^2", AngularAcceleration, 1.0, 0.0, true),
    ("C", ElectricCharge, 1.0, 0.0, true),
    ("V", Voltage, 1.0, 0.0, true),
    ("F", Capacitance, 1.0, 0.0, true),
    ("Ohm", Resistance, 1.0, 0.0, true),
    ("S", ElectricConductance, 1.0, 0.0, true),
];

pub(crate) fn builtin_units() -> impl Iterator<Item = Unit> {
    UNITS
        .iter()
        .map(|&(symbol, dimension, scale, offset, favorite)| Unit {
            symbol: symbol.to_string(),
            dimension,
            scale,
            offset,
            favorite,
        })
}
