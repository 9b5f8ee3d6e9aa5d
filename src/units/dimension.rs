//! Dimensions and their exponent vectors.
//!
//! Every dimension is an exponent vector over the seven SI base quantities,
//! in the order length, mass, time, electric current, temperature, amount of
//! substance, luminous intensity, plus a separate angle exponent (plane angle
//! = 1, solid angle = 2).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Neg, Sub};

pub const BASE_DIMENSIONS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DimensionVector {
    pub base: [i8; BASE_DIMENSIONS],
    pub angle: i8,
}

impl DimensionVector {
    pub const ZERO: Self = Self::new([0; BASE_DIMENSIONS], 0);

    pub const fn new(base: [i8; BASE_DIMENSIONS], angle: i8) -> Self {
        DimensionVector { base, angle }
    }

    fn zip_with(self, rhs: Self, f: impl Fn(i8, i8) -> i8) -> Self {
        let mut base = [0; BASE_DIMENSIONS];
        for (i, exp) in base.iter_mut().enumerate() {
            *exp = f(self.base[i], rhs.base[i]);
        }
        DimensionVector::new(base, f(self.angle, rhs.angle))
    }
}

impl Add for DimensionVector {
    type Output = DimensionVector;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for DimensionVector {
    type Output = DimensionVector;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Neg for DimensionVector {
    type Output = DimensionVector;

    fn neg(self) -> Self::Output {
        DimensionVector::ZERO - self
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SYMBOLS: [&str; BASE_DIMENSIONS] = ["L", "M", "T", "I", "Θ", "N", "J"];
        let mut parts = Vec::new();
        for (sym, exp) in SYMBOLS.iter().zip(self.base.iter()) {
            match exp {
                0 => {}
                1 => parts.push(sym.to_string()),
                _ => parts.push(format!("{}^{}", sym, exp)),
            }
        }
        match self.angle {
            0 => {}
            1 => parts.push("A".to_string()),
            n => parts.push(format!("A^{}", n)),
        }
        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Canonical dimension identifiers known to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Unitless,

    Length,
    Mass,
    Time,
    ElectricCurrent,
    Temperature,
    AmountOfSubstance,
    LuminousIntensity,

    Area,
    Volume,

    Frequency,
    Energy,
    Power,

    Velocity,
    Acceleration,
    Force,
    Pressure,

    PlaneAngle,
    SolidAngle,
    AngularVelocity,
    AngularAcceleration,

    ElectricCharge,
    Voltage,
    Capacitance,
    Resistance,
    ElectricConductance,
}

impl Dimension {
    pub const ALL: [Dimension; 26] = [
        Dimension::Unitless,
        Dimension::Length,
        Dimension::Mass,
        Dimension::Time,
        Dimension::ElectricCurrent,
        Dimension::Temperature,
        Dimension::AmountOfSubstance,
        Dimension::LuminousIntensity,
        Dimension::Area,
        Dimension::Volume,
        Dimension::Frequency,
        Dimension::Energy,
        Dimension::Power,
        Dimension::Velocity,
        Dimension::Acceleration,
        Dimension::Force,
        Dimension::Pressure,
        Dimension::PlaneAngle,
        Dimension::SolidAngle,
        Dimension::AngularVelocity,
        Dimension::AngularAcceleration,
        Dimension::ElectricCharge,
        Dimension::Voltage,
        Dimension::Capacitance,
        Dimension::Resistance,
        Dimension::ElectricConductance,
    ];

    /// Exponent vector of this dimension.
    pub const fn vector(self) -> DimensionVector {
        use Dimension::*;
        //                                L  M   T   I  Θ  N  J
        let (base, angle) = match self {
            Unitless => ([0, 0, 0, 0, 0, 0, 0], 0),

            Length => ([1, 0, 0, 0, 0, 0, 0], 0),
            Mass => ([0, 1, 0, 0, 0, 0, 0], 0),
            Time => ([0, 0, 1, 0, 0, 0, 0], 0),
            ElectricCurrent => ([0, 0, 0, 1, 0, 0, 0], 0),
            Temperature => ([0, 0, 0, 0, 1, 0, 0], 0),
            AmountOfSubstance => ([0, 0, 0, 0, 0, 1, 0], 0),
            LuminousIntensity => ([0, 0, 0, 0, 0, 0, 1], 0),

            Area => ([2, 0, 0, 0, 0, 0, 0], 0),
            Volume => ([3, 0, 0, 0, 0, 0, 0], 0),

            Frequency => ([0, 0, -1, 0, 0, 0, 0], 0),
            Energy => ([2, 1, -2, 0, 0, 0, 0], 0),
            Power => ([2, 1, -3, 0, 0, 0, 0], 0),

            Velocity => ([1, 0, -1, 0, 0, 0, 0], 0),
            Acceleration => ([1, 0, -2, 0, 0, 0, 0], 0),
            Force => ([1, 1, -2, 0, 0, 0, 0], 0),
            Pressure => ([-1, 1, -2, 0, 0, 0, 0], 0),

            PlaneAngle => ([0, 0, 0, 0, 0, 0, 0], 1),
            SolidAngle => ([0, 0, 0, 0, 0, 0, 0], 2),
            AngularVelocity => ([0, 0, -1, 0, 0, 0, 0], 1),
            AngularAcceleration => ([0, 0, -2, 0, 0, 0, 0], 1),

            ElectricCharge => ([0, 0, 1, 1, 0, 0, 0], 0),
            Voltage => ([2, 1, -3, -1, 0, 0, 0], 0),
            Capacitance => ([-2, -1, 4, 2, 0, 0, 0], 0),
            Resistance => ([2, 1, -3, -2, 0, 0, 0], 0),
            ElectricConductance => ([-2, -1, 3, 2, 0, 0, 0], 0),
        };
        DimensionVector::new(base, angle)
    }

    /// Resolves an exponent vector back to its canonical dimension.
    ///
    /// `None` means no canonical dimension has this vector, which is not the
    /// same thing as [`Dimension::Unitless`].
    pub fn from_vector(vector: DimensionVector) -> Option<Dimension> {
        static BY_VECTOR: Lazy<HashMap<DimensionVector, Dimension>> = Lazy::new(|| {
            Dimension::ALL
                .iter()
                .map(|&dim| (dim.vector(), dim))
                .collect()
        });
        BY_VECTOR.get(&vector).copied()
    }

    /// Two dimensions are interchangeable when their exponents agree.
    pub fn is_compatible(self, other: Dimension) -> bool {
        self.vector() == other.vector()
    }

    pub fn name(self) -> &'static str {
        use Dimension::*;
        match self {
            Unitless => "unitless",
            Length => "length",
            Mass => "mass",
            Time => "time",
            ElectricCurrent => "electric current",
            Temperature => "temperature",
            AmountOfSubstance => "amount of substance",
            LuminousIntensity => "luminous intensity",
            Area => "area",
            Volume => "volume",
            Frequency => "frequency",
            Energy => "energy",
            Power => "power",
            Velocity => "velocity",
            Acceleration => "acceleration",
            Force => "force",
            Pressure => "pressure",
            PlaneAngle => "plane angle",
            SolidAngle => "solid angle",
            AngularVelocity => "angular velocity",
            AngularAcceleration => "angular acceleration",
            ElectricCharge => "electric charge",
            Voltage => "voltage",
            Capacitance => "capacitance",
            Resistance => "resistance",
            ElectricConductance => "electric conductance",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
