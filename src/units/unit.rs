use serde::{Deserialize, Serialize};

use super::dimension::Dimension;

/// Affine unit descriptor: `base = value * scale + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub symbol: String,
    pub dimension: Dimension,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub favorite: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl Unit {
    pub fn new(symbol: impl Into<String>, dimension: Dimension) -> Self {
        Unit {
            symbol: symbol.into(),
            dimension,
            scale: 1.0,
            offset: 0.0,
            favorite: false,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Magnitude in base units of `value` expressed in this unit.
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Inverse of [`Unit::to_base`].
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }

    pub fn is_affine(&self) -> bool {
        self.offset != 0.0
    }
}

/// Length in bytes of the longest prefix of `input` that is a unit spelling.
///
/// A spelling is a run of ASCII letters, followed by any number of
/// `*letters`, `/letters` or `^int` suffixes (`m`, `km/h`, `m/s^2`, `m^-1`).
/// Returns 0 when `input` does not start with a letter.
pub fn spelling_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let letters = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count()
    };

    let mut end = letters(0);
    if end == 0 {
        return 0;
    }
    loop {
        match bytes.get(end) {
            Some(b'*') | Some(b'/') => {
                let run = letters(end + 1);
                if run == 0 {
                    break;
                }
                end += 1 + run;
            }
            Some(b'^') => {
                let sign = usize::from(bytes.get(end + 1) == Some(&b'-'));
                let digits = bytes[end + 1 + sign..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    break;
                }
                end += 1 + sign + digits;
            }
            _ => break,
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_conversion() {
        let km = Unit::new("km", Dimension::Length).scale(1000.0);
        assert_eq!(km.to_base(1.5), 1500.0);
        assert_eq!(km.from_base(200.0), 0.2);
        assert!(!km.is_affine());
    }

    #[test]
    fn affine_conversion() {
        let deg_c = Unit::new("degC", Dimension::Temperature).offset(273.15);
        assert_eq!(deg_c.to_base(0.0), 273.15);
        assert!((deg_c.from_base(373.15) - 100.0).abs() < 1e-9);
        assert!(deg_c.is_affine());
    }

    #[test]
    fn spelling_grammar() {
        assert_eq!(spelling_len("m"), 1);
        assert_eq!(spelling_len("km + 1"), 2);
        assert_eq!(spelling_len("m/s^2)"), 5);
        assert_eq!(spelling_len("m^-1"), 4);
        assert_eq!(spelling_len("N*m"), 3);
        assert_eq!(spelling_len("m*(2)"), 1);
        assert_eq!(spelling_len("m^x"), 1);
        assert_eq!(spelling_len("2m"), 0);
        assert_eq!(spelling_len(""), 0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let unit: Unit =
            serde_json::from_str(r#"{"symbol": "mi", "dimension": "length", "scale": 1609.344}"#)
                .unwrap();
        assert_eq!(unit, Unit::new("mi", Dimension::Length).scale(1609.344));
    }
}
