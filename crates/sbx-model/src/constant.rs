//! The affine constant added after the matrix multiplication.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A single byte written as hex text (`"63"`), defaulting to the AES value `0x63`.
///
/// # Example
///
/// ```
/// use sbx_model::AffineConstant;
///
/// let c: AffineConstant = "0x1f".parse().unwrap();
/// assert_eq!(c.value(), 0x1F);
/// assert_eq!(c.to_string(), "1F");
/// assert_eq!(AffineConstant::default().value(), 0x63);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AffineConstant(u8);

impl AffineConstant {
    /// The AES affine constant.
    pub const AES: Self = Self(0x63);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for AffineConstant {
    fn default() -> Self {
        Self::AES
    }
}

impl FromStr for AffineConstant {
    type Err = ModelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 2 {
            return Err(ModelError::InvalidConstant {
                input: input.to_string(),
            });
        }

        u8::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ModelError::InvalidConstant {
                input: input.to_string(),
            })
    }
}

impl TryFrom<String> for AffineConstant {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AffineConstant> for String {
    fn from(constant: AffineConstant) -> Self {
        constant.to_string()
    }
}

impl fmt::Display for AffineConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("63".parse::<AffineConstant>().unwrap().value(), 0x63);
        assert_eq!("0xFF".parse::<AffineConstant>().unwrap().value(), 0xFF);
        assert_eq!(" a ".parse::<AffineConstant>().unwrap().value(), 0x0A);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "0x", "100", "g1", "-1"] {
            assert!(
                input.parse::<AffineConstant>().is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&AffineConstant::new(0x05)).unwrap();
        assert_eq!(json, "\"05\"");
    }
}
