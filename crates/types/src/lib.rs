//! Validated primitive types shared by the benefit encoding crates.
//!
//! Every value in this crate is checked once at construction and is immutable afterwards, so
//! downstream code can render it onto the wire without re-validating.

use std::fmt;

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    /// The input was empty or contained only whitespace.
    #[error("code cannot be empty")]
    Empty,

    /// The input contained something other than ASCII digits.
    #[error("code must contain only digits: '{0}'")]
    NotNumeric(String),

    /// The input had the wrong number of digits.
    #[error("code must be exactly {expected} digits, got {actual}: '{input}'")]
    WrongLength {
        expected: usize,
        actual: usize,
        input: String,
    },

    /// A quantity outside the accepted range.
    #[error("quantity must be between {min} and {max}, got {value}")]
    QuantityOutOfRange { value: u32, min: u8, max: u8 },
}

// Blank input is `Empty`. Padding counts as non-numeric.
fn digits(input: &str) -> Result<&str, CodeError> {
    if input.trim().is_empty() {
        return Err(CodeError::Empty);
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodeError::NotNumeric(input.to_owned()));
    }
    Ok(input)
}

/// A medical benefit (procedure) code: exactly six ASCII digits, with no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BenefitCode(String);

impl BenefitCode {
    /// Number of digits in a medical benefit code.
    pub const LEN: usize = 6;

    /// Creates a new `BenefitCode`, rejecting anything that is not six digits.
    pub fn new(input: impl AsRef<str>) -> Result<Self, CodeError> {
        let digits = digits(input.as_ref())?;
        if digits.len() != Self::LEN {
            return Err(CodeError::WrongLength {
                expected: Self::LEN,
                actual: digits.len(),
                input: digits.to_owned(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A dental benefit code: one or more ASCII digits, rendered without its `O` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DentalCode(String);

impl DentalCode {
    /// Creates a new `DentalCode` from a numeric string of any length.
    pub fn new(input: impl AsRef<str>) -> Result<Self, CodeError> {
        digits(input.as_ref()).map(|digits| Self(digits.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Quantity of a single benefit type on a submission (1..=99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    /// Creates a new `Quantity`, rejecting values outside `1..=99`.
    pub fn new(value: u32) -> Result<Self, CodeError> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(CodeError::QuantityOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            }),
        }
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }
}

macro_rules! string_newtype_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::new(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                <$ty>::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_newtype_impls!(BenefitCode);
string_newtype_impls!(DentalCode);

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Quantity::new(value).map_err(serde::de::Error::custom)
    }
}
