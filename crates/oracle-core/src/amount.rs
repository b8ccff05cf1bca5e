use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AmountError;

/// Denominator for basis-point multipliers (`10_000` = 100%).
pub const BASIS_POINTS: u32 = 10_000;

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("invalid regex"))
}

/// Exact token amount in base units.
///
/// Token amounts carry up to 24 fractional digits, so every value is held as
/// an arbitrary-precision decimal. The textual form is always plain decimal
/// notation, never scientific notation, which keeps persisted documents and
/// CLI output stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigDecimal);

impl Amount {
    /// The zero amount.
    pub fn zero() -> Self {
        Self(BigDecimal::from(0u32))
    }

    /// The smallest stakeable amount (one base unit).
    pub fn one() -> Self {
        Self(BigDecimal::from(1u32))
    }

    /// Parses a plain decimal string such as `"1000"` or `"0.5"`.
    pub fn parse(value: &str) -> Result<Self, AmountError> {
        let trimmed = value.trim();
        if !decimal_pattern().is_match(trimmed) {
            return Err(AmountError::Invalid(value.to_string()));
        }
        BigDecimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| AmountError::Invalid(value.to_string()))
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        *self > Self::zero()
    }

    /// Returns true if the amount is strictly below zero.
    pub fn is_negative(&self) -> bool {
        *self < Self::zero()
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Larger of two amounts.
    pub fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Clamps into `[min, max]`. `min` wins if the bounds are inverted.
    pub fn clamp_between(self, min: &Amount, max: &Amount) -> Self {
        if &self > max {
            return max.clone().max_of(min.clone());
        }
        if &self < min {
            return min.clone();
        }
        self
    }

    /// Applies a basis-point multiplier (`10_500` = 105%) without rounding.
    pub fn apply_basis_points(&self, multiplier: u32) -> Self {
        let product = &self.0 * &BigDecimal::from(multiplier);
        let (digits, scale) = product.as_bigint_and_exponent();
        // dividing by 10_000 only shifts the decimal point
        Self(BigDecimal::new(digits, scale + 4))
    }

    /// Rounds to whole base units, halves away from zero.
    pub fn round_half_up(&self) -> Self {
        self.round_whole(true)
    }

    /// Truncates to whole base units, toward zero.
    pub fn round_down(&self) -> Self {
        self.round_whole(false)
    }

    fn round_whole(&self, half_up: bool) -> Self {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        if scale <= 0 {
            return self.clone();
        }
        let divisor = BigInt::from(10u32).pow(scale as u32);
        let mut quotient = &digits / &divisor;
        if half_up {
            let remainder = &digits % &divisor;
            let twice = remainder.magnitude().clone() * 2u32;
            if &twice >= divisor.magnitude() {
                if digits.sign() == Sign::Minus {
                    quotient -= 1u32;
                } else {
                    quotient += 1u32;
                }
            }
        }
        Self(BigDecimal::new(quotient, 0))
    }

    /// Access to the underlying decimal.
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Plain decimal notation with trailing fractional zeros removed.
    pub fn to_plain_string(&self) -> String {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        if digits.sign() == Sign::NoSign {
            return "0".to_string();
        }

        let negative = digits.sign() == Sign::Minus;
        let mut magnitude = digits.magnitude().to_string();
        let mut scale = scale;

        if scale < 0 {
            magnitude.push_str(&"0".repeat(scale.unsigned_abs() as usize));
            scale = 0;
        }

        // strip trailing fractional zeros
        while scale > 0 && magnitude.ends_with('0') {
            magnitude.pop();
            scale -= 1;
        }

        let scale = scale as usize;
        let body = if scale == 0 {
            magnitude
        } else {
            if magnitude.len() <= scale {
                let padding = "0".repeat(scale + 1 - magnitude.len());
                magnitude.insert_str(0, &padding);
            }
            let split = magnitude.len() - scale;
            format!("{}.{}", &magnitude[..split], &magnitude[split..])
        };

        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl From<BigDecimal> for Amount {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl Add for &Amount {
    type Output = Amount;

    fn add(self, rhs: &Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Sub for &Amount {
    type Output = Amount;

    fn sub(self, rhs: &Amount) -> Amount {
        Amount(&self.0 - &rhs.0)
    }
}

impl Mul for &Amount {
    type Output = Amount;

    fn mul(self, rhs: &Amount) -> Amount {
        Amount(&self.0 * &rhs.0)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, item| &acc + item)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_plain_string())
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(BigDecimal::from(v)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
