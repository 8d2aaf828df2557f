use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::rack_error::RackError;

/// Fixed-point scale: weights are stored as thousandths of a pound.
pub const MILLIS_PER_POUND: u32 = 1000;

/// A non-negative weight in pounds, stored as an integer number of
/// thousandths so that plate arithmetic is exact.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    #[must_use]
    pub const fn from_millis(millis: u32) -> Self {
        Weight(millis)
    }

    #[must_use]
    pub const fn from_pounds(pounds: u32) -> Self {
        Weight(pounds * MILLIS_PER_POUND)
    }

    #[must_use]
    pub const fn millis(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_pounds(self) -> f64 {
        f64::from(self.0) / f64::from(MILLIS_PER_POUND)
    }

    ///
    /// # Errors
    /// If `pounds` is negative, not finite, or too large to represent.
    ///
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_from_pounds(pounds: f64) -> Result<Self, RackError> {
        let millis = (pounds * f64::from(MILLIS_PER_POUND)).round();
        if !millis.is_finite() || millis < 0.0 || millis > f64::from(u32::MAX) {
            return Err(RackError::InvalidWeight(pounds.to_string()));
        }
        Ok(Weight(millis as u32))
    }

    /// Converts a raw thousandths value, clamping out-of-range input.
    /// NaN maps to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn saturating_from_millis(millis: f64) -> Self {
        Weight(millis.round() as u32)
    }

    #[must_use]
    pub const fn saturating_sub(self, other: Weight) -> Self {
        Weight(self.0.saturating_sub(other.0))
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Self) -> Self::Output {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Weight {
    type Output = Weight;

    fn mul(self, rhs: u32) -> Self::Output {
        Weight(self.0.saturating_mul(rhs))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Weight {
    type Error = RackError;

    fn try_from(pounds: f64) -> Result<Self, Self::Error> {
        Weight::try_from_pounds(pounds)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.as_pounds()
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / MILLIS_PER_POUND;
        let fraction = self.0 % MILLIS_PER_POUND;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Weight {
    type Err = RackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pounds = s
            .trim()
            .trim_end_matches("lb")
            .trim()
            .parse::<f64>()
            .map_err(|_| RackError::InvalidWeight(s.to_string()))?;
        Weight::try_from_pounds(pounds).map_err(|_| RackError::InvalidWeight(s.to_string()))
    }
}
