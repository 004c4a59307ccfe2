//! Fixed-point money type.
//!
//! Amounts are held as an integer count of minor units (paise), so repeated
//! summation over record lists never drifts. Decimal input from users is rounded
//! to the nearest minor unit exactly once, at the boundary.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minor units per major unit (paise per rupee).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Largest major-unit magnitude accepted from input.
const MAX_MAJOR: f64 = 1e13;

/// Largest minor-unit magnitude accepted from input or read back from the store.
pub const MAX_MINOR: i64 = 1_000_000_000_000_000;

/// A signed amount of money in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw minor-unit count.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Whole major units, e.g. `Money::from_major_units(500)` is 500.00.
    ///
    /// Meant for literals. Values beyond `i64::MAX / 100` saturate, which puts
    /// them outside [`MAX_MINOR`] and so fails [`Money::is_in_range`].
    #[must_use]
    pub const fn from_major_units(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Converts a decimal major-unit amount, rounding to the nearest minor unit.
    ///
    /// NaN, infinities and magnitudes beyond the supported range are rejected.
    pub fn from_major(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount.abs() > MAX_MAJOR {
            return Err(Error::InvalidAmount { amount });
        }
        // Range checked above; the product fits comfortably in i64.
        #[allow(clippy::cast_possible_truncation)]
        let minor = (amount * 100.0).round() as i64;
        Ok(Self(minor))
    }

    /// Like [`Money::from_major`], but the rounded value must be strictly positive.
    pub fn positive(amount: f64) -> Result<Self> {
        let money = Self::from_major(amount)?;
        if money.0 <= 0 {
            return Err(Error::InvalidAmount { amount });
        }
        Ok(money)
    }

    /// Like [`Money::from_major`], but the rounded value may not be negative.
    pub fn non_negative(amount: f64) -> Result<Self> {
        let money = Self::from_major(amount)?;
        if money.0 < 0 {
            return Err(Error::InvalidAmount { amount });
        }
        Ok(money)
    }

    /// Raw minor-unit count.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Approximate major-unit value, for ratios and display only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True when strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True when strictly less than zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// True when the magnitude is within [`MAX_MINOR`].
    #[must_use]
    pub const fn is_in_range(self) -> bool {
        self.0.unsigned_abs() <= MAX_MINOR.unsigned_abs()
    }

    /// Absolute value, saturating at `i64::MAX`.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// `max(0, target - self)`.
    #[must_use]
    pub const fn shortfall_to(self, target: Self) -> Self {
        let gap = target.0.saturating_sub(self.0);
        Self(if gap > 0 { gap } else { 0 })
    }

    /// `self + rhs`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self - rhs`, or `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums the amounts, or `None` if any partial sum overflows.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_from_major_rounds_to_minor_units() {
        assert_eq!(Money::from_major(10.005).unwrap().minor(), 1001);
        assert_eq!(Money::from_major(0.1).unwrap().minor(), 10);
        assert_eq!(Money::from_major(-2.5).unwrap().minor(), -250);
    }

    #[test]
    fn test_from_major_rejects_non_finite() {
        assert!(matches!(
            Money::from_major(f64::NAN),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(Money::from_major(f64::INFINITY).is_err());
        assert!(Money::from_major(f64::NEG_INFINITY).is_err());
        assert!(Money::from_major(1e20).is_err());
    }

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(Money::positive(0.0).is_err());
        assert!(Money::positive(-1.0).is_err());
        // Rounds to zero paise
        assert!(Money::positive(0.004).is_err());
        assert_eq!(Money::positive(0.01).unwrap().minor(), 1);
    }

    #[test]
    fn test_non_negative_allows_zero() {
        assert_eq!(Money::non_negative(0.0).unwrap(), Money::ZERO);
        assert!(Money::non_negative(-0.5).is_err());
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.1 summed ten times drifts in f64 but not in minor units
        let tenth = Money::from_major(0.1).unwrap();
        let total = Money::checked_sum(std::iter::repeat_n(tenth, 10)).unwrap();
        assert_eq!(total, Money::from_major_units(1));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let half = Money::from_minor(i64::MAX / 2 + 1);
        assert_eq!(half.checked_add(half), None);
        assert_eq!(Money::checked_sum([half, half]), None);
        assert_eq!(Money::from_minor(i64::MIN).checked_sub(Money::from_minor(1)), None);
        assert_eq!(
            Money::from_minor(5).checked_sub(Money::from_minor(7)),
            Some(Money::from_minor(-2))
        );
    }

    #[test]
    fn test_range_matches_input_bound() {
        #[allow(clippy::cast_possible_truncation)]
        let bound = (MAX_MAJOR * 100.0) as i64;
        assert_eq!(bound, MAX_MINOR);
        assert!(Money::from_minor(MAX_MINOR).is_in_range());
        assert!(Money::from_minor(-MAX_MINOR).is_in_range());
        assert!(!Money::from_minor(MAX_MINOR + 1).is_in_range());
        assert!(!Money::from_minor(i64::MIN).is_in_range());
        assert!(!Money::from_major_units(i64::MAX).is_in_range());
        assert!(Money::from_major(1e13).unwrap().is_in_range());
    }

    #[test]
    fn test_shortfall_to() {
        let raised = Money::from_major_units(150);
        assert_eq!(raised.shortfall_to(Money::from_major_units(100)), Money::ZERO);
        assert_eq!(
            Money::from_major_units(40).shortfall_to(Money::from_major_units(100)),
            Money::from_major_units(60)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(150_050).to_string(), "1500.50");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }
}
