//! Fixed-point currency amounts.
//!
//! All amounts are held as a signed count of cents so that splitting and settling never
//! accumulate floating-point drift. Conversion from user-entered `f64` values happens once,
//! at the boundary, in [`Money::from_dollars`].

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest absolute dollar value accepted from user input.
const MAX_DOLLARS: f64 = 10_000_000_000_000.0;

/// A currency amount in minor units (cents).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw cent count.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a dollar amount to cents, rounding to the nearest cent.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAmount`] for NaN, infinite, or absurdly large values.
    pub fn from_dollars(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount.abs() > MAX_DOLLARS {
            return Err(Error::InvalidAmount { amount });
        }
        // Bounded by MAX_DOLLARS * 100, well inside i64.
        #[allow(clippy::cast_possible_truncation)]
        let cents = (amount * 100.0).round() as i64;
        Ok(Self(cents))
    }

    /// The raw cent count.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount in dollars, for display or export only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True for exactly zero cents.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True for amounts above zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True for amounts below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The amount without its sign.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Splits the amount into `parts` shares that add back up to exactly `self`.
    ///
    /// Every share gets `self / parts` cents and the first `self % parts` shares get one
    /// cent more. Returns an empty vector when `parts` is zero.
    #[must_use]
    pub fn split(self, parts: usize) -> Vec<Self> {
        let Ok(divisor) = i64::try_from(parts) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }

        let base = self.0.div_euclid(divisor);
        let remainder = self.0.rem_euclid(divisor);

        (0..divisor)
            .map(|index| {
                if index < remainder {
                    Self(base + 1)
                } else {
                    Self(base)
                }
            })
            .collect()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
