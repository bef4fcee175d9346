use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// An amount in minor currency units (paise, cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: u64) -> Self {
        Money(minor)
    }

    pub fn from_major(major: u64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Parse a decimal amount such as `"120"`, `"99.5"` or `"12.05"`.
    ///
    /// Digits past the second decimal place are rounded half-up.
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (text, ""),
        };
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if whole.is_empty() && frac.is_empty() {
            return None;
        }

        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let minor = whole
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths)?
            .checked_add(u64::from(round_up))?;
        Some(Money(minor))
    }

    /// Convert a floating point amount in major units, rounding to the nearest minor unit.
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() || major < 0.0 {
            return None;
        }
        let minor = (major * 100.0).round();
        if minor > u64::MAX as f64 {
            return None;
        }
        Some(Money(minor as u64))
    }

    pub fn minor(self) -> u64 {
        self.0
    }

    /// `self * per_mille / 1000`, rounded half-up.
    pub fn per_mille(self, per_mille: u64) -> Money {
        let scaled = u128::from(self.0) * u128::from(per_mille);
        let rounded = (scaled + 500) / 1000;
        Money(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
