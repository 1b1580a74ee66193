//! Exact two-decimal money values.
//!
//! Basket prices are kept in minor units (pence, cents) so that line totals
//! and discount magnitudes are computed without floating point.

use std::fmt;
use std::str::FromStr;

use crate::GatewayError;

/// Signed amount in minor units. Negative amounts denote discount lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Unit amount multiplied by a quantity.
    pub fn times(self, quantity: u32) -> Amount {
        Amount(self.0.saturating_mul(i64::from(quantity)))
    }

    pub fn negate(self) -> Amount {
        Amount(self.0.saturating_neg())
    }
}

impl fmt::Display for Amount {
    /// Always two decimals, `.` separator, no grouping: `-12.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| GatewayError::InvalidAmount(format!("'{s}': {reason}"));

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (integer_part, fractional_part) = digits.split_once('.').unwrap_or((digits, ""));
        if integer_part.is_empty() && fractional_part.is_empty() {
            return Err(invalid("no numeric content"));
        }
        if !integer_part.chars().all(|c| c.is_ascii_digit())
            || !fractional_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("not a decimal number"));
        }

        // Digits past the second decimal place must be zero.
        let (cents, excess) = fractional_part.split_at(fractional_part.len().min(2));
        if excess.chars().any(|c| c != '0') {
            return Err(invalid("more than two decimal places"));
        }

        let major: i64 = if integer_part.is_empty() {
            0
        } else {
            integer_part
                .parse()
                .map_err(|e| invalid(&format!("integer part: {e}")))?
        };
        let minor: i64 = match cents.len() {
            0 => 0,
            1 => cents.parse::<i64>().map_err(|e| invalid(&e.to_string()))? * 10,
            _ => cents.parse::<i64>().map_err(|e| invalid(&e.to_string()))?,
        };

        let total = major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| invalid("overflow"))?;

        Ok(Amount(if negative { -total } else { total }))
    }
}
