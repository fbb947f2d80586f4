use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Amount as read from batch input, normalised to [`Money::TARGET_DECIMALS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Decimal);

impl Money {
    pub const TARGET_DECIMALS: u32 = 4;

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Parses a plain decimal literal. Extra precision is rounded half to even.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();

        if s.is_empty() {
            return None;
        }

        // underscores are legal for rust_decimal but never for an amount
        if s.contains('_') {
            return None;
        }

        let value = Decimal::from_str(s).ok()?;
        Some(Self(value.round_dp(Self::TARGET_DECIMALS).normalize()))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_decimal_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid Money format: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::Money;

    #[test]
    fn bankers_round_half_even() {
        let v = Money::from_decimal_str("1.23445").unwrap();
        assert_eq!(v.to_string(), "1.2344");
        let v = Money::from_decimal_str("1.23455").unwrap();
        assert_eq!(v.to_string(), "1.2346");
        let v = Money::from_decimal_str("-1.23445").unwrap();
        assert_eq!(v.to_string(), "-1.2344");
        let v = Money::from_decimal_str("-1.23455").unwrap();
        assert_eq!(v.to_string(), "-1.2346");
    }

    #[test]
    fn trailing_zeros_are_dropped() {
        assert_eq!(Money::from_decimal_str(" 500.00 ").unwrap().to_string(), "500");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Money::from_decimal_str("").is_none());
        assert!(Money::from_decimal_str("   ").is_none());
        assert!(Money::from_decimal_str("12.3.4").is_none());
        assert!(Money::from_decimal_str("ten").is_none());
        assert!(Money::from_decimal_str("1_000").is_none());
    }
}
