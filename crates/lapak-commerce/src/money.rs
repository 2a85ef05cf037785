//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's smallest unit. Rupiah has no minor
//! unit in practice, so an IDR amount of `50000` is Rp50.000.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    IDR,
    USD,
    SGD,
    MYR,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "IDR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IDR => "IDR",
            Currency::USD => "USD",
            Currency::SGD => "SGD",
            Currency::MYR => "MYR",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "Rp").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IDR => "Rp",
            Currency::USD => "$",
            Currency::SGD => "S$",
            Currency::MYR => "RM",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::IDR => 0,
            _ => 2,
        }
    }

    /// Thousands separator used when formatting.
    fn group_separator(&self) -> char {
        match self {
            Currency::IDR | Currency::EUR => '.',
            _ => ',',
        }
    }

    /// Decimal separator used when formatting.
    fn decimal_separator(&self) -> char {
        match self {
            Currency::IDR | Currency::EUR => ',',
            _ => '.',
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "IDR" => Some(Currency::IDR),
            "USD" => Some(Currency::USD),
            "SGD" => Some(Currency::SGD),
            "MYR" => Some(Currency::MYR),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for a rupiah amount.
    pub fn idr(amount: i64) -> Self {
        Self::new(amount, Currency::IDR)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Add another amount of the same currency.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Sum an iterator of amounts, all expected in `currency`.
    pub fn try_sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Format without the symbol (e.g., "50.000" for IDR, "49.99" for USD).
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let abs = self.amount.unsigned_abs();
        let whole = group_digits(abs / divisor as u64, self.currency.group_separator());

        let mut out = String::new();
        if self.amount < 0 {
            out.push('-');
        }
        out.push_str(&whole);
        if places > 0 {
            let frac = abs % divisor as u64;
            out.push(self.currency.decimal_separator());
            out.push_str(&format!("{:0width$}", frac, width = places as usize));
        }
        out
    }

    /// Format with the symbol (e.g., "Rp50.000").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }
}

fn group_digits(mut value: u64, separator: char) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 1000);
        value /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push(separator);
        out.push_str(&format!("{:03}", g));
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupiah_display() {
        assert_eq!(Money::idr(50000).display(), "Rp50.000");
        assert_eq!(Money::idr(1_250_000).display(), "Rp1.250.000");
        assert_eq!(Money::idr(0).display(), "Rp0");
        assert_eq!(Money::idr(-15000).display(), "Rp-15.000");
    }

    #[test]
    fn test_usd_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
        let m = Money::new(123456789, Currency::USD);
        assert_eq!(m.display_amount(), "1,234,567.89");
    }

    #[test]
    fn test_try_add() {
        let a = Money::idr(1000);
        let b = Money::idr(500);
        assert_eq!(a.try_add(&b).unwrap(), Money::idr(1500));
    }

    #[test]
    fn test_currency_mismatch() {
        let idr = Money::idr(1000);
        let usd = Money::new(1000, Currency::USD);
        let err = idr.try_add(&usd).unwrap_err();
        assert_eq!(
            err,
            CommerceError::CurrencyMismatch {
                expected: "IDR".into(),
                got: "USD".into()
            }
        );
    }

    #[test]
    fn test_overflow() {
        let m = Money::idr(i64::MAX);
        assert_eq!(m.try_multiply(2), Err(CommerceError::Overflow));
        assert_eq!(m.try_add(&Money::idr(1)), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_try_sum() {
        let amounts = [Money::idr(100), Money::idr(200), Money::idr(300)];
        assert_eq!(
            Money::try_sum(&amounts, Currency::IDR).unwrap(),
            Money::idr(600)
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("idr"), Some(Currency::IDR));
        assert_eq!(Currency::from_code("SGD"), Some(Currency::SGD));
        assert_eq!(Currency::from_code("XXX"), None);
    }
}
