//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart that re-sums on every keystroke accumulates that drift.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$ 0,10 + R$ 0,20 = 10 + 20 = 30 centavos, exactly                   │
//! │    Formatting to "R$ 0,30" happens only at the edge                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use balcao_core::money::Money;
//!
//! let price = Money::from_cents(2500); // R$ 25,00
//! let line = price * 5;                // R$ 125,00
//! assert_eq!(line.to_string(), "R$ 125,00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

/// Basis points in 100%.
pub const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as `subtotal - discount` may go
///   negative before clamping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer**: the front end receives cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts only `reais` carries the sign:
    /// `from_reais_centavos(-5, 50)` is -R$ 5,50.
    #[inline]
    pub const fn from_reais_centavos(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion, always 0-99.
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns zero for negative values, the value itself otherwise.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-150).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(150).clamp_non_negative().cents(), 150);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(600); // R$ 6,00
    /// assert_eq!(unit_price.checked_mul_quantity(4), Some(Money::from_cents(2400)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Returns `bps` basis points of this amount, rounded half away from zero
    /// to the centavo.
    ///
    /// Uses `(amount * bps + 5000) / 10000` on the magnitude with i128
    /// intermediates, so rates above 100% never overflow.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(14900);     // R$ 149,00
    /// assert_eq!(subtotal.percentage_of(1000).cents(), 1490); // 10%
    /// assert_eq!(Money::from_cents(5).percentage_of(5000).cents(), 3); // 2.5 → 3
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let magnitude = (self.0.unsigned_abs() as i128 * bps as i128 + BPS_SCALE / 2) / BPS_SCALE;
        let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
        if self.0 < 0 {
            Money(-magnitude)
        } else {
            Money(magnitude)
        }
    }

    /// Parses a Brazilian-formatted amount.
    ///
    /// Accepts an optional `R$` prefix, an optional leading `-`, `.` as the
    /// thousands separator and `,` as the decimal separator with at most two
    /// fractional digits.
    ///
    /// ```rust
    /// use balcao_core::money::Money;
    ///
    /// assert_eq!(Money::parse_brl("1.234,56").unwrap().cents(), 123456);
    /// assert_eq!(Money::parse_brl("R$ 10,5").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse_brl("149").unwrap().cents(), 14900);
    /// assert!(Money::parse_brl("12,345").is_err());
    /// ```
    pub fn parse_brl(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let mut s = input.trim();
        let negative = s.starts_with('-');
        if negative {
            s = s[1..].trim_start();
        }
        if let Some(rest) = s.strip_prefix("R$") {
            s = rest.trim_start();
        }

        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (int_part, frac_part) = match s.split_once(',') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };

        if frac_part.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let int_digits: String = int_part.chars().filter(|c| *c != '.').collect();
        if int_digits.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_digits.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("only digits, '.' and ',' are allowed"));
        }

        let reais: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid("amount too large"))?
        };
        let centavos: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => frac_part.parse().map_err(|_| invalid("bad decimals"))?,
        };

        let cents = reais
            .checked_mul(100)
            .and_then(|c| c.checked_add(centavos))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Inserts `.` every three digits from the right.
///
/// ```rust
/// use balcao_core::money::group_thousands;
///
/// assert_eq!(group_thousands("1234567"), "1.234.567");
/// ```
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian display format: `R$ 1.234,56`, `-R$ 5,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let reais = (self.0.unsigned_abs() / 100).to_string();
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(&reais),
            self.centavos_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.centavos_part(), 99);
    }

    #[test]
    fn test_from_reais_centavos() {
        assert_eq!(Money::from_reais_centavos(25, 0).cents(), 2500);
        assert_eq!(Money::from_reais_centavos(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(14900).to_string(), "R$ 149,00");
        assert_eq!(Money::from_cents(123456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(100000000).to_string(), "R$ 1.000.000,00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
        assert_eq!(Money::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(7).to_string(), "R$ 0,07");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_repeated_addition_has_no_drift() {
        let mut acc = Money::zero();
        for _ in 0..1000 {
            acc += Money::from_cents(10);
        }
        assert_eq!(acc.cents(), 10_000);
    }

    #[test]
    fn test_percentage_of_rounding() {
        // R$ 0,05 × 50% = 2.5 centavos → 3
        assert_eq!(Money::from_cents(5).percentage_of(5000).cents(), 3);
        // R$ 10,00 × 8.25% = 82.5 → 83
        assert_eq!(Money::from_cents(1000).percentage_of(825).cents(), 83);
        // 200% is allowed here; clamping happens in the order calculator
        assert_eq!(Money::from_cents(1000).percentage_of(20000).cents(), 2000);
        assert_eq!(Money::from_cents(-1000).percentage_of(1000).cents(), -100);
    }

    #[test]
    fn test_checked_ops() {
        assert_eq!(
            Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)),
            None
        );
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(1)),
            Some(Money::from_cents(2))
        );
        assert_eq!(Money::from_cents(i64::MAX / 2 + 1).checked_mul_quantity(2), None);
    }

    #[test]
    fn test_parse_brl() {
        assert_eq!(Money::parse_brl("0,00").unwrap(), Money::zero());
        assert_eq!(Money::parse_brl("25,00").unwrap().cents(), 2500);
        assert_eq!(Money::parse_brl("R$ 1.234,56").unwrap().cents(), 123456);
        assert_eq!(Money::parse_brl("-R$ 5,50").unwrap().cents(), -550);
        assert_eq!(Money::parse_brl(",5").unwrap().cents(), 50);

        assert!(matches!(
            Money::parse_brl("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse_brl("abc").is_err());
        assert!(Money::parse_brl("1,234").is_err());
        assert!(Money::parse_brl("99999999999999999999").is_err());
    }

    #[test]
    fn test_display_then_parse() {
        let m = Money::from_cents(9876543);
        assert_eq!(Money::parse_brl(&m.to_string()).unwrap(), m);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(14900)).unwrap();
        assert_eq!(json, "14900");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }
}
