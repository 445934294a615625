//! # Taxpayer Documents (CPF / CNPJ)
//!
//! Check-digit validation and progressive masking for Brazilian taxpayer ids.
//!
//! ## Modulo-11 Check Digits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CPF  529.982.247-25                                                    │
//! │                                                                         │
//! │  body   5  2  9  9  8  2  2  4  7                                       │
//! │  ×     10  9  8  7  6  5  4  3  2   sum = 295, 295 % 11 = 9             │
//! │  first check digit = 11 - 9 = 2                          ──► 2 ✓        │
//! │                                                                         │
//! │  body + 2, weights 11..=2           sum = 347, 347 % 11 = 6             │
//! │  second check digit = 11 - 6 = 5                         ──► 5 ✓        │
//! │                                                                         │
//! │  remainder < 2 → check digit 0                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Entry Points
//! - `validate_*` / [`format_masked`]: run on every keystroke, never fail,
//!   return `false` for anything malformed.
//! - [`TaxpayerId::parse`]: typed construction for code that needs a
//!   `Result` (client registration).

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::mask::apply_pattern;

const CPF_FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const CPF_SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

// =============================================================================
// Taxpayer Kind
// =============================================================================

/// Individual (CPF) or organization (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TaxpayerKind {
    /// Pessoa física, 11 digits.
    Individual,
    /// Pessoa jurídica, 14 digits.
    Organization,
}

impl TaxpayerKind {
    #[inline]
    pub const fn digit_count(self) -> usize {
        match self {
            TaxpayerKind::Individual => 11,
            TaxpayerKind::Organization => 14,
        }
    }

    /// Document name shown to the user.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            TaxpayerKind::Individual => "CPF",
            TaxpayerKind::Organization => "CNPJ",
        }
    }

    #[inline]
    pub const fn mask_pattern(self) -> &'static str {
        match self {
            TaxpayerKind::Individual => "###.###.###-##",
            TaxpayerKind::Organization => "##.###.###/####-##",
        }
    }

    /// Infers the kind from a stripped digit count.
    pub const fn from_digit_count(count: usize) -> Option<Self> {
        match count {
            11 => Some(TaxpayerKind::Individual),
            14 => Some(TaxpayerKind::Organization),
            _ => None,
        }
    }
}

impl fmt::Display for TaxpayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Digit Helpers
// =============================================================================

/// Keeps ASCII digits only.
///
/// ```rust
/// use balcao_core::document::strip_non_digits;
///
/// assert_eq!(strip_non_digits("529.982.247-25"), "52998224725");
/// ```
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strips `input` and returns its digit values when the count matches and the
/// digits are not all the same.
fn checkable_digits(input: &str, expected_len: usize) -> Option<Vec<u32>> {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != expected_len {
        return None;
    }
    // 000.000.000-00, 111.111.111-11, ... pass the checksum but are never issued
    if digits.iter().all(|d| *d == digits[0]) {
        return None;
    }

    Some(digits)
}

/// Weighted sum modulo 11; remainders 0 and 1 map to check digit 0.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a CPF. Separators are ignored.
///
/// ```rust
/// use balcao_core::document::validate_individual_id;
///
/// assert!(validate_individual_id("52998224725"));
/// assert!(validate_individual_id("529.982.247-25"));
/// assert!(!validate_individual_id("12345678900"));
/// assert!(!validate_individual_id("11111111111"));
/// ```
pub fn validate_individual_id(input: &str) -> bool {
    let Some(digits) = checkable_digits(input, TaxpayerKind::Individual.digit_count()) else {
        return false;
    };

    let first = check_digit(&digits[..9], &CPF_FIRST_WEIGHTS);
    if first != digits[9] {
        return false;
    }

    check_digit(&digits[..10], &CPF_SECOND_WEIGHTS) == digits[10]
}

/// Validates a CNPJ. Separators are ignored.
///
/// ```rust
/// use balcao_core::document::validate_organization_id;
///
/// assert!(validate_organization_id("11.222.333/0001-81"));
/// assert!(!validate_organization_id("11222333000182"));
/// ```
pub fn validate_organization_id(input: &str) -> bool {
    let Some(digits) = checkable_digits(input, TaxpayerKind::Organization.digit_count()) else {
        return false;
    };

    let first = check_digit(&digits[..12], &CNPJ_FIRST_WEIGHTS);

    let mut with_first = [0u32; 13];
    with_first[..12].copy_from_slice(&digits[..12]);
    with_first[12] = first;
    let second = check_digit(&with_first, &CNPJ_SECOND_WEIGHTS);

    first == digits[12] && second == digits[13]
}

/// Validates `input` as the given kind.
pub fn validate(input: &str, kind: TaxpayerKind) -> bool {
    match kind {
        TaxpayerKind::Individual => validate_individual_id(input),
        TaxpayerKind::Organization => validate_organization_id(input),
    }
}

/// Masks `input` progressively for `kind`.
///
/// Works on partial input so it can be applied on every keystroke.
///
/// ```rust
/// use balcao_core::document::{format_masked, TaxpayerKind};
///
/// assert_eq!(format_masked("5299822", TaxpayerKind::Individual), "529.982.2");
/// assert_eq!(format_masked("52998224725", TaxpayerKind::Individual), "529.982.247-25");
/// assert_eq!(
///     format_masked("11222333000181", TaxpayerKind::Organization),
///     "11.222.333/0001-81"
/// );
/// ```
pub fn format_masked(input: &str, kind: TaxpayerKind) -> String {
    apply_pattern(input, kind.mask_pattern())
}

// =============================================================================
// Taxpayer Id
// =============================================================================

/// A CPF or CNPJ whose length and check digits have been verified.
///
/// Only the digits are stored; [`Display`](fmt::Display) renders the mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxpayerId {
    kind: TaxpayerKind,
    digits: String,
}

impl TaxpayerId {
    /// Parses `input`, inferring the kind from the number of digits.
    ///
    /// ```rust
    /// use balcao_core::document::{TaxpayerId, TaxpayerKind};
    ///
    /// let id = TaxpayerId::parse("529.982.247-25").unwrap();
    /// assert_eq!(id.kind(), TaxpayerKind::Individual);
    /// assert_eq!(id.digits(), "52998224725");
    /// assert_eq!(id.to_string(), "529.982.247-25");
    ///
    /// assert!(TaxpayerId::parse("123").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = strip_non_digits(input);
        let kind = TaxpayerKind::from_digit_count(digits.len()).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "document".to_string(),
                reason: "must have 11 (CPF) or 14 (CNPJ) digits".to_string(),
            }
        })?;
        Self::parse_as(&digits, kind)
    }

    /// Parses `input` as a specific kind.
    pub fn parse_as(input: &str, kind: TaxpayerKind) -> Result<Self, ValidationError> {
        if !validate(input, kind) {
            return Err(ValidationError::InvalidDocument { kind: kind.label() });
        }
        Ok(TaxpayerId {
            kind,
            digits: strip_non_digits(input),
        })
    }

    #[inline]
    pub fn kind(&self) -> TaxpayerKind {
        self.kind
    }

    #[inline]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn masked(&self) -> String {
        format_masked(&self.digits, self.kind)
    }
}

impl fmt::Display for TaxpayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
