//! # Input Masks
//!
//! Progressive masks for the numeric fields of the registration and product
//! forms. Every function strips non-digits first, truncates to the field
//! length, and inserts separators only once a digit follows them, so the
//! output is stable while the user is still typing.
//!
//! ```text
//! keystrokes     "3013"   "30130"   "301301"   "30130110"
//! format_cep  →  "3013"   "30130"   "30130-1"  "30130-110"
//! ```

use crate::document::strip_non_digits;
use crate::money::group_thousands;

/// CEP: `ddddd-ddd`
pub const CEP_PATTERN: &str = "#####-###";
/// NCM: `dddd.dd.dd`
pub const NCM_PATTERN: &str = "####.##.##";
/// CEST: `dd.ddd.dd`
pub const CEST_PATTERN: &str = "##.###.##";

/// Digits accepted by the money input before further keystrokes are ignored.
pub const MONEY_INPUT_MAX_DIGITS: usize = 11;

/// Applies a `#`-placeholder pattern to the digits in `input`.
///
/// Literal characters in the pattern are emitted only when at least one more
/// digit remains; digits beyond the pattern's capacity are dropped.
///
/// ```rust
/// use balcao_core::mask::apply_pattern;
///
/// assert_eq!(apply_pattern("1234", "###.###"), "123.4");
/// assert_eq!(apply_pattern("123", "###.###"), "123");
/// assert_eq!(apply_pattern("12a3456789", "###.###"), "123.456");
/// ```
pub fn apply_pattern(input: &str, pattern: &str) -> String {
    let digits = strip_non_digits(input);
    let mut remaining = digits.chars().peekable();
    let mut out = String::with_capacity(pattern.len());

    for slot in pattern.chars() {
        if remaining.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = remaining.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }

    out
}

pub fn format_cep(input: &str) -> String {
    apply_pattern(input, CEP_PATTERN)
}

pub fn format_ncm(input: &str) -> String {
    apply_pattern(input, NCM_PATTERN)
}

pub fn format_cest(input: &str) -> String {
    apply_pattern(input, CEST_PATTERN)
}

/// Formats keystrokes as a right-to-left money field.
///
/// Digits are read as centavos, so typing `1`, `2`, `3` shows `0,01`,
/// `0,12`, `1,23`. Thousands are dotted; no currency symbol is added.
///
/// ```rust
/// use balcao_core::mask::format_money_input;
///
/// assert_eq!(format_money_input(""), "0,00");
/// assert_eq!(format_money_input("12345"), "123,45");
/// assert_eq!(format_money_input("123456789"), "1.234.567,89");
/// ```
pub fn format_money_input(input: &str) -> String {
    let digits: String = strip_non_digits(input)
        .chars()
        .take(MONEY_INPUT_MAX_DIGITS)
        .collect();
    let padded = format!("{:0>3}", digits);
    let (int_part, decimals) = padded.split_at(padded.len() - 2);

    // Leading zeros beyond the units digit carry no value.
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    format!("{},{}", group_thousands(int_part), decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cep_progressive() {
        assert_eq!(format_cep(""), "");
        assert_eq!(format_cep("30130"), "30130");
        assert_eq!(format_cep("301301"), "30130-1");
        assert_eq!(format_cep("30130110"), "30130-110");
        assert_eq!(format_cep("30130-110999"), "30130-110");
    }

    #[test]
    fn test_ncm_progressive() {
        assert_eq!(format_ncm("2106"), "2106");
        assert_eq!(format_ncm("21069"), "2106.9");
        assert_eq!(format_ncm("210690"), "2106.90");
        assert_eq!(format_ncm("2106909"), "2106.90.9");
        assert_eq!(format_ncm("21069090"), "2106.90.90");
    }

    #[test]
    fn test_cest_progressive() {
        assert_eq!(format_cest("03"), "03");
        assert_eq!(format_cest("030"), "03.0");
        assert_eq!(format_cest("0300700"), "03.007.00");
        assert_eq!(format_cest("03.007.00"), "03.007.00");
    }

    #[test]
    fn test_money_input() {
        assert_eq!(format_money_input("1"), "0,01");
        assert_eq!(format_money_input("100"), "1,00");
        assert_eq!(format_money_input("R$ 1.500,00"), "1.500,00");
        assert_eq!(format_money_input("00012"), "0,12");
        // 11-digit cap: the trailing 9 is ignored
        assert_eq!(format_money_input("123456789019"), "123.456.789,01");
    }

    #[test]
    fn test_pattern_ignores_noise() {
        assert_eq!(apply_pattern("a1b2c3", "#-#-#"), "1-2-3");
        assert_eq!(apply_pattern("no digits", "#-#"), "");
    }
}
