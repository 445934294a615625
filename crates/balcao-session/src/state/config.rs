//! # Configuration State
//!
//! Stores store configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BALCAO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use balcao_core::document::{self, TaxpayerKind};
use balcao_core::money::group_thousands;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENV_STORE_NAME: &str = "BALCAO_STORE_NAME";
pub const ENV_COMPANY_CNPJ: &str = "BALCAO_COMPANY_CNPJ";
pub const ENV_CURRENCY_SYMBOL: &str = "BALCAO_CURRENCY_SYMBOL";

/// Decimal places honored by [`ConfigState::format_currency`]; larger values are capped.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (displayed on receipts)
    pub store_name: String,

    /// Issuer CNPJ, digits only. `None` until a valid one is configured.
    pub company_cnpj: Option<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Balcão".to_string(),
            company_cnpj: None,
            currency_symbol: "R$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BALCAO_STORE_NAME`: Override store name
    /// - `BALCAO_COMPANY_CNPJ`: Issuer CNPJ, masked or not; ignored if invalid
    /// - `BALCAO_CURRENCY_SYMBOL`: Override currency symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup(ENV_STORE_NAME).filter(|s| !s.trim().is_empty()) {
            config.store_name = store_name.trim().to_string();
        }

        if let Some(cnpj) = lookup(ENV_COMPANY_CNPJ) {
            if document::validate(&cnpj, TaxpayerKind::Organization) {
                config.company_cnpj = Some(document::strip_non_digits(&cnpj));
            } else {
                warn!(value = %cnpj, "Ignoring invalid {}", ENV_COMPANY_CNPJ);
            }
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL).filter(|s| !s.trim().is_empty()) {
            config.currency_symbol = symbol.trim().to_string();
        }

        config
    }

    /// Issuer CNPJ with its mask applied.
    pub fn company_cnpj_masked(&self) -> Option<String> {
        self.company_cnpj
            .as_deref()
            .map(|digits| document::format_masked(digits, TaxpayerKind::Organization))
    }

    /// Formats a centavo amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use balcao_session::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(123456), "R$ 1.234,56");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = self.currency_decimals.min(MAX_CURRENCY_DECIMALS);
        let divisor = 10_u64.pow(u32::from(decimals));
        let magnitude = cents.unsigned_abs();
        let whole = magnitude / divisor;
        let frac = magnitude % divisor;

        format!(
            "{}{} {}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!(
                    "{},{:0width$}",
                    group_thousands(&whole.to_string()),
                    frac,
                    width = decimals as usize
                )
            } else {
                group_thousands(&whole.to_string())
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "R$ 12,34");
        assert_eq!(config.format_currency(100), "R$ 1,00");
        assert_eq!(config.format_currency(1), "R$ 0,01");
        assert_eq!(config.format_currency(0), "R$ 0,00");
        assert_eq!(config.format_currency(100_000_000), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-550), "-R$ 5,50");
        assert_eq!(config.format_currency(i64::MIN).chars().next(), Some('-'));
    }

    #[test]
    fn test_format_currency_caps_decimals() {
        let config = ConfigState {
            currency_decimals: 25,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(123456), "R$ 12,3456");

        let config = ConfigState {
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(1500), "R$ 1.500");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            (ENV_STORE_NAME, " Lanchonete Central "),
            (ENV_COMPANY_CNPJ, "11.222.333/0001-81"),
        ]));
        assert_eq!(config.store_name, "Lanchonete Central");
        assert_eq!(config.company_cnpj.as_deref(), Some("11222333000181"));
        assert_eq!(
            config.company_cnpj_masked().as_deref(),
            Some("11.222.333/0001-81")
        );
        assert_eq!(config.currency_symbol, "R$");
    }

    #[test]
    fn test_from_lookup_ignores_invalid_cnpj() {
        let config = ConfigState::from_lookup(lookup(&[(ENV_COMPANY_CNPJ, "11222333000180")]));
        assert_eq!(config.company_cnpj, None);
        assert_eq!(config, ConfigState::default());
    }
}
