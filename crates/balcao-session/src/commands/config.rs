//! # Config Commands
//!
//! Commands for retrieving store configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current store configuration.
///
/// ## When Used
/// - App startup (to configure UI)
/// - Receipt header (store name, CNPJ)
/// - Currency formatting
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Formats a centavo amount the way the store displays money.
pub fn format_currency(config: &ConfigState, cents: i64) -> String {
    config.format_currency(cents)
}
