//! # Form Commands
//!
//! Progressive masks for the text fields of the client and product forms.

use balcao_core::document::format_masked;
use balcao_core::mask::{format_cep, format_cest, format_money_input, format_ncm};
use balcao_core::TaxpayerKind;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Masked form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Cpf,
    Cnpj,
    Cep,
    Ncm,
    Cest,
    /// Right-to-left money input, digits read as centavos
    Money,
}

/// Re-masks a field value after a keystroke.
///
/// ```rust
/// use balcao_session::commands::form::{mask_input, FormField};
///
/// assert_eq!(mask_input(FormField::Cep, "01310100"), "01310-100");
/// assert_eq!(mask_input(FormField::Money, "150"), "1,50");
/// ```
pub fn mask_input(field: FormField, value: &str) -> String {
    trace!(?field, "mask_input command");

    match field {
        FormField::Cpf => format_masked(value, TaxpayerKind::Individual),
        FormField::Cnpj => format_masked(value, TaxpayerKind::Organization),
        FormField::Cep => format_cep(value),
        FormField::Ncm => format_ncm(value),
        FormField::Cest => format_cest(value),
        FormField::Money => format_money_input(value),
    }
}
