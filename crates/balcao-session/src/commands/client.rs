//! # Client Commands
//!
//! Document checks for the CPF/CNPJ field and client registration.
//!
//! ## Document Field Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types "5299822472"                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_document(input, kind)  on every keystroke                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { masked: "529.982.247-2", valid: false }   field shows mask, no error │
//! │       │                                                                 │
//! │  User types "5"                                                         │
//! │       ▼                                                                 │
//! │  { masked: "529.982.247-25", valid: true }   field turns green          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  register_client(profile)                    checks everything again    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use balcao_core::document::{self, strip_non_digits};
use balcao_core::validation::validate_uuid;
use balcao_core::{ClientProfile, TaxpayerKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{Client, ClientRegistry};

/// Result of checking a partially or fully typed CPF/CNPJ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCheck {
    pub digits: String,
    pub masked: String,
    pub kind: TaxpayerKind,
    pub valid: bool,
}

/// Masks and validates a CPF/CNPJ field value.
///
/// Never fails: incomplete or wrong input yields `valid: false`.
pub fn check_document(input: &str, kind: TaxpayerKind) -> DocumentCheck {
    let digits: String = strip_non_digits(input)
        .chars()
        .take(kind.digit_count())
        .collect();
    let valid = document::validate(&digits, kind);
    debug!(kind = %kind, len = digits.len(), valid, "check_document command");

    DocumentCheck {
        masked: document::format_masked(&digits, kind),
        digits,
        kind,
        valid,
    }
}

/// Registers a client.
///
/// ## Errors
/// - `VALIDATION_ERROR`: name, CPF/CNPJ, IE or credit limit rejected
/// - `DUPLICATE`: a client with the same document exists
pub fn register_client(
    registry: &ClientRegistry,
    profile: ClientProfile,
) -> Result<Client, ApiError> {
    debug!(kind = %profile.kind, "register_client command");

    let client = registry.register(profile)?;
    info!(
        client_id = %client.id,
        kind = %client.kind,
        nfe_eligible = client.nfe_eligible,
        "Client registered"
    );
    Ok(client)
}

/// Lists clients matching `query` by name or document.
pub fn list_clients(registry: &ClientRegistry, query: &str) -> Result<Vec<Client>, ApiError> {
    debug!(query = %query, "list_clients command");
    Ok(registry.list(query)?)
}

/// Gets a client by id.
pub fn get_client(registry: &ClientRegistry, id: &str) -> Result<Client, ApiError> {
    debug!(id = %id, "get_client command");

    validate_uuid(id)?;
    registry
        .get(id)
        .ok_or_else(|| ApiError::not_found("Client", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use balcao_core::{Address, IeIndicator};

    fn profile(document: &str) -> ClientProfile {
        ClientProfile {
            kind: TaxpayerKind::Individual,
            name: "João Souza".to_string(),
            document: document.to_string(),
            phone: String::new(),
            credit_limit: None,
            ie_indicator: IeIndicator::NonContributor,
            ie: String::new(),
            address: Address::default(),
        }
    }

    #[test]
    fn test_check_document_progressive() {
        let check = check_document("5299822472", TaxpayerKind::Individual);
        assert_eq!(check.masked, "529.982.247-2");
        assert!(!check.valid);

        let check = check_document("529982247255555", TaxpayerKind::Individual);
        assert_eq!(check.digits, "52998224725");
        assert_eq!(check.masked, "529.982.247-25");
        assert!(check.valid);

        let check = check_document("11222333000181", TaxpayerKind::Organization);
        assert_eq!(check.masked, "11.222.333/0001-81");
        assert!(check.valid);

        let check = check_document("", TaxpayerKind::Organization);
        assert_eq!(check.masked, "");
        assert!(!check.valid);
    }

    #[test]
    fn test_check_document_serialized_shape() {
        let json = serde_json::to_value(check_document("123", TaxpayerKind::Individual)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "digits": "123",
                "masked": "123",
                "kind": "individual",
                "valid": false
            })
        );
    }

    #[test]
    fn test_register_and_get() {
        let registry = ClientRegistry::new();
        let client = register_client(&registry, profile("111.444.777-35")).unwrap();

        assert_eq!(get_client(&registry, &client.id).unwrap(), client);
        assert_eq!(list_clients(&registry, "joão").unwrap().len(), 1);

        let err = register_client(&registry, profile("11144477735")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_register_invalid_document() {
        let registry = ClientRegistry::new();
        let err = register_client(&registry, profile("123.456.789-00")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.message,
            "CPF is invalid (check digit mismatch or wrong length)"
        );
    }

    #[test]
    fn test_get_client_errors() {
        let registry = ClientRegistry::new();
        assert_eq!(
            get_client(&registry, "nope").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            get_client(&registry, "550e8400-e29b-41d4-a716-446655440000")
                .unwrap_err()
                .code,
            ErrorCode::NotFound
        );
    }
}
