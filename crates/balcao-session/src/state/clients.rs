//! # Client Registry
//!
//! In-memory list of registered clients.
//!
//! ## Registration Order
//! ```text
//! ClientProfile
//!    │
//!    ├── name required, ≤ 120 chars
//!    ├── CPF/CNPJ check digits        (skipped for clients abroad)
//!    ├── document not already registered (when it has digits)
//!    ├── IE required for a contributing organization (skipped abroad)
//!    └── credit limit not negative
//!    │
//!    ▼
//! Client { id, masked document, nfe_eligible, ... }
//! ```

use std::sync::{PoisonError, RwLock};

use balcao_core::document::strip_non_digits;
use balcao_core::fiscal::is_client_nfe_eligible;
use balcao_core::validation::{validate_client_name, validate_search_query};
use balcao_core::{
    Address, ClientProfile, CoreError, CoreResult, IeIndicator, Money, TaxpayerId, TaxpayerKind,
    ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub kind: TaxpayerKind,
    pub name: String,
    /// Masked CPF/CNPJ as shown on screen. Clients abroad keep their foreign
    /// tax id as typed, possibly empty.
    pub document: String,
    pub document_digits: String,
    pub phone: String,
    pub credit_limit: Money,
    pub ie_indicator: IeIndicator,
    pub ie: String,
    pub address: Address,
    /// Whether the client can be the recipient of an NF-e as registered.
    pub nfe_eligible: bool,
    pub created_at: DateTime<Utc>,
}

/// Registered clients, shared between commands.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<Vec<Client>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a client.
    ///
    /// The first failing check is returned, in form order. On success the
    /// stored record is normalized: clients abroad get indicator 9, the IE
    /// is dropped unless the client is a contributor, and the UF is upper-cased.
    pub fn register(&self, profile: ClientProfile) -> CoreResult<Client> {
        validate_client_name(&profile.name)?;

        let foreign = profile.address.is_foreign();
        let (document, document_digits) = if foreign {
            // Foreign tax ids follow no local checksum; kept as typed
            (
                profile.document.trim().to_string(),
                strip_non_digits(&profile.document),
            )
        } else {
            let id = TaxpayerId::parse_as(&profile.document, profile.kind)?;
            (id.masked(), id.digits().to_string())
        };

        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);

        if !document_digits.is_empty()
            && clients.iter().any(|c| c.document_digits == document_digits)
        {
            return Err(CoreError::DuplicateDocument(document));
        }

        if !foreign
            && profile.kind == TaxpayerKind::Organization
            && profile.ie_indicator == IeIndicator::Contributor
            && profile.ie.trim().is_empty()
        {
            return Err(ValidationError::Required {
                field: "ie".to_string(),
            }
            .into());
        }

        let credit_limit = profile.credit_limit.unwrap_or_default();
        if credit_limit.is_negative() {
            return Err(ValidationError::InvalidFormat {
                field: "credit_limit".to_string(),
                reason: "must not be negative".to_string(),
            }
            .into());
        }

        let profile = normalize(profile, foreign);
        let client = Client {
            id: uuid::Uuid::new_v4().to_string(),
            kind: profile.kind,
            name: profile.name.trim().to_string(),
            document,
            document_digits,
            phone: profile.phone.trim().to_string(),
            credit_limit,
            ie_indicator: profile.ie_indicator,
            nfe_eligible: is_client_nfe_eligible(&profile),
            ie: profile.ie,
            address: profile.address,
            created_at: Utc::now(),
        };

        clients.push(client.clone());
        Ok(client)
    }

    /// Lists clients whose name or document matches `query`.
    ///
    /// Name matching is case-insensitive; a query with digits also matches
    /// documents regardless of mask. An empty query returns everyone.
    pub fn list(&self, query: &str) -> CoreResult<Vec<Client>> {
        let query = validate_search_query(query)?;
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);

        if query.is_empty() {
            return Ok(clients.clone());
        }

        let needle = query.to_lowercase();
        let digits = strip_non_digits(&query);
        Ok(clients
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || (!digits.is_empty() && c.document_digits.contains(&digits))
            })
            .cloned()
            .collect())
    }

    pub fn get(&self, id: &str) -> Option<Client> {
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
        clients.iter().find(|c| c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize(mut profile: ClientProfile, foreign: bool) -> ClientProfile {
    if foreign {
        profile.ie_indicator = IeIndicator::Foreign;
        profile.address.uf = Address::FOREIGN_UF.to_string();
    } else {
        profile.address.uf = profile.address.uf.trim().to_uppercase();
    }
    if profile.ie_indicator == IeIndicator::Contributor {
        profile.ie = profile.ie.trim().to_string();
    } else {
        profile.ie.clear();
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            cep: "01310-100".to_string(),
            street: "Av. Paulista".to_string(),
            number: "1000".to_string(),
            district: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            uf: "sp".to_string(),
            complement: String::new(),
            city_code: "3550308".to_string(),
        }
    }

    fn profile(kind: TaxpayerKind, document: &str) -> ClientProfile {
        ClientProfile {
            kind,
            name: "Maria Silva".to_string(),
            document: document.to_string(),
            phone: "(11) 98765-4321".to_string(),
            credit_limit: None,
            ie_indicator: IeIndicator::NonContributor,
            ie: String::new(),
            address: address(),
        }
    }

    #[test]
    fn test_register_individual() {
        let registry = ClientRegistry::new();
        let client = registry
            .register(profile(TaxpayerKind::Individual, "52998224725"))
            .unwrap();

        assert_eq!(client.document, "529.982.247-25");
        assert_eq!(client.document_digits, "52998224725");
        assert_eq!(client.address.uf, "SP");
        assert_eq!(client.credit_limit, Money::zero());
        assert!(client.nfe_eligible);
        assert!(validate_uuid_like(&client.id));
        assert_eq!(registry.get(&client.id), Some(client));
    }

    fn validate_uuid_like(id: &str) -> bool {
        balcao_core::validation::validate_uuid(id).is_ok()
    }

    #[test]
    fn test_register_rejects_in_form_order() {
        let registry = ClientRegistry::new();

        let mut p = profile(TaxpayerKind::Individual, "12345678900");
        p.name = "  ".to_string();
        assert!(matches!(
            registry.register(p),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        assert_eq!(
            registry.register(profile(TaxpayerKind::Individual, "12345678900")),
            Err(CoreError::Validation(ValidationError::InvalidDocument {
                kind: "CPF"
            }))
        );

        // Right digits, wrong kind
        assert!(registry
            .register(profile(TaxpayerKind::Organization, "52998224725"))
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_duplicate_document() {
        let registry = ClientRegistry::new();
        registry
            .register(profile(TaxpayerKind::Individual, "529.982.247-25"))
            .unwrap();

        assert_eq!(
            registry.register(profile(TaxpayerKind::Individual, "52998224725")),
            Err(CoreError::DuplicateDocument("529.982.247-25".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_contributor_organization_needs_ie() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Organization, "11.222.333/0001-81");
        p.ie_indicator = IeIndicator::Contributor;

        assert!(matches!(
            registry.register(p.clone()),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        p.ie = " 110.042.490.114 ".to_string();
        let client = registry.register(p).unwrap();
        assert_eq!(client.ie, "110.042.490.114");
        assert!(client.nfe_eligible);
    }

    #[test]
    fn test_ie_dropped_for_non_contributor() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Individual, "11144477735");
        p.ie = "123".to_string();
        assert_eq!(registry.register(p).unwrap().ie, "");
    }

    #[test]
    fn test_negative_credit_limit() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Individual, "11144477735");
        p.credit_limit = Some(Money::from_cents(-1));
        assert!(registry.register(p).is_err());
    }

    #[test]
    fn test_foreign_client() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Individual, "");
        p.address = Address {
            uf: "ex".to_string(),
            city: "Buenos Aires".to_string(),
            ..Address::default()
        };

        let client = registry.register(p).unwrap();
        assert_eq!(client.ie_indicator, IeIndicator::Foreign);
        assert_eq!(client.address.uf, "EX");
        assert_eq!(client.document, "");
        assert!(client.nfe_eligible);

        // Several foreign clients without a document can coexist
        let mut p = profile(TaxpayerKind::Individual, "");
        p.address.uf = "EX".to_string();
        assert!(registry.register(p).is_ok());
    }

    #[test]
    fn test_foreign_organization_with_foreign_tax_id() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Organization, " 30-71234567-1 ");
        p.ie_indicator = IeIndicator::Contributor;
        p.address.uf = "EX".to_string();

        let client = registry.register(p.clone()).unwrap();
        assert_eq!(client.document, "30-71234567-1");
        assert_eq!(client.document_digits, "30712345671");
        assert_eq!(client.ie_indicator, IeIndicator::Foreign);
        assert_eq!(client.ie, "");
        assert!(client.nfe_eligible);

        // Same foreign id twice is still a duplicate
        assert_eq!(
            registry.register(p),
            Err(CoreError::DuplicateDocument("30-71234567-1".to_string()))
        );
    }

    #[test]
    fn test_incomplete_address_registers_but_not_eligible() {
        let registry = ClientRegistry::new();
        let mut p = profile(TaxpayerKind::Individual, "52998224725");
        p.address.city_code.clear();

        let client = registry.register(p).unwrap();
        assert!(!client.nfe_eligible);
    }

    #[test]
    fn test_list_filters_by_name_and_document() {
        let registry = ClientRegistry::new();
        registry
            .register(profile(TaxpayerKind::Individual, "52998224725"))
            .unwrap();
        let mut p = profile(TaxpayerKind::Organization, "11222333000181");
        p.name = "Padaria Pão Quente LTDA".to_string();
        registry.register(p).unwrap();

        assert_eq!(registry.list("").unwrap().len(), 2);
        assert_eq!(registry.list("maria").unwrap().len(), 1);
        assert_eq!(registry.list("11.222.333").unwrap()[0].kind, TaxpayerKind::Organization);
        assert!(registry.list("Zé").unwrap().is_empty());
        assert!(registry.list(&"x".repeat(101)).is_err());
    }
}
