//! # Fiscal Completeness Rules
//!
//! Presence and shape checks that gate NF-e / NFC-e emission for products and
//! clients. The code tables are regulation-driven configuration; they live as
//! constants here so a change is a one-line diff.
//!
//! ## Product Eligibility
//! ```text
//! tax_needs_review? ──yes──► NeedsTaxReview
//! NCM has 8 digits? ──no───► InvalidNcm
//! origem present?   ──no───► MissingOrigem
//! tax code present? ──no───► MissingTaxCode
//! unit 1..=6 chars? ──no───► InvalidUnit
//! ST tax code?      ──yes──► CEST has 7 digits? ──no──► MissingCest
//! ```
//!
//! ## Cancellation Window
//! Only outbound, authorized documents can be cancelled: NFC-e (model 65)
//! within 30 minutes of issue, NF-e (model 55) within 24 hours. Both bounds
//! are inclusive.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::{self, strip_non_digits};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ClientProfile, IeIndicator, Product};
use crate::validation::validate_unit;

/// CSOSN codes offered for Simples Nacional companies.
pub const CSOSN_CODES: [&str; 10] = [
    "101", "102", "103", "201", "202", "203", "300", "400", "500", "900",
];

/// CSOSN and CST codes that imply tax substitution and therefore a CEST.
pub const SUBSTITUTION_TAX_CODES: [&str; 7] = ["201", "202", "203", "10", "30", "60", "70"];

/// Goods-origin codes, "0" (national) through "8".
pub const ORIGEM_CODES: [&str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];

pub const NCM_DIGITS: usize = 8;
pub const CEST_DIGITS: usize = 7;

/// A single reason a product or client cannot be used on a fiscal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FiscalIssue {
    NeedsTaxReview,
    InvalidNcm,
    MissingOrigem,
    MissingTaxCode,
    InvalidUnit,
    MissingCest,
    MissingName,
    InvalidDocument,
    IncompleteAddress,
    MissingIe,
    ForeignIeIndicator,
}

impl FiscalIssue {
    /// Message shown next to the offending field.
    pub const fn message(self) -> &'static str {
        match self {
            FiscalIssue::NeedsTaxReview => "taxation must be reviewed before emission",
            FiscalIssue::InvalidNcm => "NCM must have 8 digits",
            FiscalIssue::MissingOrigem => "origin code is required",
            FiscalIssue::MissingTaxCode => "CSOSN/CST is required",
            FiscalIssue::InvalidUnit => "sale unit is required and must have at most 6 characters",
            FiscalIssue::MissingCest => "CEST is required for tax-substitution items",
            FiscalIssue::MissingName => "name is required",
            FiscalIssue::InvalidDocument => "CPF/CNPJ check digits do not match",
            FiscalIssue::IncompleteAddress => "address is incomplete",
            FiscalIssue::MissingIe => "IE is required for ICMS contributors",
            FiscalIssue::ForeignIeIndicator => "foreign clients must use IE indicator 9",
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// =============================================================================
// Code Checks
// =============================================================================

pub fn is_ncm_valid(value: &str) -> bool {
    strip_non_digits(value).len() == NCM_DIGITS
}

pub fn is_cest_valid(value: &str) -> bool {
    strip_non_digits(value).len() == CEST_DIGITS
}

/// Whether `tax_code` is a substitution code that makes CEST mandatory.
pub fn requires_cest(tax_code: &str) -> bool {
    SUBSTITUTION_TAX_CODES.contains(&tax_code.trim())
}

pub fn is_known_csosn(tax_code: &str) -> bool {
    CSOSN_CODES.contains(&tax_code.trim())
}

pub fn is_known_origem(origem: &str) -> bool {
    ORIGEM_CODES.contains(&origem.trim())
}

// =============================================================================
// Products
// =============================================================================

/// Lists every reason `product` cannot go on a fiscal document.
pub fn product_fiscal_issues(product: &Product) -> Vec<FiscalIssue> {
    let mut issues = Vec::new();

    if product.tax_needs_review {
        issues.push(FiscalIssue::NeedsTaxReview);
    }
    if !product.ncm.as_deref().is_some_and(is_ncm_valid) {
        issues.push(FiscalIssue::InvalidNcm);
    }
    if is_blank(product.origem.as_deref()) {
        issues.push(FiscalIssue::MissingOrigem);
    }
    if is_blank(product.tax_code.as_deref()) {
        issues.push(FiscalIssue::MissingTaxCode);
    }
    if validate_unit(&product.unit).is_err() {
        issues.push(FiscalIssue::InvalidUnit);
    }
    let needs_cest = product.tax_code.as_deref().is_some_and(requires_cest);
    if needs_cest && !product.cest.as_deref().is_some_and(is_cest_valid) {
        issues.push(FiscalIssue::MissingCest);
    }

    issues
}

pub fn is_product_fiscal_eligible(product: &Product) -> bool {
    product_fiscal_issues(product).is_empty()
}

/// Save-time gate for the product form.
///
/// Stricter about ordering than [`product_fiscal_issues`]: it reports the
/// first blocking field only (NCM, then unit, then CEST), and it does not
/// look at the review flag, since saving is how a review gets cleared.
pub fn validate_product_for_save(product: &Product) -> Result<(), ValidationError> {
    if !product.ncm.as_deref().is_some_and(is_ncm_valid) {
        return Err(ValidationError::InvalidFormat {
            field: "ncm".to_string(),
            reason: format!("must have {} digits", NCM_DIGITS),
        });
    }

    validate_unit(&product.unit)?;

    let needs_cest = product.tax_code.as_deref().is_some_and(requires_cest);
    if needs_cest && !product.cest.as_deref().is_some_and(is_cest_valid) {
        return Err(ValidationError::Required {
            field: "cest".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Clients
// =============================================================================

/// Lists every reason `client` cannot be the recipient of an NF-e.
///
/// Clients abroad (UF `EX`) skip the document and address checks but must
/// carry IE indicator 9.
pub fn client_nfe_issues(client: &ClientProfile) -> Vec<FiscalIssue> {
    let mut issues = Vec::new();
    let foreign = client.address.is_foreign();

    if client.name.trim().is_empty() {
        issues.push(FiscalIssue::MissingName);
    }

    if foreign {
        if client.ie_indicator != IeIndicator::Foreign {
            issues.push(FiscalIssue::ForeignIeIndicator);
        }
        return issues;
    }

    if !document::validate(&client.document, client.kind) {
        issues.push(FiscalIssue::InvalidDocument);
    }

    let a = &client.address;
    let address_complete = [
        &a.cep, &a.street, &a.number, &a.district, &a.city, &a.uf, &a.city_code,
    ]
    .iter()
    .all(|field| !field.trim().is_empty());
    if !address_complete {
        issues.push(FiscalIssue::IncompleteAddress);
    }

    if client.ie_indicator == IeIndicator::Contributor && client.ie.trim().is_empty() {
        issues.push(FiscalIssue::MissingIe);
    }

    issues
}

pub fn is_client_nfe_eligible(client: &ClientProfile) -> bool {
    client_nfe_issues(client).is_empty()
}

// =============================================================================
// NCM Table
// =============================================================================

/// NCM codes known to the catalog, with their descriptions.
pub const NCM_TABLE: [(&str, &str); 3] = [
    ("21069090", "Preparações alimentícias"),
    ("22021000", "Águas, incluindo águas minerais e gaseificadas"),
    ("20041000", "Produtos hortícolas preparados ou conservados"),
];

/// Description of an NCM, masked or not.
pub fn ncm_description(ncm: &str) -> Option<&'static str> {
    let digits = strip_non_digits(ncm);
    NCM_TABLE
        .iter()
        .find(|(code, _)| *code == digits)
        .map(|(_, description)| *description)
}

/// Whether a complete NCM is missing from [`NCM_TABLE`].
///
/// Partial input is never flagged; it is reported as [`FiscalIssue::InvalidNcm`]
/// instead.
pub fn ncm_needs_review(ncm: &str) -> bool {
    is_ncm_valid(ncm) && ncm_description(ncm).is_none()
}

// =============================================================================
// Fiscal Documents
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FiscalOperation {
    /// Issued by the store (saída).
    #[serde(rename = "saida")]
    Outbound,
    /// Received from a supplier (entrada).
    #[serde(rename = "entrada")]
    Inbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FiscalModel {
    #[serde(rename = "55")]
    Nfe,
    #[serde(rename = "65")]
    Nfce,
}

impl FiscalModel {
    /// How long after issue a document of this model can still be cancelled.
    pub fn cancellation_window(self) -> Duration {
        match self {
            FiscalModel::Nfce => Duration::minutes(30),
            FiscalModel::Nfe => Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentStatus {
    Authorized,
    Cancelled,
    Pending,
    Contingency,
}

/// An issued or received NF-e / NFC-e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FiscalDocument {
    pub id: String,
    #[ts(type = "string")]
    pub issued_at: DateTime<Utc>,
    pub operation: FiscalOperation,
    pub model: FiscalModel,
    pub number: String,
    pub series: String,
    pub party: String,
    pub value: Money,
    pub status: DocumentStatus,
}

/// Why a document cannot be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CancelRefusal {
    #[error("Inbound documents cannot be cancelled from this panel")]
    Inbound,

    #[error("Only authorized documents can be cancelled")]
    NotAuthorized,

    #[error(
        "The legal cancellation deadline has passed; a return NF-e is needed to take the goods back"
    )]
    DeadlineExpired,
}

/// Checks whether `doc` can be cancelled at `now`.
///
/// Refusals are reported in order: operation, then status, then deadline.
///
/// ```rust
/// use balcao_core::fiscal::{can_cancel, CancelRefusal, DocumentStatus, FiscalDocument, FiscalModel, FiscalOperation};
/// use balcao_core::Money;
/// use chrono::{Duration, Utc};
///
/// let issued_at = Utc::now();
/// let doc = FiscalDocument {
///     id: "d1".to_string(),
///     issued_at,
///     operation: FiscalOperation::Outbound,
///     model: FiscalModel::Nfce,
///     number: "00001023".to_string(),
///     series: "1".to_string(),
///     party: "Consumidor Final".to_string(),
///     value: Money::from_cents(15000),
///     status: DocumentStatus::Authorized,
/// };
///
/// assert!(can_cancel(&doc, issued_at + Duration::minutes(10)).is_ok());
/// assert_eq!(
///     can_cancel(&doc, issued_at + Duration::minutes(31)),
///     Err(CancelRefusal::DeadlineExpired)
/// );
/// ```
pub fn can_cancel(doc: &FiscalDocument, now: DateTime<Utc>) -> Result<(), CancelRefusal> {
    if doc.operation != FiscalOperation::Outbound {
        return Err(CancelRefusal::Inbound);
    }
    if doc.status != DocumentStatus::Authorized {
        return Err(CancelRefusal::NotAuthorized);
    }
    if now.signed_duration_since(doc.issued_at) > doc.model.cancellation_window() {
        return Err(CancelRefusal::DeadlineExpired);
    }
    Ok(())
}
