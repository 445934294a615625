//! # Product Commands
//!
//! Fiscal checks for the product form.

use balcao_core::fiscal::{
    ncm_description, ncm_needs_review, product_fiscal_issues, validate_product_for_save,
};
use balcao_core::mask::{format_cest, format_ncm};
use balcao_core::validation::validate_product_name;
use balcao_core::{FiscalIssue, Product};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;

/// One blocking fiscal problem, as shown next to the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalIssueDto {
    pub issue: FiscalIssue,
    pub message: String,
}

impl From<FiscalIssue> for FiscalIssueDto {
    fn from(issue: FiscalIssue) -> Self {
        FiscalIssueDto {
            issue,
            message: issue.message().to_string(),
        }
    }
}

/// Fiscal readiness of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalReport {
    pub product_id: String,
    pub eligible: bool,
    pub issues: Vec<FiscalIssueDto>,
}

/// NCM field state after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NcmLookup {
    pub masked: String,
    pub description: Option<String>,
    /// A complete code that is not in the NCM table; the form asks the user
    /// to double-check it.
    pub needs_review: bool,
}

/// Masks the NCM field and looks the code up in the NCM table.
pub fn lookup_ncm(value: &str) -> NcmLookup {
    let masked = format_ncm(value);
    let needs_review = ncm_needs_review(&masked);
    debug!(ncm = %masked, needs_review, "lookup_ncm command");

    NcmLookup {
        description: ncm_description(&masked).map(str::to_string),
        masked,
        needs_review,
    }
}

/// Lists what keeps `product` off an NF-e/NFC-e.
pub fn check_product_fiscal(product: &Product) -> FiscalReport {
    let issues: Vec<FiscalIssueDto> = product_fiscal_issues(product)
        .into_iter()
        .map(FiscalIssueDto::from)
        .collect();
    debug!(product_id = %product.id, issues = issues.len(), "check_product_fiscal command");

    FiscalReport {
        product_id: product.id.clone(),
        eligible: issues.is_empty(),
        issues,
    }
}

/// Validates the product form and returns the record to store.
///
/// NCM and CEST are stored masked, the unit upper-cased, and a pending tax
/// review is cleared since a person just confirmed the classification. An NCM
/// missing from the NCM table is saved with `ncm_needs_review` set.
pub fn save_product_fiscal(mut product: Product) -> Result<Product, ApiError> {
    debug!(product_id = %product.id, "save_product_fiscal command");

    validate_product_name(&product.name)?;
    validate_product_for_save(&product)?;

    product.name = product.name.trim().to_string();
    product.unit = product.unit.trim().to_uppercase();
    product.ncm = product.ncm.as_deref().map(format_ncm);
    product.cest = product
        .cest
        .as_deref()
        .map(format_cest)
        .filter(|c| !c.is_empty());
    product.ncm_needs_review = product.ncm.as_deref().is_some_and(ncm_needs_review);
    product.tax_needs_review = false;

    info!(
        product_id = %product.id,
        ncm = ?product.ncm,
        ncm_needs_review = product.ncm_needs_review,
        "Product fiscal data saved"
    );
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn product() -> Product {
        Product {
            id: "p-7".to_string(),
            name: " Sorvete Pote 2L ".to_string(),
            category: "Sorvetes".to_string(),
            price_cents: 3290,
            unit: "un".to_string(),
            ncm: Some("21050010".to_string()),
            cest: Some("2300100".to_string()),
            origem: Some("0".to_string()),
            tax_code: Some("500".to_string()),
            tax_needs_review: true,
            ncm_needs_review: false,
            is_active: true,
        }
    }

    #[test]
    fn test_check_reports_review_flag() {
        let report = check_product_fiscal(&product());
        assert!(!report.eligible);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].issue, FiscalIssue::NeedsTaxReview);
        assert_eq!(report.issues[0].message, FiscalIssue::NeedsTaxReview.message());
    }

    #[test]
    fn test_save_normalizes_and_clears_review() {
        let saved = save_product_fiscal(product()).unwrap();
        assert_eq!(saved.name, "Sorvete Pote 2L");
        assert_eq!(saved.unit, "UN");
        assert_eq!(saved.ncm.as_deref(), Some("2105.00.10"));
        assert_eq!(saved.cest.as_deref(), Some("23.001.00"));
        assert!(!saved.tax_needs_review);
        assert!(saved.ncm_needs_review);
        assert!(check_product_fiscal(&saved).eligible);
    }

    #[test]
    fn test_save_known_ncm_clears_ncm_review() {
        let mut p = product();
        p.ncm = Some("22021000".to_string());
        p.ncm_needs_review = true;
        assert!(!save_product_fiscal(p).unwrap().ncm_needs_review);
    }

    #[test]
    fn test_lookup_ncm() {
        let found = lookup_ncm("21069090");
        assert_eq!(found.masked, "2106.90.90");
        assert_eq!(found.description.as_deref(), Some("Preparações alimentícias"));
        assert!(!found.needs_review);

        let unknown = lookup_ncm("2105.00.10");
        assert_eq!(unknown.description, None);
        assert!(unknown.needs_review);

        let partial = lookup_ncm("2105");
        assert_eq!(partial.masked, "2105");
        assert!(!partial.needs_review);
    }

    #[test]
    fn test_save_rejects_short_ncm() {
        let mut p = product();
        p.ncm = Some("2105".to_string());
        let err = save_product_fiscal(p).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_save_requires_cest_for_st_code() {
        let mut p = product();
        p.tax_code = Some("60".to_string());
        p.cest = None;
        assert!(save_product_fiscal(p).is_err());
    }
}
