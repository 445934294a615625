//! # Fiscal Document Commands
//!
//! Cancellation of issued NF-e / NFC-e documents.
//!
//! ```text
//! Cancel button ──► check_cancellation(doc) ──► { allowed, reason }   (button state)
//!                   cancel_document(doc)    ──► doc.status = Cancelled
//! ```

use balcao_core::fiscal::DocumentStatus;
use balcao_core::{can_cancel, CancelRefusal, FiscalDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ErrorCode};

/// Whether the cancel action is available for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelCheck {
    pub allowed: bool,
    pub refusal: Option<CancelRefusal>,
    /// Text shown to the user; empty when cancelling is allowed.
    pub reason: String,
}

/// Reports whether `doc` can be cancelled right now.
pub fn check_cancellation(doc: &FiscalDocument) -> CancelCheck {
    check_cancellation_at(doc, Utc::now())
}

pub fn check_cancellation_at(doc: &FiscalDocument, now: DateTime<Utc>) -> CancelCheck {
    let result = can_cancel(doc, now);
    debug!(document_id = %doc.id, allowed = result.is_ok(), "check_cancellation command");

    match result {
        Ok(()) => CancelCheck {
            allowed: true,
            refusal: None,
            reason: String::new(),
        },
        Err(refusal) => CancelCheck {
            allowed: false,
            refusal: Some(refusal),
            reason: refusal.to_string(),
        },
    }
}

/// Cancels `doc` and returns it with the new status.
pub fn cancel_document(doc: FiscalDocument) -> Result<FiscalDocument, ApiError> {
    cancel_document_at(doc, Utc::now())
}

pub fn cancel_document_at(
    mut doc: FiscalDocument,
    now: DateTime<Utc>,
) -> Result<FiscalDocument, ApiError> {
    debug!(document_id = %doc.id, "cancel_document command");

    if let Err(refusal) = can_cancel(&doc, now) {
        warn!(document_id = %doc.id, ?refusal, "Cancellation refused");
        return Err(ApiError::new(ErrorCode::BusinessLogic, refusal.to_string()));
    }

    doc.status = DocumentStatus::Cancelled;
    info!(document_id = %doc.id, number = %doc.number, "Fiscal document cancelled");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::fiscal::{FiscalModel, FiscalOperation};
    use balcao_core::Money;
    use chrono::{Duration, TimeZone};

    fn nfce() -> FiscalDocument {
        FiscalDocument {
            id: "d1".to_string(),
            issued_at: Utc.with_ymd_and_hms(2026, 1, 27, 14, 30, 0).unwrap(),
            operation: FiscalOperation::Outbound,
            model: FiscalModel::Nfce,
            number: "00001023".to_string(),
            series: "1".to_string(),
            party: "Consumidor Final".to_string(),
            value: Money::from_cents(15000),
            status: DocumentStatus::Authorized,
        }
    }

    #[test]
    fn test_check_within_window() {
        let doc = nfce();
        let check = check_cancellation_at(&doc, doc.issued_at + Duration::minutes(30));
        assert!(check.allowed);
        assert_eq!(check.reason, "");
    }

    #[test]
    fn test_check_after_window() {
        let doc = nfce();
        let check = check_cancellation_at(&doc, doc.issued_at + Duration::minutes(45));
        assert!(!check.allowed);
        assert_eq!(check.refusal, Some(CancelRefusal::DeadlineExpired));
        assert!(check.reason.contains("deadline"));
    }

    #[test]
    fn test_cancel_document() {
        let doc = nfce();
        let now = doc.issued_at + Duration::minutes(5);

        let cancelled = cancel_document_at(doc, now).unwrap();
        assert_eq!(cancelled.status, DocumentStatus::Cancelled);

        // A cancelled document cannot be cancelled again
        let err = cancel_document_at(cancelled, now).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, CancelRefusal::NotAuthorized.to_string());
    }
}
