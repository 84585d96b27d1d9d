//! License validation.
//!
//! `validate_license` is the publish-time gate; `validate_draft` only rejects
//! structurally impossible input so drafts may stay incomplete.

use rust_decimal::Decimal;

use crate::errors::EngineError;
use crate::types::{License, LicenseKind, SellerAccount};

/// Full validation, applied when a project publishes or re-prices while
/// published. Returns a specific error kind so the caller can render a
/// precise message.
pub fn validate_license(
    license: &License,
    seller_account: Option<&SellerAccount>,
) -> Result<(), EngineError> {
    validate_draft(license)?;

    match license.kind {
        LicenseKind::Free => {
            if license.seller_price != Decimal::ZERO {
                return Err(EngineError::InvalidPrice(
                    "Free license must have a zero price".into(),
                ));
            }
        }
        LicenseKind::Paid => {
            require_positive_price(license)?;
            require_payable(seller_account)?;
        }
        LicenseKind::Freemium => {
            if license.free_features.is_empty() || license.paid_features.is_empty() {
                return Err(EngineError::LicenseIncomplete(
                    "Freemium license requires both a free and a paid feature list".into(),
                ));
            }
            require_positive_price(license)?;
            require_payable(seller_account)?;
        }
    }
    Ok(())
}

/// Draft-time validation: a draft may be incomplete but never invalid.
pub fn validate_draft(license: &License) -> Result<(), EngineError> {
    if license.seller_price.is_sign_negative() {
        return Err(EngineError::InvalidPrice(format!(
            "Seller price cannot be negative: {}",
            license.seller_price
        )));
    }
    if license.seller_price.round_dp(2) != license.seller_price {
        return Err(EngineError::InvalidPrice(format!(
            "Seller price has sub-cent precision: {}",
            license.seller_price
        )));
    }
    Ok(())
}

fn require_positive_price(license: &License) -> Result<(), EngineError> {
    if license.seller_price <= Decimal::ZERO {
        return Err(EngineError::LicenseIncomplete(
            "Paid license requires a positive price to publish".into(),
        ));
    }
    Ok(())
}

fn require_payable(seller_account: Option<&SellerAccount>) -> Result<(), EngineError> {
    match seller_account {
        Some(account) if account.charges_enabled => Ok(()),
        _ => Err(EngineError::charges_disabled()),
    }
}
