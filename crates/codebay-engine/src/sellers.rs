//! Seller onboarding state machine.
//!
//! NONE → CREATED → DETAILS_SUBMITTED → CHARGES_ENABLED (+ PAYOUTS_ENABLED).
//! The capability flags advance only through `refresh_status`; the engine
//! never assumes enablement just because onboarding was started. Polling
//! cadence belongs to the caller; `refresh_status` is one request/response.

use chrono::Utc;
use codebay_types::UserId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineError;
use crate::events::{self, MarketEventData};
use crate::types::SellerAccount;
use crate::Engine;

/// Where to send the seller to continue external onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingLink {
    pub onboarding_url: String,
    pub account: SellerAccount,
}

impl Engine {
    /// Create the seller's payment account, or resume an incomplete one with
    /// a fresh onboarding link. Repeatable at any onboarding stage.
    pub async fn start_onboarding(&self, seller: &UserId) -> Result<OnboardingLink, EngineError> {
        let existing = self.store.get_seller_account(seller).await?;
        let connect = self.processor.create_connect_account(seller).await?;

        let account = match existing {
            // Resume: keep the known flags; the processor keeps the same
            // underlying account and only mints a new link.
            Some(mut account) => {
                account.has_account = true;
                account.updated_at = Utc::now();
                account
            }
            None => {
                let account = SellerAccount {
                    seller: *seller,
                    account_id: connect.account_id.clone(),
                    has_account: true,
                    details_submitted: false,
                    charges_enabled: false,
                    payouts_enabled: false,
                    updated_at: Utc::now(),
                };
                events::emit(MarketEventData::SellerOnboardingStarted {
                    seller: *seller,
                    account_id: connect.account_id.to_string(),
                });
                account
            }
        };

        self.store.upsert_seller_account(account.clone()).await?;
        info!(seller = %seller, account = %account.account_id, "Onboarding link issued");

        Ok(OnboardingLink {
            onboarding_url: connect.onboarding_url,
            account,
        })
    }

    /// Pull the current capability flags from the processor and persist them.
    ///
    /// The only writer of `details_submitted` / `charges_enabled` /
    /// `payouts_enabled`. Repeated or out-of-order refreshes are idempotent:
    /// an unchanged status writes nothing and emits nothing.
    pub async fn refresh_status(&self, seller: &UserId) -> Result<SellerAccount, EngineError> {
        let mut account = self
            .store
            .get_seller_account(seller)
            .await?
            .ok_or_else(|| EngineError::seller_account_not_found(seller))?;

        let status = self
            .processor
            .get_connect_account_status(&account.account_id)
            .await?;

        let changed = account.details_submitted != status.details_submitted
            || account.charges_enabled != status.charges_enabled
            || account.payouts_enabled != status.payouts_enabled;
        if !changed {
            return Ok(account);
        }

        account.details_submitted = status.details_submitted;
        account.charges_enabled = status.charges_enabled;
        account.payouts_enabled = status.payouts_enabled;
        account.updated_at = Utc::now();

        self.store.upsert_seller_account(account.clone()).await?;
        events::emit(MarketEventData::SellerStatusChanged {
            seller: *seller,
            details_submitted: account.details_submitted,
            charges_enabled: account.charges_enabled,
            payouts_enabled: account.payouts_enabled,
        });

        Ok(account)
    }
}
