//! Payment settlement orchestration.
//!
//! Per-checkout state machine: INIT → INTENT_CREATED → (CONFIRMED | FAILED |
//! ABANDONED); a confirmed intent records exactly one purchase. Abandoned
//! intents expire on the processor side and need no compensating action;
//! access is granted strictly on confirmed success, never optimistically.

use chrono::Utc;
use codebay_types::{to_minor_units, Currency, IntentId, ProjectId, PurchaseId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::EngineError;
use crate::events::{self, MarketEventData};
use crate::external::{IntentMetadata, IntentOutcome};
use crate::fees::compute_breakdown;
use crate::types::{IntentRecord, IntentStatus, LicenseKind, ProjectStatus, Purchase};
use crate::Engine;

/// What the buyer's client needs to drive the payment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutIntent {
    pub intent_id: IntentId,
    pub client_secret: String,
    /// Billed amount locked at intent creation.
    pub amount: Decimal,
    pub currency: Currency,
}

impl From<IntentRecord> for CheckoutIntent {
    fn from(record: IntentRecord) -> Self {
        Self {
            intent_id: record.intent_id,
            client_secret: record.client_secret,
            amount: record.amount,
            currency: record.currency,
        }
    }
}

impl Engine {
    /// Begin checkout: create a processor intent with the amount locked from
    /// the project's *current* license.
    ///
    /// A still-pending intent for the same (buyer, project) pair is returned
    /// as-is instead of minting a second processor intent.
    pub async fn create_intent(
        &self,
        buyer: &UserId,
        project_id: &ProjectId,
    ) -> Result<CheckoutIntent, EngineError> {
        let project = self.load_project(project_id).await?;

        if project.status != ProjectStatus::Published {
            return Err(EngineError::InvalidState(
                "Project is not published".into(),
            ));
        }
        if project.license.kind == LicenseKind::Free {
            return Err(EngineError::InvalidState(
                "Free projects are not purchasable".into(),
            ));
        }
        if *buyer == project.author {
            return Err(EngineError::InvalidState(
                "Authors cannot purchase their own project".into(),
            ));
        }
        if self.store.active_purchase(buyer, project_id).await?.is_some() {
            return Err(EngineError::already_purchased(project_id));
        }

        if let Some(pending) = self.store.pending_intent_for(buyer, project_id).await? {
            info!(intent = %pending.intent_id, project = %project_id, "Reusing pending intent");
            return Ok(pending.into());
        }

        let breakdown = compute_breakdown(project.license.seller_price, self.fees.fee_pct)?;
        let amount_minor = to_minor_units(breakdown.customer_total)
            .map_err(|e| EngineError::InvalidPrice(e.to_string()))?;

        let created = self
            .processor
            .create_payment_intent(
                amount_minor,
                project.license.currency,
                IntentMetadata {
                    project: *project_id,
                    buyer: *buyer,
                },
            )
            .await?;

        let record = IntentRecord {
            intent_id: created.intent_id.clone(),
            client_secret: created.client_secret,
            project: *project_id,
            buyer: *buyer,
            amount: breakdown.customer_total,
            currency: project.license.currency,
            status: IntentStatus::Pending,
            created_at: Utc::now(),
        };
        self.store.insert_intent(record.clone()).await?;

        events::emit(MarketEventData::IntentCreated {
            intent: created.intent_id,
            project: *project_id,
            buyer: *buyer,
            amount: events::price_str(record.amount),
        });

        Ok(record.into())
    }

    /// Settle a checkout: verify the processor outcome and record the
    /// purchase.
    ///
    /// Idempotent: confirming an already-settled intent returns the existing
    /// purchase and creates nothing. Two confirms racing for the same intent
    /// serialize on the store's active-purchase uniqueness constraint.
    pub async fn confirm_purchase(&self, intent_id: &IntentId) -> Result<Purchase, EngineError> {
        let record = self
            .store
            .get_intent(intent_id)
            .await?
            .ok_or_else(|| EngineError::intent_not_found(intent_id))?;

        match record.status {
            IntentStatus::Succeeded => {
                // Client retry of a settled intent: no-op success.
                return self
                    .store
                    .purchase_by_intent(intent_id)
                    .await?
                    .ok_or_else(|| {
                        EngineError::Storage(format!(
                            "Settled intent has no purchase record: {}",
                            intent_id
                        ))
                    });
            }
            IntentStatus::Failed => {
                return Err(EngineError::PaymentDeclined(
                    "Intent previously failed; start a new checkout".into(),
                ));
            }
            IntentStatus::Pending => {}
        }

        match self.processor.confirm_payment(intent_id).await? {
            IntentOutcome::Succeeded => {}
            IntentOutcome::Pending => {
                return Err(EngineError::InvalidState(
                    "Payment has not completed yet".into(),
                ));
            }
            IntentOutcome::Failed(reason) => {
                self.store
                    .set_intent_status(intent_id, IntentStatus::Failed)
                    .await?;
                events::emit(MarketEventData::PurchaseFailed {
                    intent: intent_id.clone(),
                    project: record.project,
                    buyer: record.buyer,
                    reason: reason.clone(),
                });
                return Err(EngineError::PaymentDeclined(reason));
            }
        }

        let purchase = Purchase {
            id: PurchaseId::new(),
            project: record.project,
            buyer: record.buyer,
            price_paid: record.amount,
            currency: record.currency,
            intent_id: intent_id.clone(),
            purchased_at: Utc::now(),
            is_active: true,
        };

        match self.store.record_purchase(purchase).await {
            Ok(recorded) => {
                self.store
                    .set_intent_status(intent_id, IntentStatus::Succeeded)
                    .await?;
                events::emit(MarketEventData::PurchaseRecorded {
                    purchase: recorded.id,
                    intent: intent_id.clone(),
                    project: recorded.project,
                    buyer: recorded.buyer,
                    price_paid: events::price_str(recorded.price_paid),
                });
                Ok(recorded)
            }
            Err(EngineError::DuplicatePurchase(msg)) => {
                // Lost a race. If the surviving purchase settled this same
                // intent, fold into the success path; otherwise the pair was
                // settled by another intent and this one must not grant.
                let existing = self
                    .store
                    .active_purchase(&record.buyer, &record.project)
                    .await?;
                match existing {
                    Some(p) if p.intent_id == *intent_id => {
                        self.store
                            .set_intent_status(intent_id, IntentStatus::Succeeded)
                            .await?;
                        Ok(p)
                    }
                    _ => {
                        warn!(
                            intent = %intent_id,
                            project = %record.project,
                            "Confirmed intent lost uniqueness race; purchase not recorded"
                        );
                        self.store
                            .set_intent_status(intent_id, IntentStatus::Failed)
                            .await?;
                        Err(EngineError::DuplicatePurchase(msg))
                    }
                }
            }
            Err(e) => Err(e),
        }
    }
}
