// JSON domain events for downstream consumers (audit trail, notifications).
// Emitted through tracing under a stable target so collectors can filter on
// it without parsing ordinary log lines.

use chrono::Utc;
use codebay_types::{IntentId, ProjectId, PurchaseId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// --- Constants ---

const EVENT_STANDARD: &str = "codebay";
const EVENT_VERSION: &str = "1.0.0";
const EVENT_PREFIX: &str = "EVENT:";
const EVENT_TARGET: &str = "codebay::events";

// --- Event Data Structures ---

/// Marketplace event data variants for different operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEventData {
    ProjectCreated {
        project: ProjectId,
        author: UserId,
    },
    ProjectPublished {
        project: ProjectId,
        author: UserId,
        license_kind: String,
        seller_price: String,
    },
    ProjectRepriced {
        project: ProjectId,
        author: UserId,
        old_price: String,
        new_price: String,
    },
    ProjectArchived {
        project: ProjectId,
        author: UserId,
    },
    ProjectDeleted {
        project: ProjectId,
    },
    IntentCreated {
        intent: IntentId,
        project: ProjectId,
        buyer: UserId,
        amount: String,
    },
    PurchaseRecorded {
        purchase: PurchaseId,
        intent: IntentId,
        project: ProjectId,
        buyer: UserId,
        price_paid: String,
    },
    PurchaseFailed {
        intent: IntentId,
        project: ProjectId,
        buyer: UserId,
        reason: String,
    },
    SellerOnboardingStarted {
        seller: UserId,
        account_id: String,
    },
    SellerStatusChanged {
        seller: UserId,
        details_submitted: bool,
        charges_enabled: bool,
        payouts_enabled: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    pub evt_standard: String,
    pub version: String,
    pub timestamp: i64,
    #[serde(flatten)]
    pub data: MarketEventData,
}

/// Serialize and log one event. Never fails the caller: an event that cannot
/// serialize is itself logged as an error.
pub(crate) fn emit(data: MarketEventData) {
    let event = MarketEvent {
        evt_standard: EVENT_STANDARD.to_string(),
        version: EVENT_VERSION.to_string(),
        timestamp: Utc::now().timestamp(),
        data,
    };
    match serde_json::to_string(&event) {
        Ok(json) => tracing::info!(target: EVENT_TARGET, "{EVENT_PREFIX}{json}"),
        Err(e) => tracing::error!(target: EVENT_TARGET, error = %e, "Event serialization failed"),
    }
}

pub(crate) fn price_str(amount: Decimal) -> String {
    amount.to_string()
}
