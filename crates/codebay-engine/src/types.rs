//! Domain entities persisted behind the store port.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use codebay_types::{ConnectAccountId, Currency, IntentId, ProjectId, PurchaseId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Monetization model of a listing. Immutable pricing rules hang off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseKind {
    #[default]
    Free,
    Paid,
    Freemium,
}

/// Lifecycle of a local intent correlation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    Pending,
    Succeeded,
    Failed,
}

// --- Structs ---

/// Gated repository reference. Opaque strings; ownership is verified through
/// the repository-host port, never parsed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryRef {
    #[serde(default)]
    pub free_url: Option<String>,
    #[serde(default)]
    pub paid_url: Option<String>,
}

/// Monetization terms attached to a project.
///
/// `seller_price` keeps cent precision; customer-facing totals are derived by
/// the fee calculator and never stored here. A settled purchase retains the
/// price paid at purchase time regardless of later edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    pub kind: LicenseKind,
    pub seller_price: Decimal,
    #[serde(default)]
    pub currency: Currency,
    /// Disclosure of what the free tier includes. Required for freemium.
    #[serde(default)]
    pub free_features: Vec<String>,
    /// Disclosure of what the paid tier includes. Required for freemium.
    #[serde(default)]
    pub paid_features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Immutable after creation.
    pub author: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: BTreeSet<String>,
    pub status: ProjectStatus,
    pub repository: RepositoryRef,
    #[serde(default)]
    pub demo_url: Option<String>,
    pub license: License,
    pub created_at: DateTime<Utc>,
    /// Stamped on first publish; survives archive and re-publish.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Durable access grant. Append-only: financial fields never change after
/// creation; `is_active` clears only through refund/chargeback flows, which
/// are outside this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub project: ProjectId,
    pub buyer: UserId,
    pub price_paid: Decimal,
    pub currency: Currency,
    /// Processor correlation; one purchase per confirmed intent.
    pub intent_id: IntentId,
    pub purchased_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Local correlation record for a processor payment intent.
///
/// The amount is locked at creation time; a price change between browsing and
/// purchase never moves an already-created intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    pub intent_id: IntentId,
    pub client_secret: String,
    pub project: ProjectId,
    pub buyer: UserId,
    pub amount: Decimal,
    pub currency: Currency,
    pub status: IntentStatus,
    pub created_at: DateTime<Utc>,
}

/// One row per seller, upserted by onboarding and status refreshes.
///
/// The three capability flags advance only via explicit processor status
/// checks or webhooks; the engine never infers them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerAccount {
    pub seller: UserId,
    pub account_id: ConnectAccountId,
    pub has_account: bool,
    pub details_submitted: bool,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl SellerAccount {
    /// True once the external onboarding flow has nothing left to collect.
    pub fn fully_enabled(&self) -> bool {
        self.details_submitted && self.charges_enabled && self.payouts_enabled
    }
}
