//! External collaborator ports.
//!
//! The payment processor and repository host are injected as trait objects;
//! the engine never imports an ambient SDK client. Implementations live in
//! the gateway (REST clients) and the test suites (hand-written fakes).

use async_trait::async_trait;
use codebay_types::{ConnectAccountId, Currency, IntentId, ProjectId, UserId};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Correlation metadata attached to every payment intent, echoed back by
/// webhooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMetadata {
    pub project: ProjectId,
    pub buyer: UserId,
}

/// Processor response to intent creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIntent {
    pub intent_id: IntentId,
    pub client_secret: String,
}

/// Terminal or pending outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Succeeded,
    /// The buyer has not completed the payment step yet.
    Pending,
    Failed(String),
}

/// Processor response to connect-account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectAccount {
    pub account_id: ConnectAccountId,
    pub onboarding_url: String,
}

/// Onboarding capability flags as reported by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectStatus {
    pub details_submitted: bool,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent for `amount_minor` cents.
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: Currency,
        metadata: IntentMetadata,
    ) -> Result<CreatedIntent, EngineError>;

    /// Report the intent's settlement outcome.
    async fn confirm_payment(&self, intent_id: &IntentId) -> Result<IntentOutcome, EngineError>;

    /// Create (or resume) the seller's connect account and mint a fresh
    /// onboarding link.
    async fn create_connect_account(&self, seller: &UserId) -> Result<ConnectAccount, EngineError>;

    /// Current onboarding capability flags for an account.
    async fn get_connect_account_status(
        &self,
        account_id: &ConnectAccountId,
    ) -> Result<ConnectStatus, EngineError>;
}

/// Repository-host boundary: an opaque ownership gate over URL strings. The
/// engine never parses or fetches repository content.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    async fn verify_ownership(&self, url: &str, principal: &UserId) -> Result<bool, EngineError>;
}
