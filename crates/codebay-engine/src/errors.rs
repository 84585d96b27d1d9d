//! Typed error handling for the engine.
//!
//! Every fallible operation returns `Result<_, EngineError>`; validation
//! errors are raised before any external call, and processor-side failures
//! are surfaced with no partial state left behind. `confirm_purchase` is the
//! one place an "error" (an already-settled intent) is folded into a success
//! path, to keep confirmation idempotent.

use codebay_types::{IntentId, ProjectId, UserId};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum EngineError {
    /// Negative or non-representable seller price.
    InvalidPrice(String),
    /// License is missing pieces required at publish time.
    LicenseIncomplete(String),
    /// Paid/freemium operation attempted while the seller cannot accept charges.
    SellerNotPayable(String),
    /// Buyer already holds an active purchase for the project.
    DuplicatePurchase(String),
    /// Confirm called with an unknown intent id.
    IntentNotFound(String),
    /// Processor reported the payment as failed; retryable with a new intent.
    PaymentDeclined(String),
    /// Hard delete attempted on a project that must be archived instead.
    ProjectNotDraftable(String),
    /// Actor is not allowed to perform this mutation.
    Unauthorized(String),
    /// Requested entity does not exist.
    NotFound(String),
    /// Operation not allowed given current entity state.
    InvalidState(String),
    /// Payment processor call failed (transport or protocol).
    Processor(String),
    /// Persistence layer failure.
    Storage(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrice(msg) => write!(f, "Invalid price: {}", msg),
            Self::LicenseIncomplete(msg) => write!(f, "License incomplete: {}", msg),
            Self::SellerNotPayable(msg) => write!(f, "Seller not payable: {}", msg),
            Self::DuplicatePurchase(msg) => write!(f, "Duplicate purchase: {}", msg),
            Self::IntentNotFound(msg) => write!(f, "Intent not found: {}", msg),
            Self::PaymentDeclined(msg) => write!(f, "Payment declined: {}", msg),
            Self::ProjectNotDraftable(msg) => write!(f, "Project not draftable: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::Processor(msg) => write!(f, "Processor error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

// ── Factory helpers for common errors ────────────────────────────────────────

impl EngineError {
    pub fn project_not_found(id: &ProjectId) -> Self {
        Self::NotFound(format!("Project not found: {}", id))
    }
    pub fn intent_not_found(id: &IntentId) -> Self {
        Self::IntentNotFound(format!("No pending intent: {}", id))
    }
    pub fn seller_account_not_found(seller: &UserId) -> Self {
        Self::NotFound(format!("Seller has no payment account: {}", seller))
    }
    pub fn only_author(what: &str) -> Self {
        Self::Unauthorized(format!("Only the project author can {}", what))
    }
    pub fn already_purchased(project: &ProjectId) -> Self {
        Self::DuplicatePurchase(format!(
            "Buyer already holds an active purchase for project {}",
            project
        ))
    }
    pub fn charges_disabled() -> Self {
        Self::SellerNotPayable(
            "Payment account onboarding incomplete: charges are not enabled".into(),
        )
    }
}
