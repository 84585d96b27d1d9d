//! Codebay Licensing & Settlement Engine: price breakdowns, license
//! validation, access resolution, payment settlement, seller onboarding, and
//! the project publication lifecycle.
//!
//! The engine is request-driven and holds no global mutable state: all
//! persisted entities live behind the [`store::MarketStore`] port, and the
//! payment processor and repository host are injected [`external`] ports.
//! Pure decisions (fees, access, validation) are synchronous; only store and
//! processor calls are awaited.

use std::sync::Arc;

// --- Modules ---

mod access;
pub mod constants;
mod errors;
mod events;
pub mod external;
pub mod fees;
mod internal;
mod license;
mod lifecycle;
mod sellers;
mod settlement;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use access::{resolve_access, AccessDecision, GrantedUrl};
pub use constants::*;
pub use errors::EngineError;
pub use fees::{compute_breakdown, FeeConfig, PriceBreakdown};
pub use license::{validate_draft, validate_license};
pub use lifecycle::DraftInput;
pub use sellers::OnboardingLink;
pub use settlement::CheckoutIntent;
pub use types::*;

use external::{PaymentProcessor, RepositoryHost};
use store::MarketStore;

/// The engine facade: every marketplace operation with an invariant runs
/// through one of its impl blocks (`settlement`, `sellers`, `lifecycle`,
/// `access`).
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn MarketStore>,
    processor: Arc<dyn PaymentProcessor>,
    hosts: Arc<dyn RepositoryHost>,
    fees: FeeConfig,
}

impl Engine {
    pub fn new(
        store: Arc<dyn MarketStore>,
        processor: Arc<dyn PaymentProcessor>,
        hosts: Arc<dyn RepositoryHost>,
        fees: FeeConfig,
    ) -> Self {
        Self {
            store,
            processor,
            hosts,
            fees,
        }
    }

    pub fn fee_config(&self) -> &FeeConfig {
        &self.fees
    }

    /// Price breakdown for a project's current license, as shown at checkout.
    ///
    /// Free licenses never consult the fee calculator: every output is zero.
    pub async fn price_preview(&self, project_id: &codebay_types::ProjectId) -> Result<PriceBreakdown, EngineError> {
        let project = self.load_project(project_id).await?;
        match project.license.kind {
            LicenseKind::Free => Ok(PriceBreakdown::zero()),
            LicenseKind::Paid | LicenseKind::Freemium => {
                compute_breakdown(project.license.seller_price, self.fees.fee_pct)
            }
        }
    }
}
