//! Persistence port.
//!
//! The purchase collection is the single source of truth for access. The
//! store contract requires `record_purchase` to be atomic with respect to
//! the per-(buyer, project) active-uniqueness check; the in-memory reference
//! implementation does both under one write lock.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use codebay_types::{ConnectAccountId, IntentId, ProjectId, UserId};

use crate::errors::EngineError;
use crate::types::{IntentRecord, IntentStatus, Project, Purchase, SellerAccount};

#[async_trait]
pub trait MarketStore: Send + Sync {
    // --- Projects ---

    async fn insert_project(&self, project: Project) -> Result<(), EngineError>;
    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, EngineError>;
    async fn update_project(&self, project: Project) -> Result<(), EngineError>;
    async fn delete_project(&self, id: &ProjectId) -> Result<(), EngineError>;

    // --- Seller accounts ---

    async fn get_seller_account(
        &self,
        seller: &UserId,
    ) -> Result<Option<SellerAccount>, EngineError>;
    async fn get_seller_by_account(
        &self,
        account_id: &ConnectAccountId,
    ) -> Result<Option<SellerAccount>, EngineError>;
    async fn upsert_seller_account(&self, account: SellerAccount) -> Result<(), EngineError>;

    // --- Intent records ---

    async fn insert_intent(&self, record: IntentRecord) -> Result<(), EngineError>;
    async fn get_intent(&self, id: &IntentId) -> Result<Option<IntentRecord>, EngineError>;
    async fn pending_intent_for(
        &self,
        buyer: &UserId,
        project: &ProjectId,
    ) -> Result<Option<IntentRecord>, EngineError>;
    async fn set_intent_status(
        &self,
        id: &IntentId,
        status: IntentStatus,
    ) -> Result<(), EngineError>;

    // --- Purchases ---

    /// Insert the purchase unless an active purchase already exists for its
    /// (buyer, project) pair. The check and the insert must be one atomic
    /// step; on conflict the store returns `DuplicatePurchase` and writes
    /// nothing.
    async fn record_purchase(&self, purchase: Purchase) -> Result<Purchase, EngineError>;
    async fn active_purchase(
        &self,
        buyer: &UserId,
        project: &ProjectId,
    ) -> Result<Option<Purchase>, EngineError>;
    async fn purchase_by_intent(
        &self,
        intent_id: &IntentId,
    ) -> Result<Option<Purchase>, EngineError>;
    async fn count_active_purchases(&self, project: &ProjectId) -> Result<u64, EngineError>;
}
