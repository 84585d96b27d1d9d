//! In-memory reference store.
//!
//! Backs the unit and integration suites and the gateway's default wiring.
//! All maps live behind a single `RwLock`; `record_purchase` performs its
//! uniqueness check and insert under one write guard, which is the
//! transactional discipline the trait contract asks for.

use std::collections::HashMap;

use async_trait::async_trait;
use codebay_types::{ConnectAccountId, IntentId, ProjectId, PurchaseId, UserId};
use tokio::sync::RwLock;

use super::MarketStore;
use crate::errors::EngineError;
use crate::types::{IntentRecord, IntentStatus, Project, Purchase, SellerAccount};

#[derive(Default)]
struct Inner {
    projects: HashMap<ProjectId, Project>,
    sellers: HashMap<UserId, SellerAccount>,
    intents: HashMap<IntentId, IntentRecord>,
    purchases: HashMap<PurchaseId, Purchase>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn insert_project(&self, project: Project) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        if inner.projects.contains_key(&project.id) {
            return Err(EngineError::Storage(format!(
                "Project already exists: {}",
                project.id
            )));
        }
        inner.projects.insert(project.id, project);
        Ok(())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, EngineError> {
        Ok(self.inner.read().await.projects.get(id).cloned())
    }

    async fn update_project(&self, project: Project) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project.id) {
            return Err(EngineError::project_not_found(&project.id));
        }
        inner.projects.insert(project.id, project);
        Ok(())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        inner
            .projects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::project_not_found(id))
    }

    async fn get_seller_account(
        &self,
        seller: &UserId,
    ) -> Result<Option<SellerAccount>, EngineError> {
        Ok(self.inner.read().await.sellers.get(seller).cloned())
    }

    async fn get_seller_by_account(
        &self,
        account_id: &ConnectAccountId,
    ) -> Result<Option<SellerAccount>, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .sellers
            .values()
            .find(|a| a.account_id == *account_id)
            .cloned())
    }

    async fn upsert_seller_account(&self, account: SellerAccount) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        inner.sellers.insert(account.seller, account);
        Ok(())
    }

    async fn insert_intent(&self, record: IntentRecord) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        if inner.intents.contains_key(&record.intent_id) {
            return Err(EngineError::Storage(format!(
                "Intent already recorded: {}",
                record.intent_id
            )));
        }
        inner.intents.insert(record.intent_id.clone(), record);
        Ok(())
    }

    async fn get_intent(&self, id: &IntentId) -> Result<Option<IntentRecord>, EngineError> {
        Ok(self.inner.read().await.intents.get(id).cloned())
    }

    async fn pending_intent_for(
        &self,
        buyer: &UserId,
        project: &ProjectId,
    ) -> Result<Option<IntentRecord>, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .intents
            .values()
            .find(|r| {
                r.buyer == *buyer && r.project == *project && r.status == IntentStatus::Pending
            })
            .cloned())
    }

    async fn set_intent_status(
        &self,
        id: &IntentId,
        status: IntentStatus,
    ) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        match inner.intents.get_mut(id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(EngineError::intent_not_found(id)),
        }
    }

    async fn record_purchase(&self, purchase: Purchase) -> Result<Purchase, EngineError> {
        let mut inner = self.inner.write().await;
        let conflict = inner
            .purchases
            .values()
            .any(|p| p.buyer == purchase.buyer && p.project == purchase.project && p.is_active);
        if conflict {
            return Err(EngineError::already_purchased(&purchase.project));
        }
        inner.purchases.insert(purchase.id, purchase.clone());
        Ok(purchase)
    }

    async fn active_purchase(
        &self,
        buyer: &UserId,
        project: &ProjectId,
    ) -> Result<Option<Purchase>, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .purchases
            .values()
            .find(|p| p.buyer == *buyer && p.project == *project && p.is_active)
            .cloned())
    }

    async fn purchase_by_intent(
        &self,
        intent_id: &IntentId,
    ) -> Result<Option<Purchase>, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .purchases
            .values()
            .find(|p| p.intent_id == *intent_id)
            .cloned())
    }

    async fn count_active_purchases(&self, project: &ProjectId) -> Result<u64, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .purchases
            .values()
            .filter(|p| p.project == *project && p.is_active)
            .count() as u64)
    }
}
