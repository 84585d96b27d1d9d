//! Request payloads.
//!
//! Actor ids arrive in the body: authentication happens in the upstream web
//! layer, which forwards the verified principal. Every mutation names its
//! actor explicitly so the engine can enforce author-only rules.

use codebay_engine::DraftInput;
use codebay_types::{IntentId, ProjectId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub author: UserId,
    #[serde(flatten)]
    pub draft: DraftInput,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub actor: UserId,
    #[serde(flatten)]
    pub draft: DraftInput,
}

#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub actor: UserId,
}

#[derive(Debug, Deserialize)]
pub struct RepriceRequest {
    pub actor: UserId,
    pub new_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub buyer: UserId,
    pub project: ProjectId,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub intent_id: IntentId,
}

#[derive(Debug, Deserialize)]
pub struct OnboardRequest {
    pub seller: UserId,
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    /// Authenticated principal, if any; absent means anonymous.
    #[serde(default)]
    pub user: Option<UserId>,
}
