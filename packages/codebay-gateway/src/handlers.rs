//! HTTP request handlers.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use codebay_engine::types::{Project, Purchase, SellerAccount};
use codebay_engine::{AccessDecision, CheckoutIntent, OnboardingLink, PriceBreakdown};
use codebay_types::ProjectId;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use crate::error::Error;
use crate::response::{HealthResponse, WebhookAck};
use crate::schemas::*;
use crate::state::AppState;
use crate::webhooks;

/// Health check with basic metrics.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
        fee_pct: state.config.fee_pct,
    })
}

// --- Projects ---

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<Project>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let project = state.engine.create_draft(&req.author, req.draft).await?;
    info!(project = %project.id, author = %project.author, "Draft created");
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let project = state.engine.save_draft(&req.actor, &id, req.draft).await?;
    Ok(Json(project))
}

pub async fn publish_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<Project>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let project = state.engine.publish(&req.actor, &id).await?;
    Ok(Json(project))
}

pub async fn reprice_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Json(req): Json<RepriceRequest>,
) -> Result<Json<Project>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let project = state.engine.reprice(&req.actor, &id, req.new_price).await?;
    Ok(Json(project))
}

pub async fn archive_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<Project>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let project = state.engine.archive(&req.actor, &id).await?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<serde_json::Value>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.engine.delete_draft(&req.actor, &id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

// --- Views ---

pub async fn project_pricing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
) -> Result<Json<PriceBreakdown>, Error> {
    let breakdown = state.engine.price_preview(&id).await?;
    Ok(Json(breakdown))
}

pub async fn project_access(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProjectId>,
    Query(query): Query<AccessQuery>,
) -> Result<Json<AccessDecision>, Error> {
    let decision = state.engine.can_access(&id, query.user.as_ref()).await?;
    Ok(Json(decision))
}

// --- Checkout ---

pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutIntent>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let intent = state.engine.create_intent(&req.buyer, &req.project).await?;
    info!(intent = %intent.intent_id, project = %req.project, "Checkout started");
    Ok(Json(intent))
}

pub async fn confirm_checkout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<Purchase>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let purchase = state.engine.confirm_purchase(&req.intent_id).await?;
    Ok(Json(purchase))
}

// --- Sellers ---

pub async fn onboard_seller(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OnboardRequest>,
) -> Result<Json<OnboardingLink>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let link = state.engine.start_onboarding(&req.seller).await?;
    Ok(Json(link))
}

pub async fn refresh_seller(
    State(state): State<Arc<AppState>>,
    Path(seller): Path<codebay_types::UserId>,
) -> Result<Json<SellerAccount>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let account = state.engine.refresh_status(&seller).await?;
    Ok(Json(account))
}

// --- Webhooks ---

/// Signed processor event intake. The raw body is needed for signature
/// verification, so JSON parsing happens after the check.
pub async fn processor_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<WebhookAck>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let header = headers
        .get(webhooks::SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::InvalidSignature("missing signature header".into()))?;

    webhooks::verify_signature(
        &body,
        header,
        &state.config.webhook_secret,
        Utc::now().timestamp(),
    )?;

    let event: webhooks::WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| Error::BadRequest(format!("invalid webhook body: {e}")))?;

    webhooks::dispatch(&state, event).await?;
    Ok(Json(WebhookAck { received: true }))
}
