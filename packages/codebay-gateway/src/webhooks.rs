//! Processor webhook intake.
//!
//! Events arrive signed with `t=<unix>,v1=<hex hmac-sha256>` over
//! `"{t}.{payload}"`. Stale timestamps are rejected to bound replay; the
//! handlers themselves are idempotent (settled intents and unchanged seller
//! status are no-ops), so redelivery is safe.

use codebay_types::{ConnectAccountId, IntentId};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{info, warn};

use crate::error::Error;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "codebay-signature";

/// Reject events older (or newer) than this many seconds.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

// --- Wire format ---

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: WebhookObject,
}

/// The interesting subset of the event payload: both intent and account
/// events carry their id in `object.id`.
#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    pub id: String,
}

// --- Signature verification ---

/// Verify a `t=...,v1=...` signature header against the raw payload.
///
/// Multiple `v1` entries are accepted if any matches (secret rotation).
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now_unix: i64,
) -> Result<(), Error> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = value.parse().ok();
            }
            Some(("v1", value)) => {
                if let Ok(sig) = hex::decode(value) {
                    signatures.push(sig);
                }
            }
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| Error::InvalidSignature("missing timestamp".into()))?;
    if signatures.is_empty() {
        return Err(Error::InvalidSignature("missing v1 signature".into()));
    }
    if (now_unix - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err(Error::InvalidSignature("timestamp outside tolerance".into()));
    }

    for signature in &signatures {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| Error::InvalidSignature(format!("bad secret: {e}")))?;
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        if mac.verify_slice(signature).is_ok() {
            return Ok(());
        }
    }
    Err(Error::InvalidSignature("no matching signature".into()))
}

// --- Dispatch ---

/// Route a verified event into the engine.
///
/// Unknown event types are acknowledged and ignored; the processor keeps
/// sending whatever it likes. Status flags are always re-pulled from the
/// processor rather than trusted from the payload, so the engine keeps a
/// single writer path.
pub async fn dispatch(state: &AppState, event: WebhookEvent) -> Result<(), Error> {
    use codebay_engine::store::MarketStore;

    match event.kind.as_str() {
        "payment_intent.succeeded" => {
            let intent_id = IntentId::new(event.data.object.id);
            info!(intent = %intent_id, "Webhook: payment succeeded");
            state.engine.confirm_purchase(&intent_id).await?;
            Ok(())
        }
        "account.updated" => {
            let account_id = ConnectAccountId::new(event.data.object.id);
            let Some(account) = state.store.get_seller_by_account(&account_id).await? else {
                warn!(account = %account_id, "Webhook for unknown connect account");
                return Ok(());
            };
            state.engine.refresh_status(&account.seller).await?;
            Ok(())
        }
        other => {
            info!(kind = other, "Ignoring unhandled webhook event");
            Ok(())
        }
    }
}
