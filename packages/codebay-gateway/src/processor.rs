//! Payment processor REST client.
//!
//! Speaks a Stripe-shaped REST API: payment intents, connect accounts, and
//! account links. Transient failures (408/429/5xx) retry with exponential
//! backoff; everything else surfaces immediately as a processor error.

use async_trait::async_trait;
use codebay_engine::external::{
    ConnectAccount, ConnectStatus, CreatedIntent, IntentMetadata, IntentOutcome, PaymentProcessor,
};
use codebay_engine::EngineError;
use codebay_types::{ConnectAccountId, Currency, IntentId, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_RETRIES: u32 = 2;
const RETRY_BASE_MS: u64 = 200;

fn is_retryable(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
}

/// REST client bound to one processor account.
pub struct RestProcessor {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

// --- Processor REST API types ---

#[derive(Deserialize)]
struct IntentResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
    status: String,
    #[serde(default)]
    last_payment_error: Option<String>,
}

#[derive(Deserialize)]
struct AccountResponse {
    id: String,
    #[serde(default)]
    details_submitted: bool,
    #[serde(default)]
    charges_enabled: bool,
    #[serde(default)]
    payouts_enabled: bool,
}

#[derive(Deserialize)]
struct AccountLinkResponse {
    url: String,
}

impl RestProcessor {
    pub fn new(base_url: &str, secret_key: &str) -> Result<Self, crate::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| crate::Error::Config(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, EngineError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_err = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(RETRY_BASE_MS * 2u64.pow(attempt - 1));
                warn!(attempt, path, "Retrying processor call");
                tokio::time::sleep(delay).await;
            }

            let mut req = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(&self.secret_key);
            if let Some(json) = body {
                req = req.json(json);
            }

            match req.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<T>().await.map_err(|e| {
                            EngineError::Processor(format!("Malformed response from {path}: {e}"))
                        });
                    }
                    let text = resp.text().await.unwrap_or_default();
                    let err = EngineError::Processor(format!("{path} returned {status}: {text}"));
                    if !is_retryable(status) {
                        return Err(err);
                    }
                    last_err = Some(err);
                }
                Err(e) => {
                    last_err = Some(EngineError::Processor(format!("{path}: {e}")));
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| EngineError::Processor(format!("{path}: retries exhausted"))))
    }
}

#[async_trait]
impl PaymentProcessor for RestProcessor {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: Currency,
        metadata: IntentMetadata,
    ) -> Result<CreatedIntent, EngineError> {
        let body = serde_json::json!({
            "amount": amount_minor,
            "currency": currency.code(),
            "metadata": {
                "project": metadata.project,
                "buyer": metadata.buyer,
            },
        });
        let resp: IntentResponse = self
            .request(reqwest::Method::POST, "/v1/payment_intents", Some(&body))
            .await?;
        let client_secret = resp.client_secret.ok_or_else(|| {
            EngineError::Processor("Intent response missing client_secret".into())
        })?;
        Ok(CreatedIntent {
            intent_id: IntentId::new(resp.id),
            client_secret,
        })
    }

    async fn confirm_payment(&self, intent_id: &IntentId) -> Result<IntentOutcome, EngineError> {
        let path = format!("/v1/payment_intents/{}/confirm", intent_id);
        let resp: IntentResponse = self.request(reqwest::Method::POST, &path, None).await?;
        Ok(match resp.status.as_str() {
            "succeeded" => IntentOutcome::Succeeded,
            "processing" | "requires_confirmation" | "requires_action" | "requires_payment_method" => {
                IntentOutcome::Pending
            }
            other => IntentOutcome::Failed(
                resp.last_payment_error
                    .unwrap_or_else(|| format!("intent status: {other}")),
            ),
        })
    }

    async fn create_connect_account(&self, seller: &UserId) -> Result<ConnectAccount, EngineError> {
        let body = serde_json::json!({ "metadata": { "seller": seller } });
        let account: AccountResponse = self
            .request(reqwest::Method::POST, "/v1/accounts", Some(&body))
            .await?;

        let link_body = serde_json::json!({ "account": account.id });
        let link: AccountLinkResponse = self
            .request(reqwest::Method::POST, "/v1/account_links", Some(&link_body))
            .await?;

        Ok(ConnectAccount {
            account_id: ConnectAccountId::new(account.id),
            onboarding_url: link.url,
        })
    }

    async fn get_connect_account_status(
        &self,
        account_id: &ConnectAccountId,
    ) -> Result<ConnectStatus, EngineError> {
        let path = format!("/v1/accounts/{}", account_id);
        let resp: AccountResponse = self.request(reqwest::Method::GET, &path, None).await?;
        Ok(ConnectStatus {
            details_submitted: resp.details_submitted,
            charges_enabled: resp.charges_enabled,
            payouts_enabled: resp.payouts_enabled,
        })
    }
}
