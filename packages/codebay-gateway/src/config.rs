//! Gateway configuration.

use serde::Deserialize;

/// Configuration for the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Base URL of the payment processor's REST API.
    #[serde(default = "defaults::processor_url")]
    pub processor_url: String,

    /// Processor API secret key.
    #[serde(default = "defaults::processor_secret_key")]
    pub processor_secret_key: String,

    /// Shared secret for webhook signature verification.
    #[serde(default = "defaults::webhook_secret")]
    pub webhook_secret: String,

    /// Platform fee surcharge in whole percent.
    #[serde(default = "defaults::fee_pct")]
    pub fee_pct: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            processor_url: defaults::processor_url(),
            processor_secret_key: defaults::processor_secret_key(),
            webhook_secret: defaults::webhook_secret(),
            fee_pct: defaults::fee_pct(),
        }
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3080".into()
    }

    pub fn processor_url() -> String {
        // Local processor stub unless CODEBAY_PROCESSOR_URL overrides.
        "http://127.0.0.1:4242".into()
    }

    pub fn processor_secret_key() -> String {
        std::env::var("CODEBAY_PROCESSOR_SECRET_KEY").unwrap_or_else(|_| "sk_test_local".into())
    }

    pub fn webhook_secret() -> String {
        std::env::var("CODEBAY_WEBHOOK_SECRET").unwrap_or_else(|_| "whsec_local".into())
    }

    pub fn fee_pct() -> u8 {
        codebay_engine::DEFAULT_FEE_PCT
    }
}
