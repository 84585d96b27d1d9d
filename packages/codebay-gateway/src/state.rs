//! Application state shared across handlers.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use codebay_engine::store::MemoryStore;
use codebay_engine::{Engine, FeeConfig};
use tracing::info;

use crate::config::Config;
use crate::hosts::TrustingHost;
use crate::processor::RestProcessor;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub engine: Engine,
    pub store: Arc<MemoryStore>,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let fees = FeeConfig::new(config.fee_pct).map_err(crate::Error::Engine)?;
        let processor = Arc::new(RestProcessor::new(
            &config.processor_url,
            &config.processor_secret_key,
        )?);
        let store = Arc::new(MemoryStore::new());
        let engine = Engine::new(
            store.clone(),
            processor,
            Arc::new(TrustingHost),
            fees,
        );

        info!(processor = %config.processor_url, fee_pct = config.fee_pct, "Engine wired");

        Ok(Self {
            engine,
            store,
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}
