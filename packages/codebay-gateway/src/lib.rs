//! # Codebay Gateway
//!
//! HTTP facade over the licensing & settlement engine. Authentication and
//! rendering belong to the upstream web layer; this service exposes the
//! engine's operations, the processor webhook intake, and health.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin codebay-gateway
//! ```
//!
//! ## Endpoints
//! - `GET /health` - Health check with request metrics
//! - `POST /projects` + lifecycle routes - Draft/publish/reprice/archive
//! - `POST /checkout`, `POST /checkout/confirm` - Payment settlement
//! - `POST /sellers/onboard`, `POST /sellers/{id}/refresh` - Onboarding
//! - `POST /webhooks/processor` - Signed processor event intake

pub mod config;
mod error;
mod handlers;
pub mod hosts;
pub mod processor;
mod response;
mod router;
mod schemas;
mod state;
pub mod webhooks;

pub use config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
