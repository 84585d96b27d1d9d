//! Repository-host port implementations.

use async_trait::async_trait;
use codebay_engine::external::RepositoryHost;
use codebay_engine::EngineError;
use codebay_types::UserId;

/// Accepts any repository URL the author submitted.
///
/// Ownership is established upstream by the OAuth/repository collaborator
/// that populated the URL in the first place; the engine only needs the
/// boolean gate. Deployments with a live host API swap this for a real
/// implementation of the port.
pub struct TrustingHost;

#[async_trait]
impl RepositoryHost for TrustingHost {
    async fn verify_ownership(&self, _url: &str, _principal: &UserId) -> Result<bool, EngineError> {
        Ok(true)
    }
}
