//! Access resolution: "can this principal see this repository URL?"
//!
//! The decision logic is a pure function over (principal, project, purchase)
//! and is safe to call on every content-view request. Only the settlement
//! orchestrator ever writes the purchase it reads.

use codebay_types::UserId;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::types::{LicenseKind, Project, ProjectStatus, Purchase};
use crate::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantedUrl {
    Free,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<GrantedUrl>,
}

impl AccessDecision {
    pub fn denied() -> Self {
        Self {
            granted: false,
            url: None,
        }
    }

    pub fn free() -> Self {
        Self {
            granted: true,
            url: Some(GrantedUrl::Free),
        }
    }

    pub fn paid() -> Self {
        Self {
            granted: true,
            url: Some(GrantedUrl::Paid),
        }
    }
}

/// Resolve access for a principal against a project and their purchase, if
/// any. The caller is responsible for passing the purchase belonging to this
/// (principal, project) pair; anything else is ignored.
pub fn resolve_access(
    principal: Option<&UserId>,
    project: &Project,
    purchase: Option<&Purchase>,
) -> AccessDecision {
    // Unauthenticated principals are always denied; for free content this is
    // a UX gate (sign in first), not a security boundary.
    let Some(user) = principal else {
        return AccessDecision::denied();
    };

    // Self-access: the author sees everything, in any status.
    if *user == project.author {
        return AccessDecision::paid();
    }

    // Non-authors only see published projects.
    if project.status == ProjectStatus::Draft {
        return AccessDecision::denied();
    }

    let holds_active_purchase = purchase
        .map(|p| p.is_active && p.buyer == *user && p.project == project.id)
        .unwrap_or(false);

    // Archived listings stop discovery and purchase, but existing grants keep
    // resolving.
    if project.status == ProjectStatus::Archived && !holds_active_purchase {
        return AccessDecision::denied();
    }

    match project.license.kind {
        LicenseKind::Free => AccessDecision::free(),
        LicenseKind::Paid => {
            if holds_active_purchase {
                AccessDecision::paid()
            } else {
                AccessDecision::denied()
            }
        }
        LicenseKind::Freemium => {
            if holds_active_purchase {
                AccessDecision::paid()
            } else {
                AccessDecision::free()
            }
        }
    }
}

impl Engine {
    /// Load the project and the principal's purchase, then resolve access.
    pub async fn can_access(
        &self,
        project_id: &codebay_types::ProjectId,
        principal: Option<&UserId>,
    ) -> Result<AccessDecision, EngineError> {
        let project = self.load_project(project_id).await?;
        let purchase = match principal {
            Some(user) => self.store.active_purchase(user, project_id).await?,
            None => None,
        };
        Ok(resolve_access(principal, &project, purchase.as_ref()))
    }
}
