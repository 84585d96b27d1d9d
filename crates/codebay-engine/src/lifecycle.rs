//! Project publication lifecycle: draft → published → archived, plus
//! draft deletion.
//!
//! Author-only throughout. Publishing runs full license validation and the
//! repository-ownership gate; drafts stay loose. Editing a published
//! project's price never touches settled purchases, only future intents.

use std::collections::BTreeSet;

use chrono::Utc;
use codebay_types::{ProjectId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineError;
use crate::events::{self, MarketEventData};
use crate::license::{validate_draft, validate_license};
use crate::types::{License, LicenseKind, Project, ProjectStatus, RepositoryRef};
use crate::Engine;

/// Explicit, validated command input for creating or editing a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub repository: RepositoryRef,
    #[serde(default)]
    pub demo_url: Option<String>,
    pub license: License,
}

impl Engine {
    /// Create a new draft owned by `author`. Drafts may be incomplete; only
    /// structurally invalid input (bad lengths, negative price) is rejected.
    pub async fn create_draft(
        &self,
        author: &UserId,
        input: DraftInput,
    ) -> Result<Project, EngineError> {
        Self::validate_draft_input(&input)?;
        validate_draft(&input.license)?;

        let project = Project {
            id: ProjectId::new(),
            author: *author,
            title: input.title,
            description: input.description,
            category: input.category,
            tags: input.tags,
            status: ProjectStatus::Draft,
            repository: input.repository,
            demo_url: input.demo_url,
            license: input.license,
            created_at: Utc::now(),
            published_at: None,
        };
        self.store.insert_project(project.clone()).await?;

        events::emit(MarketEventData::ProjectCreated {
            project: project.id,
            author: *author,
        });
        Ok(project)
    }

    /// Overwrite a project's content. Always allowed for the author; a draft
    /// may stay incomplete, while an edit to a published listing must keep
    /// the license publishable (the edit is an update, not an unpublish).
    pub async fn save_draft(
        &self,
        actor: &UserId,
        project_id: &ProjectId,
        input: DraftInput,
    ) -> Result<Project, EngineError> {
        let mut project = self.load_project(project_id).await?;
        Self::ensure_author(actor, &project, "edit the project")?;
        if project.status == ProjectStatus::Archived {
            return Err(EngineError::InvalidState(
                "Archived projects cannot be edited".into(),
            ));
        }
        Self::validate_draft_input(&input)?;
        match project.status {
            ProjectStatus::Draft => validate_draft(&input.license)?,
            _ => {
                let seller_account = self.store.get_seller_account(&project.author).await?;
                validate_license(&input.license, seller_account.as_ref())?;
            }
        }

        project.title = input.title;
        project.description = input.description;
        project.category = input.category;
        project.tags = input.tags;
        project.repository = input.repository;
        project.demo_url = input.demo_url;
        project.license = input.license;

        self.store.update_project(project.clone()).await?;
        Ok(project)
    }

    /// Publish a draft, or re-validate an already-published listing after an
    /// edit (idempotent).
    pub async fn publish(
        &self,
        actor: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, EngineError> {
        let mut project = self.load_project(project_id).await?;
        Self::ensure_author(actor, &project, "publish")?;
        if project.status == ProjectStatus::Archived {
            return Err(EngineError::InvalidState(
                "Archived projects cannot be re-published".into(),
            ));
        }

        let seller_account = self.store.get_seller_account(&project.author).await?;
        validate_license(&project.license, seller_account.as_ref())?;
        self.verify_repository(&project).await?;

        let first_publish = project.published_at.is_none();
        if first_publish {
            project.published_at = Some(Utc::now());
        }
        project.status = ProjectStatus::Published;
        self.store.update_project(project.clone()).await?;

        if first_publish {
            events::emit(MarketEventData::ProjectPublished {
                project: project.id,
                author: project.author,
                license_kind: license_kind_str(project.license.kind).to_string(),
                seller_price: events::price_str(project.license.seller_price),
            });
        }
        info!(project = %project.id, "Project published");
        Ok(project)
    }

    /// Explicit price change on a live listing. Settled purchases keep the
    /// price they paid; only future intents see the new price.
    pub async fn reprice(
        &self,
        actor: &UserId,
        project_id: &ProjectId,
        new_price: Decimal,
    ) -> Result<Project, EngineError> {
        let mut project = self.load_project(project_id).await?;
        Self::ensure_author(actor, &project, "change the price")?;
        if project.license.kind == LicenseKind::Free {
            return Err(EngineError::InvalidState(
                "Free licenses have no price to change".into(),
            ));
        }

        let old_price = project.license.seller_price;
        project.license.seller_price = new_price;

        match project.status {
            ProjectStatus::Draft => validate_draft(&project.license)?,
            ProjectStatus::Published => {
                let seller_account = self.store.get_seller_account(&project.author).await?;
                validate_license(&project.license, seller_account.as_ref())?;
            }
            ProjectStatus::Archived => {
                return Err(EngineError::InvalidState(
                    "Archived projects cannot be repriced".into(),
                ));
            }
        }

        self.store.update_project(project.clone()).await?;
        events::emit(MarketEventData::ProjectRepriced {
            project: project.id,
            author: project.author,
            old_price: events::price_str(old_price),
            new_price: events::price_str(new_price),
        });
        Ok(project)
    }

    /// Take a published listing off the market. Existing active purchases
    /// keep resolving; new intents are refused by `create_intent`.
    pub async fn archive(
        &self,
        actor: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, EngineError> {
        let mut project = self.load_project(project_id).await?;
        Self::ensure_author(actor, &project, "archive")?;
        if project.status == ProjectStatus::Draft {
            return Err(EngineError::InvalidState(
                "Drafts are deleted, not archived".into(),
            ));
        }
        if project.status == ProjectStatus::Archived {
            return Ok(project);
        }

        project.status = ProjectStatus::Archived;
        self.store.update_project(project.clone()).await?;
        events::emit(MarketEventData::ProjectArchived {
            project: project.id,
            author: project.author,
        });
        Ok(project)
    }

    /// Hard-delete a draft. Anything past draft must be archived instead, so
    /// settled purchases keep a valid project reference.
    pub async fn delete_draft(
        &self,
        actor: &UserId,
        project_id: &ProjectId,
    ) -> Result<(), EngineError> {
        let project = self.load_project(project_id).await?;
        Self::ensure_author(actor, &project, "delete the draft")?;
        if project.status != ProjectStatus::Draft {
            return Err(EngineError::ProjectNotDraftable(
                "Only drafts can be deleted by their author; archive instead".into(),
            ));
        }
        self.delete_and_emit(project).await
    }

    /// Administrative removal: allowed for any status, but never while active
    /// purchases reference the project.
    pub async fn admin_delete(&self, project_id: &ProjectId) -> Result<(), EngineError> {
        let project = self.load_project(project_id).await?;
        let active = self.store.count_active_purchases(&project.id).await?;
        if active > 0 {
            return Err(EngineError::ProjectNotDraftable(format!(
                "Project has {} active purchase(s); archive it instead",
                active
            )));
        }
        self.delete_and_emit(project).await
    }

    async fn delete_and_emit(&self, project: Project) -> Result<(), EngineError> {
        self.store.delete_project(&project.id).await?;
        events::emit(MarketEventData::ProjectDeleted {
            project: project.id,
        });
        Ok(())
    }

    async fn verify_repository(&self, project: &Project) -> Result<(), EngineError> {
        for url in [
            project.repository.free_url.as_deref(),
            project.repository.paid_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            let owned = self.hosts.verify_ownership(url, &project.author).await?;
            if !owned {
                return Err(EngineError::Unauthorized(format!(
                    "Repository ownership check failed for {}",
                    url
                )));
            }
        }
        Ok(())
    }
}

fn license_kind_str(kind: LicenseKind) -> &'static str {
    match kind {
        LicenseKind::Free => "free",
        LicenseKind::Paid => "paid",
        LicenseKind::Freemium => "freemium",
    }
}
