//! Internal helpers shared by the engine's impl blocks.

use codebay_types::{ProjectId, UserId};

use crate::constants::*;
use crate::errors::EngineError;
use crate::lifecycle::DraftInput;
use crate::types::Project;
use crate::Engine;

impl Engine {
    pub(crate) async fn load_project(&self, id: &ProjectId) -> Result<Project, EngineError> {
        self.store
            .get_project(id)
            .await?
            .ok_or_else(|| EngineError::project_not_found(id))
    }

    pub(crate) fn ensure_author(
        actor: &UserId,
        project: &Project,
        what: &str,
    ) -> Result<(), EngineError> {
        if *actor != project.author {
            return Err(EngineError::only_author(what));
        }
        Ok(())
    }

    pub(crate) fn validate_draft_input(input: &DraftInput) -> Result<(), EngineError> {
        if input.title.is_empty() || input.title.len() > MAX_TITLE_LEN {
            return Err(EngineError::InvalidState(format!(
                "Title must be 1..={} characters",
                MAX_TITLE_LEN
            )));
        }
        if input.description.len() > MAX_DESCRIPTION_LEN {
            return Err(EngineError::InvalidState(format!(
                "Description exceeds {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        if input.tags.len() > MAX_TAGS {
            return Err(EngineError::InvalidState(format!(
                "At most {} tags allowed",
                MAX_TAGS
            )));
        }
        if input.tags.iter().any(|t| t.is_empty() || t.len() > MAX_TAG_LEN) {
            return Err(EngineError::InvalidState(format!(
                "Tags must be 1..={} characters",
                MAX_TAG_LEN
            )));
        }
        let features = input
            .license
            .free_features
            .iter()
            .chain(&input.license.paid_features);
        if input.license.free_features.len() > MAX_FEATURES
            || input.license.paid_features.len() > MAX_FEATURES
        {
            return Err(EngineError::InvalidState(format!(
                "At most {} features per list",
                MAX_FEATURES
            )));
        }
        for feature in features {
            if feature.is_empty() || feature.len() > MAX_FEATURE_LEN {
                return Err(EngineError::InvalidState(format!(
                    "Features must be 1..={} characters",
                    MAX_FEATURE_LEN
                )));
            }
        }
        for url in [
            input.repository.free_url.as_deref(),
            input.repository.paid_url.as_deref(),
            input.demo_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            if url.len() > MAX_URL_LEN {
                return Err(EngineError::InvalidState(format!(
                    "URL exceeds {} characters",
                    MAX_URL_LEN
                )));
            }
        }
        Ok(())
    }
}
