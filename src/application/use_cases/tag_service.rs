//! Gateway operations over tags. Same authenticate → validate →
//! authorize → execute shape as the prompt operations; tags are never
//! public, so ownership is absolute.

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::application::use_cases::{ensure_uuid, validate_input};
use crate::domain::error::{AppError, Result};
use crate::domain::tag::{CreateTagInput, Tag, UpdateTagInput};
use crate::infrastructure::db::repository::VaultRepository;

pub struct TagService {
    repo: Arc<VaultRepository>,
}

impl TagService {
    pub fn new(repo: Arc<VaultRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Tag>> {
        let user = ctx.require_user()?;
        self.repo.list_tags(&user.id).await
    }

    pub async fn create(&self, ctx: &RequestContext, input: &CreateTagInput) -> Result<Tag> {
        let user = ctx.require_user()?;
        validate_input(input)?;
        self.repo.create_tag(&user.id, &input.name, &input.color).await
    }

    pub async fn update(&self, ctx: &RequestContext, input: &UpdateTagInput) -> Result<Tag> {
        let user = ctx.require_user()?;
        validate_input(input)?;
        ensure_uuid("id", &input.id)?;

        let existing = self
            .repo
            .get_tag(&input.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;
        if existing.user_id != user.id {
            return Err(AppError::Forbidden(
                "You can only update your own tags".to_string(),
            ));
        }

        let name = input.name.as_deref().unwrap_or(&existing.name);
        let color = input.color.as_deref().unwrap_or(&existing.color);
        self.repo.update_tag(&existing.id, name, color).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        let user = ctx.require_user()?;
        ensure_uuid("id", id)?;

        let existing = self
            .repo
            .get_tag(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;
        if existing.user_id != user.id {
            return Err(AppError::Forbidden(
                "You can only delete your own tags".to_string(),
            ));
        }

        self.repo.delete_tag(&existing.id).await?;
        Ok(())
    }
}
