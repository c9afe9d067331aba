//! Gateway operations over prompts. Every operation follows the same
//! shape: authenticate, validate input, authorize against the fetched
//! record, execute one storage operation, shape the result.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::application::use_cases::{ensure_uuid, validate_input};
use crate::domain::error::{AppError, Result};
use crate::domain::prompt::{
    CreatePromptInput, ListPromptsInput, Prompt, PromptCreateOutcome, PromptView,
    UpdatePromptInput,
};
use crate::domain::tag::Tag;
use crate::infrastructure::db::filter::search_filter;
use crate::infrastructure::db::repository::VaultRepository;

pub struct PromptService {
    repo: Arc<VaultRepository>,
}

fn shape(prompt: Prompt, tags: Vec<Tag>) -> PromptView {
    PromptView { prompt, tags }
}

impl PromptService {
    pub fn new(repo: Arc<VaultRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        input: &ListPromptsInput,
    ) -> Result<Vec<PromptView>> {
        let user = ctx.require_user()?;

        let filter = input
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(search_filter);

        let prompts = self.repo.list_prompts(&user.id, filter.as_deref()).await?;

        let ids: Vec<String> = prompts.iter().map(|p| p.id.clone()).collect();
        let mut tags_by_prompt: HashMap<String, Vec<Tag>> = HashMap::new();
        for (prompt_id, tag) in self.repo.tags_for_prompts(&ids).await? {
            tags_by_prompt.entry(prompt_id).or_default().push(tag);
        }

        Ok(prompts
            .into_iter()
            .map(|p| {
                let tags = tags_by_prompt.remove(&p.id).unwrap_or_default();
                shape(p, tags)
            })
            .collect())
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<PromptView> {
        let user = ctx.require_user()?;
        ensure_uuid("id", id)?;

        let prompt = self
            .repo
            .get_prompt(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

        if prompt.user_id != user.id && !prompt.is_public {
            return Err(AppError::Forbidden(
                "You don't have access to this prompt".to_string(),
            ));
        }

        let tags = self.repo.tags_for_prompt(&prompt.id).await?;
        Ok(shape(prompt, tags))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: &CreatePromptInput,
    ) -> Result<PromptCreateOutcome> {
        let user = ctx.require_user()?;
        validate_input(input)?;
        if let Some(tag_ids) = &input.tag_ids {
            for tag_id in tag_ids {
                ensure_uuid("tagIds", tag_id)?;
            }
        }

        let prompt = self
            .repo
            .create_prompt(
                &user.id,
                &input.title,
                &input.content,
                input.description.as_deref(),
                input.is_public,
            )
            .await?;

        // The prompt exists at this point; tag linking is best-effort and
        // degrades to warnings instead of failing the create.
        let mut warnings = Vec::new();
        if let Some(tag_ids) = &input.tag_ids {
            if !tag_ids.is_empty() {
                match self.link_tags(&user.id, &prompt.id, tag_ids).await {
                    Ok(mut linked) => warnings.append(&mut linked),
                    Err(e) => {
                        tracing::warn!(prompt_id = %prompt.id, error = %e, "Failed to link tags");
                        warnings.push(format!("failed to link tags: {}", e.message()));
                    }
                }
            }
        }

        let tags = self.repo.tags_for_prompt(&prompt.id).await?;
        Ok(PromptCreateOutcome {
            prompt: shape(prompt, tags),
            warnings,
        })
    }

    async fn link_tags(
        &self,
        owner_id: &str,
        prompt_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<String>> {
        let owned = self.repo.resolve_owned_tags(owner_id, tag_ids).await?;

        let mut warnings = Vec::new();
        for tag_id in tag_ids {
            if !owned.contains(tag_id) {
                warnings.push(format!(
                    "tag {} does not exist or belongs to another user; skipped",
                    tag_id
                ));
            }
        }

        self.repo.replace_prompt_tags(prompt_id, &owned).await?;
        Ok(warnings)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        input: &UpdatePromptInput,
    ) -> Result<PromptView> {
        let user = ctx.require_user()?;
        validate_input(input)?;
        ensure_uuid("id", &input.id)?;
        if let Some(tag_ids) = &input.tag_ids {
            for tag_id in tag_ids {
                ensure_uuid("tagIds", tag_id)?;
            }
        }

        let existing = self.owned_prompt(&user.id, &input.id, UPDATE_OWN).await?;

        // Ownership of every tag is enforced up front so the replacement
        // below either applies the full set or nothing.
        if let Some(tag_ids) = &input.tag_ids {
            let mut distinct = tag_ids.clone();
            distinct.sort();
            distinct.dedup();
            let owned = self.repo.resolve_owned_tags(&user.id, &distinct).await?;
            if owned.len() != distinct.len() {
                return Err(AppError::Validation(
                    "tagIds: contains tags that do not exist or belong to another user"
                        .to_string(),
                ));
            }
        }

        let title = input.title.as_deref().unwrap_or(&existing.title);
        let content = input.content.as_deref().unwrap_or(&existing.content);
        let description = input
            .description
            .as_deref()
            .or(existing.description.as_deref());
        let is_public = input.is_public.unwrap_or(existing.is_public);

        let updated = self
            .repo
            .update_prompt(&input.id, title, content, description, is_public)
            .await?;

        if let Some(tag_ids) = &input.tag_ids {
            self.repo.replace_prompt_tags(&updated.id, tag_ids).await?;
        }

        let tags = self.repo.tags_for_prompt(&updated.id).await?;
        Ok(shape(updated, tags))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        let user = ctx.require_user()?;
        ensure_uuid("id", id)?;

        let existing = self.owned_prompt(&user.id, id, DELETE_OWN).await?;
        self.repo.delete_prompt(&existing.id).await?;
        Ok(())
    }

    pub async fn toggle_favorite(&self, ctx: &RequestContext, id: &str) -> Result<PromptView> {
        let user = ctx.require_user()?;
        ensure_uuid("id", id)?;

        let existing = self.owned_prompt(&user.id, id, UPDATE_OWN).await?;
        let updated = self
            .repo
            .set_favorite(&existing.id, !existing.is_favorite)
            .await?;

        let tags = self.repo.tags_for_prompt(&updated.id).await?;
        Ok(shape(updated, tags))
    }

    /// Mutations collapse "missing" and "not yours" into Forbidden so an
    /// unauthorized caller cannot probe for record existence.
    async fn owned_prompt(&self, user_id: &str, id: &str, message: &str) -> Result<Prompt> {
        match self.repo.get_prompt(id).await? {
            Some(prompt) if prompt.user_id == user_id => Ok(prompt),
            _ => Err(AppError::Forbidden(message.to_string())),
        }
    }
}

const UPDATE_OWN: &str = "You can only update your own prompts";
const DELETE_OWN: &str = "You can only delete your own prompts";

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::User;
    use crate::infrastructure::db::repository::test_support::{test_repository, test_user};

    struct Fixture {
        service: PromptService,
        repo: Arc<VaultRepository>,
        ann: User,
        bob: User,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(test_repository().await);
        Fixture {
            service: PromptService::new(repo.clone()),
            ann: test_user(&repo, "ann@example.com").await,
            bob: test_user(&repo, "bob@example.com").await,
            repo,
        }
    }

    fn create_input(title: &str, content: &str) -> CreatePromptInput {
        CreatePromptInput {
            title: title.to_string(),
            content: content.to_string(),
            description: None,
            is_public: false,
            tag_ids: None,
        }
    }

    fn update_input(id: &str) -> UpdatePromptInput {
        UpdatePromptInput {
            id: id.to_string(),
            title: None,
            content: None,
            description: None,
            is_public: None,
            tag_ids: None,
        }
    }

    #[tokio::test]
    async fn every_operation_requires_a_user() {
        let f = fixture().await;
        let anon = RequestContext::anonymous();

        let list = f.service.list(&anon, &ListPromptsInput::default()).await;
        assert!(matches!(list, Err(AppError::Unauthorized(_))));

        let create = f.service.create(&anon, &create_input("T", "c")).await;
        assert!(matches!(create, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn create_validates_before_writing() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());

        let err = f
            .service
            .create(&ctx, &create_input(&"x".repeat(201), "content"))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("title")),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(f
            .service
            .list(&ctx, &ListPromptsInput::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn create_links_owned_tags_without_warnings() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let tag = f.repo.create_tag(&f.ann.id, "writing", "#112233").await.unwrap();

        let mut input = create_input("T", "c");
        input.tag_ids = Some(vec![tag.id.clone()]);
        let outcome = f.service.create(&ctx, &input).await.unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.prompt.tags.len(), 1);
        assert_eq!(outcome.prompt.tags[0].name, "writing");
    }

    #[tokio::test]
    async fn create_with_foreign_tag_succeeds_with_warning() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let foreign = f.repo.create_tag(&f.bob.id, "theirs", "#112233").await.unwrap();

        let mut input = create_input("T", "c");
        input.tag_ids = Some(vec![foreign.id.clone()]);
        let outcome = f.service.create(&ctx, &input).await.unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains(&foreign.id));
        assert!(outcome.prompt.tags.is_empty());
        // The prompt itself was created.
        assert_eq!(
            f.service
                .list(&ctx, &ListPromptsInput::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn get_enforces_ownership_unless_public() {
        let f = fixture().await;
        let ann = RequestContext::authenticated(f.ann.clone());
        let bob = RequestContext::authenticated(f.bob.clone());

        let private = f.service.create(&ann, &create_input("P", "c")).await.unwrap();
        let mut public_input = create_input("Pub", "c");
        public_input.is_public = true;
        let public = f.service.create(&ann, &public_input).await.unwrap();

        assert!(matches!(
            f.service.get(&bob, &private.prompt.prompt.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(
            f.service
                .get(&bob, &public.prompt.prompt.id)
                .await
                .unwrap()
                .prompt
                .title,
            "Pub"
        );
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let err = f
            .service
            .get(&ctx, "00000000-0000-4000-8000-000000000000")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn mutations_by_non_owners_are_forbidden_even_on_public_prompts() {
        let f = fixture().await;
        let ann = RequestContext::authenticated(f.ann.clone());
        let bob = RequestContext::authenticated(f.bob.clone());

        let mut input = create_input("Pub", "c");
        input.is_public = true;
        let created = f.service.create(&ann, &input).await.unwrap();
        let id = created.prompt.prompt.id.clone();

        assert!(matches!(
            f.service.update(&bob, &update_input(&id)).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            f.service.delete(&bob, &id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            f.service.toggle_favorite(&bob, &id).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let created = f
            .service
            .create(&ctx, &create_input("Old title", "old content"))
            .await
            .unwrap();
        let id = created.prompt.prompt.id.clone();

        let mut input = update_input(&id);
        input.title = Some("New title".to_string());
        let updated = f.service.update(&ctx, &input).await.unwrap();

        assert_eq!(updated.prompt.title, "New title");
        assert_eq!(updated.prompt.content, "old content");
    }

    #[tokio::test]
    async fn update_tag_semantics_replace_clear_or_keep() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let first = f.repo.create_tag(&f.ann.id, "first", "#112233").await.unwrap();
        let second = f.repo.create_tag(&f.ann.id, "second", "#445566").await.unwrap();

        let mut input = create_input("T", "c");
        input.tag_ids = Some(vec![first.id.clone()]);
        let created = f.service.create(&ctx, &input).await.unwrap();
        let id = created.prompt.prompt.id.clone();

        // Omitting tagIds leaves associations untouched.
        let untouched = f.service.update(&ctx, &update_input(&id)).await.unwrap();
        assert_eq!(untouched.tags.len(), 1);

        // Supplying a list replaces the full set.
        let mut replace = update_input(&id);
        replace.tag_ids = Some(vec![second.id.clone()]);
        let replaced = f.service.update(&ctx, &replace).await.unwrap();
        assert_eq!(replaced.tags.len(), 1);
        assert_eq!(replaced.tags[0].name, "second");

        // An empty list clears all tags.
        let mut clear = update_input(&id);
        clear.tag_ids = Some(Vec::new());
        let cleared = f.service.update(&ctx, &clear).await.unwrap();
        assert!(cleared.tags.is_empty());
    }

    #[tokio::test]
    async fn update_rejects_foreign_tags() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let foreign = f.repo.create_tag(&f.bob.id, "theirs", "#112233").await.unwrap();

        let created = f.service.create(&ctx, &create_input("T", "c")).await.unwrap();
        let mut input = update_input(&created.prompt.prompt.id);
        input.tag_ids = Some(vec![foreign.id]);

        let err = f.service.update(&ctx, &input).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("tagIds")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn toggle_favorite_is_self_inverse() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let created = f.service.create(&ctx, &create_input("T", "c")).await.unwrap();
        let id = created.prompt.prompt.id.clone();
        assert!(!created.prompt.prompt.is_favorite);

        let once = f.service.toggle_favorite(&ctx, &id).await.unwrap();
        assert!(once.prompt.is_favorite);
        let twice = f.service.toggle_favorite(&ctx, &id).await.unwrap();
        assert!(!twice.prompt.is_favorite);
    }

    #[tokio::test]
    async fn delete_removes_the_prompt() {
        let f = fixture().await;
        let ctx = RequestContext::authenticated(f.ann.clone());
        let created = f.service.create(&ctx, &create_input("T", "c")).await.unwrap();
        let id = created.prompt.prompt.id.clone();

        f.service.delete(&ctx, &id).await.unwrap();
        assert!(matches!(
            f.service.get(&ctx, &id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_search_scopes_to_owner() {
        let f = fixture().await;
        let ann = RequestContext::authenticated(f.ann.clone());
        let bob = RequestContext::authenticated(f.bob.clone());

        f.service
            .create(&ann, &create_input("rust notes", "x"))
            .await
            .unwrap();
        f.service
            .create(&bob, &create_input("rust secrets", "x"))
            .await
            .unwrap();

        let hits = f
            .service
            .list(
                &ann,
                &ListPromptsInput {
                    search: Some("rust".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].prompt.title, "rust notes");
    }
}
