use chrono::Utc;
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::domain::prompt::Prompt;
use crate::domain::tag::Tag;
use crate::infrastructure::db::filter::OrFilter;

use super::entities::{PromptEntity, TagLinkEntity};
use super::VaultRepository;

const PROMPT_COLUMNS: &str =
    "id, user_id, title, content, description, is_public, is_favorite, created_at, updated_at";

/// Columns the list filter may reference.
const SEARCHABLE_COLUMNS: &[&str] = &["title", "content"];

impl VaultRepository {
    pub async fn create_prompt(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
        description: Option<&str>,
        is_public: bool,
    ) -> Result<Prompt> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let entity = sqlx::query_as::<_, PromptEntity>(&format!(
            "INSERT INTO prompts (id, user_id, title, content, description, is_public, is_favorite, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?) RETURNING {}",
            PROMPT_COLUMNS
        ))
        .bind(&id)
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .bind(description)
        .bind(is_public)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create prompt: {}", e)))?;

        Ok(entity.into())
    }

    pub async fn get_prompt(&self, id: &str) -> Result<Option<Prompt>> {
        let entity = sqlx::query_as::<_, PromptEntity>(&format!(
            "SELECT {} FROM prompts WHERE id = ?",
            PROMPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch prompt: {}", e)))?;

        Ok(entity.map(Into::into))
    }

    /// List an owner's prompts, newest-updated first, optionally narrowed
    /// by an OR/ilike filter expression (see `db::filter`).
    pub async fn list_prompts(
        &self,
        owner_id: &str,
        filter_expr: Option<&str>,
    ) -> Result<Vec<Prompt>> {
        let mut sql = format!("SELECT {} FROM prompts WHERE user_id = ?", PROMPT_COLUMNS);
        let mut binds: Vec<String> = Vec::new();

        if let Some(expr) = filter_expr {
            let (condition, patterns) = OrFilter::parse(expr)?.to_sql(SEARCHABLE_COLUMNS)?;
            sql.push_str(" AND ");
            sql.push_str(&condition);
            binds = patterns;
        }
        sql.push_str(" ORDER BY updated_at DESC");

        let mut query = sqlx::query_as::<_, PromptEntity>(&sql).bind(owner_id);
        for pattern in &binds {
            query = query.bind(pattern);
        }

        let entities = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list prompts: {}", e)))?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    pub async fn update_prompt(
        &self,
        id: &str,
        title: &str,
        content: &str,
        description: Option<&str>,
        is_public: bool,
    ) -> Result<Prompt> {
        let now = Utc::now().to_rfc3339();

        let entity = sqlx::query_as::<_, PromptEntity>(&format!(
            "UPDATE prompts SET title = ?, content = ?, description = ?, is_public = ?, updated_at = ?
             WHERE id = ? RETURNING {}",
            PROMPT_COLUMNS
        ))
        .bind(title)
        .bind(content)
        .bind(description)
        .bind(is_public)
        .bind(&now)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update prompt: {}", e)))?;

        Ok(entity.into())
    }

    pub async fn delete_prompt(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete prompt: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn set_favorite(&self, id: &str, is_favorite: bool) -> Result<Prompt> {
        let entity = sqlx::query_as::<_, PromptEntity>(&format!(
            "UPDATE prompts SET is_favorite = ? WHERE id = ? RETURNING {}",
            PROMPT_COLUMNS
        ))
        .bind(is_favorite)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update favorite flag: {}", e)))?;

        Ok(entity.into())
    }

    /// Replace the full association set for a prompt. Delete-then-insert
    /// runs in one transaction so readers never observe the intermediate
    /// empty state.
    pub async fn replace_prompt_tags(&self, prompt_id: &str, tag_ids: &[String]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to start transaction: {}", e)))?;

        sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = ?")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to clear prompt tags: {}", e)))?;

        for tag_id in tag_ids {
            sqlx::query("INSERT OR IGNORE INTO prompt_tags (prompt_id, tag_id) VALUES (?, ?)")
                .bind(prompt_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to link tag: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit tag links: {}", e)))
    }

    pub async fn tags_for_prompt(&self, prompt_id: &str) -> Result<Vec<Tag>> {
        let entities = sqlx::query_as::<_, super::entities::TagEntity>(
            "SELECT t.id, t.user_id, t.name, t.color, t.created_at
             FROM prompt_tags pt JOIN tags t ON t.id = pt.tag_id
             WHERE pt.prompt_id = ? ORDER BY t.name ASC",
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch prompt tags: {}", e)))?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Tag rows for a batch of prompts in one query, keyed by prompt id.
    pub async fn tags_for_prompts(&self, prompt_ids: &[String]) -> Result<Vec<(String, Tag)>> {
        if prompt_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; prompt_ids.len()].join(", ");
        let sql = format!(
            "SELECT pt.prompt_id AS prompt_id, t.id AS tag_id, t.user_id AS tag_user_id,
                    t.name AS tag_name, t.color AS tag_color, t.created_at AS tag_created_at
             FROM prompt_tags pt JOIN tags t ON t.id = pt.tag_id
             WHERE pt.prompt_id IN ({}) ORDER BY t.name ASC",
            placeholders
        );

        let mut query = sqlx::query_as::<_, TagLinkEntity>(&sql);
        for id in prompt_ids {
            query = query.bind(id);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to fetch prompt tags: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let prompt_id = row.prompt_id.clone();
                (prompt_id, row.into())
            })
            .collect())
    }
}
