use chrono::Utc;
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::domain::tag::Tag;

use super::entities::TagEntity;
use super::{is_unique_violation, VaultRepository};

const TAG_COLUMNS: &str = "id, user_id, name, color, created_at";

const DUPLICATE_NAME: &str = "A tag with this name already exists";

impl VaultRepository {
    pub async fn create_tag(&self, owner_id: &str, name: &str, color: &str) -> Result<Tag> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let entity = sqlx::query_as::<_, TagEntity>(&format!(
            "INSERT INTO tags (id, user_id, name, color, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {}",
            TAG_COLUMNS
        ))
        .bind(&id)
        .bind(owner_id)
        .bind(name)
        .bind(color)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(DUPLICATE_NAME.to_string())
            } else {
                AppError::DatabaseError(format!("Failed to create tag: {}", e))
            }
        })?;

        Ok(entity.into())
    }

    pub async fn get_tag(&self, id: &str) -> Result<Option<Tag>> {
        let entity = sqlx::query_as::<_, TagEntity>(&format!(
            "SELECT {} FROM tags WHERE id = ?",
            TAG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch tag: {}", e)))?;

        Ok(entity.map(Into::into))
    }

    pub async fn list_tags(&self, owner_id: &str) -> Result<Vec<Tag>> {
        let entities = sqlx::query_as::<_, TagEntity>(&format!(
            "SELECT {} FROM tags WHERE user_id = ? ORDER BY name ASC",
            TAG_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list tags: {}", e)))?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    pub async fn update_tag(&self, id: &str, name: &str, color: &str) -> Result<Tag> {
        let entity = sqlx::query_as::<_, TagEntity>(&format!(
            "UPDATE tags SET name = ?, color = ? WHERE id = ? RETURNING {}",
            TAG_COLUMNS
        ))
        .bind(name)
        .bind(color)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(DUPLICATE_NAME.to_string())
            } else {
                AppError::DatabaseError(format!("Failed to update tag: {}", e))
            }
        })?;

        Ok(entity.into())
    }

    pub async fn delete_tag(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete tag: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// The subset of `tag_ids` that exist and belong to `owner_id`.
    /// Association writes go through this so a prompt can never be linked
    /// to another owner's tag.
    pub async fn resolve_owned_tags(
        &self,
        owner_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<String>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; tag_ids.len()].join(", ");
        let sql = format!(
            "SELECT id FROM tags WHERE user_id = ? AND id IN ({})",
            placeholders
        );

        let mut query = sqlx::query_scalar::<_, String>(&sql).bind(owner_id);
        for id in tag_ids {
            query = query.bind(id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to resolve tags: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{test_repository, test_user};
    use crate::domain::error::AppError;

    #[tokio::test]
    async fn duplicate_name_for_same_owner_is_a_conflict() {
        let repo = test_repository().await;
        let user = test_user(&repo, "ann@example.com").await;

        repo.create_tag(&user.id, "writing", "#112233").await.unwrap();
        let err = repo
            .create_tag(&user.id, "writing", "#445566")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn same_name_under_another_owner_is_fine() {
        let repo = test_repository().await;
        let ann = test_user(&repo, "ann@example.com").await;
        let bob = test_user(&repo, "bob@example.com").await;

        repo.create_tag(&ann.id, "writing", "#112233").await.unwrap();
        assert!(repo.create_tag(&bob.id, "writing", "#112233").await.is_ok());
    }

    #[tokio::test]
    async fn list_orders_by_name() {
        let repo = test_repository().await;
        let user = test_user(&repo, "ann@example.com").await;

        repo.create_tag(&user.id, "zeta", "#112233").await.unwrap();
        repo.create_tag(&user.id, "alpha", "#112233").await.unwrap();

        let tags = repo.list_tags(&user.id).await.unwrap();
        assert_eq!(
            tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["alpha", "zeta"]
        );
    }

    #[tokio::test]
    async fn rename_onto_an_existing_name_is_a_conflict() {
        let repo = test_repository().await;
        let user = test_user(&repo, "ann@example.com").await;

        repo.create_tag(&user.id, "writing", "#112233").await.unwrap();
        let other = repo.create_tag(&user.id, "coding", "#445566").await.unwrap();

        let err = repo
            .update_tag(&other.id, "writing", &other.color)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn resolve_owned_tags_filters_foreign_ids() {
        let repo = test_repository().await;
        let ann = test_user(&repo, "ann@example.com").await;
        let bob = test_user(&repo, "bob@example.com").await;

        let mine = repo.create_tag(&ann.id, "mine", "#112233").await.unwrap();
        let theirs = repo.create_tag(&bob.id, "theirs", "#112233").await.unwrap();

        let resolved = repo
            .resolve_owned_tags(
                &ann.id,
                &[mine.id.clone(), theirs.id, "missing-id".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(resolved, vec![mine.id]);
    }
}
