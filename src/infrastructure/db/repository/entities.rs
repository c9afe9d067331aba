use crate::domain::prompt::Prompt;
use crate::domain::tag::Tag;
use crate::domain::user::User;

fn parse_timestamp(raw: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}

#[derive(sqlx::FromRow)]
pub(super) struct PromptEntity {
    id: String,
    user_id: String,
    title: String,
    content: String,
    description: Option<String>,
    is_public: bool,
    is_favorite: bool,
    created_at: String,
    updated_at: String,
}

impl From<PromptEntity> for Prompt {
    fn from(entity: PromptEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            content: entity.content,
            description: entity.description,
            is_public: entity.is_public,
            is_favorite: entity.is_favorite,
            created_at: parse_timestamp(&entity.created_at),
            updated_at: parse_timestamp(&entity.updated_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct TagEntity {
    id: String,
    user_id: String,
    name: String,
    color: String,
    created_at: String,
}

impl From<TagEntity> for Tag {
    fn from(entity: TagEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            color: entity.color,
            created_at: parse_timestamp(&entity.created_at),
        }
    }
}

/// One prompt_tags join row with its tag columns, used when shaping
/// several prompts in a single query.
#[derive(sqlx::FromRow)]
pub(super) struct TagLinkEntity {
    pub(super) prompt_id: String,
    tag_id: String,
    tag_user_id: String,
    tag_name: String,
    tag_color: String,
    tag_created_at: String,
}

impl From<TagLinkEntity> for Tag {
    fn from(entity: TagLinkEntity) -> Self {
        Self {
            id: entity.tag_id,
            user_id: entity.tag_user_id,
            name: entity.tag_name,
            color: entity.tag_color,
            created_at: parse_timestamp(&entity.tag_created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct UserEntity {
    id: String,
    email: String,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
        }
    }
}
