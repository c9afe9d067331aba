use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::tag::Tag;

/// A stored prompt template. `content` may contain `{{variable}}`
/// placeholders; they are opaque to the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A prompt as callers see it: the prompt_tags join rows flattened into
/// a plain tag list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptView {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptInput {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub tag_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptInput {
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub tag_ids: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPromptsInput {
    #[serde(default)]
    pub search: Option<String>,
}

/// Result of prompt.create. The primary insert is strict; tag linking is
/// best-effort, so linking problems surface here instead of failing the
/// whole operation.
#[derive(Debug, Serialize)]
pub struct PromptCreateOutcome {
    pub prompt: PromptView,
    pub warnings: Vec<String>,
}
