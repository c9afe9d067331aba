use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_TAG_COLOR: &str = "#6366f1";

pub static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// A user-scoped label. Names are unique per owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagInput {
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(regex(path = *HEX_COLOR, message = "color must be a #RRGGBB hex code"))]
    pub color: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagInput {
    pub id: String,
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(regex(path = *HEX_COLOR, message = "color must be a #RRGGBB hex code"))]
    pub color: Option<String>,
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}
