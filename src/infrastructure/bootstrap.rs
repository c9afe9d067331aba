use std::sync::Arc;

use tracing::info;

use crate::application::{PromptService, TagService};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::connection::init_vault_db;
use crate::infrastructure::db::repository::VaultRepository;
use crate::infrastructure::security::sessions::SessionService;
use crate::interfaces::http::state::AppState;

/// Wire the process-wide state: pool, repository, services.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let pool = init_vault_db(&config.database_url).await?;
    info!(database_url = %config.database_url, "database ready");

    let repo = Arc::new(VaultRepository::new(pool));

    Ok(AppState {
        prompts: PromptService::new(repo.clone()),
        tags: TagService::new(repo.clone()),
        sessions: SessionService::new(repo),
    })
}
