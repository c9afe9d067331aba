use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::domain::error::Result;
use crate::domain::user::User;
use crate::infrastructure::db::repository::VaultRepository;

/// Resolves bearer tokens to users. Tokens are minted by the external
/// OAuth flow; only their SHA-256 digests ever touch the database, so a
/// leaked sessions table does not leak usable credentials.
pub struct SessionService {
    repo: Arc<VaultRepository>,
}

impl SessionService {
    pub fn new(repo: Arc<VaultRepository>) -> Self {
        Self { repo }
    }

    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    pub async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let user = self.repo.user_for_token_hash(&Self::hash_token(token)).await?;
        if user.is_none() {
            tracing::debug!("session token did not resolve to a live session");
        }
        Ok(user)
    }
}
