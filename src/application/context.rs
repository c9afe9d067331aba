use crate::domain::error::{AppError, Result};
use crate::domain::user::User;

/// Per-request context: the caller identity resolved from the session
/// token, if any. Built once by the transport layer and passed into
/// every gateway operation; nothing here is ambient or global.
#[derive(Debug, Clone)]
pub struct RequestContext {
    user: Option<User>,
}

impl RequestContext {
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Every operation calls this before touching storage.
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or_else(|| {
            AppError::Unauthorized("You must be logged in to access this resource".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_context_is_rejected() {
        let ctx = RequestContext::anonymous();
        assert!(matches!(
            ctx.require_user(),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn authenticated_context_exposes_user() {
        let ctx = RequestContext::authenticated(User {
            id: "user-1".to_string(),
            email: "ann@example.com".to_string(),
        });
        assert_eq!(ctx.require_user().unwrap().id, "user-1");
    }
}
