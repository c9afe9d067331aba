use crate::application::{PromptService, TagService};
use crate::infrastructure::security::sessions::SessionService;

/// Process-wide state shared with every handler. Services own the
/// repository behind an `Arc`; nothing here is request-scoped.
pub struct AppState {
    pub prompts: PromptService,
    pub tags: TagService,
    pub sessions: SessionService,
}
