pub mod context;
pub mod use_cases;

pub use context::RequestContext;
pub use use_cases::prompt_service::PromptService;
pub use use_cases::tag_service::TagService;
