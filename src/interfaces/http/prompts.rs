use actix_web::{web, HttpRequest};

use crate::domain::error::AppError;
use crate::domain::prompt::{
    CreatePromptInput, ListPromptsInput, PromptCreateOutcome, PromptView, UpdatePromptInput,
};

use super::auth::request_context;
use super::state::AppState;
use super::{IdInput, Success};

type Result<T> = std::result::Result<T, AppError>;

pub async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<ListPromptsInput>,
) -> Result<web::Json<Vec<PromptView>>> {
    let ctx = request_context(&state, &req).await?;
    state.prompts.list(&ctx, &input).await.map(web::Json)
}

pub async fn get(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<IdInput>,
) -> Result<web::Json<PromptView>> {
    let ctx = request_context(&state, &req).await?;
    state.prompts.get(&ctx, &input.id).await.map(web::Json)
}

pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<CreatePromptInput>,
) -> Result<web::Json<PromptCreateOutcome>> {
    let ctx = request_context(&state, &req).await?;
    tracing::info!(title = %input.title, "Creating prompt");
    state.prompts.create(&ctx, &input).await.map(web::Json)
}

pub async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<UpdatePromptInput>,
) -> Result<web::Json<PromptView>> {
    let ctx = request_context(&state, &req).await?;
    state.prompts.update(&ctx, &input).await.map(web::Json)
}

pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<IdInput>,
) -> Result<web::Json<Success>> {
    let ctx = request_context(&state, &req).await?;
    state.prompts.delete(&ctx, &input.id).await?;
    Ok(web::Json(Success { success: true }))
}

pub async fn toggle_favorite(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<IdInput>,
) -> Result<web::Json<PromptView>> {
    let ctx = request_context(&state, &req).await?;
    state
        .prompts
        .toggle_favorite(&ctx, &input.id)
        .await
        .map(web::Json)
}
