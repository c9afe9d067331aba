use actix_web::{web, HttpRequest};

use crate::domain::error::AppError;
use crate::domain::tag::{CreateTagInput, Tag, UpdateTagInput};

use super::auth::request_context;
use super::state::AppState;
use super::{IdInput, Success};

type Result<T> = std::result::Result<T, AppError>;

pub async fn list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<web::Json<Vec<Tag>>> {
    let ctx = request_context(&state, &req).await?;
    state.tags.list(&ctx).await.map(web::Json)
}

pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<CreateTagInput>,
) -> Result<web::Json<Tag>> {
    let ctx = request_context(&state, &req).await?;
    state.tags.create(&ctx, &input).await.map(web::Json)
}

pub async fn update(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<UpdateTagInput>,
) -> Result<web::Json<Tag>> {
    let ctx = request_context(&state, &req).await?;
    state.tags.update(&ctx, &input).await.map(web::Json)
}

pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<IdInput>,
) -> Result<web::Json<Success>> {
    let ctx = request_context(&state, &req).await?;
    state.tags.delete(&ctx, &input.id).await?;
    Ok(web::Json(Success { success: true }))
}
