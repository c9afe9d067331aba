use actix_web::http::header;
use actix_web::{web, HttpRequest};

use crate::application::RequestContext;
use crate::domain::error::{AppError, Result};
use crate::domain::user::User;

use super::state::AppState;

/// Resolve the caller from the `Authorization: Bearer <token>` header.
/// A missing, malformed or unknown token yields an anonymous context;
/// the operation itself decides whether that is acceptable.
pub async fn request_context(state: &AppState, req: &HttpRequest) -> Result<RequestContext> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(RequestContext::anonymous());
    };
    let Ok(text) = value.to_str() else {
        return Ok(RequestContext::anonymous());
    };
    let Some(token) = text.strip_prefix("Bearer ") else {
        return Ok(RequestContext::anonymous());
    };

    Ok(match state.sessions.resolve(token.trim()).await? {
        Some(user) => RequestContext::authenticated(user),
        None => RequestContext::anonymous(),
    })
}

pub async fn me(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> std::result::Result<web::Json<User>, AppError> {
    let ctx = request_context(&state, &req).await?;
    Ok(web::Json(ctx.require_user()?.clone()))
}
