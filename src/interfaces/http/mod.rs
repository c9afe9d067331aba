//! JSON RPC-over-HTTP surface: one POST route per gateway operation,
//! mirroring the operation names callers use (`prompt.list`,
//! `tag.create`, ...). Queries and mutations alike take a JSON body and
//! return either the shaped result or the error envelope
//! `{"error": {"code", "message"}}`.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use serde::{Deserialize, Serialize};

use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

pub mod auth;
pub mod prompts;
pub mod state;
pub mod tags;

use state::AppState;

#[derive(Debug, Deserialize)]
pub struct IdInput {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": { "code": self.code(), "message": self.message() }
        }))
    }
}

async fn health() -> web::Json<serde_json::Value> {
    web::Json(serde_json::json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/rpc")
            .route("/auth.me", web::get().to(auth::me))
            .route("/prompt.list", web::post().to(prompts::list))
            .route("/prompt.get", web::post().to(prompts::get))
            .route("/prompt.create", web::post().to(prompts::create))
            .route("/prompt.update", web::post().to(prompts::update))
            .route("/prompt.delete", web::post().to(prompts::delete))
            .route(
                "/prompt.toggleFavorite",
                web::post().to(prompts::toggle_favorite),
            )
            .route("/tag.list", web::post().to(tags::list))
            .route("/tag.create", web::post().to(tags::create))
            .route("/tag.update", web::post().to(tags::update))
            .route("/tag.delete", web::post().to(tags::delete)),
    );
}

pub async fn serve(state: Arc<AppState>, config: &AppConfig) -> std::io::Result<()> {
    let data = web::Data::from(state);
    let cors_origin = config.cors_origin.clone();

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };
        App::new()
            .app_data(data.clone())
            .wrap(cors)
            .configure(configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
