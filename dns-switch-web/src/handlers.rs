//! HTTP routes

use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use dns_switch_core::{RecordStatus, ServiceContext, StatusService, ToggleAction, ToggleService};

use crate::error::ApiError;
use crate::view;

/// Shared, read-only application state.
pub struct AppState {
    pub status: StatusService,
    pub toggle: ToggleService,
    pub records: usize,
}

impl AppState {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            records: ctx.catalog.len(),
            status: StatusService::new(Arc::clone(&ctx)),
            toggle: ToggleService::new(ctx),
        }
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(refresh_status)
        .service(toggle_domain)
        .service(health);
}

/// Malformed JSON bodies become 400 with the usual failure body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("invalid request body: {err}")).into()
    })
}

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    record_id: String,
    action: String,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    status: &'static str,
    /// 回读到的状态，可能尚未生效
    new_status: Option<RecordStatus>,
    requested_status: RecordStatus,
}

/// GET / -- status page
#[get("/")]
async fn index(state: web::Data<AppState>) -> HttpResponse {
    let snapshot = state.status.snapshot().await;
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view::render_index(&snapshot))
}

/// GET /refresh_status -- status as JSON
#[get("/refresh_status")]
async fn refresh_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.status.snapshot().await)
}

/// POST /toggle_domain -- start or stop one record
#[post("/toggle_domain")]
async fn toggle_domain(
    state: web::Data<AppState>,
    body: web::Json<ToggleRequest>,
) -> Result<HttpResponse, ApiError> {
    let ToggleRequest { record_id, action } = body.into_inner();

    let record_id = record_id.trim();
    if record_id.is_empty() {
        return Err(ApiError::BadRequest("record_id is required".to_string()));
    }
    let action: ToggleAction = action.trim().parse()?;

    let outcome = state.toggle.toggle(record_id, action).await;
    if !outcome.success {
        let reason = outcome
            .error
            .map_or_else(|| "toggle failed".to_string(), |e| e.to_string());
        return Err(ApiError::ToggleFailed(reason));
    }

    Ok(HttpResponse::Ok().json(ToggleResponse {
        status: "success",
        new_status: outcome.confirmed_status,
        requested_status: outcome.requested_status,
    }))
}

/// GET /health -- liveness and catalog size
#[get("/health")]
async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "records": state.records,
    }))
}
