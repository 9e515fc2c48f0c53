//! Public status endpoints. Nothing here needs a session.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::notes::file_ops;
use crate::AppState;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    /// False when the notes file's location cannot be created, so saves would fail
    storage_ready: bool,
}

#[derive(Serialize)]
struct ConfigStatus {
    note_count: usize,
    credential_source: &'static str,
    secure_cookies: bool,
    session_ttl_hours: i64,
    uptime_secs: u64,
}

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/health/config").route(web::get().to(config_status)));
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    let storage_ready = file_ops::parent_is_usable(state.notes.store().path());

    HttpResponse::Ok().json(HealthStatus {
        status: if storage_ready { "ok" } else { "degraded" },
        version: APP_VERSION,
        storage_ready,
    })
}

async fn version() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "version": APP_VERSION }))
}

async fn config_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ConfigStatus {
        note_count: state.notes.len(),
        credential_source: state.config.password.describe(),
        secure_cookies: state.config.secure_cookies,
        session_ttl_hours: state.config.session_ttl_hours,
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
