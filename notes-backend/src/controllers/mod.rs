pub mod auth;
pub mod health;
pub mod notes;

use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::sessions::SessionContext;
use crate::AppState;

/// Register every route of the application
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config_routes)
        .configure(auth::config)
        .configure(notes::config);
}

/// 302 to `location`, carrying the session cookie when it is new
pub fn redirect(state: &AppState, ctx: &SessionContext, location: &str) -> HttpResponse {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    ctx.apply(&mut builder, &state.sessions, state.config.secure_cookies);
    builder.finish()
}

/// Rendered page, carrying the session cookie when it is new
pub fn html(state: &AppState, ctx: &SessionContext, status: StatusCode, body: String) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    builder.content_type(ContentType::html());
    ctx.apply(&mut builder, &state.sessions, state.config.secure_cookies);
    builder.body(body)
}
