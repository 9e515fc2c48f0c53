use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use super::{html, redirect};
use crate::auth::Authenticator;
use crate::error::AuthError;
use crate::models::Flash;
use crate::sessions::SessionContext;
use crate::{views, AppState};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    );
    cfg.service(web::resource("/logout").route(web::get().to(logout)));
}

/// Render the login form, or skip it when already logged in
async fn login_page(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    let session = data.sessions.get(&ctx.token);
    if session.logged_in {
        return redirect(&data, &ctx, "/");
    }

    let flashes = data.sessions.take_flashes(&ctx.token);
    html(&data, &ctx, StatusCode::OK, views::login_page(&session, &flashes))
}

async fn login(
    data: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let mut ctx = SessionContext::resolve(&data.sessions, &req);
    let form = form.into_inner();

    // Password hashing is CPU bound; keep it off the async workers
    let authenticator = Arc::clone(&data.authenticator);
    let mut session = data.sessions.get(&ctx.token);
    let outcome = web::block(move || {
        let result = authenticator.login(&mut session, &form.username, &form.password);
        (session, result)
    })
    .await;

    match outcome {
        Ok((session, Ok(()))) => {
            ctx.rotate(&data.sessions);
            data.sessions.purge_expired();
            let username = session.username.clone().unwrap_or_default();
            data.sessions.update(&ctx.token, move |s| *s = session);
            data.sessions.push_flash(
                &ctx.token,
                Flash::success(format!("Logged in successfully! Welcome, {}.", username)),
            );
            redirect(&data, &ctx, "/")
        }
        Ok((_, Err(AuthError::InvalidCredentials))) => {
            data.sessions
                .push_flash(&ctx.token, Flash::danger("Invalid username or password."));
            redirect(&data, &ctx, "/login")
        }
        Ok((_, Err(e))) => {
            log::error!("[AUTH] Login failed unexpectedly: {}", e);
            data.sessions
                .push_flash(&ctx.token, Flash::danger("Login is unavailable right now."));
            redirect(&data, &ctx, "/login")
        }
        Err(e) => {
            log::error!("[AUTH] Login worker failed: {}", e);
            data.sessions
                .push_flash(&ctx.token, Flash::danger("Login is unavailable right now."));
            redirect(&data, &ctx, "/login")
        }
    }
}

async fn logout(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    data.sessions.update(&ctx.token, Authenticator::logout);
    data.sessions
        .push_flash(&ctx.token, Flash::info("Logged out successfully."));
    redirect(&data, &ctx, "/login")
}
