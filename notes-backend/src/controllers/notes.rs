//! Note routes: the gated listing page, the add-note form and a JSON listing.

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{html, redirect};
use crate::error::NoteError;
use crate::middleware::{require_login, require_login_json};
use crate::models::{Flash, Note};
use crate::sessions::SessionContext;
use crate::{views, AppState};

pub const EMPTY_FIELDS_MESSAGE: &str = "Please fill in all fields.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save the note. Please try again.";
pub const NOTE_TOO_LARGE_MESSAGE: &str = "The note is too large to save.";
pub const UNREADABLE_FORM_MESSAGE: &str = "The note form could not be read. Please try again.";

/// Largest accepted url-encoded add-note body. Non-Latin text expands to
/// about six bytes per character once encoded.
pub const MAX_NOTE_FORM_BYTES: usize = 4 * 1024 * 1024;

#[derive(Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Serialize)]
struct ListNotesResponse {
    success: bool,
    notes: Vec<Note>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
    cfg.service(
        web::resource("/add_note")
            .app_data(
                web::FormConfig::default()
                    .limit(MAX_NOTE_FORM_BYTES)
                    .error_handler(note_form_error),
            )
            .route(web::get().to(add_note_page))
            .route(web::post().to(add_note)),
    );
    cfg.service(web::resource("/api/notes").route(web::get().to(list_notes_json)));
}

/// List every note, oldest first
async fn index(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    let session = match require_login(&data, &ctx) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let notes = data.notes.list();
    let flashes = data.sessions.take_flashes(&ctx.token);
    html(&data, &ctx, StatusCode::OK, views::index_page(&session, &flashes, &notes))
}

async fn add_note_page(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    let session = match require_login(&data, &ctx) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let flashes = data.sessions.take_flashes(&ctx.token);
    html(&data, &ctx, StatusCode::OK, views::add_note_page(&session, &flashes))
}

async fn add_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<NoteForm>,
) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    let session = match require_login(&data, &ctx) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let form = form.into_inner();
    let author = session.current_user().unwrap_or_default().to_string();
    let notes = Arc::clone(&data.notes);
    let outcome = web::block(move || notes.append(&form.title, &form.content, &author)).await;

    let status = match outcome {
        Ok(Ok(_)) => {
            data.sessions
                .push_flash(&ctx.token, Flash::success("Note added successfully!"));
            return redirect(&data, &ctx, "/");
        }
        Ok(Err(NoteError::Validation(_))) => {
            data.sessions
                .push_flash(&ctx.token, Flash::danger(EMPTY_FIELDS_MESSAGE));
            StatusCode::OK
        }
        Ok(Err(NoteError::Storage(e))) => {
            log::error!("[NOTES] Note was not saved: {}", e);
            data.sessions
                .push_flash(&ctx.token, Flash::danger(SAVE_FAILED_MESSAGE));
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Err(e) => {
            log::error!("[NOTES] Append worker failed: {}", e);
            data.sessions
                .push_flash(&ctx.token, Flash::danger(SAVE_FAILED_MESSAGE));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let flashes = data.sessions.take_flashes(&ctx.token);
    html(&data, &ctx, status, views::add_note_page(&session, &flashes))
}

/// Turn a rejected add-note body into a flash and send the user back to the form
fn note_form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    let Some(data) = req.app_data::<web::Data<AppState>>() else {
        return err.into();
    };

    let ctx = SessionContext::resolve(&data.sessions, req);
    let resp = match require_login(data, &ctx) {
        Err(resp) => resp,
        Ok(_) => {
            log::warn!("[NOTES] Rejected add-note form: {}", err);
            let message = match err {
                UrlencodedError::Overflow { .. } => NOTE_TOO_LARGE_MESSAGE,
                _ => UNREADABLE_FORM_MESSAGE,
            };
            data.sessions.push_flash(&ctx.token, Flash::danger(message));
            redirect(data, &ctx, "/add_note")
        }
    };
    InternalError::from_response(err, resp).into()
}

async fn list_notes_json(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let ctx = SessionContext::resolve(&data.sessions, &req);
    if let Err(resp) = require_login_json(&data, &ctx) {
        return resp;
    }

    HttpResponse::Ok().json(ListNotesResponse {
        success: true,
        notes: data.notes.list(),
    })
}
