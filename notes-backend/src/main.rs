use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod auth;
mod config;
mod controllers;
mod error;
mod middleware;
mod models;
mod notes;
mod sessions;
mod views;

use auth::{Authenticator, Credential};
use config::Config;
use notes::{NoteFileStore, NoteRepository};
use sessions::SessionStore;

pub struct AppState {
    pub config: Config,
    /// The note collection, loaded once at startup and written through on every append
    pub notes: Arc<NoteRepository>,
    pub authenticator: Arc<Authenticator>,
    /// Browser sessions keyed by cookie token
    pub sessions: Arc<SessionStore>,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

impl AppState {
    pub fn new(config: Config, credential: Credential) -> Self {
        let notes = NoteRepository::open(NoteFileStore::new(config.notes_file.clone()));
        let sessions = SessionStore::new(config.session_ttl());

        Self {
            notes: Arc::new(notes),
            authenticator: Arc::new(Authenticator::new(credential)),
            sessions: Arc::new(sessions),
            started_at: std::time::Instant::now(),
            config,
        }
    }
}

fn invalid_input(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        invalid_input(e)
    })?;

    let credential = Credential::from_config(&config).map_err(|e| {
        log::error!("Failed to set up the login credential: {}", e);
        invalid_input(e)
    })?;
    log::info!(
        "Login account: {} (password from {})",
        credential.username(),
        config.password.describe()
    );

    let state = web::Data::new(AppState::new(config.clone(), credential));
    log::info!(
        "Loaded {} notes from {:?}",
        state.notes.len(),
        state.notes.store().path()
    );

    let bind = (config.host.clone(), config.port);
    log::info!("Listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(controllers::routes)
    })
    .bind(bind)?
    .run()
    .await
}
