//! Gatekeeper Server Entry Point
//!
//! Serves a small demo application behind the gate.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use axum::{Router, routing::get};
use gate::application::LoadCredentialsUseCase;
use gate::{
    AuthenticatedSession, GateState, InMemoryCredentialStore, InMemorySessionStore, gate_router,
    spawn_session_sweeper,
};
use kernel::error::app_error::AppError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatekeeper=info,gate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    let credentials = Arc::new(InMemoryCredentialStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());

    // A credential file that fails to load is fatal: entries before the bad
    // one would already be live
    match &settings.credentials_file {
        Some(path) => {
            let loaded = LoadCredentialsUseCase::new(credentials.clone())
                .execute_file(path)
                .await
                .map_err(AppError::from)?;
            tracing::info!(path = %path.display(), users = loaded, "Credential file loaded");
        }
        None => {
            tracing::warn!("GATE_CREDENTIALS_FILE not set, every signin will be rejected");
        }
    }

    let state = GateState::new(credentials, sessions, settings.gate);

    let _sweeper = spawn_session_sweeper(
        state.sessions.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    // Build router
    let app = gate_router(demo_app(), state).layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", settings.listen_addr);

    let listener = TcpListener::bind(settings.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// The protected application
fn demo_app() -> Router {
    Router::new().route("/", get(home))
}

async fn home(session: AuthenticatedSession) -> String {
    format!(
        "Hello, {}! Signed in from {} until {}.\n",
        session.username, session.source_address, session.expires_at
    )
}
