//! Weight tracker web binary: configuration, database pool, session layer,
//! and the axum router. All domain logic lives in the `api` crate; this
//! crate is request plumbing and page rendering.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use api::Store;

mod config;
mod error;
mod flash;
mod forms;
mod routes;
mod views;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,web=debug")),
        )
        .init();

    let config = config::Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Schema setup is idempotent and runs on every boot.
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to run session store migrations");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into().unwrap(),
        ))
        .with_signed(Key::derive_from(config.session_secret.as_bytes()));

    let state = AppState {
        store: Store::new(pool),
    };

    let app = Router::new()
        .route("/", get(routes::dashboard))
        .route(
            "/register",
            get(routes::register_form).post(routes::register_submit),
        )
        .route("/login", get(routes::login_form).post(routes::login_submit))
        .route("/logout", get(routes::logout))
        .route("/settings", post(routes::update_settings))
        .route("/add", post(routes::add_weight))
        .route(
            "/edit/{entry_id}",
            get(routes::edit_form).post(routes::edit_submit),
        )
        .route("/delete/{entry_id}", get(routes::delete_weight))
        .with_state(state)
        .layer(session_layer);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server stopped unexpectedly");
}
