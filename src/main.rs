use anyhow::Context;
use axum::{
    debug_handler,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use jokebox::{auth, config::Config, db, include_res, jokes, res, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(30)));

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to open the database")?;
    db::migrate(&db_pool).await.context("migration failed")?;

    let app_state = AppState { db_pool };

    let app = Router::new()
        .route("/", get(home))
        .route("/jokes.rss", get(jokes::feed))
        .route("/styles.css", get(res::styles))

        .merge(auth::router())
        .nest("/jokes", jokes::router())

        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[debug_handler]
async fn home() -> impl IntoResponse {
    Html(include_res!(str, "/pages/index.html"))
}
