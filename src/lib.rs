pub mod auth;
pub mod config;
pub mod db;
pub mod jokes;
pub mod res;
pub mod session;

mod appresult;

pub use appresult::{AppError, AppResult};

use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}
