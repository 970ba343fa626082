mod login;
mod logout;
mod passwd;

use axum::{routing::get, Router};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{db::User, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/logout", get(logout::logout).post(logout::logout))
}

pub(crate) async fn create_user(
    db_pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, sqlx::Error> {
    let uuid = Uuid::now_v7().to_string();
    let (salt, hash) = passwd::hash(password);

    tracing::info!("adding @{username}#{uuid}");
    sqlx::query(
        "INSERT INTO users (uuid,username,pass_salt,pass_hash,created_at) VALUES (?,?,?,?,?)",
    )
    .bind(&uuid)
    .bind(username)
    .bind(salt)
    .bind(hash)
    .bind(OffsetDateTime::now_utc())
    .execute(db_pool)
    .await?;

    Ok(User {
        uuid,
        username: username.to_owned(),
    })
}
