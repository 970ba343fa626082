use axum::{debug_handler, extract::State, response::Redirect};
use sqlx::SqlitePool;

use crate::{db, AppResult};

#[debug_handler]
pub(crate) async fn random(State(db_pool): State<SqlitePool>) -> AppResult<Redirect> {
    Ok(match db::random_joke(&db_pool).await? {
        Some(joke) => Redirect::to(&format!("/jokes/{}", joke.uuid)),
        None => Redirect::to("/jokes"),
    })
}
