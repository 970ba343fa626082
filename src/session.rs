use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, User},
    AppResult,
};

pub const USER_ID: &str = "user_id";
pub const RETURN_URL: &str = "return_url";

/// Resolves the logged-in user, if any. A session pointing at a user row that
/// no longer exists counts as logged out.
pub async fn current_user(session: &Session, db_pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(None);
    };

    Ok(db::find_user(db_pool, &user_id).await?)
}
