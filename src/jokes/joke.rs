use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{db, include_res, res, session, AppResult};

#[debug_handler]
pub(crate) async fn joke(
    Path(uuid): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(joke) = db::find_joke(&db_pool, &uuid.to_string()).await? else {
        return res::sorry("joke");
    };

    let user = session::current_user(&session, &db_pool).await?;
    let is_owner = user.as_ref().is_some_and(|user| user.uuid == joke.jokester_id);

    let delete_form = if is_owner {
        include_res!(str, "/pages/jokes/delete_form.html").replace("{uuid}", &joke.uuid)
    } else {
        String::new()
    };

    Ok(Html(
        include_res!(str, "/pages/jokes/joke.html")
            .replace("{delete_form}", &delete_form)
            .replace("{name}", &res::escape(&joke.name))
            .replace("{content}", &res::markdown_to_html(&joke.content)),
    )
    .into_response())
}

#[debug_handler]
pub(crate) async fn delete(
    Path(uuid): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return res::sorry("joke");
    };

    // non-owners get the same page as a missing joke
    if !db::delete_joke(&db_pool, &uuid.to_string(), &user.uuid).await? {
        return res::sorry("joke");
    }

    tracing::info!("@{} deleted joke {uuid}", user.username);
    Ok(Redirect::to("/jokes").into_response())
}
