use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db, include_res, res, session, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct NewJokeForm {
    name: String,
    content: String,
}

#[debug_handler]
pub(crate) async fn new_joke_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_none() {
        return Ok(Redirect::to("/login?return_url=/jokes/new").into_response());
    }

    Ok(Html(render_form("", "", "")).into_response())
}

#[debug_handler]
pub(crate) async fn new_joke(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(NewJokeForm { name, content }): Form<NewJokeForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &db_pool).await? else {
        return Ok(Redirect::to("/login?return_url=/jokes/new").into_response());
    };

    if let Some(error) = validate(&name, &content) {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(render_form(error, &name, &content)),
        )
            .into_response());
    }

    let uuid = db::insert_joke(&db_pool, &user.uuid, &name, &content).await?;
    tracing::info!("@{} added joke {uuid}", user.username);

    Ok(Redirect::to(&format!("/jokes/{uuid}")).into_response())
}

pub(crate) fn validate(name: &str, content: &str) -> Option<&'static str> {
    if name.trim().len() < 3 {
        return Some("That joke's name is too short");
    }
    if content.trim().len() < 10 {
        return Some("That joke is too short");
    }
    None
}

fn render_form(error: &str, name: &str, content: &str) -> String {
    include_res!(str, "/pages/jokes/new_joke.html")
        .replace("{error}", &res::escape(error))
        .replace("{name}", &res::escape(name))
        .replace("{content}", &res::escape(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_and_contents_are_rejected() {
        assert!(validate("ha", "long enough content").is_some());
        assert!(validate("worm joke", "short").is_some());
        assert!(validate("   ab   ", "long enough content").is_some());
    }

    #[test]
    fn reasonable_jokes_pass() {
        assert!(validate("Road worker", "I never wanted to believe it.").is_none());
    }
}
