use axum::{
    debug_handler,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    include_res, res,
    session::{RETURN_URL, USER_ID},
    AppResult,
};

use super::passwd;

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    login_type: LoginType,
    username: String,
    password: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LoginType {
    Login,
    Register,
}

#[debug_handler]
pub(crate) async fn login_page(
    Query(LoginQuery { return_url }): Query<LoginQuery>,
    session: Session,
) -> AppResult<Response> {
    if let Some(return_url) = return_url {
        session.insert(RETURN_URL, return_url).await?;
    }

    Ok(Html(render_form("")).into_response())
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(LoginForm {
        login_type,
        username,
        password,
    }): Form<LoginForm>,
) -> AppResult<Response> {
    if username.len() < 3 {
        return reject("Usernames must be at least 3 characters long");
    }
    if password.len() < 6 {
        return reject("Passwords must be at least 6 characters long");
    }

    let user_id = match login_type {
        LoginType::Login => {
            let row: Option<(String, String, String)> =
                sqlx::query_as("SELECT uuid,pass_salt,pass_hash FROM users WHERE username=?")
                    .bind(&username)
                    .fetch_optional(&db_pool)
                    .await?;

            match row {
                Some((uuid, salt, hash)) if passwd::verify(&password, &salt, &hash) => uuid,
                _ => {
                    tracing::warn!("rejected login for @{username}");
                    return reject("Username/password combination is incorrect");
                }
            }
        }
        LoginType::Register => {
            let taken = sqlx::query("SELECT 1 FROM users WHERE username=?")
                .bind(&username)
                .fetch_optional(&db_pool)
                .await?
                .is_some();
            if taken {
                return reject("A user with that username already exists");
            }

            super::create_user(&db_pool, &username, &password).await?.uuid
        }
    };

    session.insert(USER_ID, &user_id).await?;
    tracing::info!("welcome @{username}#{user_id}");

    let return_url: Option<String> = session.remove(RETURN_URL).await?;
    Ok(Redirect::to(return_url.as_deref().unwrap_or("/jokes")).into_response())
}

fn reject(error: &str) -> AppResult<Response> {
    Ok((StatusCode::BAD_REQUEST, Html(render_form(error))).into_response())
}

fn render_form(error: &str) -> String {
    include_res!(str, "/pages/login.html").replace("{error}", &res::escape(error))
}
