use axum::{debug_handler, extract::State, http::header, response::IntoResponse};
use sqlx::SqlitePool;
use time::format_description::well_known::Rfc2822;

use crate::{
    db::{self, Joke},
    res, AppResult,
};

#[debug_handler]
pub async fn feed(State(db_pool): State<SqlitePool>) -> AppResult<impl IntoResponse> {
    let jokes = db::recent_jokes(&db_pool, 100).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        build_feed(&jokes)?,
    ))
}

fn build_feed(jokes: &[Joke]) -> AppResult<String> {
    let mut items = String::new();
    for joke in jokes {
        items += &format!(
            "<item><title>{}</title><link>/jokes/{}</link><pubDate>{}</pubDate></item>",
            res::escape(&joke.name),
            joke.uuid,
            joke.created_at.format(&Rfc2822)?,
        );
    }

    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <rss version=\"2.0\"><channel>\
         <title>Jokebox</title>\
         <link>/jokes</link>\
         <description>Some funny jokes</description>\
         {items}\
         </channel></rss>"
    ))
}
