use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, JokeListItem, SortOrder, User},
    include_res, res, session, AppResult,
};

/// The filter form resubmits these via GET, so the names stay camelCase on
/// the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JokesQuery {
    pub(crate) user_id: Option<String>,
    pub(crate) search_query: Option<String>,
    pub(crate) sort_order: Option<String>,
}

pub(crate) struct JokesPage {
    pub(crate) joke_list_items: Vec<JokeListItem>,
    pub(crate) user: Option<User>,
    pub(crate) users: Vec<User>,
    pub(crate) selected_user_id: Option<String>,
}

/// Loader for the listing page: the full user list for the selector, plus the
/// jokes of the selected (or logged-in) jokester, filtered and sorted. Without
/// a logged-in user the joke list is empty no matter what the query says.
pub(crate) async fn load(
    db_pool: &SqlitePool,
    user: Option<User>,
    query: &JokesQuery,
) -> AppResult<JokesPage> {
    // an empty userId is the same as no userId
    let selected_user_id = query.user_id.clone().filter(|id| !id.is_empty());
    let search_query = query.search_query.as_deref().unwrap_or("");
    let sort_order = SortOrder::parse(query.sort_order.as_deref());

    let users = db::all_users(db_pool).await?;

    let joke_list_items = match &user {
        Some(user) => {
            let jokester_id = selected_user_id.as_deref().unwrap_or(&user.uuid);
            db::jokes_for(db_pool, jokester_id, search_query, sort_order).await?
        }
        None => Vec::new(),
    };

    Ok(JokesPage {
        joke_list_items,
        user,
        users,
        selected_user_id,
    })
}

#[debug_handler]
pub(crate) async fn jokes(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<JokesQuery>,
) -> AppResult<Response> {
    let user = session::current_user(&session, &db_pool).await?;
    let page = load(&db_pool, user, &query).await?;

    Ok(Html(render(&page, &query)).into_response())
}

fn render(page: &JokesPage, query: &JokesQuery) -> String {
    let mut user_options = String::new();
    for user in &page.users {
        let selected = Some(user.uuid.as_str()) == page.selected_user_id.as_deref();
        user_options += &include_res!(str, "/pages/jokes/user_option.html")
            .replace("{uuid}", &res::escape(&user.uuid))
            .replace("{username}", &res::escape(&user.username))
            .replace("{selected}", if selected { "selected" } else { "" });
    }

    let mut joke_items = String::new();
    for joke in &page.joke_list_items {
        joke_items += &include_res!(str, "/pages/jokes/joke_item.html")
            .replace("{uuid}", &res::escape(&joke.uuid))
            .replace("{name}", &res::escape(&joke.name));
    }
    if page.joke_list_items.is_empty() {
        joke_items += "<li>No jokes found</li>";
    }

    let user_info = match &page.user {
        Some(user) => include_res!(str, "/pages/jokes/user_info.html")
            .replace("{username}", &res::escape(&user.username)),
        None => r#"<a href="/login">Login</a>"#.to_string(),
    };

    let sort_order = SortOrder::parse(query.sort_order.as_deref());

    include_res!(str, "/pages/jokes/jokes.html")
        .replace("{user_info}", &user_info)
        .replace("{user_options}", &user_options)
        .replace(
            "{search_query}",
            &res::escape(query.search_query.as_deref().unwrap_or("")),
        )
        .replace(
            "{desc_selected}",
            if sort_order == SortOrder::Desc { "selected" } else { "" },
        )
        .replace(
            "{asc_selected}",
            if sort_order == SortOrder::Asc { "selected" } else { "" },
        )
        .replace("{joke_items}", &joke_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::*;

    fn query(user_id: Option<&str>, search: Option<&str>, sort: Option<&str>) -> JokesQuery {
        JokesQuery {
            user_id: user_id.map(str::to_owned),
            search_query: search.map(str::to_owned),
            sort_order: sort.map(str::to_owned),
        }
    }

    fn kody() -> User {
        User {
            uuid: "u1".to_owned(),
            username: "kody".to_owned(),
        }
    }

    fn names(page: &JokesPage) -> Vec<&str> {
        page.joke_list_items
            .iter()
            .map(|joke| joke.name.as_str())
            .collect()
    }

    async fn seeded_pool() -> SqlitePool {
        let db_pool = pool().await;
        seed_user(&db_pool, "u1", "kody").await;
        seed_user(&db_pool, "u2", "mr_bean").await;
        seed_joke(&db_pool, "u1", "Road worker").await;
        seed_joke(&db_pool, "u1", "Banana phone").await;
        seed_joke(&db_pool, "u2", "Frisbee").await;
        db_pool
    }

    #[tokio::test]
    async fn anonymous_visitors_get_no_jokes_but_still_see_the_user_list() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, None, &query(Some("u1"), None, None))
            .await
            .unwrap();

        assert!(page.joke_list_items.is_empty());
        assert!(page.user.is_none());
        assert_eq!(page.users.len(), 2);
    }

    #[tokio::test]
    async fn defaults_to_the_logged_in_users_jokes_descending() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, Some(kody()), &query(None, None, None))
            .await
            .unwrap();

        assert_eq!(names(&page), ["Road worker", "Banana phone"]);
        assert_eq!(page.selected_user_id, None);
    }

    #[tokio::test]
    async fn user_id_parameter_overrides_the_logged_in_user() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, Some(kody()), &query(Some("u2"), None, None))
            .await
            .unwrap();

        assert_eq!(names(&page), ["Frisbee"]);
        assert_eq!(page.selected_user_id.as_deref(), Some("u2"));
    }

    #[tokio::test]
    async fn empty_user_id_counts_as_absent() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, Some(kody()), &query(Some(""), None, None))
            .await
            .unwrap();

        assert_eq!(names(&page), ["Road worker", "Banana phone"]);
        assert_eq!(page.selected_user_id, None);
    }

    #[tokio::test]
    async fn search_narrows_and_asc_reorders() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, Some(kody()), &query(None, Some("an"), None))
            .await
            .unwrap();
        assert_eq!(names(&page), ["Banana phone"]);

        let page = load(&db_pool, Some(kody()), &query(None, None, Some("asc")))
            .await
            .unwrap();
        assert_eq!(names(&page), ["Banana phone", "Road worker"]);
    }

    #[tokio::test]
    async fn a_user_id_that_matches_nobody_lists_nothing() {
        let db_pool = seeded_pool().await;

        let page = load(&db_pool, Some(kody()), &query(Some("u999"), None, None))
            .await
            .unwrap();
        assert!(page.joke_list_items.is_empty());
    }

    #[tokio::test]
    async fn rendered_page_escapes_the_echoed_search_query() {
        let db_pool = seeded_pool().await;
        let jokes_query = query(None, Some(r#""><script>"#), None);

        let page = load(&db_pool, Some(kody()), &jokes_query).await.unwrap();
        let html = render(&page, &jokes_query);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[tokio::test]
    async fn rendered_page_marks_the_selected_user_and_sort_order() {
        let db_pool = seeded_pool().await;
        let jokes_query = query(Some("u2"), None, Some("asc"));

        let page = load(&db_pool, Some(kody()), &jokes_query).await.unwrap();
        let html = render(&page, &jokes_query);

        assert!(html.contains(r#"<option value="u2" selected>mr_bean</option>"#));
        assert!(html.contains(r#"<option value="u1" >kody</option>"#));
        assert!(html.contains(r#"<option value="asc" selected>"#));
    }
}
