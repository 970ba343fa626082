mod joke;
mod new;
mod page;
mod random;
mod rss;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use rss::feed;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::jokes))
        .route("/new", get(new::new_joke_page).post(new::new_joke))
        .route("/random", get(random::random))
        .route("/{uuid}", get(joke::joke))
        .route("/{uuid}/delete", post(joke::delete))
}
