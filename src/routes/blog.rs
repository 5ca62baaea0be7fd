//! Blog page routes.

use crate::handlers::blog::{education, history, hobbies, index, makepost, makepost_form, posts};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn blog_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/history", get(history))
        .route("/education", get(education))
        .route("/hobbies", get(hobbies))
        .route("/posts", get(posts))
        .route("/makepost", get(makepost_form).post(makepost))
        .with_state(state)
}
