//! Blog pages and post submission.

use crate::error::AppError;
use crate::models::PostForm;
use crate::service::blog::MakePostContext;
use crate::service::BlogService;
use crate::state::AppState;
use axum::{extract::State, response::Html, Form};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.renderer.render_static("blog/index.html")
}

pub async fn history(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.renderer.render_static("blog/history.html")
}

pub async fn education(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.renderer.render_static("blog/education.html")
}

pub async fn hobbies(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.renderer.render_static("blog/hobbies.html")
}

pub async fn posts(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ctx = BlogService::posts(state.store.as_ref()).await?;
    state.renderer.render("blog/posts.html", &ctx)
}

pub async fn makepost_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .renderer
        .render("blog/makepost.html", &MakePostContext::default())
}

pub async fn makepost(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<Html<String>, AppError> {
    let today = chrono::Local::now().date_naive();
    let post = BlogService::make_post(state.store.as_ref(), form, today).await?;
    state
        .renderer
        .render("blog/makepost.html", &MakePostContext { created: Some(post) })
}
