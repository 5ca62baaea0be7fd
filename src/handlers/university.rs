//! University pages: home, faculty overview, student listings.

use crate::error::AppError;
use crate::service::{PageRequest, UniversityService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .renderer
        .render("university/index.html", &UniversityService::home())
}

pub async fn faculty(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ctx = UniversityService::faculty_overview(state.store.as_ref()).await?;
    state.renderer.render("university/faculty.html", &ctx)
}

pub async fn students(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ctx = UniversityService::students_overview(state.store.as_ref()).await?;
    state.renderer.render("university/students.html", &ctx)
}

pub async fn student_list(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let req = PageRequest::parse(q.page.as_deref())?;
    let ctx = UniversityService::student_list(
        state.store.as_ref(),
        req,
        state.settings.page_size,
        today(),
    )
    .await?;
    state.renderer.render("university/student_list.html", &ctx)
}

pub async fn faculty_select(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ctx = UniversityService::faculty_select(state.store.as_ref()).await?;
    state.renderer.render("university/faculty_select.html", &ctx)
}

pub async fn students_by_faculty(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(q): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let req = PageRequest::parse(q.page.as_deref())?;
    let ctx = UniversityService::students_by_faculty(
        state.store.as_ref(),
        &name,
        req,
        state.settings.page_size,
        today(),
    )
    .await?;
    state.renderer.render("university/students_by_faculty.html", &ctx)
}
