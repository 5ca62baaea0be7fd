//! Admin JSON endpoints: changelists, descriptors, record CRUD and bulk actions.

use crate::admin::{FACULTY_ADMIN, STUDENT_ADMIN};
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::admin::{ActionRequest, FacultyListParams, StudentListParams};
use crate::service::AdminService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn faculty_config() -> impl IntoResponse {
    success_one_ok(&FACULTY_ADMIN)
}

pub async fn student_config() -> impl IntoResponse {
    success_one_ok(&STUDENT_ADMIN)
}

pub async fn list_faculties(
    State(state): State<AppState>,
    Query(params): Query<FacultyListParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = AdminService::faculty_changelist(state.store.as_ref(), &params, today()).await?;
    Ok(success_many(rows))
}

pub async fn create_faculty(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::create_faculty(state.store.as_ref(), body).await?;
    Ok(success_one(row))
}

pub async fn read_faculty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::faculty_detail(state.store.as_ref(), id).await?;
    Ok(success_one_ok(row))
}

pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::update_faculty(state.store.as_ref(), id, body).await?;
    Ok(success_one_ok(row))
}

pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    AdminService::delete_faculty(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = AdminService::student_changelist(state.store.as_ref(), &params, today()).await?;
    Ok(success_many(rows))
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::create_student(state.store.as_ref(), body, today()).await?;
    Ok(success_one(row))
}

pub async fn read_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::student_detail(state.store.as_ref(), id, today()).await?;
    Ok(success_one_ok(row))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let row = AdminService::update_student(state.store.as_ref(), id, body, today()).await?;
    Ok(success_one_ok(row))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    AdminService::delete_student(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn student_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Json(req): Json<ActionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = AdminService::run_action(state.store.as_ref(), &action, req).await?;
    Ok(success_one_ok(res))
}
