//! University page routes.

use crate::handlers::university::{
    faculty, faculty_select, index, student_list, students, students_by_faculty,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn university_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/faculty", get(faculty))
        .route("/students", get(students))
        .route("/studentsList", get(student_list))
        .route("/studentsFacultySelect", get(faculty_select))
        .route("/studentsFacultyList/:name", get(students_by_faculty))
        .with_state(state)
}
