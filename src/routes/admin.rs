//! Admin routes, nested under `/admin` by the university app.

use crate::handlers::admin::{
    create_faculty, create_student, delete_faculty, delete_student, faculty_config,
    list_faculties, list_students, read_faculty, read_student, student_action, student_config,
    update_faculty, update_student,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/faculties", get(list_faculties).post(create_faculty))
        .route("/faculties/config", get(faculty_config))
        .route(
            "/faculties/:id",
            get(read_faculty).patch(update_faculty).delete(delete_faculty),
        )
        .route("/students", get(list_students).post(create_student))
        .route("/students/config", get(student_config))
        .route("/students/actions/:action", post(student_action))
        .route(
            "/students/:id",
            get(read_student).patch(update_student).delete(delete_student),
        )
        .with_state(state)
}
