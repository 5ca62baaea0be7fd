//! Persistence seams. `PgStore` backs the running services; `MemoryStore` backs tests and demos.

mod filter;
mod memory;
mod postgres;

pub use filter::{
    search_terms, term_matches, DateCondition, DateFilter, FacultyFilter, StudentFilter, Window,
};
pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::models::{
    Faculty, FacultyPatch, NewFaculty, NewPost, NewStudent, Post, Student, StudentPatch,
};
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait UniversityStore: Send + Sync {
    /// Faculties matching `filter`, ordered by name.
    async fn list_faculties(&self, filter: &FacultyFilter) -> Result<Vec<Faculty>, AppError>;

    /// First faculty (by id) with exactly this name.
    async fn faculty_by_name(&self, name: &str) -> Result<Option<Faculty>, AppError>;

    async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>, AppError>;

    async fn create_faculty(&self, faculty: &NewFaculty) -> Result<Faculty, AppError>;

    async fn update_faculty(&self, id: i64, patch: &FacultyPatch) -> Result<Option<Faculty>, AppError>;

    /// Deletes the faculty and, by cascade, its students. Returns whether a row was removed.
    async fn delete_faculty(&self, id: i64) -> Result<bool, AppError>;

    /// Active student count per faculty id, in one grouped query. Faculties without active students are absent.
    async fn active_counts_by_faculty(&self) -> Result<HashMap<i64, i64>, AppError>;

    async fn count_students(&self, filter: &StudentFilter) -> Result<i64, AppError>;

    /// Students matching `filter` with their faculty loaded in the same query, ordered by last then first name.
    async fn list_students(
        &self,
        filter: &StudentFilter,
        window: Option<Window>,
    ) -> Result<Vec<(Student, Faculty)>, AppError>;

    async fn get_student(&self, id: i64) -> Result<Option<(Student, Faculty)>, AppError>;

    async fn create_student(&self, student: &NewStudent) -> Result<Student, AppError>;

    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<Option<Student>, AppError>;

    async fn delete_student(&self, id: i64) -> Result<bool, AppError>;

    /// Sets `is_active` on every listed student that exists. Returns the number of rows changed.
    async fn set_students_active(&self, ids: &[i64], active: bool) -> Result<u64, AppError>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts in insertion order.
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError>;
}

/// Everything both applications need from persistence.
#[async_trait]
pub trait Store: UniversityStore + BlogStore {
    /// Round trip to the backing store for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
