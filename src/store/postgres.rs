//! PostgreSQL-backed store.

use super::{BlogStore, FacultyFilter, Store, StudentFilter, UniversityStore, Window};
use crate::error::AppError;
use crate::models::{
    Faculty, FacultyPatch, NewFaculty, NewPost, NewStudent, Post, Student, StudentPatch,
};
use crate::sql::{bind_all, builder, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, FromRow, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<PgRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<PgRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_one(&self, q: &QueryBuf) -> Result<PgRow, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

/// Splits a student row carrying `f_*` aliased faculty columns.
fn student_with_faculty(row: &PgRow) -> Result<(Student, Faculty), sqlx::Error> {
    let student = Student::from_row(row)?;
    let faculty = Faculty {
        id: row.try_get("f_id")?,
        name: row.try_get("f_name")?,
        description: row.try_get("f_description")?,
        established_date: row.try_get("f_established_date")?,
        dean: row.try_get("f_dean")?,
    };
    Ok((student, faculty))
}

#[async_trait]
impl UniversityStore for PgStore {
    async fn list_faculties(&self, filter: &FacultyFilter) -> Result<Vec<Faculty>, AppError> {
        let rows = self.fetch_all(&builder::select_faculties(filter)).await?;
        Ok(rows
            .iter()
            .map(Faculty::from_row)
            .collect::<Result<_, _>>()?)
    }

    async fn faculty_by_name(&self, name: &str) -> Result<Option<Faculty>, AppError> {
        let row = self.fetch_optional(&builder::select_faculty_by_name(name)).await?;
        Ok(row.as_ref().map(Faculty::from_row).transpose()?)
    }

    async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        let row = self.fetch_optional(&builder::select_faculty_by_id(id)).await?;
        Ok(row.as_ref().map(Faculty::from_row).transpose()?)
    }

    async fn create_faculty(&self, faculty: &NewFaculty) -> Result<Faculty, AppError> {
        let row = self.fetch_one(&builder::insert_faculty(faculty)).await?;
        Ok(Faculty::from_row(&row)?)
    }

    async fn update_faculty(&self, id: i64, patch: &FacultyPatch) -> Result<Option<Faculty>, AppError> {
        match builder::update_faculty(id, patch) {
            Some(q) => {
                let row = self.fetch_optional(&q).await?;
                Ok(row.as_ref().map(Faculty::from_row).transpose()?)
            }
            None => self.get_faculty(id).await,
        }
    }

    async fn delete_faculty(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.execute(&builder::delete_by_id("faculty", id)).await? > 0)
    }

    async fn active_counts_by_faculty(&self) -> Result<HashMap<i64, i64>, AppError> {
        tracing::debug!(sql = %builder::ACTIVE_COUNTS_BY_FACULTY, "query");
        let rows: Vec<(i64, i64)> = sqlx::query_as(builder::ACTIVE_COUNTS_BY_FACULTY)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    async fn count_students(&self, filter: &StudentFilter) -> Result<i64, AppError> {
        let row = self.fetch_one(&builder::count_students(filter)).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn list_students(
        &self,
        filter: &StudentFilter,
        window: Option<Window>,
    ) -> Result<Vec<(Student, Faculty)>, AppError> {
        let rows = self.fetch_all(&builder::select_students(filter, window)).await?;
        Ok(rows
            .iter()
            .map(student_with_faculty)
            .collect::<Result<_, _>>()?)
    }

    async fn get_student(&self, id: i64) -> Result<Option<(Student, Faculty)>, AppError> {
        let row = self.fetch_optional(&builder::select_student_by_id(id)).await?;
        Ok(row.as_ref().map(student_with_faculty).transpose()?)
    }

    async fn create_student(&self, student: &NewStudent) -> Result<Student, AppError> {
        let row = self.fetch_one(&builder::insert_student(student)).await?;
        Ok(Student::from_row(&row)?)
    }

    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<Option<Student>, AppError> {
        match builder::update_student(id, patch) {
            Some(q) => {
                let row = self.fetch_optional(&q).await?;
                Ok(row.as_ref().map(Student::from_row).transpose()?)
            }
            None => Ok(self.get_student(id).await?.map(|(s, _)| s)),
        }
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.execute(&builder::delete_by_id("student", id)).await? > 0)
    }

    async fn set_students_active(&self, ids: &[i64], active: bool) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.execute(&builder::set_students_active(ids, active)).await
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        tracing::debug!(sql = %builder::SELECT_POSTS, "query");
        Ok(sqlx::query_as::<_, Post>(builder::SELECT_POSTS)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError> {
        let row = self.fetch_one(&builder::insert_post(post)).await?;
        Ok(Post::from_row(&row)?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` maintenance database on the same server to run CREATE DATABASE.
/// Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = maintenance_target(database_url)?;
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

/// Connection options for the `postgres` database (host, credentials and TLS settings kept)
/// and the database name the URL asks for, if any.
fn maintenance_target(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
