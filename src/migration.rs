//! Schema DDL for the faculty, student and posts tables. Every statement is idempotent.

use crate::error::AppError;
use sqlx::PgPool;

/// Ordered so that referenced tables exist before their foreign keys.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS faculty (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        established_date DATE NULL,
        dean VARCHAR(100) NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS faculty_name_idx ON faculty (name)",
    r#"
    CREATE TABLE IF NOT EXISTS student (
        id BIGSERIAL PRIMARY KEY,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        email VARCHAR(254) NOT NULL CONSTRAINT student_email_key UNIQUE,
        student_id VARCHAR(20) NOT NULL CONSTRAINT student_student_id_key UNIQUE,
        faculty_id BIGINT NOT NULL CONSTRAINT student_faculty_id_fkey
            REFERENCES faculty (id) ON DELETE CASCADE,
        enrollment_date DATE NOT NULL,
        graduation_year INTEGER NULL,
        date_of_birth DATE NULL,
        phone_number VARCHAR(15) NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS student_faculty_active_idx ON student (faculty_id, is_active)",
    "CREATE INDEX IF NOT EXISTS student_name_idx ON student (last_name, first_name)",
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        title VARCHAR(20) NOT NULL DEFAULT 'No Title',
        description VARCHAR(5000) NOT NULL DEFAULT 'Description not available',
        date DATE NOT NULL DEFAULT CURRENT_DATE
    )
    "#,
];

/// Creates any missing tables and indexes. Safe to run on every startup.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(statements = SCHEMA.len(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculty_precedes_student() {
        let faculty = SCHEMA.iter().position(|s| s.contains("TABLE IF NOT EXISTS faculty"));
        let student = SCHEMA.iter().position(|s| s.contains("TABLE IF NOT EXISTS student"));
        assert!(faculty < student);
        assert!(SCHEMA.iter().all(|s| s.contains("IF NOT EXISTS")));
    }
}
