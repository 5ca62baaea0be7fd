//! Builds parameterized SELECT, INSERT, UPDATE and DELETE statements for the three tables.

use super::params::PgBindValue;
use crate::models::{FacultyPatch, NewFaculty, NewPost, NewStudent, StudentPatch};
use crate::store::{DateCondition, FacultyFilter, StudentFilter, Window};

const FACULTY_COLUMNS: &str = "f.id, f.name, f.description, f.established_date, f.dean";

const STUDENT_COLUMNS: &str = "s.id, s.first_name, s.last_name, s.email, s.student_id, s.faculty_id, \
     s.enrollment_date, s.graduation_year, s.date_of_birth, s.phone_number, s.address, \
     s.is_active, s.created_at, s.updated_at";

/// Faculty columns under `f_` aliases so they sit next to the student columns in one row.
const JOINED_FACULTY_COLUMNS: &str = "f.id AS f_id, f.name AS f_name, f.description AS f_description, \
     f.established_date AS f_established_date, f.dean AS f_dean";

const RETURNING_STUDENT: &str = "RETURNING id, first_name, last_name, email, student_id, faculty_id, \
     enrollment_date, graduation_year, date_of_birth, phone_number, address, is_active, created_at, updated_at";

const RETURNING_FACULTY: &str = "RETURNING id, name, description, established_date, dean";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `%term%` for ILIKE with the pattern metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// One `(a ILIKE $n OR b ILIKE $n ...)` group per term; groups are ANDed by the caller.
fn search_conditions(q: &mut QueryBuf, terms: &[String], fields: &[&str]) -> Vec<String> {
    terms
        .iter()
        .map(|term| {
            let n = q.push_param(PgBindValue::Text(like_pattern(term)));
            let alts: Vec<String> = fields.iter().map(|f| format!("{} ILIKE ${}", f, n)).collect();
            format!("({})", alts.join(" OR "))
        })
        .collect()
}

fn date_condition(q: &mut QueryBuf, column: &str, cond: &DateCondition) -> String {
    match cond {
        DateCondition::IsNull => format!("{} IS NULL", column),
        DateCondition::IsNotNull => format!("{} IS NOT NULL", column),
        DateCondition::Range { since, until } => {
            let a = q.push_param(PgBindValue::Date(Some(*since)));
            let b = q.push_param(PgBindValue::Date(Some(*until)));
            format!("{} >= ${} AND {} < ${}", column, a, column, b)
        }
    }
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn faculty_conditions(q: &mut QueryBuf, filter: &FacultyFilter) -> Vec<String> {
    let mut conds = search_conditions(q, &filter.search, &["f.name", "f.dean", "f.description"]);
    if let Some(cond) = &filter.established {
        conds.push(date_condition(q, "f.established_date", cond));
    }
    conds
}

fn student_conditions(q: &mut QueryBuf, filter: &StudentFilter) -> Vec<String> {
    let mut conds = search_conditions(
        q,
        &filter.search,
        &["s.first_name", "s.last_name", "s.email", "s.student_id"],
    );
    if let Some(id) = filter.faculty_id {
        let n = q.push_param(PgBindValue::BigInt(id));
        conds.push(format!("s.faculty_id = ${}", n));
    }
    if let Some(active) = filter.is_active {
        let n = q.push_param(PgBindValue::Bool(active));
        conds.push(format!("s.is_active = ${}", n));
    }
    if let Some(year) = filter.graduation_year {
        let n = q.push_param(PgBindValue::Int(Some(year)));
        conds.push(format!("s.graduation_year = ${}", n));
    }
    if let Some(cond) = &filter.enrolled {
        conds.push(date_condition(q, "s.enrollment_date", cond));
    }
    conds
}

pub fn select_faculties(filter: &FacultyFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let conds = faculty_conditions(&mut q, filter);
    q.sql = format!(
        "SELECT {} FROM faculty f{} ORDER BY f.name, f.id",
        FACULTY_COLUMNS,
        where_clause(&conds)
    );
    q
}

pub fn select_faculty_by_name(name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Text(name.to_string()));
    q.sql = format!(
        "SELECT {} FROM faculty f WHERE f.name = ${} ORDER BY f.id LIMIT 1",
        FACULTY_COLUMNS, n
    );
    q
}

pub fn select_faculty_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::BigInt(id));
    q.sql = format!("SELECT {} FROM faculty f WHERE f.id = ${}", FACULTY_COLUMNS, n);
    q
}

/// Active students per faculty in one pass; replaces a count query per faculty.
pub const ACTIVE_COUNTS_BY_FACULTY: &str =
    "SELECT faculty_id, COUNT(*) AS n FROM student WHERE is_active GROUP BY faculty_id";

pub fn insert_faculty(f: &NewFaculty) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(f.name.clone()));
    q.push_param(PgBindValue::Text(f.description.clone()));
    q.push_param(PgBindValue::Date(f.established_date));
    q.push_param(PgBindValue::Text(f.dean.clone()));
    q.sql = format!(
        "INSERT INTO faculty (name, description, established_date, dean) VALUES ($1, $2, $3, $4) {}",
        RETURNING_FACULTY
    );
    q
}

/// UPDATE of the present fields only. Returns `None` for an empty patch.
pub fn update_faculty(id: i64, patch: &FacultyPatch) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(v) = &patch.name {
        sets.push(format!("name = ${}", q.push_param(PgBindValue::Text(v.clone()))));
    }
    if let Some(v) = &patch.description {
        sets.push(format!("description = ${}", q.push_param(PgBindValue::Text(v.clone()))));
    }
    if let Some(v) = patch.established_date {
        sets.push(format!("established_date = ${}", q.push_param(PgBindValue::Date(v))));
    }
    if let Some(v) = &patch.dean {
        sets.push(format!("dean = ${}", q.push_param(PgBindValue::Text(v.clone()))));
    }
    if sets.is_empty() {
        return None;
    }
    let n = q.push_param(PgBindValue::BigInt(id));
    q.sql = format!(
        "UPDATE faculty SET {} WHERE id = ${} {}",
        sets.join(", "),
        n,
        RETURNING_FACULTY
    );
    Some(q)
}

pub fn delete_by_id(table: &'static str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::BigInt(id));
    q.sql = format!("DELETE FROM {} WHERE id = ${}", table, n);
    q
}

pub fn count_students(filter: &StudentFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let conds = student_conditions(&mut q, filter);
    q.sql = format!("SELECT COUNT(*) FROM student s{}", where_clause(&conds));
    q
}

/// Students joined to their faculty (one round trip), ordered by last name, first name.
pub fn select_students(filter: &StudentFilter, window: Option<Window>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let conds = student_conditions(&mut q, filter);
    let mut sql = format!(
        "SELECT {}, {} FROM student s JOIN faculty f ON f.id = s.faculty_id{} \
         ORDER BY s.last_name, s.first_name, s.id",
        STUDENT_COLUMNS,
        JOINED_FACULTY_COLUMNS,
        where_clause(&conds)
    );
    if let Some(w) = window {
        let l = q.push_param(PgBindValue::BigInt(w.limit as i64));
        let o = q.push_param(PgBindValue::BigInt(w.offset as i64));
        sql.push_str(&format!(" LIMIT ${} OFFSET ${}", l, o));
    }
    q.sql = sql;
    q
}

pub fn select_student_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::BigInt(id));
    q.sql = format!(
        "SELECT {}, {} FROM student s JOIN faculty f ON f.id = s.faculty_id WHERE s.id = ${}",
        STUDENT_COLUMNS, JOINED_FACULTY_COLUMNS, n
    );
    q
}

pub fn insert_student(s: &NewStudent) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(s.first_name.clone()));
    q.push_param(PgBindValue::Text(s.last_name.clone()));
    q.push_param(PgBindValue::Text(s.email.clone()));
    q.push_param(PgBindValue::Text(s.student_id.clone()));
    q.push_param(PgBindValue::BigInt(s.faculty_id));
    q.push_param(PgBindValue::Date(Some(s.enrollment_date)));
    q.push_param(PgBindValue::Int(s.graduation_year));
    q.push_param(PgBindValue::Date(s.date_of_birth));
    q.push_param(PgBindValue::Text(s.phone_number.clone()));
    q.push_param(PgBindValue::Text(s.address.clone()));
    q.push_param(PgBindValue::Bool(s.is_active));
    q.sql = format!(
        "INSERT INTO student (first_name, last_name, email, student_id, faculty_id, enrollment_date, \
         graduation_year, date_of_birth, phone_number, address, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) {}",
        RETURNING_STUDENT
    );
    q
}

/// UPDATE of the present fields plus `updated_at`. Returns `None` for an empty patch.
pub fn update_student(id: i64, patch: &StudentPatch) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    let mut set = |q: &mut QueryBuf, col: &str, v: PgBindValue| {
        let n = q.push_param(v);
        sets.push(format!("{} = ${}", col, n));
    };
    if let Some(v) = &patch.first_name {
        set(&mut q, "first_name", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = &patch.last_name {
        set(&mut q, "last_name", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = &patch.email {
        set(&mut q, "email", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = &patch.student_id {
        set(&mut q, "student_id", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = patch.faculty_id {
        set(&mut q, "faculty_id", PgBindValue::BigInt(v));
    }
    if let Some(v) = patch.enrollment_date {
        set(&mut q, "enrollment_date", PgBindValue::Date(Some(v)));
    }
    if let Some(v) = patch.graduation_year {
        set(&mut q, "graduation_year", PgBindValue::Int(v));
    }
    if let Some(v) = patch.date_of_birth {
        set(&mut q, "date_of_birth", PgBindValue::Date(v));
    }
    if let Some(v) = &patch.phone_number {
        set(&mut q, "phone_number", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = &patch.address {
        set(&mut q, "address", PgBindValue::Text(v.clone()));
    }
    if let Some(v) = patch.is_active {
        set(&mut q, "is_active", PgBindValue::Bool(v));
    }
    if sets.is_empty() {
        return None;
    }
    let n = q.push_param(PgBindValue::BigInt(id));
    q.sql = format!(
        "UPDATE student SET {}, updated_at = NOW() WHERE id = ${} {}",
        sets.join(", "),
        n,
        RETURNING_STUDENT
    );
    Some(q)
}

/// Single-statement bulk toggle of `is_active`.
pub fn set_students_active(ids: &[i64], active: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Bool(active));
    q.push_param(PgBindValue::BigIntArray(ids.to_vec()));
    q.sql = "UPDATE student SET is_active = $1, updated_at = NOW() WHERE id = ANY($2)".into();
    q
}

pub const SELECT_POSTS: &str = "SELECT id, title, description, date FROM posts ORDER BY id";

pub fn insert_post(p: &NewPost) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(p.title.clone()));
    q.push_param(PgBindValue::Text(p.description.clone()));
    q.push_param(PgBindValue::Date(Some(p.date)));
    q.sql = "INSERT INTO posts (title, description, date) VALUES ($1, $2, $3) \
             RETURNING id, title, description, date"
        .into();
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn student_list_numbers_params_in_order() {
        let filter = StudentFilter {
            search: vec!["ada".into(), "50%".into()],
            faculty_id: Some(7),
            is_active: Some(true),
            graduation_year: None,
            enrolled: Some(DateCondition::IsNotNull),
        };
        let q = select_students(&filter, Some(Window { limit: 10, offset: 20 }));
        assert!(q.sql.contains("(s.first_name ILIKE $1 OR s.last_name ILIKE $1"));
        assert!(q.sql.contains("s.student_id ILIKE $2)"));
        assert!(q.sql.contains("s.faculty_id = $3"));
        assert!(q.sql.contains("s.is_active = $4"));
        assert!(q.sql.contains("s.enrollment_date IS NOT NULL"));
        assert!(q.sql.contains("JOIN faculty f ON f.id = s.faculty_id"));
        assert!(q.sql.ends_with("LIMIT $5 OFFSET $6"));
        assert_eq!(q.params[1], PgBindValue::Text("%50\\%%".into()));
        assert_eq!(q.params.len(), 6);
    }

    #[test]
    fn unfiltered_count_has_no_where() {
        let q = count_students(&StudentFilter::default());
        assert_eq!(q.sql, "SELECT COUNT(*) FROM student s");
        assert!(q.params.is_empty());
    }

    #[test]
    fn faculty_date_range_is_half_open() {
        let since = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let q = select_faculties(&FacultyFilter {
            search: vec![],
            established: Some(DateCondition::Range { since, until }),
        });
        assert!(q.sql.contains("f.established_date >= $1 AND f.established_date < $2"));
        assert!(q.sql.ends_with("ORDER BY f.name, f.id"));
    }

    #[test]
    fn empty_patch_builds_nothing() {
        assert!(update_student(1, &StudentPatch::default()).is_none());
        assert!(update_faculty(1, &FacultyPatch::default()).is_none());
    }

    #[test]
    fn student_patch_touches_updated_at() {
        let patch = StudentPatch {
            is_active: Some(false),
            graduation_year: Some(None),
            ..Default::default()
        };
        let q = update_student(42, &patch).unwrap();
        assert!(q.sql.starts_with(
            "UPDATE student SET graduation_year = $1, is_active = $2, updated_at = NOW() WHERE id = $3"
        ));
        assert_eq!(q.params[0], PgBindValue::Int(None));
        assert_eq!(q.params[2], PgBindValue::BigInt(42));
    }
}
