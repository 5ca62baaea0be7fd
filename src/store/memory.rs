//! In-process store with the same constraints as the PostgreSQL schema:
//! unique email and student_id, faculty foreign key, cascading faculty delete.

use super::{
    term_matches, BlogStore, FacultyFilter, Store, StudentFilter, UniversityStore, Window,
};
use crate::error::AppError;
use crate::models::{
    Faculty, FacultyPatch, NewFaculty, NewPost, NewStudent, Post, Student, StudentPatch,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    faculties: Vec<Faculty>,
    students: Vec<Student>,
    posts: Vec<Post>,
    next_faculty_id: i64,
    next_student_id: i64,
    next_post_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn faculty_matches(f: &Faculty, filter: &FacultyFilter) -> bool {
    filter
        .search
        .iter()
        .all(|t| term_matches(t, &[f.name.as_str(), f.dean.as_str(), f.description.as_str()]))
        && filter
            .established
            .map(|c| c.matches(f.established_date))
            .unwrap_or(true)
}

fn student_matches(s: &Student, filter: &StudentFilter) -> bool {
    filter
        .search
        .iter()
        .all(|t| term_matches(
                t,
                &[s.first_name.as_str(), s.last_name.as_str(), s.email.as_str(), s.student_id.as_str()],
            ))
        && filter.faculty_id.map(|id| s.faculty_id == id).unwrap_or(true)
        && filter.is_active.map(|a| s.is_active == a).unwrap_or(true)
        && filter
            .graduation_year
            .map(|y| s.graduation_year == Some(y))
            .unwrap_or(true)
        && filter
            .enrolled
            .map(|c| c.matches(Some(s.enrollment_date)))
            .unwrap_or(true)
}

impl Tables {
    fn faculty(&self, id: i64) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.id == id)
    }

    /// Unique checks for email and student_id, skipping the row being updated.
    fn check_unique(&self, email: &str, student_id: &str, except: Option<i64>) -> Result<(), AppError> {
        for s in self.students.iter().filter(|s| Some(s.id) != except) {
            if s.email == email {
                return Err(AppError::Conflict("duplicate value violates student_email_key".into()));
            }
            if s.student_id == student_id {
                return Err(AppError::Conflict(
                    "duplicate value violates student_student_id_key".into(),
                ));
            }
        }
        Ok(())
    }

    fn check_faculty(&self, id: i64) -> Result<(), AppError> {
        if self.faculty(id).is_none() {
            return Err(AppError::Validation(
                "referenced row does not exist (student_faculty_id_fkey)".into(),
            ));
        }
        Ok(())
    }

    fn joined(&self, s: &Student) -> Option<(Student, Faculty)> {
        self.faculty(s.faculty_id).map(|f| (s.clone(), f.clone()))
    }
}

#[async_trait]
impl UniversityStore for MemoryStore {
    async fn list_faculties(&self, filter: &FacultyFilter) -> Result<Vec<Faculty>, AppError> {
        let t = self.read();
        let mut out: Vec<Faculty> = t
            .faculties
            .iter()
            .filter(|f| faculty_matches(f, filter))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn faculty_by_name(&self, name: &str) -> Result<Option<Faculty>, AppError> {
        let t = self.read();
        Ok(t.faculties
            .iter()
            .filter(|f| f.name == name)
            .min_by_key(|f| f.id)
            .cloned())
    }

    async fn get_faculty(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        Ok(self.read().faculty(id).cloned())
    }

    async fn create_faculty(&self, faculty: &NewFaculty) -> Result<Faculty, AppError> {
        let mut t = self.write();
        t.next_faculty_id += 1;
        let row = Faculty {
            id: t.next_faculty_id,
            name: faculty.name.clone(),
            description: faculty.description.clone(),
            established_date: faculty.established_date,
            dean: faculty.dean.clone(),
        };
        t.faculties.push(row.clone());
        Ok(row)
    }

    async fn update_faculty(&self, id: i64, patch: &FacultyPatch) -> Result<Option<Faculty>, AppError> {
        let mut t = self.write();
        Ok(t.faculties.iter_mut().find(|f| f.id == id).map(|f| {
            patch.apply(f);
            f.clone()
        }))
    }

    async fn delete_faculty(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write();
        let before = t.faculties.len();
        t.faculties.retain(|f| f.id != id);
        if t.faculties.len() == before {
            return Ok(false);
        }
        t.students.retain(|s| s.faculty_id != id);
        Ok(true)
    }

    async fn active_counts_by_faculty(&self) -> Result<HashMap<i64, i64>, AppError> {
        let t = self.read();
        let mut counts = HashMap::new();
        for s in t.students.iter().filter(|s| s.is_active) {
            *counts.entry(s.faculty_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_students(&self, filter: &StudentFilter) -> Result<i64, AppError> {
        let t = self.read();
        Ok(t.students.iter().filter(|s| student_matches(s, filter)).count() as i64)
    }

    async fn list_students(
        &self,
        filter: &StudentFilter,
        window: Option<Window>,
    ) -> Result<Vec<(Student, Faculty)>, AppError> {
        let t = self.read();
        let mut rows: Vec<(Student, Faculty)> = t
            .students
            .iter()
            .filter(|s| student_matches(s, filter))
            .filter_map(|s| t.joined(s))
            .collect();
        rows.sort_by(|(a, _), (b, _)| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then(a.id.cmp(&b.id))
        });
        Ok(match window {
            Some(w) => rows
                .into_iter()
                .skip(w.offset as usize)
                .take(w.limit as usize)
                .collect(),
            None => rows,
        })
    }

    async fn get_student(&self, id: i64) -> Result<Option<(Student, Faculty)>, AppError> {
        let t = self.read();
        Ok(t.students.iter().find(|s| s.id == id).and_then(|s| t.joined(s)))
    }

    async fn create_student(&self, student: &NewStudent) -> Result<Student, AppError> {
        let mut t = self.write();
        t.check_faculty(student.faculty_id)?;
        t.check_unique(&student.email, &student.student_id, None)?;
        t.next_student_id += 1;
        let now = Utc::now();
        let row = Student {
            id: t.next_student_id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            student_id: student.student_id.clone(),
            faculty_id: student.faculty_id,
            enrollment_date: student.enrollment_date,
            graduation_year: student.graduation_year,
            date_of_birth: student.date_of_birth,
            phone_number: student.phone_number.clone(),
            address: student.address.clone(),
            is_active: student.is_active,
            created_at: now,
            updated_at: now,
        };
        t.students.push(row.clone());
        Ok(row)
    }

    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<Option<Student>, AppError> {
        let mut t = self.write();
        let Some(current) = t.students.iter().find(|s| s.id == id).cloned() else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current));
        }
        let mut updated = current;
        patch.apply(&mut updated, Utc::now());
        t.check_faculty(updated.faculty_id)?;
        t.check_unique(&updated.email, &updated.student_id, Some(id))?;
        if let Some(slot) = t.students.iter_mut().find(|s| s.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write();
        let before = t.students.len();
        t.students.retain(|s| s.id != id);
        Ok(t.students.len() != before)
    }

    async fn set_students_active(&self, ids: &[i64], active: bool) -> Result<u64, AppError> {
        let mut t = self.write();
        let now = Utc::now();
        let mut n = 0;
        for s in t.students.iter_mut().filter(|s| ids.contains(&s.id)) {
            s.is_active = active;
            s.updated_at = now;
            n += 1;
        }
        Ok(n)
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.read().posts.clone())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError> {
        let mut t = self.write();
        t.next_post_id += 1;
        let row = Post {
            id: t.next_post_id,
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date,
        };
        t.posts.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        drop(self.read());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_student(email: &str, sid: &str, faculty_id: i64) -> NewStudent {
        NewStudent {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            student_id: sid.into(),
            faculty_id,
            enrollment_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            graduation_year: Some(2029),
            date_of_birth: None,
            phone_number: String::new(),
            address: String::new(),
            is_active: true,
        }
    }

    fn new_faculty(name: &str) -> NewFaculty {
        NewFaculty {
            name: name.into(),
            description: String::new(),
            established_date: None,
            dean: String::new(),
        }
    }

    #[tokio::test]
    async fn enforces_unique_email_and_student_id() {
        let store = MemoryStore::new();
        let f = store.create_faculty(&new_faculty("Science")).await.unwrap();
        store.create_student(&new_student("a@x.edu", "S1", f.id)).await.unwrap();
        let dup_email = store.create_student(&new_student("a@x.edu", "S2", f.id)).await;
        assert!(matches!(dup_email, Err(AppError::Conflict(_))));
        let dup_sid = store.create_student(&new_student("b@x.edu", "S1", f.id)).await;
        assert!(matches!(dup_sid, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn rejects_unknown_faculty() {
        let store = MemoryStore::new();
        let err = store.create_student(&new_student("a@x.edu", "S1", 99)).await;
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn faculty_delete_cascades() {
        let store = MemoryStore::new();
        let keep = store.create_faculty(&new_faculty("Arts")).await.unwrap();
        let gone = store.create_faculty(&new_faculty("Science")).await.unwrap();
        store.create_student(&new_student("a@x.edu", "S1", gone.id)).await.unwrap();
        store.create_student(&new_student("b@x.edu", "S2", keep.id)).await.unwrap();

        assert!(store.delete_faculty(gone.id).await.unwrap());
        assert!(!store.delete_faculty(gone.id).await.unwrap());
        assert_eq!(store.count_students(&StudentFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn bulk_toggle_counts_only_existing_rows() {
        let store = MemoryStore::new();
        let f = store.create_faculty(&new_faculty("Science")).await.unwrap();
        let a = store.create_student(&new_student("a@x.edu", "S1", f.id)).await.unwrap();
        let b = store.create_student(&new_student("b@x.edu", "S2", f.id)).await.unwrap();
        let n = store.set_students_active(&[a.id, b.id, 404], false).await.unwrap();
        assert_eq!(n, 2);
        assert_eq!(store.count_students(&StudentFilter::active()).await.unwrap(), 0);
    }
}
