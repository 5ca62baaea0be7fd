//! Context assembly for the university pages.

use super::pagination::{paginate, Page, PageRequest};
use crate::error::AppError;
use crate::models::{Faculty, StudentView};
use crate::store::{FacultyFilter, StudentFilter, UniversityStore};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeContext {
    pub page_title: &'static str,
    pub welcome_message: &'static str,
    pub features: &'static [&'static str],
    pub concepts: &'static [&'static str],
}

#[derive(Clone, Debug, Serialize)]
pub struct FacultyCount {
    pub faculty: Faculty,
    /// Active students only.
    pub student_count: i64,
}

#[derive(Debug, Serialize)]
pub struct FacultyOverviewContext {
    pub page_title: &'static str,
    pub faculty_data: Vec<FacultyCount>,
    pub total_faculties: usize,
    pub total_students: i64,
    pub concepts: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct StudentsOverviewContext {
    pub page_title: &'static str,
    pub total_students: i64,
    pub active_students: i64,
    pub faculties: Vec<Faculty>,
}

#[derive(Debug, Serialize)]
pub struct FacultySelectContext {
    pub page_title: &'static str,
    pub faculties: Vec<FacultyCount>,
}

#[derive(Debug, Serialize)]
pub struct StudentListContext {
    pub page_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<Faculty>,
    pub students: Vec<StudentView>,
    pub total_count: i64,
    pub page: Page,
}

pub struct UniversityService;

impl UniversityService {
    pub fn home() -> HomeContext {
        HomeContext {
            page_title: "University Management System",
            welcome_message: "Welcome to the university management system!",
            features: &[
                "Student Management",
                "Faculty Management",
                "Course Management",
                "Complete CRUD Operations",
            ],
            concepts: &[
                "Models (database layer)",
                "Handlers (request logic)",
                "Templates (presentation layer)",
                "URL routing",
                "Admin interface",
                "Forms and validation",
            ],
        }
    }

    /// Every faculty (by name) paired with its active student count. Two queries regardless of faculty count.
    pub async fn faculties_with_counts<S>(store: &S) -> Result<Vec<FacultyCount>, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        Self::faculties_matching(store, &FacultyFilter::default()).await
    }

    pub async fn faculties_matching<S>(store: &S, filter: &FacultyFilter) -> Result<Vec<FacultyCount>, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let faculties = store.list_faculties(filter).await?;
        let counts = store.active_counts_by_faculty().await?;
        Ok(faculties
            .into_iter()
            .map(|faculty| FacultyCount {
                student_count: counts.get(&faculty.id).copied().unwrap_or(0),
                faculty,
            })
            .collect())
    }

    pub async fn faculty_overview<S>(store: &S) -> Result<FacultyOverviewContext, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let faculty_data = Self::faculties_with_counts(store).await?;
        let total_students = store.count_students(&StudentFilter::active()).await?;
        Ok(FacultyOverviewContext {
            page_title: "Faculty Management",
            total_faculties: faculty_data.len(),
            faculty_data,
            total_students,
            concepts: &[
                "Foreign key relationships",
                "Eager loading with one grouped count",
                "Template context data",
                "Aggregation and counting",
            ],
        })
    }

    pub async fn students_overview<S>(store: &S) -> Result<StudentsOverviewContext, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        Ok(StudentsOverviewContext {
            page_title: "Students Overview",
            total_students: store.count_students(&StudentFilter::default()).await?,
            active_students: store.count_students(&StudentFilter::active()).await?,
            faculties: store.list_faculties(&FacultyFilter::default()).await?,
        })
    }

    pub async fn faculty_select<S>(store: &S) -> Result<FacultySelectContext, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        Ok(FacultySelectContext {
            page_title: "Select Faculty",
            faculties: Self::faculties_with_counts(store).await?,
        })
    }

    /// One page of active students, faculty joined in.
    pub async fn student_list<S>(
        store: &S,
        req: PageRequest,
        per_page: u64,
        today: NaiveDate,
    ) -> Result<StudentListContext, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let (students, total_count, page) =
            Self::student_page(store, &StudentFilter::active(), req, per_page, today).await?;
        Ok(StudentListContext {
            page_title: "All Students".into(),
            faculty: None,
            students,
            total_count,
            page,
        })
    }

    /// One page of the active students of the faculty called `name`. Unknown name is `NotFound`.
    pub async fn students_by_faculty<S>(
        store: &S,
        name: &str,
        req: PageRequest,
        per_page: u64,
        today: NaiveDate,
    ) -> Result<StudentListContext, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let faculty = store
            .faculty_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty '{}'", name)))?;
        let filter = StudentFilter::active_in(faculty.id);
        let (students, total_count, page) =
            Self::student_page(store, &filter, req, per_page, today).await?;
        Ok(StudentListContext {
            page_title: format!("Students in {}", faculty.name),
            faculty: Some(faculty),
            students,
            total_count,
            page,
        })
    }

    async fn student_page<S>(
        store: &S,
        filter: &StudentFilter,
        req: PageRequest,
        per_page: u64,
        today: NaiveDate,
    ) -> Result<(Vec<StudentView>, i64, Page), AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let total = store.count_students(filter).await?;
        let page = paginate(total.max(0) as u64, per_page, req)?;
        let rows = store.list_students(filter, Some(page.window())).await?;
        let students = rows
            .into_iter()
            .map(|(s, f)| StudentView::new(s, f, today))
            .collect();
        Ok((students, total, page))
    }
}
