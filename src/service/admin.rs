//! Admin changelists, record editing and bulk actions.

use super::university::{FacultyCount, UniversityService};
use super::validation::{RequestValidator, Rules, FACULTY_RULES, STUDENT_RULES};
use crate::admin::BulkAction;
use crate::error::AppError;
use crate::models::{
    Faculty, FacultyPatch, NewFaculty, NewStudent, StudentPatch, StudentView,
};
use crate::store::{search_terms, DateFilter, FacultyFilter, StudentFilter, UniversityStore};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Query string of the faculty changelist.
#[derive(Debug, Default, Deserialize)]
pub struct FacultyListParams {
    pub q: Option<String>,
    pub established_date: Option<String>,
}

/// Query string of the student changelist.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    pub q: Option<String>,
    pub faculty: Option<i64>,
    pub is_active: Option<bool>,
    pub enrollment_date: Option<String>,
    pub graduation_year: Option<i32>,
}

impl FacultyListParams {
    pub fn to_filter(&self, today: NaiveDate) -> Result<FacultyFilter, AppError> {
        Ok(FacultyFilter {
            search: search_terms(self.q.as_deref()),
            established: date_filter(self.established_date.as_deref(), today)?,
        })
    }
}

impl StudentListParams {
    pub fn to_filter(&self, today: NaiveDate) -> Result<StudentFilter, AppError> {
        Ok(StudentFilter {
            search: search_terms(self.q.as_deref()),
            faculty_id: self.faculty,
            is_active: self.is_active,
            graduation_year: self.graduation_year,
            enrolled: date_filter(self.enrollment_date.as_deref(), today)?,
        })
    }
}

fn date_filter(
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<Option<crate::store::DateCondition>, AppError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| s.parse::<DateFilter>().map(|f| f.resolve(today)))
        .transpose()
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub action: &'static str,
    pub updated: u64,
    pub message: String,
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Validates `body` (fully for create, partially for patch) and deserializes it.
fn parse_body<T: DeserializeOwned>(body: Value, rules: &Rules, partial: bool) -> Result<T, AppError> {
    let map = body_to_map(body)?;
    if partial {
        RequestValidator::validate_partial(&map, rules)?;
    } else {
        RequestValidator::validate(&map, rules)?;
    }
    let object = Value::Object(map.into_iter().collect());
    serde_json::from_value(object).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub struct AdminService;

impl AdminService {
    pub async fn faculty_changelist<S>(
        store: &S,
        params: &FacultyListParams,
        today: NaiveDate,
    ) -> Result<Vec<FacultyCount>, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        UniversityService::faculties_matching(store, &params.to_filter(today)?).await
    }

    pub async fn student_changelist<S>(
        store: &S,
        params: &StudentListParams,
        today: NaiveDate,
    ) -> Result<Vec<StudentView>, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let filter = params.to_filter(today)?;
        let rows = store.list_students(&filter, None).await?;
        Ok(rows
            .into_iter()
            .map(|(s, f)| StudentView::new(s, f, today))
            .collect())
    }

    pub async fn faculty_detail<S>(store: &S, id: i64) -> Result<FacultyCount, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let faculty = store
            .get_faculty(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty {}", id)))?;
        let student_count = store.count_students(&StudentFilter::active_in(id)).await?;
        Ok(FacultyCount {
            faculty,
            student_count,
        })
    }

    pub async fn create_faculty<S>(store: &S, body: Value) -> Result<Faculty, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let new: NewFaculty = parse_body(body, FACULTY_RULES, false)?;
        let faculty = store.create_faculty(&new).await?;
        tracing::info!(faculty_id = faculty.id, name = %faculty.name, "faculty created");
        Ok(faculty)
    }

    pub async fn update_faculty<S>(store: &S, id: i64, body: Value) -> Result<Faculty, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let patch: FacultyPatch = parse_body(body, FACULTY_RULES, true)?;
        store
            .update_faculty(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty {}", id)))
    }

    /// Deletes the faculty together with its students.
    pub async fn delete_faculty<S>(store: &S, id: i64) -> Result<(), AppError>
    where
        S: UniversityStore + ?Sized,
    {
        if !store.delete_faculty(id).await? {
            return Err(AppError::NotFound(format!("faculty {}", id)));
        }
        tracing::info!(faculty_id = id, "faculty deleted");
        Ok(())
    }

    pub async fn student_detail<S>(store: &S, id: i64, today: NaiveDate) -> Result<StudentView, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let (student, faculty) = store
            .get_student(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        Ok(StudentView::new(student, faculty, today))
    }

    pub async fn create_student<S>(store: &S, body: Value, today: NaiveDate) -> Result<StudentView, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let new: NewStudent = parse_body(body, STUDENT_RULES, false)?;
        let student = store.create_student(&new).await?;
        tracing::info!(id = student.id, student_id = %student.student_id, "student created");
        Self::student_detail(store, student.id, today).await
    }

    pub async fn update_student<S>(
        store: &S,
        id: i64,
        body: Value,
        today: NaiveDate,
    ) -> Result<StudentView, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let patch: StudentPatch = parse_body(body, STUDENT_RULES, true)?;
        store
            .update_student(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        Self::student_detail(store, id, today).await
    }

    pub async fn delete_student<S>(store: &S, id: i64) -> Result<(), AppError>
    where
        S: UniversityStore + ?Sized,
    {
        if !store.delete_student(id).await? {
            return Err(AppError::NotFound(format!("student {}", id)));
        }
        Ok(())
    }

    /// Applies `action` to the selected students and reports how many rows changed.
    pub async fn run_action<S>(store: &S, action: &str, req: ActionRequest) -> Result<ActionResult, AppError>
    where
        S: UniversityStore + ?Sized,
    {
        let action: BulkAction = action.parse()?;
        let mut ids = req.ids;
        ids.sort_unstable();
        ids.dedup();
        let updated = store.set_students_active(&ids, action.target()).await?;
        tracing::info!(action = action.name(), selected = ids.len(), updated, "bulk action");
        Ok(ActionResult {
            action: action.name(),
            updated,
            message: action.message(updated),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{seed, today};
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn mark_inactive_flips_exactly_the_selection() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        let selection = vec![ids.students[0], ids.students[1]];
        let res = AdminService::run_action(&store, "mark_inactive", ActionRequest { ids: selection.clone() })
            .await
            .unwrap();
        assert_eq!(res.updated, 2);
        assert_eq!(res.message, "2 students were successfully marked as inactive.");
        for id in selection {
            let view = AdminService::student_detail(&store, id, today()).await.unwrap();
            assert!(!view.student.is_active);
        }
        let hopper = AdminService::student_detail(&store, ids.students[2], today()).await.unwrap();
        assert!(hopper.student.is_active);
    }

    #[tokio::test]
    async fn unknown_action_is_bad_request() {
        let store = MemoryStore::new();
        let err = AdminService::run_action(&store, "promote", ActionRequest { ids: vec![1] }).await;
        assert!(matches!(err, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn search_requires_every_term() {
        let store = MemoryStore::new();
        seed(&store).await;
        let params = StudentListParams {
            q: Some("ada lovelace".into()),
            ..Default::default()
        };
        let rows = AdminService::student_changelist(&store, &params, today()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "Ada Lovelace");

        let params = StudentListParams {
            q: Some("ada curie".into()),
            ..Default::default()
        };
        assert!(AdminService::student_changelist(&store, &params, today()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn student_filters_combine() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        let params = StudentListParams {
            faculty: Some(ids.science),
            is_active: Some(false),
            ..Default::default()
        };
        let rows = AdminService::student_changelist(&store, &params, today()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student.last_name, "Turing");

        let params = StudentListParams {
            graduation_year: Some(2029),
            enrollment_date: Some("this_year".into()),
            ..Default::default()
        };
        assert_eq!(AdminService::student_changelist(&store, &params, today()).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn faculty_changelist_filters_by_established_date() {
        let store = MemoryStore::new();
        seed(&store).await;
        let params = FacultyListParams {
            q: None,
            established_date: Some("past_7_days".into()),
        };
        let rows = AdminService::faculty_changelist(&store, &params, today()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].faculty.name, "Engineering");
        assert_eq!(rows[0].student_count, 1);

        let params = FacultyListParams {
            q: Some("woolf".into()),
            established_date: Some("null".into()),
        };
        let rows = AdminService::faculty_changelist(&store, &params, today()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].faculty.name, "Arts");
    }

    #[tokio::test]
    async fn create_validates_and_detects_duplicates() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        let body = json!({
            "first_name": "Emmy",
            "last_name": "Noether",
            "email": "emmy@uni.edu",
            "student_id": "S-010",
            "faculty_id": ids.arts,
            "enrollment_date": "2026-09-01",
            "date_of_birth": "1999-03-23"
        });
        let view = AdminService::create_student(&store, body.clone(), today()).await.unwrap();
        assert_eq!(view.faculty.name, "Arts");
        assert_eq!(view.age, Some(27));
        assert!(view.student.is_active);

        let dup = AdminService::create_student(&store, body, today()).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        let missing = json!({"first_name": "X"});
        assert!(matches!(
            AdminService::create_student(&store, missing, today()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn null_optional_text_is_stored_empty() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        let faculty = AdminService::create_faculty(&store, json!({"name": "Law", "dean": null}))
            .await
            .unwrap();
        assert_eq!(faculty.dean, "");

        let body = json!({
            "first_name": "Rosalind",
            "last_name": "Franklin",
            "email": "rosalind@uni.edu",
            "student_id": "S-011",
            "faculty_id": ids.science,
            "enrollment_date": "2026-09-01",
            "phone_number": null,
            "address": null
        });
        let view = AdminService::create_student(&store, body, today()).await.unwrap();
        assert_eq!(view.student.phone_number, "");

        let view = AdminService::update_student(&store, ids.students[0], json!({"address": null}), today())
            .await
            .unwrap();
        assert_eq!(view.student.address, "");
    }

    #[tokio::test]
    async fn patch_updates_and_rejects_readonly() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        let id = ids.students[0];
        let view = AdminService::update_student(&store, id, json!({"is_active": false}), today())
            .await
            .unwrap();
        assert!(!view.student.is_active);
        assert!(view.student.updated_at >= view.student.created_at);

        let err = AdminService::update_student(&store, id, json!({"created_at": "2020-01-01T00:00:00Z"}), today()).await;
        assert!(matches!(err, Err(AppError::BadRequest(_))));

        let err = AdminService::update_student(&store, 999, json!({"is_active": true}), today()).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_faculty_removes_its_students() {
        let store = MemoryStore::new();
        let ids = seed(&store).await;
        AdminService::delete_faculty(&store, ids.science).await.unwrap();
        assert!(matches!(
            AdminService::student_detail(&store, ids.students[0], today()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            AdminService::delete_faculty(&store, ids.science).await,
            Err(AppError::NotFound(_))
        ));
        let detail = AdminService::faculty_detail(&store, ids.engineering).await.unwrap();
        assert_eq!(detail.student_count, 1);
    }
}
