use super::Faculty;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub faculty_id: i64,
    pub enrollment_date: NaiveDate,
    pub graduation_year: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`, or `None` without a date of birth.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.date_of_birth.map(|dob| age_on(dob, today))
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.student_id)
    }
}

/// Completed years between `birth` and `today`: one less while this year's birthday is still ahead.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// A student as rendered to templates and the admin surface: stored fields plus derived ones.
#[derive(Clone, Debug, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    pub full_name: String,
    pub age: Option<i32>,
    pub faculty: Faculty,
}

impl StudentView {
    pub fn new(student: Student, faculty: Faculty, today: NaiveDate) -> Self {
        StudentView {
            full_name: student.full_name(),
            age: student.age_on(today),
            student,
            faculty,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub faculty_id: i64,
    pub enrollment_date: NaiveDate,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub address: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub faculty_id: Option<i64>,
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub graduation_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::null_as_empty_patch")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_empty_patch")]
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.student_id.is_none()
            && self.faculty_id.is_none()
            && self.enrollment_date.is_none()
            && self.graduation_year.is_none()
            && self.date_of_birth.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.is_active.is_none()
    }

    /// Applies the present fields and bumps `updated_at`.
    pub fn apply(&self, student: &mut Student, now: DateTime<Utc>) {
        if let Some(v) = &self.first_name {
            student.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            student.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            student.email = v.clone();
        }
        if let Some(v) = &self.student_id {
            student.student_id = v.clone();
        }
        if let Some(v) = self.faculty_id {
            student.faculty_id = v;
        }
        if let Some(v) = self.enrollment_date {
            student.enrollment_date = v;
        }
        if let Some(v) = self.graduation_year {
            student.graduation_year = v;
        }
        if let Some(v) = self.date_of_birth {
            student.date_of_birth = v;
        }
        if let Some(v) = &self.phone_number {
            student.phone_number = v.clone();
        }
        if let Some(v) = &self.address {
            student.address = v.clone();
        }
        if let Some(v) = self.is_active {
            student.is_active = v;
        }
        student.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(dob: Option<NaiveDate>) -> Student {
        let now = Utc::now();
        Student {
            id: 1,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.edu".into(),
            student_id: "S-001".into(),
            faculty_id: 1,
            enrollment_date: date(2024, 9, 1),
            graduation_year: None,
            date_of_birth: dob,
            phone_number: String::new(),
            address: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn age_counts_completed_years() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2026, 6, 14)), 25);
        assert_eq!(age_on(birth, date(2026, 6, 15)), 26);
        assert_eq!(age_on(birth, date(2026, 12, 1)), 26);
        assert_eq!(age_on(birth, date(2026, 1, 31)), 25);
    }

    #[test]
    fn leap_day_birthday_waits_for_march_first() {
        let birth = date(2004, 2, 29);
        assert_eq!(age_on(birth, date(2025, 2, 28)), 20);
        assert_eq!(age_on(birth, date(2025, 3, 1)), 21);
    }

    #[test]
    fn age_is_absent_without_birth_date() {
        assert_eq!(student(None).age_on(date(2026, 1, 1)), None);
        assert_eq!(student(Some(date(2001, 1, 2))).age_on(date(2026, 1, 1)), Some(24));
    }

    #[test]
    fn display_and_full_name() {
        let s = student(None);
        assert_eq!(s.full_name(), "Grace Hopper");
        assert_eq!(s.to_string(), "Grace Hopper (S-001)");
    }

    #[test]
    fn new_student_defaults_to_active() {
        let body = serde_json::json!({
            "first_name": "Alan",
            "last_name": "Turing",
            "email": "alan@example.edu",
            "student_id": "S-002",
            "faculty_id": 3,
            "enrollment_date": "2025-09-01"
        });
        let s: NewStudent = serde_json::from_value(body).unwrap();
        assert!(s.is_active);
        assert_eq!(s.phone_number, "");
        assert_eq!(s.graduation_year, None);
    }
}
