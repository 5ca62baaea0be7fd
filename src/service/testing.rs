//! Fixtures shared by service and router tests.

use crate::models::{NewFaculty, NewStudent};
use crate::store::{MemoryStore, UniversityStore};
use chrono::NaiveDate;

pub struct SeedIds {
    pub science: i64,
    pub arts: i64,
    pub engineering: i64,
    /// Lovelace, Curie, Hopper, Turing (inactive), in that order.
    pub students: Vec<i64>,
}

pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn faculty(name: &str, dean: &str, established: Option<NaiveDate>) -> NewFaculty {
    NewFaculty {
        name: name.into(),
        description: format!("The faculty of {}", name.to_lowercase()),
        established_date: established,
        dean: dean.into(),
    }
}

pub fn student(first: &str, last: &str, sid: &str, faculty_id: i64) -> NewStudent {
    NewStudent {
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}.{}@uni.edu", first.to_lowercase(), last.to_lowercase()),
        student_id: sid.into(),
        faculty_id,
        enrollment_date: date(2025, 9, 1),
        graduation_year: Some(2029),
        date_of_birth: None,
        phone_number: String::new(),
        address: String::new(),
        is_active: true,
    }
}

/// Three faculties, four students; Science has two active students and one inactive.
pub async fn seed(store: &MemoryStore) -> SeedIds {
    let science = store
        .create_faculty(&faculty("Science", "Dr. Noether", Some(date(1890, 9, 1))))
        .await
        .unwrap();
    let arts = store
        .create_faculty(&faculty("Arts", "Dr. Woolf", None))
        .await
        .unwrap();
    let engineering = store
        .create_faculty(&faculty("Engineering", "Dr. Brunel", Some(date(2026, 10, 15))))
        .await
        .unwrap();

    let mut curie = student("Marie", "Curie", "S-002", science.id);
    curie.date_of_birth = Some(date(2000, 11, 7));
    let mut turing = student("Alan", "Turing", "S-004", science.id);
    turing.is_active = false;
    turing.graduation_year = Some(2027);

    let mut students = Vec::new();
    for s in [
        student("Ada", "Lovelace", "S-001", science.id),
        curie,
        student("Grace", "Hopper", "S-003", engineering.id),
        turing,
    ] {
        students.push(store.create_student(&s).await.unwrap().id);
    }

    SeedIds {
        science: science.id,
        arts: arts.id,
        engineering: engineering.id,
        students,
    }
}
