use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A university faculty (department). Owns many students; deleting it deletes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    /// Empty when not provided.
    pub description: String,
    pub established_date: Option<NaiveDate>,
    /// Empty when not provided.
    pub dean: String,
}

impl std::fmt::Display for Faculty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFaculty {
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub established_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub dean: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FacultyPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_empty_patch")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub established_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::null_as_empty_patch")]
    pub dean: Option<String>,
}

impl FacultyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.established_date.is_none()
            && self.dean.is_none()
    }

    pub fn apply(&self, faculty: &mut Faculty) {
        if let Some(name) = &self.name {
            faculty.name = name.clone();
        }
        if let Some(description) = &self.description {
            faculty.description = description.clone();
        }
        if let Some(date) = self.established_date {
            faculty.established_date = date;
        }
        if let Some(dean) = &self.dean {
            faculty.dean = dean.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let clear: FacultyPatch = serde_json::from_str(r#"{"established_date": null}"#).unwrap();
        assert_eq!(clear.established_date, Some(None));

        let untouched: FacultyPatch = serde_json::from_str(r#"{"dean": "Dr. Ada"}"#).unwrap();
        assert_eq!(untouched.established_date, None);
        assert!(!untouched.is_empty());

        let mut faculty = Faculty {
            id: 1,
            name: "Science".into(),
            description: String::new(),
            established_date: NaiveDate::from_ymd_opt(1901, 9, 1),
            dean: String::new(),
        };
        untouched.apply(&mut faculty);
        assert_eq!(faculty.dean, "Dr. Ada");
        assert!(faculty.established_date.is_some());
        clear.apply(&mut faculty);
        assert!(faculty.established_date.is_none());
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let new: NewFaculty =
            serde_json::from_str(r#"{"name": "Law", "dean": null, "description": null}"#).unwrap();
        assert_eq!(new.dean, "");
        assert_eq!(new.description, "");

        let patch: FacultyPatch = serde_json::from_str(r#"{"dean": null}"#).unwrap();
        assert_eq!(patch.dean.as_deref(), Some(""));
        assert_eq!(patch.description, None);
    }
}
