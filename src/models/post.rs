use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_DESCRIPTION: &str = "Description not available";

/// A blog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

/// Urlencoded body of the post submission form. Either field may be missing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PostForm {
    /// Missing fields take the model defaults; empty strings are kept as submitted.
    pub fn into_new_post(self, today: NaiveDate) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            date: today,
        }
    }
}
