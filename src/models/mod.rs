//! Persistent records and the input types used to create and patch them.

mod faculty;
mod post;
mod student;

pub use faculty::{Faculty, FacultyPatch, NewFaculty};
pub use post::{NewPost, Post, PostForm, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use student::{age_on, NewStudent, Student, StudentPatch, StudentView};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`) in PATCH bodies.
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Optional text columns are stored as `""`; an explicit `null` means the same.
pub(crate) fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// PATCH variant of [`null_as_empty`]: a present `null` clears the column.
pub(crate) fn null_as_empty_patch<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(de)?.unwrap_or_default()))
}
