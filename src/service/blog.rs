//! Blog post listing and submission.

use super::validation::{RequestValidator, POST_RULES};
use crate::error::AppError;
use crate::models::{Post, PostForm};
use crate::store::BlogStore;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostsContext {
    pub posts: Vec<Post>,
}

#[derive(Debug, Default, Serialize)]
pub struct MakePostContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Post>,
}

pub struct BlogService;

impl BlogService {
    pub async fn posts<S>(store: &S) -> Result<PostsContext, AppError>
    where
        S: BlogStore + ?Sized,
    {
        Ok(PostsContext {
            posts: store.list_posts().await?,
        })
    }

    /// Inserts one post dated `today`. No duplicate check; only column lengths are enforced.
    pub async fn make_post<S>(store: &S, form: PostForm, today: NaiveDate) -> Result<Post, AppError>
    where
        S: BlogStore + ?Sized,
    {
        let new = form.into_new_post(today);
        RequestValidator::validate_text(
            &[("title", new.title.as_str()), ("description", new.description.as_str())],
            POST_RULES,
        )?;
        let post = store.create_post(&new).await?;
        tracing::info!(post_id = post.id, title = %post.title, "post created");
        Ok(post)
    }
}
