//! HTML rendering with Tera. Templates are compiled into the binary.

use crate::error::{AppError, ConfigError};
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("university/base.html", include_str!("../templates/university/base.html")),
    ("university/index.html", include_str!("../templates/university/index.html")),
    ("university/faculty.html", include_str!("../templates/university/faculty.html")),
    ("university/students.html", include_str!("../templates/university/students.html")),
    ("university/student_list.html", include_str!("../templates/university/student_list.html")),
    ("university/faculty_select.html", include_str!("../templates/university/faculty_select.html")),
    (
        "university/students_by_faculty.html",
        include_str!("../templates/university/students_by_faculty.html"),
    ),
    ("university/pagination.html", include_str!("../templates/university/pagination.html")),
    ("blog/base.html", include_str!("../templates/blog/base.html")),
    ("blog/index.html", include_str!("../templates/blog/index.html")),
    ("blog/history.html", include_str!("../templates/blog/history.html")),
    ("blog/education.html", include_str!("../templates/blog/education.html")),
    ("blog/hobbies.html", include_str!("../templates/blog/hobbies.html")),
    ("blog/posts.html", include_str!("../templates/blog/posts.html")),
    ("blog/makepost.html", include_str!("../templates/blog/makepost.html")),
];

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, ConfigError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| ConfigError::Template(e.to_string()))?;
        Ok(Renderer { tera })
    }

    /// Renders `template` with the fields of `context` as top-level variables.
    pub fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<Html<String>, AppError> {
        let ctx = Context::from_serialize(context)?;
        Ok(Html(self.tera.render(template, &ctx)?))
    }

    /// Renders a template that needs no data.
    pub fn render_static(&self, template: &str) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(template, &Context::new())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::UniversityService;

    #[test]
    fn all_templates_compile() {
        Renderer::new().unwrap();
    }

    #[test]
    fn renders_home_context() {
        let r = Renderer::new().unwrap();
        let html = r.render("university/index.html", &UniversityService::home()).unwrap().0;
        assert!(html.contains("University Management System"));
        assert!(html.contains("Faculty Management"));
    }

    #[test]
    fn escapes_user_text() {
        let r = Renderer::new().unwrap();
        let ctx = serde_json::json!({
            "posts": [{"id": 1, "title": "<b>hi</b>", "description": "d", "date": "2026-10-19"}]
        });
        let html = r.render("blog/posts.html", &ctx).unwrap().0;
        assert!(html.contains("&lt;b&gt;hi&lt;&#x2F;b&gt;"));
    }
}
