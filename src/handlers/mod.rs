//! HTTP handlers for the university pages, the blog pages and the admin surface.

pub mod admin;
pub mod blog;
pub mod university;
