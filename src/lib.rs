//! Campus blog: a university student/faculty site with an admin surface, and a personal blog, on PostgreSQL.

pub mod admin;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod render;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use render::Renderer;
pub use routes::{blog_app, university_app};
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
