//! Parameterized SQL builder and bind values for PostgreSQL.

pub mod builder;
pub mod params;
pub use builder::QueryBuf;
pub use params::{bind_all, PgBindValue};
