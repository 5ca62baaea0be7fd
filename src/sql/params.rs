//! Typed bind values collected while building a query.

use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to a `$n` placeholder. Nullable variants keep their SQL type when `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Bool(bool),
    Int(Option<i32>),
    BigInt(i64),
    BigIntArray(Vec<i64>),
    Text(String),
    Date(Option<NaiveDate>),
}

/// Binds `params` in order onto `query`.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [PgBindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            PgBindValue::Bool(b) => query.bind(*b),
            PgBindValue::Int(n) => query.bind(*n),
            PgBindValue::BigInt(n) => query.bind(*n),
            PgBindValue::BigIntArray(v) => query.bind(v.as_slice()),
            PgBindValue::Text(s) => query.bind(s.as_str()),
            PgBindValue::Date(d) => query.bind(*d),
        };
    }
    query
}
