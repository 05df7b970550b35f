use sqlx::{self, postgres::{PgArguments, PgRow}, FromRow, PgPool, Postgres, Row};

use crate::database::manager::DatabaseError;
use crate::filter::types::{SqlParam, SqlResult};

/// Runs a generated [`SqlResult`] and maps rows into `T`
pub struct QueryBuilder<T> {
    sql: SqlResult,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(sql: SqlResult) -> Self {
        if crate::config::CONFIG.filter.debug_logging {
            tracing::debug!(query = %sql.query, params = sql.params.len(), "generated query");
        }
        Self {
            sql,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let q = bind_params_as(sqlx::query_as::<_, T>(&self.sql.query), &self.sql.params);
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let q = bind_params_as(sqlx::query_as::<_, T>(&self.sql.query), &self.sql.params);
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }
}

/// Expects a query selecting a single `count` column
pub async fn count(sql: SqlResult, pool: &PgPool) -> Result<i64, DatabaseError> {
    let row = bind_params(sqlx::query(&sql.query), &sql.params).fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

pub fn bind_params<'q>(
    mut q: sqlx::query::Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    for p in params {
        q = match p {
            SqlParam::Text(s) => q.bind(s.clone()),
            SqlParam::Timestamp(ts) => q.bind(*ts),
            SqlParam::Uuid(id) => q.bind(*id),
            SqlParam::BigInt(n) => q.bind(*n),
        };
    }
    q
}

pub fn bind_params_as<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    params: &[SqlParam],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for p in params {
        q = match p {
            SqlParam::Text(s) => q.bind(s.clone()),
            SqlParam::Timestamp(ts) => q.bind(*ts),
            SqlParam::Uuid(id) => q.bind(*id),
            SqlParam::BigInt(n) => q.bind(*n),
        };
    }
    q
}
