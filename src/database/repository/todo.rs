use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{PgStore, TodoStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewTodo, Todo, TodoRow};
use crate::database::query_builder::{self, bind_params_as, QueryBuilder};
use crate::filter::TodoFilter;

#[async_trait]
impl TodoStore for PgStore {
    async fn insert_with_owner(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO "todos" ("id", "title", "contents", "weather", "user_id", "created_at", "modified_at")
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.contents)
        .bind(&todo.weather)
        .bind(todo.user_id)
        .bind(todo.created_at)
        .bind(todo.modified_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(r#"INSERT INTO "managers" ("id", "todo_id", "user_id") VALUES ($1, $2, $3)"#)
            .bind(Uuid::new_v4())
            .bind(todo.id)
            .bind(todo.user_id)
            .execute(&mut *tx)
            .await?;

        let by_id = TodoFilter::by_id_sql(todo.id);
        let row = bind_params_as(sqlx::query_as::<_, TodoRow>(&by_id.query), &by_id.params)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Created todo {} with owner {} as manager", todo.id, todo.user_id);
        Ok(row.into())
    }

    async fn find_by_id_with_user(&self, id: Uuid) -> Result<Option<Todo>, DatabaseError> {
        let row = QueryBuilder::<TodoRow>::new(TodoFilter::by_id_sql(id))
            .select_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    async fn search(&self, filter: &TodoFilter) -> Result<Vec<Todo>, DatabaseError> {
        let rows = QueryBuilder::<TodoRow>::new(filter.to_sql())
            .select_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn count(&self, filter: &TodoFilter) -> Result<i64, DatabaseError> {
        query_builder::count(filter.to_count_sql(), &self.pool).await
    }
}
