use async_trait::async_trait;
use uuid::Uuid;

use super::{ManagerStore, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Manager, ManagerRow, JOINED_USER_COLUMNS};

const MANAGER_COLUMNS: &str = r#"m."id", m."todo_id""#;

#[async_trait]
impl ManagerStore for PgStore {
    async fn insert(&self, todo_id: Uuid, user_id: Uuid) -> Result<Manager, DatabaseError> {
        let query = format!(
            r#"WITH m AS (
                   INSERT INTO "managers" ("id", "todo_id", "user_id") VALUES ($1, $2, $3)
                   RETURNING *
               )
               SELECT {}, {} FROM m INNER JOIN "users" u ON u."id" = m."user_id""#,
            MANAGER_COLUMNS, JOINED_USER_COLUMNS
        );
        let row = sqlx::query_as::<_, ManagerRow>(&query)
            .bind(Uuid::new_v4())
            .bind(todo_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn exists(&self, todo_id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM "managers" WHERE "todo_id" = $1 AND "user_id" = $2)"#,
        )
        .bind(todo_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, DatabaseError> {
        let query = format!(
            r#"SELECT {}, {} FROM "managers" m
               INNER JOIN "users" u ON u."id" = m."user_id"
               WHERE m."id" = $1"#,
            MANAGER_COLUMNS, JOINED_USER_COLUMNS
        );
        let row = sqlx::query_as::<_, ManagerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Manager::from))
    }

    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Manager>, DatabaseError> {
        let query = format!(
            r#"SELECT {}, {} FROM "managers" m
               INNER JOIN "users" u ON u."id" = m."user_id"
               WHERE m."todo_id" = $1
               ORDER BY u."nickname" ASC, m."id" ASC"#,
            MANAGER_COLUMNS, JOINED_USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, ManagerRow>(&query)
            .bind(todo_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Manager::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"DELETE FROM "managers" WHERE "id" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
