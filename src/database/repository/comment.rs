use async_trait::async_trait;
use uuid::Uuid;

use super::{CommentStore, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Comment, CommentRow, NewComment, JOINED_USER_COLUMNS};

const COMMENT_COLUMNS: &str = r#"c."id", c."contents", c."todo_id", c."created_at", c."modified_at""#;

#[async_trait]
impl CommentStore for PgStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        // Insert and read back with the author in one round trip
        let query = format!(
            r#"WITH c AS (
                   INSERT INTO "comments" ("id", "contents", "todo_id", "user_id", "created_at", "modified_at")
                   VALUES ($1, $2, $3, $4, $5, $6)
                   RETURNING *
               )
               SELECT {}, {} FROM c INNER JOIN "users" u ON u."id" = c."user_id""#,
            COMMENT_COLUMNS, JOINED_USER_COLUMNS
        );
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(comment.id)
            .bind(&comment.contents)
            .bind(comment.todo_id)
            .bind(comment.user_id)
            .bind(comment.created_at)
            .bind(comment.modified_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Comment>, DatabaseError> {
        let query = format!(
            r#"SELECT {}, {} FROM "comments" c
               INNER JOIN "users" u ON u."id" = c."user_id"
               WHERE c."todo_id" = $1
               ORDER BY c."created_at" ASC, c."id" ASC"#,
            COMMENT_COLUMNS, JOINED_USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, CommentRow>(&query)
            .bind(todo_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"DELETE FROM "comments" WHERE "id" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
