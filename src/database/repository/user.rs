use async_trait::async_trait;
use uuid::Uuid;

use super::{PgStore, UserStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserRecord, UserRole};

const USER_RECORD_COLUMNS: &str =
    r#""id", "email", "nickname", "user_role", "password", "created_at", "modified_at""#;

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let created = sqlx::query_as::<_, User>(
            r#"INSERT INTO "users" ("id", "email", "password", "nickname", "user_role", "created_at", "modified_at")
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING "id", "email", "nickname", "user_role""#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.nickname)
        .bind(user.user_role.as_str())
        .bind(user.created_at)
        .bind(user.modified_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError> {
        let query = format!(r#"SELECT {} FROM "users" WHERE "id" = $1"#, USER_RECORD_COLUMNS);
        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let query = format!(r#"SELECT {} FROM "users" WHERE "email" = $1"#, USER_RECORD_COLUMNS);
        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM "users" WHERE "email" = $1)"#)
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"UPDATE "users" SET "password" = $2, "modified_at" = now() WHERE "id" = $1"#)
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"UPDATE "users" SET "user_role" = $2, "modified_at" = now() WHERE "id" = $1"#)
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
