use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::{User, UserRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub contents: String,
    pub todo_id: Uuid,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// One row of `comments c INNER JOIN users u`
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub contents: String,
    pub todo_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_nickname: String,
    #[sqlx(try_from = "String")]
    pub user_role: UserRole,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            contents: row.contents,
            todo_id: row.todo_id,
            user: User {
                id: row.user_id,
                email: row.user_email,
                nickname: row.user_nickname,
                user_role: row.user_role,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub id: Uuid,
    pub contents: String,
    pub todo_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(contents: String, todo_id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            contents,
            todo_id,
            user_id,
            created_at: now,
            modified_at: now,
        }
    }
}
