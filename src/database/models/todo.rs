use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::{User, UserRole};

/// A todo with its owning user already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// One row of `todos t INNER JOIN users u`
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_nickname: String,
    #[sqlx(try_from = "String")]
    pub user_role: UserRole,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            contents: row.contents,
            weather: row.weather,
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
pub struct NewTodo {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl NewTodo {
    pub fn new(title: String, contents: String, weather: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            contents,
            weather,
            user_id,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_user(self, user: User) -> Todo {
        Todo {
            id: self.id,
            title: self.title,
            contents: self.contents,
            weather: self.weather,
            user,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}
