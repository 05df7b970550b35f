use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::{User, UserRole};

/// A user registered as responsible for a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub id: Uuid,
    pub todo_id: Uuid,
    pub user: User,
}

#[derive(Debug, Clone, FromRow)]
pub struct ManagerRow {
    pub id: Uuid,
    pub todo_id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_nickname: String,
    #[sqlx(try_from = "String")]
    pub user_role: UserRole,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: row.id,
            todo_id: row.todo_id,
            user: User {
                id: row.user_id,
                email: row.user_email,
                nickname: row.user_nickname,
                user_role: row.user_role,
            },
        }
    }
}
