//! Store traits consumed by the services, plus their PostgreSQL implementation.
//!
//! Every read that returns a todo, comment or manager resolves the related
//! user with a join in the same statement.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, Manager, NewComment, NewTodo, NewUser, Todo, User, UserRecord, UserRole,
};
use crate::filter::TodoFilter;

mod comment;
mod manager;
mod todo;
mod user;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError>;
    /// Returns `false` when no such user exists
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError>;
    /// Returns `false` when no such user exists
    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts the todo and registers its owner as the first manager, atomically
    async fn insert_with_owner(&self, todo: NewTodo) -> Result<Todo, DatabaseError>;
    async fn find_by_id_with_user(&self, id: Uuid) -> Result<Option<Todo>, DatabaseError>;
    async fn search(&self, filter: &TodoFilter) -> Result<Vec<Todo>, DatabaseError>;
    /// Ignores the filter's order and window
    async fn count(&self, filter: &TodoFilter) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: NewComment) -> Result<Comment, DatabaseError>;
    /// Oldest first
    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Comment>, DatabaseError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait ManagerStore: Send + Sync {
    async fn insert(&self, todo_id: Uuid, user_id: Uuid) -> Result<Manager, DatabaseError>;
    async fn exists(&self, todo_id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, DatabaseError>;
    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Manager>, DatabaseError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

/// PostgreSQL implementation of every store trait
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
