//! In-memory stores for unit and router tests.
//!
//! `MemoryStore` answers the same store traits as `PgStore`. Todo searches
//! run through `TodoFilter::matches` so both backends share one notion of
//! which rows a filter selects.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::weather::FixedWeather;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, Manager, NewComment, NewTodo, NewUser, Todo, User, UserRecord, UserRole,
};
use crate::database::repository::{CommentStore, HealthCheck, ManagerStore, TodoStore, UserStore};
use crate::filter::TodoFilter;
use crate::state::AppState;

#[derive(Debug, Clone)]
struct TodoEntry {
    id: Uuid,
    title: String,
    contents: String,
    weather: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentEntry {
    id: Uuid,
    contents: String,
    todo_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ManagerEntry {
    id: Uuid,
    todo_id: Uuid,
    user_id: Uuid,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    todos: Vec<TodoEntry>,
    comments: Vec<CommentEntry>,
    managers: Vec<ManagerEntry>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Result<User, DatabaseError> {
        self.users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone())
            .ok_or_else(|| DatabaseError::QueryError(format!("foreign key violation: user {}", id)))
    }

    fn todo(&self, entry: &TodoEntry) -> Result<Todo, DatabaseError> {
        Ok(Todo {
            id: entry.id,
            title: entry.title.clone(),
            contents: entry.contents.clone(),
            weather: entry.weather.clone(),
            user: self.user(entry.user_id)?,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
        })
    }

    fn manager(&self, entry: &ManagerEntry) -> Result<Manager, DatabaseError> {
        Ok(Manager {
            id: entry.id,
            todo_id: entry.todo_id,
            user: self.user(entry.user_id)?,
        })
    }

    fn comment(&self, entry: &CommentEntry) -> Result<Comment, DatabaseError> {
        Ok(Comment {
            id: entry.id,
            contents: entry.contents.clone(),
            todo_id: entry.todo_id,
            user: self.user(entry.user_id)?,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts a todo with explicit timestamps, bypassing the clock
    pub fn seed_todo(&self, title: &str, weather: &str, user_id: Uuid, modified_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let mut tables = self.lock();
        tables.todos.push(TodoEntry {
            id,
            title: title.to_string(),
            contents: String::new(),
            weather: weather.to_string(),
            user_id,
            created_at: modified_at,
            modified_at,
        });
        tables.managers.push(ManagerEntry { id: Uuid::new_v4(), todo_id: id, user_id });
        id
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.user.email == user.email) {
            return Err(DatabaseError::QueryError(format!("duplicate email {}", user.email)));
        }
        let record = user.into_record();
        let created = record.user.clone();
        tables.users.push(record);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.lock().users.iter().find(|u| u.user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.lock().users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        Ok(self.lock().users.iter().any(|u| u.user.email == email))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError> {
        let mut tables = self.lock();
        match tables.users.iter_mut().find(|u| u.user.id == id) {
            Some(record) => {
                record.password = password_hash.to_string();
                record.modified_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<bool, DatabaseError> {
        let mut tables = self.lock();
        match tables.users.iter_mut().find(|u| u.user.id == id) {
            Some(record) => {
                record.user.user_role = role;
                record.modified_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_with_owner(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let mut tables = self.lock();
        let owner = tables.user(todo.user_id)?;
        tables.todos.push(TodoEntry {
            id: todo.id,
            title: todo.title.clone(),
            contents: todo.contents.clone(),
            weather: todo.weather.clone(),
            user_id: todo.user_id,
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        });
        tables.managers.push(ManagerEntry {
            id: Uuid::new_v4(),
            todo_id: todo.id,
            user_id: todo.user_id,
        });
        Ok(todo.with_user(owner))
    }

    async fn find_by_id_with_user(&self, id: Uuid) -> Result<Option<Todo>, DatabaseError> {
        let tables = self.lock();
        tables
            .todos
            .iter()
            .find(|t| t.id == id)
            .map(|entry| tables.todo(entry))
            .transpose()
    }

    async fn search(&self, filter: &TodoFilter) -> Result<Vec<Todo>, DatabaseError> {
        let tables = self.lock();
        let mut todos = tables
            .todos
            .iter()
            .map(|entry| tables.todo(entry))
            .collect::<Result<Vec<_>, _>>()?;
        todos.retain(|todo| filter.matches(todo));

        if filter.order().is_some() {
            todos.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then(b.id.cmp(&a.id)));
        }

        let offset = filter.offset().unwrap_or(0).max(0) as usize;
        let limit = filter.limit().map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(todos.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &TodoFilter) -> Result<i64, DatabaseError> {
        let tables = self.lock();
        let mut count = 0;
        for entry in &tables.todos {
            if filter.matches(&tables.todo(entry)?) {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let mut tables = self.lock();
        let entry = CommentEntry {
            id: comment.id,
            contents: comment.contents,
            todo_id: comment.todo_id,
            user_id: comment.user_id,
            created_at: comment.created_at,
            modified_at: comment.modified_at,
        };
        let created = tables.comment(&entry)?;
        tables.comments.push(entry);
        Ok(created)
    }

    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Comment>, DatabaseError> {
        let tables = self.lock();
        let mut comments = tables
            .comments
            .iter()
            .filter(|c| c.todo_id == todo_id)
            .map(|entry| tables.comment(entry))
            .collect::<Result<Vec<_>, _>>()?;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() < before)
    }
}

#[async_trait]
impl ManagerStore for MemoryStore {
    async fn insert(&self, todo_id: Uuid, user_id: Uuid) -> Result<Manager, DatabaseError> {
        let mut tables = self.lock();
        if tables.managers.iter().any(|m| m.todo_id == todo_id && m.user_id == user_id) {
            return Err(DatabaseError::QueryError("duplicate manager".to_string()));
        }
        let entry = ManagerEntry { id: Uuid::new_v4(), todo_id, user_id };
        let created = tables.manager(&entry)?;
        tables.managers.push(entry);
        Ok(created)
    }

    async fn exists(&self, todo_id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self
            .lock()
            .managers
            .iter()
            .any(|m| m.todo_id == todo_id && m.user_id == user_id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, DatabaseError> {
        let tables = self.lock();
        tables
            .managers
            .iter()
            .find(|m| m.id == id)
            .map(|entry| tables.manager(entry))
            .transpose()
    }

    async fn find_by_todo_id_with_user(&self, todo_id: Uuid) -> Result<Vec<Manager>, DatabaseError> {
        let tables = self.lock();
        let mut managers = tables
            .managers
            .iter()
            .filter(|m| m.todo_id == todo_id)
            .map(|entry| tables.manager(entry))
            .collect::<Result<Vec<_>, _>>()?;
        managers.sort_by(|a, b| a.user.nickname.cmp(&b.user.nickname).then(a.id.cmp(&b.id)));
        Ok(managers)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.managers.len();
        tables.managers.retain(|m| m.id != id);
        Ok(tables.managers.len() < before)
    }
}

/// Application state wired to a fresh `MemoryStore` and a fixed "Sunny" forecast
pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(FixedWeather::new("Sunny")),
    );
    (state, store)
}
