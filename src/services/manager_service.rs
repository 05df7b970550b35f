use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::AuthUser;
use crate::database::models::{Manager, Todo};
use crate::database::repository::{ManagerStore, TodoStore, UserStore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerResponse {
    pub id: Uuid,
    pub todo_id: Uuid,
    pub user_id: Uuid,
    pub nickname: String,
}

impl From<Manager> for ManagerResponse {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            todo_id: manager.todo_id,
            user_id: manager.user.id,
            nickname: manager.user.nickname,
        }
    }
}

/// Owners delegate a todo to other users; only the owner edits the list.
pub struct ManagerService {
    managers: Arc<dyn ManagerStore>,
    todos: Arc<dyn TodoStore>,
    users: Arc<dyn UserStore>,
}

impl ManagerService {
    pub fn new(managers: Arc<dyn ManagerStore>, todos: Arc<dyn TodoStore>, users: Arc<dyn UserStore>) -> Self {
        Self { managers, todos, users }
    }

    async fn todo(&self, todo_id: Uuid) -> ServiceResult<Todo> {
        self.todos
            .find_by_id_with_user(todo_id)
            .await?
            .ok_or_else(|| ServiceError::invalid(format!("Todo {} not found", todo_id)))
    }

    fn require_owner(auth: &AuthUser, todo: &Todo) -> ServiceResult<()> {
        if todo.user.id != auth.id {
            return Err(ServiceError::invalid("Only the todo's owner can change its managers"));
        }
        Ok(())
    }

    pub async fn save_manager(&self, auth: &AuthUser, todo_id: Uuid, manager_user_id: Uuid) -> ServiceResult<ManagerResponse> {
        let todo = self.todo(todo_id).await?;
        Self::require_owner(auth, &todo)?;

        if self.users.find_by_id(manager_user_id).await?.is_none() {
            return Err(ServiceError::invalid(format!("User {} not found", manager_user_id)));
        }
        if manager_user_id == todo.user.id {
            return Err(ServiceError::invalid("The owner is already a manager"));
        }
        if self.managers.exists(todo_id, manager_user_id).await? {
            return Err(ServiceError::invalid(format!(
                "User {} already manages todo {}",
                manager_user_id, todo_id
            )));
        }

        let manager = self.managers.insert(todo_id, manager_user_id).await?;
        info!("User {} added manager {} to todo {}", auth.id, manager_user_id, todo_id);
        Ok(manager.into())
    }

    pub async fn get_managers(&self, todo_id: Uuid) -> ServiceResult<Vec<ManagerResponse>> {
        self.todo(todo_id).await?;
        let managers = self.managers.find_by_todo_id_with_user(todo_id).await?;
        Ok(managers.into_iter().map(ManagerResponse::from).collect())
    }

    pub async fn delete_manager(&self, auth: &AuthUser, todo_id: Uuid, manager_id: Uuid) -> ServiceResult<()> {
        let todo = self.todo(todo_id).await?;
        Self::require_owner(auth, &todo)?;

        let manager = self
            .managers
            .find_by_id(manager_id)
            .await?
            .filter(|m| m.todo_id == todo_id)
            .ok_or_else(|| ServiceError::invalid(format!("Manager {} not found on todo {}", manager_id, todo_id)))?;

        self.managers.delete(manager.id).await?;
        info!("User {} removed manager {} from todo {}", auth.id, manager.user.id, todo_id);
        Ok(())
    }
}
