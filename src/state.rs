use std::sync::Arc;

use crate::client::WeatherProvider;
use crate::database::repository::{CommentStore, HealthCheck, ManagerStore, TodoStore, UserStore};
use crate::services::{
    AuthService, CommentAdminService, CommentService, ManagerService, TodoService, UserAdminService, UserService,
};

/// Shared handler state; cloning only bumps reference counts
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub user_admin: Arc<UserAdminService>,
    pub todos: Arc<TodoService>,
    pub comments: Arc<CommentService>,
    pub comment_admin: Arc<CommentAdminService>,
    pub managers: Arc<ManagerService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        comments: Arc<dyn CommentStore>,
        managers: Arc<dyn ManagerStore>,
        health: Arc<dyn HealthCheck>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone())),
            users: Arc::new(UserService::new(users.clone())),
            user_admin: Arc::new(UserAdminService::new(users.clone())),
            todos: Arc::new(TodoService::new(todos.clone(), weather)),
            comments: Arc::new(CommentService::new(comments.clone(), todos.clone())),
            comment_admin: Arc::new(CommentAdminService::new(comments)),
            managers: Arc::new(ManagerService::new(managers, todos, users)),
            health,
        }
    }
}
