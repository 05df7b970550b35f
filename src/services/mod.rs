pub mod auth_service;
pub mod comment_service;
pub mod error;
pub mod manager_service;
pub mod todo_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use comment_service::{CommentAdminService, CommentResponse, CommentService};
pub use error::{ServiceError, ServiceResult};
pub use manager_service::{ManagerResponse, ManagerService};
pub use todo_service::{Page, TodoQuery, TodoResponse, TodoSaveResponse, TodoService};
pub use user_service::{UserAdminService, UserService};
