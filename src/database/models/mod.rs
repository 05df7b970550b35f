pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

pub use comment::{Comment, CommentRow, NewComment};
pub use manager::{Manager, ManagerRow};
pub use todo::{NewTodo, Todo, TodoRow};
pub use user::{NewUser, User, UserRecord, UserRole, UserRoleError, JOINED_USER_COLUMNS};
