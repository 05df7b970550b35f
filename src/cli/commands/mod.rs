pub mod auth;
pub mod comment;
pub mod manager;
pub mod server;
pub mod todo;
